//! Messaging Gateway Adapters

mod twilio;

pub use twilio::TwilioMessagingGateway;
