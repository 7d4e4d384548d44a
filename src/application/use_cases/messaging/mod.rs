//! Messaging Use Cases
//!
//! Inbound message intake, outbound replies and delivery status callbacks.

mod handle_delivery_status;
mod receive_message;
mod send_reply;

pub use handle_delivery_status::HandleDeliveryStatusUseCase;
pub use receive_message::ReceiveMessageUseCase;
pub use send_reply::SendReplyUseCase;
