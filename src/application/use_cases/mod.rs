//! Use Cases
//!
//! Application-specific business rules.
//! Each use case is a single-purpose struct with an execute() method.

pub mod authors;
pub mod books;
pub mod conversations;
pub mod messaging;

pub use authors::{AuthorProfile, GetAuthorUseCase, SetupAuthorUseCase};
pub use books::{ProcessQueryUseCase, SetupBooksUseCase};
pub use conversations::{GetConversationUseCase, ProcessMessageUseCase};
pub use messaging::{HandleDeliveryStatusUseCase, ReceiveMessageUseCase, SendReplyUseCase};
