//! Author Use Cases

mod get_author;
mod setup_author;

pub use get_author::{AuthorDetails, GetAuthorUseCase};
pub use setup_author::{AuthorProfile, SetupAuthorUseCase};
