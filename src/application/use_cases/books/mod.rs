//! Book Use Cases
//!
//! Per-book answer generation and book library setup.

mod process_query;
mod setup_books;

pub use process_query::ProcessQueryUseCase;
pub use setup_books::{BookCatalog, BookCatalogEntry, SetupBooksReport, SetupBooksUseCase};
