//! Author Repository Implementations

mod postgres;

pub use postgres::PostgresAuthorRepository;
