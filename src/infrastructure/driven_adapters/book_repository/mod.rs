//! Book Repository Implementations

mod postgres;

pub use postgres::PostgresBookRepository;
