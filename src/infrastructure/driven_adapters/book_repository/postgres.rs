//! PostgreSQL Book Repository Implementation

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::gateways::{BookRepository, UpsertOutcome};
use crate::domain::models::message::Metadata;
use crate::domain::models::Book;
use crate::shared::errors::RepositoryError;

#[derive(Debug, sqlx::FromRow)]
struct BookRow {
    title: String,
    content: String,
    author: String,
    publication_year: Option<i32>,
    metadata: Json<Metadata>,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Book {
            title: row.title,
            content: row.content,
            author: row.author,
            publication_year: row.publication_year,
            metadata: row.metadata.0,
        }
    }
}

/// PostgreSQL implementation of BookRepository
pub struct PostgresBookRepository {
    pool: PgPool,
}

impl PostgresBookRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepository for PostgresBookRepository {
    async fn find_by_author(&self, author: &str) -> Result<Vec<Book>, RepositoryError> {
        let rows = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT title, content, author, publication_year, metadata
            FROM books
            WHERE author = $1
            ORDER BY title ASC
            "#,
        )
        .bind(author)
        .fetch_all(&self.pool)
        .await
        .inspect_err(|e| tracing::error!(author, error = %e, "Failed to retrieve books"))?;

        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn find_titles_by_author(&self, author: &str) -> Result<Vec<String>, RepositoryError> {
        let titles = sqlx::query_scalar::<_, String>(
            r#"
            SELECT title
            FROM books
            WHERE author = $1
            ORDER BY title ASC
            "#,
        )
        .bind(author)
        .fetch_all(&self.pool)
        .await
        .inspect_err(|e| tracing::error!(author, error = %e, "Failed to retrieve book titles"))?;

        Ok(titles)
    }

    async fn upsert(&self, book: &Book) -> Result<UpsertOutcome, RepositoryError> {
        let inserted = sqlx::query_scalar::<_, bool>(
            r#"
            INSERT INTO books (id, title, author, content, publication_year, metadata)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (author, title) DO UPDATE
            SET content = EXCLUDED.content,
                publication_year = EXCLUDED.publication_year,
                metadata = EXCLUDED.metadata,
                updated_at = NOW()
            RETURNING (xmax = 0)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.content)
        .bind(book.publication_year)
        .bind(Json(&book.metadata))
        .fetch_one(&self.pool)
        .await
        .inspect_err(|e| tracing::error!(title = %book.title, error = %e, "Failed to store book"))?;

        Ok(if inserted {
            UpsertOutcome::Created
        } else {
            UpsertOutcome::Updated
        })
    }
}
