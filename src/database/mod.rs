use crate::domain::Book;
use crate::features::books::query::ListQuery;
use anyhow::Result;
use async_trait::async_trait;

pub mod sqlite;

// a bookrepository can be shared between request handlers
// sqlx::Pool is thread safe, each call checks a connection out and hands it back
// read-only: the catalog is populated outside this server
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Number of books matching the search term, ignoring pagination.
    async fn count_books(&self, search: Option<&str>) -> Result<i64>;
    /// One ordered, paginated slice of the matching books.
    async fn list_books(&self, query: &ListQuery) -> Result<Vec<Book>>;
    async fn random_books(&self, limit: i64) -> Result<Vec<Book>>;
    async fn get_book_by_id(&self, id: i64) -> Result<Option<Book>>;
}
