use crate::database::BookRepository;
use crate::domain::Book;
use crate::features::books::model::DbBook;
use crate::features::books::query::{ListQuery, SortKey};
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Pool, QueryBuilder, Sqlite};

const BOOK_COLUMNS: &str = "SELECT id, title, author, description, pdf_path, image_path FROM books";

pub struct SqliteRepository {
    pool: Pool<Sqlite>,
}

impl SqliteRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepository for SqliteRepository {
    async fn count_books(&self, search: Option<&str>) -> Result<i64> {
        let mut builder = count_query(search);
        let total = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .context("Failed to count books")?;

        Ok(total)
    }

    async fn list_books(&self, query: &ListQuery) -> Result<Vec<Book>> {
        let mut builder = list_query(query);
        let db_books = builder
            .build_query_as::<DbBook>()
            .fetch_all(&self.pool)
            .await
            .context("Failed to list books")?;

        Ok(db_books.into_iter().map(Book::from).collect())
    }

    async fn random_books(&self, limit: i64) -> Result<Vec<Book>> {
        let db_books = sqlx::query_as::<_, DbBook>(&format!(
            "{BOOK_COLUMNS} ORDER BY RANDOM() LIMIT ?"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to sample random books")?;

        Ok(db_books.into_iter().map(Book::from).collect())
    }

    async fn get_book_by_id(&self, id: i64) -> Result<Option<Book>> {
        let db_book_opt =
            sqlx::query_as::<_, DbBook>(&format!("{BOOK_COLUMNS} WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .with_context(|| format!("Failed to load book {}", id))?;

        Ok(db_book_opt.map(Book::from))
    }
}

pub(crate) fn count_query(search: Option<&str>) -> QueryBuilder<'static, Sqlite> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM books");
    push_search_filter(&mut builder, search);
    builder
}

// the only client text that reaches the statement goes through push_bind;
// ORDER BY is assembled from the enum's static column and keyword
pub(crate) fn list_query(query: &ListQuery) -> QueryBuilder<'static, Sqlite> {
    let mut builder = QueryBuilder::new(BOOK_COLUMNS);
    push_search_filter(&mut builder, query.search.as_deref());

    builder
        .push(" ORDER BY ")
        .push(query.sort.column())
        .push(" ")
        .push(query.order.keyword());

    // ties on title/author would otherwise shuffle rows between pages
    if query.sort != SortKey::Id {
        builder.push(", id ASC");
    }

    builder
        .push(" LIMIT ")
        .push_bind(query.page_size)
        .push(" OFFSET ")
        .push_bind(query.offset());

    builder
}

fn push_search_filter(builder: &mut QueryBuilder<'static, Sqlite>, search: Option<&str>) {
    let Some(term) = search else {
        return;
    };

    let pattern = like_pattern(term);
    builder
        .push(" WHERE title LIKE ")
        .push_bind(pattern.clone())
        .push(" ESCAPE '\\' OR author LIKE ")
        .push_bind(pattern.clone())
        .push(" ESCAPE '\\' OR description LIKE ")
        .push_bind(pattern)
        .push(" ESCAPE '\\'");
}

// substring pattern where LIKE wildcards in the term match literally
pub(crate) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
