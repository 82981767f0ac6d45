use crate::domain::Book;
use crate::features::books::query::{SortKey, SortOrder};
use serde::Serialize;

// row as stored; older catalogs may leave the text columns NULL
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct DbBook {
    pub id: i64,
    pub title: String,
    pub author: Option<String>,
    pub description: Option<String>,
    pub pdf_path: Option<String>,
    pub image_path: Option<String>,
}

impl From<DbBook> for Book {
    fn from(db_book: DbBook) -> Self {
        Book {
            id: db_book.id,
            title: db_book.title,
            author: db_book.author.unwrap_or_default(),
            description: db_book.description.unwrap_or_default(),
            pdf_path: db_book.pdf_path.unwrap_or_default(),
            image_path: db_book.image_path.unwrap_or_default(),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct JsonBook {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub description: String,
    pub pdf_path: String,
    pub image_path: String,
}

impl From<Book> for JsonBook {
    fn from(book: Book) -> Self {
        JsonBook {
            id: book.id,
            title: book.title,
            author: book.author,
            description: book.description,
            pdf_path: book.pdf_path,
            image_path: book.image_path,
        }
    }
}

/// One page of a catalog listing.
#[derive(Debug, Clone)]
pub struct BookPage {
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub sort: SortKey,
    pub order: SortOrder,
    pub items: Vec<Book>,
}

#[derive(Serialize)]
pub struct JsonBookPage {
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub sort: SortKey,
    pub order: SortOrder,
    pub items: Vec<JsonBook>,
}

impl From<BookPage> for JsonBookPage {
    fn from(page: BookPage) -> Self {
        JsonBookPage {
            total: page.total,
            page: page.page,
            page_size: page.page_size,
            sort: page.sort,
            order: page.order,
            items: page.items.into_iter().map(JsonBook::from).collect(),
        }
    }
}

#[derive(Serialize)]
pub struct JsonBookSample {
    pub items: Vec<JsonBook>,
}
