use derive_more::derive::Display;

#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{} by {}", title, author)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub description: String,
    pub pdf_path: String,
    pub image_path: String,
}
