pub mod assets;
pub mod books;
