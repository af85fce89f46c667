pub use in_memory_books_repository::InMemoryBookRepository;
pub use mongo_books_repository::{MongoBooksRepository, MongoBooksRepositoryConfig};

use mongodb::bson::oid::ObjectId;

use crate::api::{Book, BookId, BookInput};

mod in_memory_books_repository;
mod mongo_books_repository;

#[derive(thiserror::Error, Debug)]
pub enum BookRepositoryError {
    #[error("Invalid book id {0}")]
    InvalidId(#[from] mongodb::bson::oid::Error),

    #[error("DatabaseFailure failure {0}")]
    DatabaseFailure(#[from] mongodb::error::Error),

    #[error("Other error {0}")]
    Other(String),
}

#[async_trait::async_trait]
pub trait BookRepository: Send + Sync {
    /// Lists all books in the store's natural order
    async fn list_books(&self) -> Result<Vec<Book>, BookRepositoryError>;
    /// Adds book to repository, returns an id assigned to the book
    async fn add_book(&self, details: BookInput) -> Result<BookId, BookRepositoryError>;
    /// Removes the book, returns true if a book was deleted and false if it was not found
    async fn delete_book(&self, book_id: &str) -> Result<bool, BookRepositoryError>;
    /// Overwrites both fields of the book, returns true only if the stored values changed.
    /// Unknown id and identical values both give false
    async fn update_book(
        &self,
        book_id: &str,
        details: BookInput,
    ) -> Result<bool, BookRepositoryError>;
}

/// Ids that are not valid ObjectIds are reported as errors, not as missing books
fn parse_book_id(book_id: &str) -> Result<ObjectId, BookRepositoryError> {
    Ok(ObjectId::parse_str(book_id)?)
}
