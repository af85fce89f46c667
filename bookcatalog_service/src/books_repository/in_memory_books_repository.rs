use mongodb::bson::oid::ObjectId;

use crate::api::{Book, BookId, BookInput};
use crate::books_repository::{parse_book_id, BookRepository, BookRepositoryError};

/// Keeps books in insertion order, ids are generated the same way the store does
#[derive(Default)]
pub struct InMemoryBookRepository {
    books: parking_lot::RwLock<Vec<(ObjectId, BookInput)>>,
}

#[async_trait::async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn list_books(&self) -> Result<Vec<Book>, BookRepositoryError> {
        Ok(self
            .books
            .read()
            .iter()
            .map(|(id, details)| Book {
                id: id.to_hex(),
                book_name: details.book_name.clone(),
                author_name: details.author_name.clone(),
            })
            .collect())
    }

    async fn add_book(&self, details: BookInput) -> Result<BookId, BookRepositoryError> {
        let id = ObjectId::new();
        self.books.write().push((id, details));
        Ok(id.to_hex())
    }

    async fn delete_book(&self, book_id: &str) -> Result<bool, BookRepositoryError> {
        let id = parse_book_id(book_id)?;
        let mut locked_books = self.books.write();
        match locked_books.iter().position(|(stored_id, _)| *stored_id == id) {
            Some(position) => {
                locked_books.remove(position);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_book(
        &self,
        book_id: &str,
        details: BookInput,
    ) -> Result<bool, BookRepositoryError> {
        let id = parse_book_id(book_id)?;
        let mut locked_books = self.books.write();
        match locked_books.iter_mut().find(|(stored_id, _)| *stored_id == id) {
            Some((_, book)) if *book != details => {
                *book = details;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod in_memory_book_repository_tests {
    use crate::api::{Book, BookInput};
    use crate::books_repository::{BookRepository, BookRepositoryError, InMemoryBookRepository};

    fn book_input(book_name: &str, author_name: &str) -> BookInput {
        BookInput {
            book_name: Some(book_name.to_string()),
            author_name: Some(author_name.to_string()),
        }
    }

    #[tokio::test]
    /// Tests if add_book and list_books work correctly and keep insertion order
    async fn test_add_books_and_list_them() {
        let repo = InMemoryBookRepository::default();

        let list = repo.list_books().await.expect("Failed to list books");
        assert_eq!(list, Vec::<Book>::new());

        let id_1 = repo
            .add_book(book_input("Dune", "Herbert"))
            .await
            .expect("Failed to add book");
        let id_2 = repo
            .add_book(BookInput {
                book_name: Some("Solaris".to_string()),
                author_name: None,
            })
            .await
            .expect("Failed to add book");
        assert_ne!(id_1, id_2);

        let list = repo.list_books().await.expect("Failed to list books");
        assert_eq!(
            list,
            vec![
                Book {
                    id: id_1,
                    book_name: Some("Dune".to_string()),
                    author_name: Some("Herbert".to_string()),
                },
                Book {
                    id: id_2,
                    book_name: Some("Solaris".to_string()),
                    author_name: None,
                }
            ]
        );
    }

    #[tokio::test]
    /// Tests that delete removes exactly one book and reports a second delete as not found
    async fn test_add_book_and_delete_it_twice() {
        let repo = InMemoryBookRepository::default();

        let id_to_delete = repo
            .add_book(book_input("Dune", "Herbert"))
            .await
            .expect("Failed to add book");
        let id_to_keep = repo
            .add_book(book_input("Dune", "Herbert"))
            .await
            .expect("Failed to add book");

        assert!(repo
            .delete_book(&id_to_delete)
            .await
            .expect("Failed to delete"));
        // false means nothing was deleted
        assert!(!repo
            .delete_book(&id_to_delete)
            .await
            .expect("Failed to delete"));

        let list = repo.list_books().await.expect("Failed to list books");
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, id_to_keep);
    }

    #[tokio::test]
    /// Tests that update overwrites both fields and that a no-op update reports false
    async fn test_add_book_update_and_list_it() {
        let repo = InMemoryBookRepository::default();
        let not_existing_book = "6650c0ffee0000000000abcd";
        let result = repo
            .update_book(not_existing_book, book_input("a", "b"))
            .await
            .expect("Failed to update");
        assert!(!result);

        let id = repo
            .add_book(book_input("Dune", "Herbert"))
            .await
            .expect("Failed to add book");

        let result = repo
            .update_book(&id, book_input("Dune Messiah", "Frank Herbert"))
            .await
            .expect("Failed to update");
        assert!(result);

        let result = repo
            .update_book(&id, book_input("Dune Messiah", "Frank Herbert"))
            .await
            .expect("Failed to update");
        // same values, nothing modified
        assert!(!result);

        let result = repo
            .update_book(&id, BookInput::default())
            .await
            .expect("Failed to update");
        assert!(result);

        let list = repo.list_books().await.expect("Failed to list books");
        assert_eq!(
            list,
            vec![Book {
                id,
                book_name: None,
                author_name: None,
            }]
        );
    }

    #[tokio::test]
    async fn test_malformed_id_is_an_error() {
        let repo = InMemoryBookRepository::default();

        let deleted = repo.delete_book("not-an-object-id").await;
        assert!(matches!(deleted, Err(BookRepositoryError::InvalidId(..))));

        let updated = repo
            .update_book("12345", book_input("Dune", "Herbert"))
            .await;
        assert!(matches!(updated, Err(BookRepositoryError::InvalidId(..))));
    }
}
