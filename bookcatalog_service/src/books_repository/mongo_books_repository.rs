use futures_util::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::{Client, Collection};

use crate::api::{Book, BookId, BookInput};
use crate::books_repository::BookRepositoryError::Other;
use crate::books_repository::{parse_book_id, BookRepository, BookRepositoryError};

const BOOKS_COLLECTION: &str = "books";
const BOOK_NAME_FIELD: &str = "bookName";
const AUTHOR_NAME_FIELD: &str = "authorName";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoBooksRepositoryConfig {
    pub url: String,
    pub database_name: String,
}

/// Opens a new client for every operation, nothing is pooled between requests
pub struct MongoBooksRepository {
    config: MongoBooksRepositoryConfig,
}

/// Documents written by other clients may not follow the book shape.
/// `_id` of any type is accepted, numbers and booleans in text fields are rendered as text,
/// anything else makes the document unreadable as a book
fn book_from_document(document: &Document) -> Result<Book, String> {
    let id = match document.get("_id") {
        Some(Bson::ObjectId(id)) => id.to_hex(),
        Some(Bson::String(id)) => id.clone(),
        Some(other) => other.to_string(),
        None => return Err("missing _id".to_string()),
    };
    Ok(Book {
        id,
        book_name: text_field(document, BOOK_NAME_FIELD)?,
        author_name: text_field(document, AUTHOR_NAME_FIELD)?,
    })
}

fn text_field(document: &Document, field: &str) -> Result<Option<String>, String> {
    match document.get(field) {
        None | Some(Bson::Null) | Some(Bson::Undefined) => Ok(None),
        Some(Bson::String(value)) => Ok(Some(value.clone())),
        Some(value @ (Bson::Int32(_) | Bson::Int64(_) | Bson::Double(_) | Bson::Boolean(_))) => {
            Ok(Some(value.to_string()))
        }
        Some(other) => Err(format!("{} has unsupported type {:?}", field, other.element_type())),
    }
}

impl MongoBooksRepository {
    pub fn new(config: MongoBooksRepositoryConfig) -> Self {
        Self { config }
    }

    async fn connect(&self) -> Result<Collection<Document>, BookRepositoryError> {
        tracing::debug!("Connecting to mongodb database {}", self.config.database_name);
        let client = Client::with_uri_str(&self.config.url).await?;
        Ok(client
            .database(&self.config.database_name)
            .collection(BOOKS_COLLECTION))
    }

    /// Round trip to the server, used at startup to report an unreachable store early
    pub async fn ping(&self) -> Result<(), BookRepositoryError> {
        let client = Client::with_uri_str(&self.config.url).await?;
        client
            .database(&self.config.database_name)
            .run_command(doc! {"ping": 1}, None)
            .await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl BookRepository for MongoBooksRepository {
    async fn list_books(&self) -> Result<Vec<Book>, BookRepositoryError> {
        let collection = self.connect().await?;
        let documents: Vec<Document> = collection.find(None, None).await?.try_collect().await?;

        Ok(documents
            .iter()
            .filter_map(|document| match book_from_document(document) {
                Ok(book) => Some(book),
                Err(err) => {
                    tracing::warn!("Skipping document that is not a book: {}", err);
                    None
                }
            })
            .collect())
    }

    async fn add_book(&self, details: BookInput) -> Result<BookId, BookRepositoryError> {
        let collection = self.connect().await?;
        let result = collection
            .insert_one(
                doc! {"bookName": details.book_name, "authorName": details.author_name},
                None,
            )
            .await?;

        let book_id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| Other("Inserted id is not an ObjectId".to_string()))?;

        Ok(book_id.to_hex())
    }

    async fn delete_book(&self, book_id: &str) -> Result<bool, BookRepositoryError> {
        let collection = self.connect().await?;
        let id = parse_book_id(book_id)?;
        let result = collection.delete_one(doc! {"_id": id}, None).await?;
        Ok(result.deleted_count == 1)
    }

    async fn update_book(
        &self,
        book_id: &str,
        details: BookInput,
    ) -> Result<bool, BookRepositoryError> {
        let collection = self.connect().await?;
        let id = parse_book_id(book_id)?;
        let result = collection
            .update_one(
                doc! {"_id": id},
                doc! {"$set": {"bookName": details.book_name, "authorName": details.author_name}},
                None,
            )
            .await?;
        Ok(result.modified_count == 1)
    }
}
