use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

/// Hex form of the ObjectId the store assigns to a book
pub type BookId = String;

pub const BOOK_ADDED_MESSAGE: &str = "Book added successfully";
pub const BOOK_DELETED_MESSAGE: &str = "Book deleted successfully";
pub const BOOK_UPDATED_MESSAGE: &str = "Book updated successfully";
pub const BOOK_NOT_FOUND_ERROR: &str = "Book not found";
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
/// Book record as stored in the catalog
pub struct Book {
    #[serde(rename = "_id")]
    pub id: BookId,
    pub book_name: Option<String>,
    pub author_name: Option<String>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
/// Fields accepted by create and update.
/// Nothing is validated, a missing field is written as null
pub struct BookInput {
    pub book_name: Option<String>,
    pub author_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
pub struct BookAddedResponse {
    pub message: String,
    pub book_id: BookId,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct ErrorResponse {
    pub error: String,
}
