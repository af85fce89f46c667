use std::time::UNIX_EPOCH;

use serde_json::json;

use bookcatalog_service::api::{Book, BookInput};
use bookcatalog_service::client::BookCatalogClient;

use crate::service_url;

fn unique_suffix() -> u128 {
    std::time::SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos()
}

#[tokio::test]
/// Simple test for the book catalog
/// Creates a book
/// Checks it is listed with a fresh id
/// Deletes it
/// Deletes it again and expects not found
async fn bookcatalog_add_and_delete_e2e_test() {
    let client = BookCatalogClient::new(&service_url()).expect("Failed to create client");

    let known_ids: Vec<String> = client
        .list_books()
        .await
        .expect("Failed to list books")
        .into_iter()
        .map(|book| book.id)
        .collect();

    let book_name = format!("Dune {}", unique_suffix());
    let book_id = client
        .add_book(BookInput {
            book_name: Some(book_name.clone()),
            author_name: Some("Herbert".to_string()),
        })
        .await
        .expect("Failed to add book");
    assert!(!known_ids.contains(&book_id));

    // raw body, to check the field names on the wire
    let books: serde_json::Value = reqwest::get(format!("{}/api/books", service_url()))
        .await
        .expect("Failed to get books")
        .json()
        .await
        .expect("Failed to parse books");
    assert!(books
        .as_array()
        .expect("Books is not an array")
        .contains(&json!({"_id": book_id, "bookName": book_name, "authorName": "Herbert"})));

    assert!(client
        .delete_book(&book_id)
        .await
        .expect("Failed to delete book"));
    assert!(!client
        .delete_book(&book_id)
        .await
        .expect("Failed to delete book"));

    let books = client.list_books().await.expect("Failed to list books");
    assert!(books.iter().all(|book| book.id != book_id));
}

#[tokio::test]
/// Simple test for updating a book
/// Creates a book
/// Updates both fields and checks the listed record, id must stay the same
/// Repeats the same update and expects not found
async fn bookcatalog_update_e2e_test() {
    let client = BookCatalogClient::new(&service_url()).expect("Failed to create client");

    let book_id = client
        .add_book(BookInput {
            book_name: Some("title1".to_string()),
            author_name: Some("Author1".to_string()),
        })
        .await
        .expect("Failed to add book");

    let updated = BookInput {
        book_name: Some(format!("updated title {}", unique_suffix())),
        author_name: Some("Author2".to_string()),
    };
    assert!(client
        .update_book(&book_id, updated.clone())
        .await
        .expect("Failed to update book"));

    let books = client.list_books().await.expect("Failed to list books");
    assert!(books.contains(&Book {
        id: book_id.clone(),
        book_name: updated.book_name.clone(),
        author_name: updated.author_name.clone(),
    }));

    // identical values modify nothing
    assert!(!client
        .update_book(&book_id, updated)
        .await
        .expect("Failed to update book"));

    client
        .delete_book(&book_id)
        .await
        .expect("Failed to delete book");
}
