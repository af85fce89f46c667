use std::sync::Arc;

use actix_web::web::Data;
use actix_web::Error;
use actix_web::HttpResponse;
use paperclip::actix::{
    api_v2_operation,
    web::{self},
};

use crate::api::{
    BookAddedResponse, BookId, ErrorResponse, MessageResponse, BOOK_ADDED_MESSAGE,
    BOOK_DELETED_MESSAGE, BOOK_NOT_FOUND_ERROR, BOOK_UPDATED_MESSAGE, INTERNAL_SERVER_ERROR,
};
use crate::book_body::BookBody;
use crate::books_repository::BookRepository;

fn message(message: &str) -> MessageResponse {
    MessageResponse {
        message: message.to_string(),
    }
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: BOOK_NOT_FOUND_ERROR.to_string(),
    })
}

/// The cause is only logged, callers always get the same body
fn internal_server_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: INTERNAL_SERVER_ERROR.to_string(),
    })
}

#[api_v2_operation]
pub async fn health() -> Result<HttpResponse, Error> {
    Ok(HttpResponse::Ok().finish())
}

#[api_v2_operation]
pub async fn get_all_books(
    books_repository: Data<Arc<dyn BookRepository>>,
) -> Result<HttpResponse, Error> {
    Ok(match books_repository.list_books().await {
        Ok(books) => HttpResponse::Ok().json(books),
        Err(err) => {
            tracing::error!("Error occurred while fetching books: {}", err);
            internal_server_error()
        }
    })
}

#[api_v2_operation]
pub async fn add_book(
    books_repository: Data<Arc<dyn BookRepository>>,
    details: BookBody,
) -> Result<HttpResponse, Error> {
    Ok(
        match books_repository.add_book(details.into_inner()).await {
            Ok(book_id) => HttpResponse::Created().json(BookAddedResponse {
                message: BOOK_ADDED_MESSAGE.to_string(),
                book_id,
            }),
            Err(err) => {
                tracing::error!("Error occurred while adding book: {}", err);
                internal_server_error()
            }
        },
    )
}

#[api_v2_operation]
pub async fn delete_book(
    books_repository: Data<Arc<dyn BookRepository>>,
    book_id: web::Path<BookId>,
) -> Result<HttpResponse, Error> {
    Ok(match books_repository.delete_book(&book_id).await {
        Ok(true) => HttpResponse::Ok().json(message(BOOK_DELETED_MESSAGE)),
        Ok(false) => not_found(),
        Err(err) => {
            tracing::error!("Error occurred while deleting book {}: {}", book_id, err);
            internal_server_error()
        }
    })
}

#[api_v2_operation]
pub async fn update_book(
    books_repository: Data<Arc<dyn BookRepository>>,
    book_id: web::Path<BookId>,
    details: BookBody,
) -> Result<HttpResponse, Error> {
    Ok(
        match books_repository
            .update_book(&book_id, details.into_inner())
            .await
        {
            Ok(true) => HttpResponse::Ok().json(message(BOOK_UPDATED_MESSAGE)),
            // no document modified, either unknown id or the same values
            Ok(false) => not_found(),
            Err(err) => {
                tracing::error!("Error occurred while updating book {}: {}", book_id, err);
                internal_server_error()
            }
        },
    )
}
