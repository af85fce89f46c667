use anyhow::{bail, Context};
use reqwest::StatusCode;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;

use crate::api::{Book, BookAddedResponse, BookId, BookInput, ErrorResponse};

pub struct BookCatalogClient {
    url: String,
    client: ClientWithMiddleware,
}

async fn error_message(response: reqwest::Response) -> String {
    response
        .json::<ErrorResponse>()
        .await
        .map(|error_response| error_response.error)
        .unwrap_or_default()
}

impl BookCatalogClient {
    pub fn new(url: &str) -> anyhow::Result<Self> {
        let reqwest_client = reqwest::Client::builder()
            .build()
            .context("Failed to build reqwest client")?;
        let client = ClientBuilder::new(reqwest_client)
            // Insert the tracing middleware
            .with(TracingMiddleware::default())
            .build();

        Ok(Self {
            url: url.to_string(),
            client,
        })
    }

    /// Calls GET /api/books endpoint
    pub async fn list_books(&self) -> anyhow::Result<Vec<Book>> {
        let response = self
            .client
            .get(format!("{}/api/books", self.url))
            .send()
            .await?;
        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            bail!("Failed to list books {}", error_message(response).await)
        }
    }

    /// Calls POST /api/books endpoint
    /// Returns id assigned to the added book
    pub async fn add_book(&self, book: BookInput) -> anyhow::Result<BookId> {
        let response = self
            .client
            .post(format!("{}/api/books", self.url))
            .json(&book)
            .send()
            .await?;

        if !response.status().is_success() {
            bail!("Failed to add book {}", error_message(response).await)
        }

        let added: BookAddedResponse = response
            .json()
            .await
            .context("Failed to parse add book response")?;
        Ok(added.book_id)
    }

    /// Calls DELETE /api/books/{book_id} endpoint
    /// Returns true if the book was deleted and false if it was not found
    pub async fn delete_book(&self, book_id: &str) -> anyhow::Result<bool> {
        let response = self
            .client
            .delete(format!("{}/api/books/{}", self.url, book_id))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            Ok(false)
        } else if response.status().is_success() {
            Ok(true)
        } else {
            bail!("Failed to delete book {}", error_message(response).await)
        }
    }

    /// Calls PUT /api/books/{book_id} endpoint
    /// Returns false if the book was not found or nothing changed
    pub async fn update_book(&self, book_id: &str, book: BookInput) -> anyhow::Result<bool> {
        let response = self
            .client
            .put(format!("{}/api/books/{}", self.url, book_id))
            .json(&book)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            Ok(false)
        } else if response.status().is_success() {
            Ok(true)
        } else {
            bail!("Failed to update book {}", error_message(response).await)
        }
    }
}
