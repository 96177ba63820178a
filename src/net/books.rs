//! Books REST API client.
//!
//! Thin reqwest wrapper over `/books`. Every request carries the session's
//! access token as a bearer credential. URL building and body parsing are
//! pure functions so they can be tested without a server.

#[cfg(test)]
#[path = "books_test.rs"]
mod books_test;

use super::error::ApiError;
use super::types::{Book, BookId, BookStatus, NewBook, StatusFilter, StatusUpdate};

/// Operations the book list needs from the backend.
#[allow(async_fn_in_trait)]
pub trait BooksApi {
    /// `GET /books[?status_filter=..]`.
    async fn list(&self, token: &str, filter: StatusFilter) -> Result<Vec<Book>, ApiError>;

    /// `POST /books`. The response body (created book or echo) is not used.
    async fn create(&self, token: &str, book: &NewBook) -> Result<(), ApiError>;

    /// `PATCH /books/{id}` with `{status}`.
    async fn update_status(&self, token: &str, id: &BookId, status: BookStatus) -> Result<(), ApiError>;

    /// `DELETE /books/{id}`.
    async fn delete(&self, token: &str, id: &BookId) -> Result<(), ApiError>;
}

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Clone, Debug)]
pub struct HttpBooksApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpBooksApi {
    /// `base_url` must not end with a slash (see `AppConfig`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { http: reqwest::Client::new(), base_url: base_url.into() }
    }

    async fn send(&self, request: reqwest::RequestBuilder, token: &str) -> Result<String, ApiError> {
        let response = request
            .header(reqwest::header::AUTHORIZATION, bearer(token))
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::from_response(status.as_u16(), &text));
        }
        Ok(text)
    }
}

impl BooksApi for HttpBooksApi {
    async fn list(&self, token: &str, filter: StatusFilter) -> Result<Vec<Book>, ApiError> {
        let url = books_endpoint(&self.base_url, filter);
        let text = self.send(self.http.get(url), token).await?;
        parse_book_list(&text)
    }

    async fn create(&self, token: &str, book: &NewBook) -> Result<(), ApiError> {
        let url = books_endpoint(&self.base_url, StatusFilter::All);
        self.send(self.http.post(url).json(book), token).await?;
        Ok(())
    }

    async fn update_status(&self, token: &str, id: &BookId, status: BookStatus) -> Result<(), ApiError> {
        let url = book_endpoint(&self.base_url, id)?;
        self.send(self.http.patch(url).json(&StatusUpdate { status }), token)
            .await?;
        Ok(())
    }

    async fn delete(&self, token: &str, id: &BookId) -> Result<(), ApiError> {
        let url = book_endpoint(&self.base_url, id)?;
        self.send(self.http.delete(url), token).await?;
        Ok(())
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

fn books_endpoint(base_url: &str, filter: StatusFilter) -> String {
    match filter.query_value() {
        Some(status) => format!("{base_url}/books?status_filter={status}"),
        None => format!("{base_url}/books"),
    }
}

/// `{base}/books/{id}` with the id percent-encoded as one path segment.
fn book_endpoint(base_url: &str, id: &BookId) -> Result<reqwest::Url, ApiError> {
    let mut url =
        reqwest::Url::parse(base_url).map_err(|e| ApiError::Request(format!("invalid API URL {base_url}: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| ApiError::Request(format!("API URL {base_url} cannot take a path")))?
        .pop_if_empty()
        .push("books")
        .push(&id.to_string());
    Ok(url)
}

fn parse_book_list(text: &str) -> Result<Vec<Book>, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::Parse(e.to_string()))
}
