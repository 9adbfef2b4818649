//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// User-facing page copy; store and template failures are not echoed
    /// to the browser.
    fn page_copy(&self) -> (&'static str, &'static str, &'static str) {
        match self {
            AppError::NotFound => (
                "That record no longer exists. It may have been deleted by another user.",
                "/vehicles",
                "Back to the stock list",
            ),
            AppError::Database(_) => (
                "The record store did not respond. Nothing was changed; try the action again.",
                "/",
                "Back to the dashboard",
            ),
            AppError::Template(_) | AppError::Internal(_) => (
                "Something went wrong rendering this page.",
                "/",
                "Back to the dashboard",
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::NotFound => tracing::debug!("Record not found"),
            AppError::Database(e) => tracing::error!("Database error: {}", e),
            AppError::Template(e) => tracing::error!("Template error: {}", e),
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
        }

        let status = self.status();
        let (detail, link, link_label) = self.page_copy();

        let html = format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>{status} - MFI Motor Group</title>
</head>
<body style="font-family: sans-serif; max-width: 32rem; margin: 4rem auto; color: #111827;">
    <h1>{code}</h1>
    <p>{detail}</p>
    <p><a href="{link}">{link_label}</a></p>
</body>
</html>"#,
            status = status.as_u16(),
            code = status
                .canonical_reason()
                .unwrap_or("Error"),
            detail = detail,
            link = link,
            link_label = link_label,
        );

        (status, Html(html)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let response = AppError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_store_failure_maps_to_500() {
        let response = AppError::Database(sqlx::Error::PoolClosed).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_not_found_links_back_to_stock_list() {
        let (_, link, _) = AppError::NotFound.page_copy();
        assert_eq!(link, "/vehicles");
    }
}
