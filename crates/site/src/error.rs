//! Handler error type and Sentry breadcrumbs.
//!
//! Handlers report unknown menu items, malformed requests and cart
//! mutations the store refuses. Upstream menu failures never reach a handler; the
//! background loader logs them, captures them to Sentry and leaves the menu
//! in its unavailable state.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use trattoria_core::CartError;

/// Application-level error type for the site.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The cart refused a mutation.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Cart(CartError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Cart(CartError::NegativePrice { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        tracing::debug!(error = %self, %status, "Request rejected");

        (status, self.to_string()).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for cart actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str, data: &[(&str, &str)]) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    for (key, value) in data {
        breadcrumb.data.insert(
            (*key).to_string(),
            serde_json::Value::String((*value).to_string()),
        );
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("menu item 42".to_string());
        assert_eq!(err.to_string(), "Not found: menu item 42");

        let err = AppError::BadRequest("invalid page session".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid page session");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Cart(CartError::NotFound("7".into()))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Cart(CartError::NegativePrice {
                id: "7".into(),
                price: Decimal::new(-1, 0),
            })),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
