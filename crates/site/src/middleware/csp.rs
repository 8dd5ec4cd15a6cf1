//! CSP nonce middleware for the inline module script.
//!
//! The page boots the browser client from a small inline `<script
//! type="module">`. Each request gets a fresh nonce; the template stamps it
//! on that tag and the security headers middleware allows it in the CSP.

use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use base64::{Engine, engine::general_purpose::STANDARD};
use rand::RngCore;

/// A CSP nonce value for inline scripts.
///
/// 128 random bits, base64-encoded.
#[derive(Clone, Debug)]
pub struct CspNonce(pub String);

impl CspNonce {
    /// Generate a new random nonce.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; 16];
        rand::rng().fill_bytes(&mut bytes);
        Self(STANDARD.encode(bytes))
    }

    /// Get the nonce value for use in templates.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }

    /// The `'nonce-...'` source expression for `script-src`.
    #[must_use]
    pub fn source(&self) -> String {
        format!("'nonce-{}'", self.0)
    }
}

/// Middleware that generates a CSP nonce and stores it in request extensions.
///
/// Must wrap `security_headers_middleware` so the nonce is present when the
/// CSP header is built.
pub async fn csp_nonce_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(CspNonce::generate());
    next.run(request).await
}

impl<S> FromRequestParts<S> for CspNonce
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Self>().cloned().unwrap_or_else(|| {
            tracing::warn!(
                "CSP nonce not found in request extensions - middleware may be misconfigured"
            );
            Self(String::new())
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nonce_is_random_base64() {
        let a = CspNonce::generate();
        let b = CspNonce::generate();

        assert_ne!(a.value(), b.value());
        // 16 bytes encode to 24 base64 characters with padding
        assert_eq!(a.value().len(), 24);
        assert!(STANDARD.decode(a.value()).is_ok());
    }

    #[test]
    fn test_source_expression() {
        let nonce = CspNonce("abc=".to_string());
        assert_eq!(nonce.source(), "'nonce-abc='");
    }
}
