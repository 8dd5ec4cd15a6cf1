//! Security headers middleware for XSS, clickjacking, and isolation protection.
//!
//! Adds restrictive security headers to all responses. Start locked down and
//! loosen only when specific functionality requires it.

use axum::{
    extract::Request,
    http::{
        HeaderName, HeaderValue,
        header::{
            CACHE_CONTROL, CONTENT_SECURITY_POLICY, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS,
            X_FRAME_OPTIONS,
        },
    },
    middleware::Next,
    response::Response,
};

use super::CspNonce;

/// Origin serving the htmx script.
pub const HTMX_ORIGIN: &str = "https://unpkg.com";

/// Add security headers to all responses.
///
/// Headers applied:
/// - `X-Frame-Options: DENY` - Prevent clickjacking
/// - `X-Content-Type-Options: nosniff` - Prevent MIME sniffing
/// - `Referrer-Policy: no-referrer` - Zero referrer leakage
/// - `Content-Security-Policy` - Strict CSP (see below)
/// - `Permissions-Policy` - Deny sensitive features
/// - `Cache-Control: no-store, max-age=0` - Pages carry a per-load cart session
/// - `Cross-Origin-Opener-Policy: same-origin` - Process isolation
/// - `Cross-Origin-Embedder-Policy: credentialless` - Isolation that still
///   loads upstream menu images
///
/// # CSP Policy
///
/// ```text
/// default-src 'none';
/// script-src 'self' 'nonce-{nonce}' https://unpkg.com 'wasm-unsafe-eval';
/// style-src 'self';
/// font-src 'self';
/// img-src 'self' https:;
/// connect-src 'self';
/// frame-src 'none';
/// object-src 'none';
/// base-uri 'self';
/// form-action 'self';
/// frame-ancestors 'none'
/// ```
pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let nonce = request.extensions().get::<CspNonce>().cloned();
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(REFERRER_POLICY, HeaderValue::from_static("no-referrer"));

    match HeaderValue::from_str(&content_security_policy(nonce.as_ref())) {
        Ok(value) => {
            headers.insert(CONTENT_SECURITY_POLICY, value);
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to build CSP header");
        }
    }

    headers.insert(
        HeaderName::from_static("permissions-policy"),
        HeaderValue::from_static(
            "accelerometer=(), \
             autoplay=(), \
             browsing-topics=(), \
             camera=(), \
             display-capture=(), \
             geolocation=(), \
             gyroscope=(), \
             magnetometer=(), \
             microphone=(), \
             payment=(), \
             usb=(), \
             xr-spatial-tracking=()",
        ),
    );

    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store, max-age=0"));

    headers.insert(
        HeaderName::from_static("cross-origin-opener-policy"),
        HeaderValue::from_static("same-origin"),
    );

    headers.insert(
        HeaderName::from_static("cross-origin-embedder-policy"),
        HeaderValue::from_static("credentialless"),
    );

    response
}

/// Build the CSP, allowing the inline boot script when a nonce is present.
fn content_security_policy(nonce: Option<&CspNonce>) -> String {
    let nonce_source = nonce
        .filter(|n| !n.value().is_empty())
        .map(|n| format!(" {}", n.source()))
        .unwrap_or_default();

    format!(
        "default-src 'none'; \
         script-src 'self'{nonce_source} {HTMX_ORIGIN} 'wasm-unsafe-eval'; \
         style-src 'self'; \
         font-src 'self'; \
         img-src 'self' https:; \
         connect-src 'self'; \
         frame-src 'none'; \
         object-src 'none'; \
         base-uri 'self'; \
         form-action 'self'; \
         frame-ancestors 'none'"
    )
}
