//! HTTP middleware stack for the site.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. CSP nonce (generate per-request nonce for inline scripts)
//! 5. Security headers (CSP built from the nonce, isolation headers)

pub mod csp;
pub mod request_id;
pub mod security_headers;

pub use csp::{CspNonce, csp_nonce_middleware};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use security_headers::security_headers_middleware;
