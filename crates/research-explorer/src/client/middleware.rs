//! Middleware for the HTTP client.
//!
//! Logs every upstream request. Only method, host, and path are recorded, so query
//! strings and credential headers never reach the logs.

use std::time::Instant;

use http::Extensions;
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next};

/// Request/response logging at `debug` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestLogger;

#[async_trait::async_trait]
impl Middleware for RequestLogger {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let method = req.method().clone();
        let host = req.url().host_str().unwrap_or_default().to_string();
        let path = req.url().path().to_string();
        let started = Instant::now();

        let result = next.run(req, extensions).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(response) => tracing::debug!(
                %method,
                %host,
                %path,
                status = response.status().as_u16(),
                elapsed_ms,
                "Upstream request"
            ),
            Err(e) => tracing::debug!(
                %method,
                %host,
                %path,
                error = %e,
                elapsed_ms,
                "Upstream request failed"
            ),
        }

        result
    }
}
