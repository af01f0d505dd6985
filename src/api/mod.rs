//! REST API Client
//!
//! Typed bindings to the backend, organized by domain. Every call goes
//! through [`ApiClient::dispatch`], which attaches the CSRF header and maps
//! statuses to [`ApiError`].

mod error;
mod transport;
mod session;
mod auth;
mod types;
mod projects;
mod segments;
mod serials;
mod answers;
mod admin;

#[cfg(test)]
pub mod mock;

use std::sync::Arc;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::AppConfig;

pub use error::ApiError;
pub use transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport, UploadFile};
pub use session::{clear_stored_session, AuthInterceptor, BrowserSession, CSRF_HEADER, OWNER_STORAGE_KEY};
pub use projects::ExportFormat;
pub use types::template_file_name;

/// Characters left as-is in a path segment
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// Percent-encode a user-chosen identifier for use inside a URL path
pub(crate) fn path_segment(id: &str) -> String {
    utf8_percent_encode(id, PATH_SEGMENT).to_string()
}

/// Handle to the backend API
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: Arc<dyn AuthInterceptor>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, session: Arc<dyn AuthInterceptor>) -> Self {
        Self { transport, session }
    }

    /// Client for the running browser app
    pub fn browser(config: &AppConfig) -> Self {
        Self::new(
            Arc::new(ReqwestTransport::new(&config.api_url)),
            Arc::new(BrowserSession),
        )
    }

    /// Send a request, attaching the CSRF token and mapping error statuses.
    ///
    /// A 401 runs the session interceptor before the error is returned,
    /// regardless of which operation issued the request.
    async fn dispatch(&self, mut request: HttpRequest) -> Result<HttpResponse, ApiError> {
        if let Some(token) = self.session.csrf_token() {
            request.headers.push((CSRF_HEADER, token));
        }
        let method = request.method;
        let path = request.path.clone();
        log::debug!("{:?} {}", method, path);

        let response = self.transport.execute(request).await?;
        match response.status {
            200..=299 => Ok(response),
            401 => {
                log::warn!("{:?} {} -> 401", method, path);
                self.session.on_unauthorized();
                Err(ApiError::Unauthorized)
            }
            404 => Err(ApiError::NotFound { path }),
            status => Err(ApiError::Status {
                status,
                message: response.error_message(),
            }),
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T, ApiError> {
        let response = self.dispatch(request).await?;
        Ok(serde_json::from_slice(&response.body)?)
    }

    async fn get<T: DeserializeOwned>(&self, path: impl Into<String>) -> Result<T, ApiError> {
        self.fetch(HttpRequest::new(Method::Get, path)).await
    }

    async fn send<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: impl Into<String>,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)?;
        self.fetch(HttpRequest::new(method, path).json(body)).await
    }

    /// Like [`Self::send`] but ignores the response body
    async fn send_discard<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: impl Into<String>,
        body: Option<&B>,
    ) -> Result<(), ApiError> {
        let mut request = HttpRequest::new(method, path);
        if let Some(body) = body {
            request = request.json(serde_json::to_value(body)?);
        }
        self.dispatch(request).await.map(|_| ())
    }

    async fn get_bytes(&self, path: impl Into<String>) -> Result<Vec<u8>, ApiError> {
        let response = self.dispatch(HttpRequest::new(Method::Get, path)).await?;
        Ok(response.body)
    }

    async fn upload(&self, path: impl Into<String>, file: UploadFile) -> Result<HttpResponse, ApiError> {
        self.dispatch(HttpRequest::new(Method::Post, path).file(file)).await
    }
}
