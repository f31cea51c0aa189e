use super::error::{decode_envelope, ApiError};
use super::retry::{retry, HttpMethod, RetryPolicy};
use crate::shared::api_utils::{api_base, join_url};
use crate::shared::config::AppConfig;
use crate::system::auth::session::Session;
use contracts::shared::api::{ListQuery, PaginatedData};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::JsValue;
use web_sys::FormData;

/// Whether a request carries the stored bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    Bearer,
    Skip,
}

enum Body {
    Empty,
    Json(String),
    Form(FormData),
}

/// Typed access to the REST backend.
///
/// Every call returns the envelope's `data` or a mapped `ApiError`.
/// Binary downloads bypass the envelope.
#[derive(Clone)]
pub struct ApiClient {
    base: String,
    session: Session,
    get_retries: u32,
}

impl ApiClient {
    pub fn new(base: impl Into<String>, session: Session, get_retries: u32) -> Self {
        Self {
            base: base.into(),
            session,
            get_retries,
        }
    }

    pub fn from_config(session: Session, config: &AppConfig) -> Self {
        Self::new(api_base(), session, config.api.get_retries)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base, path)
    }

    fn builder(&self, method: HttpMethod, url: &str, auth: Auth) -> RequestBuilder {
        let builder = match method {
            HttpMethod::Get => Request::get(url),
            HttpMethod::Post => Request::post(url),
            HttpMethod::Put => Request::put(url),
            HttpMethod::Patch => Request::patch(url),
            HttpMethod::Delete => Request::delete(url),
        };
        match (auth, self.session.access_token()) {
            (Auth::Bearer, Some(token)) => {
                builder.header("Authorization", &format!("Bearer {}", token))
            }
            _ => builder,
        }
    }

    async fn dispatch(
        &self,
        method: HttpMethod,
        url: &str,
        body: &Body,
        auth: Auth,
    ) -> Result<Response, ApiError> {
        log::debug!("{} {}", method.as_str(), url);
        let builder = self.builder(method, url, auth);
        let sent = match body {
            Body::Empty => builder.send().await,
            Body::Json(json) => {
                let request = builder
                    .header("Content-Type", "application/json")
                    .body(json.as_str())
                    .map_err(|e| ApiError::Network(e.to_string()))?;
                request.send().await
            }
            Body::Form(form) => {
                let request = builder
                    .body(JsValue::from(form.clone()))
                    .map_err(|e| ApiError::Network(e.to_string()))?;
                request.send().await
            }
        };
        sent.map_err(|e| ApiError::Network(e.to_string()))
    }

    /// One attempt: send and return the body text of a 2xx response.
    async fn send_text(
        &self,
        method: HttpMethod,
        url: &str,
        body: &Body,
        auth: Auth,
    ) -> Result<String, ApiError> {
        let response = self.dispatch(method, url, body, auth).await?;
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        check_status(&self.session, auth, status, text)
    }

    async fn request_text(
        &self,
        method: HttpMethod,
        path: &str,
        body: Body,
        auth: Auth,
    ) -> Result<String, ApiError> {
        let full = self.url(path);
        let url = full.as_str();
        let body = &body;
        let policy = RetryPolicy::for_method(method, self.get_retries);
        let result = retry(policy, move |_| self.send_text(method, url, body, auth)).await;
        if let Err(e) = &result {
            log::error!("{} {} failed: {:?}", method.as_str(), url, e);
        }
        result
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Body,
    ) -> Result<T, ApiError> {
        let text = self.request_text(method, path, body, Auth::Bearer).await?;
        decode_envelope(&text)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(HttpMethod::Get, path, Body::Empty).await
    }

    /// Paged list endpoint; the query carries the 1-based page.
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &ListQuery,
    ) -> Result<PaginatedData<T>, ApiError> {
        self.get(&with_query(path, query)).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(HttpMethod::Post, path, json_body(body)?).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(HttpMethod::Put, path, json_body(body)?).await
    }

    pub async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(HttpMethod::Patch, path, json_body(body)?).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(HttpMethod::Delete, path, Body::Empty).await
    }

    /// Multipart upload. The browser sets the boundary header itself.
    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        form: FormData,
    ) -> Result<T, ApiError> {
        self.request(HttpMethod::Post, path, Body::Form(form)).await
    }

    /// Raw bytes (invoice PDFs, exports).
    pub async fn download(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        let full = self.url(path);
        let url = full.as_str();
        let policy = RetryPolicy::for_method(HttpMethod::Get, self.get_retries);
        retry(policy, move |_| async move {
            let empty = Body::Empty;
            let response = self
                .dispatch(HttpMethod::Get, url, &empty, Auth::Bearer)
                .await?;
            let status = response.status();
            if !response.ok() {
                let text = response.text().await.unwrap_or_default();
                return check_status(&self.session, Auth::Bearer, status, text).map(|_| Vec::new());
            }
            response
                .binary()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()))
        })
        .await
    }

    /// POST without the bearer token, decoding the body as-is (no envelope).
    pub async fn post_public<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let text = self
            .request_text(HttpMethod::Post, path, json_body(body)?, Auth::Skip)
            .await?;
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

fn json_body<B: Serialize>(body: &B) -> Result<Body, ApiError> {
    serde_json::to_string(body)
        .map(Body::Json)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

pub fn with_query(path: &str, query: &ListQuery) -> String {
    match serde_qs::to_string(query) {
        Ok(qs) if !qs.is_empty() => format!("{}?{}", path, qs),
        _ => path.to_string(),
    }
}

/// Map a finished response. A 401 on an authenticated call ends the session.
fn check_status(
    session: &Session,
    auth: Auth,
    status: u16,
    body: String,
) -> Result<String, ApiError> {
    if (200..300).contains(&status) {
        return Ok(body);
    }
    if status == 401 && auth == Auth::Bearer {
        session.invalidate();
    }
    Err(ApiError::from_status(status, &body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::auth::storage::MemoryStore;
    use contracts::system::auth::TokenPair;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn logged_in() -> Session {
        let session = Session::new(MemoryStore::new());
        session.save_tokens(&TokenPair {
            access_token: "a.b.c".into(),
            refresh_token: "r".into(),
        });
        session
    }

    #[test]
    fn test_success_passes_body_through() {
        let session = logged_in();
        let body = check_status(&session, Auth::Bearer, 200, "{}".into());
        assert_eq!(body.as_deref(), Ok("{}"));
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_unauthorized_clears_credentials_once() {
        let session = logged_in();
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        session.set_unauthorized_hook(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        for _ in 0..3 {
            let result = check_status(&session, Auth::Bearer, 401, String::new());
            assert_eq!(result, Err(ApiError::Unauthorized));
        }
        assert!(!session.is_authenticated());
        assert!(session.refresh_token().is_none());
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unauthorized_on_public_call_keeps_session() {
        let session = logged_in();
        let result = check_status(&session, Auth::Skip, 401, String::new());
        assert_eq!(result, Err(ApiError::Unauthorized));
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_other_statuses_mapped() {
        let session = logged_in();
        assert_eq!(
            check_status(&session, Auth::Bearer, 404, String::new()),
            Err(ApiError::NotFound)
        );
        assert_eq!(
            check_status(&session, Auth::Bearer, 503, String::new()),
            Err(ApiError::ServerUnavailable(503))
        );
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_with_query() {
        let query = ListQuery::new(2, 10, Some("abc"));
        assert_eq!(
            with_query("/api/units", &query),
            "/api/units?page=2&per_page=10&search=abc"
        );
        let query = ListQuery::new(1, 25, Some("  "));
        assert_eq!(with_query("/api/units", &query), "/api/units?page=1&per_page=25");
    }
}
