//! HTTP client implementation for the Loyverse API.

use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::api::{
    CategoriesService, CustomersService, DiscountsService, EmployeesService, InventoryService,
    ItemsService, ModifiersService, ReceiptsService, WebhooksService,
};
use crate::{ApiError, Error, Result};

use super::config::ClientConfig;
use super::paginated::Paginator;
use super::request::Request;

/// The main client for interacting with the Loyverse API.
///
/// Resource operations are grouped into services returned by accessor
/// methods. Cloning the client is cheap; clones share the same
/// configuration and underlying connection pool.
///
/// # Example
///
/// ```no_run
/// use loyverse_rs::{ClientConfig, LoyverseClient};
/// use loyverse_rs::models::NewCategory;
///
/// # async fn example() -> loyverse_rs::Result<()> {
/// let client = LoyverseClient::new(ClientConfig::new("your-access-token"))?;
///
/// // Every category, across all pages
/// let categories = client.categories().list().await?;
///
/// // Create one
/// let created = client.categories().create(&NewCategory::new("Drinks")).await?;
/// # Ok(())
/// # }
/// ```
pub struct LoyverseClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    http: OnceCell<reqwest::Client>,
    base_url: Url,
    pub(crate) config: ClientConfig,
}

impl LoyverseClient {
    /// Create a client from an explicit configuration.
    ///
    /// Fails with [`Error::Authentication`] when no access token is set, and
    /// with [`Error::UrlParse`] when the base URL is invalid. No network
    /// connection is made here.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.token().is_none() {
            return Err(Error::Authentication(ApiError::with_message(
                "Access token is required",
            )));
        }

        let base_url = Url::parse(&config.base_url())?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http: OnceCell::new(),
                base_url,
                config,
            }),
        })
    }

    /// Create a client with the given token and default settings.
    pub fn with_token(access_token: impl Into<String>) -> Result<Self> {
        Self::new(ClientConfig::new(access_token))
    }

    /// Create a client configured from `LOYVERSE_*` environment variables.
    ///
    /// See [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Get the categories service.
    pub fn categories(&self) -> CategoriesService {
        CategoriesService::new(self.inner.clone())
    }

    /// Get the items service.
    pub fn items(&self) -> ItemsService {
        ItemsService::new(self.inner.clone())
    }

    /// Get the inventory service.
    pub fn inventory(&self) -> InventoryService {
        InventoryService::new(self.inner.clone())
    }

    /// Get the receipts service.
    pub fn receipts(&self) -> ReceiptsService {
        ReceiptsService::new(self.inner.clone())
    }

    /// Get the customers service.
    pub fn customers(&self) -> CustomersService {
        CustomersService::new(self.inner.clone())
    }

    /// Get the discounts service.
    pub fn discounts(&self) -> DiscountsService {
        DiscountsService::new(self.inner.clone())
    }

    /// Get the employees service.
    pub fn employees(&self) -> EmployeesService {
        EmployeesService::new(self.inner.clone())
    }

    /// Get the modifiers service.
    pub fn modifiers(&self) -> ModifiersService {
        ModifiersService::new(self.inner.clone())
    }

    /// Get the webhooks service.
    pub fn webhooks(&self) -> WebhooksService {
        WebhooksService::new(self.inner.clone())
    }

    /// Issue a raw request against any path under the versioned base URL.
    ///
    /// Returns the decoded body on 200/201, `None` on 204, and a typed
    /// error for every other status.
    pub async fn request<Q, B>(
        &self,
        method: Method,
        path: &str,
        query: Option<&Q>,
        body: Option<&B>,
    ) -> Result<Option<Value>>
    where
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let mut request = Request::new(method, path);
        if let Some(query) = query {
            request = request.query(query)?;
        }
        if let Some(body) = body {
            request = request.json(body)?;
        }
        self.inner.send(&request).await
    }

    /// Build a paginator over any list endpoint.
    ///
    /// `data_key` names the response field holding the page's items.
    pub fn paginate<T>(
        &self,
        path: impl Into<String>,
        data_key: impl Into<String>,
    ) -> Paginator<T> {
        Paginator::new(self.inner.clone(), path, data_key)
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }
}

impl ClientInner {
    /// The shared HTTP client, built on first use.
    fn http(&self) -> Result<&reqwest::Client> {
        self.http.get_or_try_init(|| {
            let headers = self.build_headers()?;
            reqwest::Client::builder()
                .timeout(self.config.timeout)
                .connect_timeout(self.config.connect_timeout)
                .user_agent(&self.config.user_agent)
                .default_headers(headers)
                .build()
                .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))
        })
    }

    /// Build default request headers with authentication.
    fn build_headers(&self) -> Result<HeaderMap> {
        let token = self
            .config
            .token()
            .ok_or_else(|| {
                Error::Authentication(ApiError::with_message("Access token is required"))
            })?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| Error::InvalidInput("Invalid token format".to_string()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Ok(headers)
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Make a GET request with query parameters.
    pub(crate) async fn get<Q: Serialize + ?Sized>(&self, path: &str, query: &Q) -> Result<Value> {
        let request = Request::new(Method::GET, path).query(query)?;
        Ok(self.send(&request).await?.unwrap_or(Value::Null))
    }

    /// Make a POST request.
    pub(crate) async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        let request = Request::new(Method::POST, path).json(body)?;
        Ok(self.send(&request).await?.unwrap_or(Value::Null))
    }

    /// Make a PUT request.
    pub(crate) async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        let request = Request::new(Method::PUT, path).json(body)?;
        Ok(self.send(&request).await?.unwrap_or(Value::Null))
    }

    /// Make a DELETE request.
    pub(crate) async fn delete(&self, path: &str) -> Result<Option<Value>> {
        self.send(&Request::new(Method::DELETE, path)).await
    }

    /// Send a request, retrying transient failures per the retry policy.
    pub(crate) async fn send(&self, request: &Request) -> Result<Option<Value>> {
        let http = self.http()?;
        let url = self.url(&request.path);
        let retry = &self.config.retry;
        let method_retryable = retry.should_retry_method(&request.method);
        let mut attempt = 0;

        loop {
            let mut builder = http.request(request.method.clone(), &url);
            if !request.query.is_empty() {
                builder = builder.query(&request.query);
            }
            if let Some(ref body) = request.body {
                builder = builder.json(body);
            }

            let can_retry = method_retryable && attempt < retry.max_retries;

            match builder.send().await {
                Ok(response) => {
                    let status = response.status().as_u16();

                    if can_retry && retry.should_retry_status(status) {
                        let delay = retry_after(&response)
                            .map(|d| d.min(retry.max_backoff))
                            .unwrap_or_else(|| retry.jittered_backoff(attempt));
                        warn!(
                            method = %request.method,
                            path = %request.path,
                            status,
                            "Request failed, attempt {}/{}, retrying in {:?}",
                            attempt + 1,
                            retry.max_retries + 1,
                            delay
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }

                    debug!(
                        method = %request.method,
                        path = %request.path,
                        status,
                        "Request completed"
                    );
                    return self.handle_response(response).await;
                }
                Err(err) if err.is_timeout() && can_retry => {
                    let delay = retry.jittered_backoff(attempt);
                    warn!(
                        method = %request.method,
                        path = %request.path,
                        "Request timeout, attempt {}/{}, retrying in {:?}",
                        attempt + 1,
                        retry.max_retries + 1,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    warn!(
                        method = %request.method,
                        path = %request.path,
                        error = %err,
                        "Request failed"
                    );
                    return Err(Error::transport(err));
                }
            }
        }
    }

    /// Classify a response into a payload or a typed error.
    async fn handle_response(&self, response: reqwest::Response) -> Result<Option<Value>> {
        let status = response.status().as_u16();
        let raw = response.text().await.map_err(Error::transport)?;
        let body = parse_body(&raw);

        match status {
            204 => Ok(None),
            200 | 201 => Ok(body),
            _ => Err(Error::from_response(status, body.as_ref(), &raw)),
        }
    }
}

/// Decode a response body. Non-JSON text is kept as a string value.
fn parse_body(raw: &str) -> Option<Value> {
    if raw.trim().is_empty() {
        return None;
    }
    Some(serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string())))
}

/// Delay requested by the server through `Retry-After`, in whole seconds.
fn retry_after(response: &reqwest::Response) -> Option<Duration> {
    response
        .headers()
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

impl Clone for LoyverseClient {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl std::fmt::Debug for LoyverseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoyverseClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("config", &self.inner.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_token_fails_at_construction() {
        let err = LoyverseClient::new(ClientConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Authentication(_)));
        assert_eq!(err.message(), Some("Access token is required"));

        let err = LoyverseClient::with_token("").unwrap_err();
        assert!(matches!(err, Error::Authentication(_)));
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ClientConfig::new("token").with_api_base_url("not a url");
        assert!(matches!(LoyverseClient::new(config), Err(Error::UrlParse(_))));
    }

    #[test]
    fn test_url_joining() {
        let client = LoyverseClient::with_token("token").unwrap();
        assert_eq!(
            client.inner.url("/categories"),
            "https://api.loyverse.com/v1.0/categories"
        );
        assert_eq!(
            client.inner.url("receipts/1001/refund"),
            "https://api.loyverse.com/v1.0/receipts/1001/refund"
        );
    }

    #[test]
    fn test_http_client_is_built_once() {
        let client = LoyverseClient::with_token("token").unwrap();
        let first = client.inner.http().unwrap() as *const reqwest::Client;
        let second = client.clone().inner.http().unwrap() as *const reqwest::Client;
        assert_eq!(first, second);
    }

    #[test]
    fn test_default_headers() {
        let client = LoyverseClient::with_token("secret-token").unwrap();
        let headers = client.inner.build_headers().unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer secret-token");
        assert!(headers[AUTHORIZATION].is_sensitive());
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(headers[ACCEPT], "application/json");
    }

    #[test]
    fn test_debug_hides_token() {
        let client = LoyverseClient::with_token("secret-token").unwrap();
        assert!(!format!("{:?}", client).contains("secret-token"));
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(""), None);
        assert_eq!(parse_body("  "), None);
        assert_eq!(parse_body(r#"{"a":1}"#), Some(json!({"a": 1})));
        assert_eq!(parse_body("plain text"), Some(json!("plain text")));
    }
}
