//! HTTP implementation of the sportsbook API.

use super::wire::{ErrorBody, GeolocationResponse, TokenResponse};
use super::{
    BetRequest, Credentials, DepositConfirmation, DepositIntent, DepositRequest, SportsbookApi,
};
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::session::Session;
use crate::state::{Account, Bet, Event};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

const IDEMPOTENCY_KEY: &str = "Idempotency-Key";

/// Builder for creating an API client.
pub struct ApiClientBuilder {
    config: ApiConfig,
    http: Option<reqwest::Client>,
}

impl ApiClientBuilder {
    /// Create a new builder with default config.
    pub fn new() -> Self {
        Self {
            config: ApiConfig::default(),
            http: None,
        }
    }

    /// Set the API configuration.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = config;
        self
    }

    /// Reuse an existing HTTP client instead of building one.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Build the API client.
    pub fn build(self) -> Result<ApiClient> {
        let http = match self.http {
            Some(http) => http,
            None => reqwest::Client::builder()
                .timeout(self.config.timeout())
                .build()?,
        };
        Ok(ApiClient {
            base_url: self.config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Sportsbook backend client over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a new API client.
    pub fn new(config: ApiConfig) -> Result<Self> {
        ApiClientBuilder::new().config(config).build()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, session: Option<&Session>) -> Result<T> {
        tracing::debug!("GET {}", path);
        let mut request = self.http.get(self.url(path));
        if let Some(session) = session {
            request = request.header(AUTHORIZATION, session.bearer());
        }
        Ok(Self::send(request).await?.json().await?)
    }

    fn post_request<B>(
        &self,
        path: &str,
        body: &B,
        session: Option<&Session>,
        idempotency_key: Option<Uuid>,
    ) -> reqwest::RequestBuilder
    where
        B: Serialize + ?Sized,
    {
        tracing::debug!("POST {}", path);
        let mut request = self.http.post(self.url(path)).json(body);
        if let Some(session) = session {
            request = request.header(AUTHORIZATION, session.bearer());
        }
        if let Some(key) = idempotency_key {
            request = request.header(IDEMPOTENCY_KEY, key.to_string());
        }
        request
    }

    async fn post<B, T>(
        &self,
        path: &str,
        body: &B,
        session: Option<&Session>,
        idempotency_key: Option<Uuid>,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.post_request(path, body, session, idempotency_key);
        Ok(Self::send(request).await?.json().await?)
    }

    /// POST where only the status matters; any response body is ignored.
    async fn post_no_content<B>(
        &self,
        path: &str,
        body: &B,
        session: Option<&Session>,
        idempotency_key: Option<Uuid>,
    ) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let request = self.post_request(path, body, session, idempotency_key);
        Self::send(request).await?;
        Ok(())
    }

    /// Send the request and turn non-2xx responses into [`Error::Api`].
    async fn send(request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let path = response.url().path().to_string();
        let body = response.text().await.unwrap_or_default();
        let message = ErrorBody::message_from(&body);
        tracing::warn!("Request to {} failed with {}", path, status.as_u16());
        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl SportsbookApi for ApiClient {
    async fn fetch_events(&self) -> Result<Vec<Event>> {
        self.get("/api/events", None).await
    }

    async fn fetch_inplay_events(&self) -> Result<Vec<Event>> {
        self.get("/api/events/inplay", None).await
    }

    async fn check_geolocation(&self) -> Result<bool> {
        let response: GeolocationResponse = self.get("/api/geolocation", None).await?;
        Ok(response.allowed)
    }

    async fn place_bet(&self, session: &Session, request: &BetRequest) -> Result<Bet> {
        self.post("/api/bets", request, Some(session), None).await
    }

    async fn fetch_bets(&self, session: &Session) -> Result<Vec<Bet>> {
        self.get("/api/bets", Some(session)).await
    }

    async fn fetch_account(&self, session: &Session) -> Result<Account> {
        self.get("/api/auth/me", Some(session)).await
    }

    async fn create_deposit(
        &self,
        session: &Session,
        request: &DepositRequest,
    ) -> Result<DepositIntent> {
        self.post(
            "/api/payments/deposit",
            request,
            Some(session),
            Some(request.idempotency_key),
        )
        .await
    }

    async fn confirm_deposit(
        &self,
        session: &Session,
        confirmation: &DepositConfirmation,
    ) -> Result<()> {
        self.post_no_content(
            "/api/payments/deposit/confirm",
            confirmation,
            Some(session),
            Some(confirmation.idempotency_key),
        )
        .await
    }

    async fn login(&self, credentials: &Credentials) -> Result<Session> {
        let response: TokenResponse = self
            .post("/api/auth/login", credentials, None, None)
            .await?;
        Ok(Session::new(response.token))
    }

    async fn register(&self, credentials: &Credentials) -> Result<Session> {
        let response: TokenResponse = self
            .post("/api/auth/register", credentials, None, None)
            .await?;
        Ok(Session::new(response.token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response per connection, after reading the
    /// whole request.
    async fn serve(responses: Vec<&'static str>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            for response in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                read_request(&mut socket).await;
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.unwrap();
            }
        });
        format!("http://{}", addr)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                return;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf);
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text[..end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= end + 4 + length {
                    return;
                }
            }
        }
    }

    fn client(base_url: String) -> ApiClient {
        ApiClient::new(ApiConfig {
            base_url,
            timeout_secs: 5,
            ..ApiConfig::default()
        })
        .unwrap()
    }

    fn confirmation() -> DepositConfirmation {
        DepositConfirmation {
            payment_intent_id: "pi_1".to_string(),
            amount: dec!(20),
            idempotency_key: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = client("http://localhost:5000/".to_string());
        assert_eq!(client.url("/api/events"), "http://localhost:5000/api/events");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let client = client("http://127.0.0.1:9".to_string());
        let err = client.fetch_events().await.unwrap_err();
        assert!(matches!(err, Error::Http(_)));
        assert_eq!(err.user_message("Error fetching events"), "Error fetching events");
    }

    #[tokio::test]
    async fn test_confirm_deposit_accepts_empty_success() {
        let base_url = serve(vec![
            "HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            "HTTP/1.1 204 No Content\r\nConnection: close\r\n\r\n",
        ])
        .await;
        let client = client(base_url);
        let session = Session::new("tok");

        tokio_test::assert_ok!(client.confirm_deposit(&session, &confirmation()).await);
        tokio_test::assert_ok!(client.confirm_deposit(&session, &confirmation()).await);
    }

    #[tokio::test]
    async fn test_confirm_deposit_maps_error_body() {
        let base_url = serve(vec![
            "HTTP/1.1 400 Bad Request\r\nContent-Type: application/json\r\nContent-Length: 24\r\nConnection: close\r\n\r\n{\"msg\":\"Unknown intent\"}",
        ])
        .await;
        let client = client(base_url);

        let err = client
            .confirm_deposit(&Session::new("tok"), &confirmation())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Api { status: 400, .. }));
        assert_eq!(err.user_message("Deposit failed"), "Unknown intent");
    }
}
