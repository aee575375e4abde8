use std::time::Duration;

use chrono::NaiveDate;
use reqwest::header::COOKIE;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{
    CategoriesByType, DataEnvelope, ErrorEnvelope, Investment, InvestmentCategory, Me, Summary,
    Transaction,
};
use crate::routes::auth::{LogoutResponse, SESSION_COOKIE};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("api error {status}: {code}")]
    Api { status: u16, code: String },

    #[error("missing configuration: {0}")]
    Config(&'static str),
}

impl ClientError {
    /// The server's machine-readable error code, if the server answered.
    pub fn code(&self) -> Option<&str> {
        match self {
            ClientError::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}

/// Talks to the Keuanganku API, carrying the session cookie when one is set.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn from_env() -> Result<Self, ClientError> {
        let base_url = std::env::var("KEUANGANKU_API_URL")
            .map_err(|_| ClientError::Config("KEUANGANKU_API_URL not set"))?;
        let client = Self::new(base_url)?;
        Ok(match std::env::var("KEUANGANKU_TOKEN") {
            Ok(token) => client.with_token(token),
            Err(_) => client,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.header(COOKIE, format!("{}={}", SESSION_COOKIE, token)),
            None => builder,
        }
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }
        let code = match response.json::<ErrorEnvelope>().await {
            Ok(body) => body.error,
            Err(_) => "unknown_error".to_string(),
        };
        Err(ClientError::Api { status: status.as_u16(), code })
    }

    async fn get_data<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let response = self
            .request(reqwest::Method::GET, path)
            .query(query)
            .send()
            .await?;
        let envelope: DataEnvelope<T> = Self::decode(response).await?;
        Ok(envelope.data)
    }

    pub async fn me(&self) -> Result<Me, ClientError> {
        self.get_data("/api/auth/me", &[]).await
    }

    pub async fn investment_categories(&self) -> Result<Vec<InvestmentCategory>, ClientError> {
        self.get_data("/api/investment/categories", &[]).await
    }

    pub async fn investments(&self) -> Result<Vec<Investment>, ClientError> {
        self.get_data("/api/investments", &[]).await
    }

    pub async fn transaction_categories(&self) -> Result<CategoriesByType, ClientError> {
        self.get_data("/api/transaction/categories", &[]).await
    }

    pub async fn transactions(
        &self,
        kind: Option<&str>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<Transaction>, ClientError> {
        let mut query = Vec::new();
        if let Some(kind) = kind {
            query.push(("type", kind.to_string()));
        }
        if let Some(from) = from {
            query.push(("from", from.to_string()));
        }
        if let Some(to) = to {
            query.push(("to", to.to_string()));
        }
        self.get_data("/api/transactions", &query).await
    }

    pub async fn summary(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Summary, ClientError> {
        let mut query = Vec::new();
        if let Some(from) = from {
            query.push(("from", from.to_string()));
        }
        if let Some(to) = to {
            query.push(("to", to.to_string()));
        }
        self.get_data("/api/summary", &query).await
    }

    /// Ends the session server side and forgets the local token.
    pub async fn logout(&mut self) -> Result<LogoutResponse, ClientError> {
        let response = self.request(reqwest::Method::POST, "/api/auth/logout").send().await?;
        let body = Self::decode(response).await?;
        self.clear_token();
        Ok(body)
    }
}
