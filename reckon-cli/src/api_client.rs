use reckon_http::models::{
    CalculationPayload, CalculationResponse, ListCalculationsResponse, RevokeResponse,
    UpdateCalculationRequest, User,
};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, de::DeserializeOwned};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{status}: {message}")]
    Status {
        status: StatusCode,
        code: Option<String>,
        message: String,
    },

    #[error("No API key configured; run `reckon login --api-key <KEY>`")]
    MissingApiKey,
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    code: Option<String>,
}

/// HTTP client for the Reckon API
pub struct ReckonClient {
    client: Client,
    base_url: String,
    api_key: SecretString,
}

impl ReckonClient {
    pub fn new(base_url: &str, api_key: &SecretString) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> ApiResult<RequestBuilder> {
        let key = self.api_key.expose_secret();
        if key.is_empty() {
            return Err(ApiError::MissingApiKey);
        }
        Ok(builder.header("X-API-Key", key))
    }

    pub async fn health_check(&self) -> ApiResult<()> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        check_status(response).await.map(|_| ())
    }

    pub async fn current_user(&self) -> ApiResult<User> {
        let request = self.authorized(self.client.get(self.url("/auth/me")))?;
        json_body(request.send().await?).await
    }

    pub async fn list_calculations(&self) -> ApiResult<ListCalculationsResponse> {
        let request = self.authorized(self.client.get(self.url("/calculations")))?;
        json_body(request.send().await?).await
    }

    pub async fn get_calculation(&self, id: Uuid) -> ApiResult<CalculationResponse> {
        let request =
            self.authorized(self.client.get(self.url(&format!("/calculations/{}", id))))?;
        json_body(request.send().await?).await
    }

    pub async fn create_calculation(
        &self,
        payload: &CalculationPayload,
    ) -> ApiResult<CalculationResponse> {
        let request = self.authorized(self.client.post(self.url("/calculations")))?;
        json_body(request.json(payload).send().await?).await
    }

    pub async fn update_calculation(
        &self,
        id: Uuid,
        update: &UpdateCalculationRequest,
    ) -> ApiResult<CalculationResponse> {
        let request =
            self.authorized(self.client.put(self.url(&format!("/calculations/{}", id))))?;
        json_body(request.json(update).send().await?).await
    }

    pub async fn delete_calculation(&self, id: Uuid) -> ApiResult<()> {
        let request =
            self.authorized(self.client.delete(self.url(&format!("/calculations/{}", id))))?;
        check_status(request.send().await?).await.map(|_| ())
    }

    /// Revoke the key this client authenticates with
    pub async fn revoke(&self) -> ApiResult<RevokeResponse> {
        let request = self.authorized(self.client.post(self.url("/auth/revoke")))?;
        json_body(request.send().await?).await
    }
}

async fn check_status(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let (message, code) = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => (body.error, body.code),
        Err(_) if text.is_empty() => (status.to_string(), None),
        Err(_) => (text, None),
    };
    Err(ApiError::Status {
        status,
        code,
        message,
    })
}

async fn json_body<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    Ok(check_status(response).await?.json::<T>().await?)
}
