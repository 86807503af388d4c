use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use crate::api::traits::EstateApi;
use crate::api::types::LoginReply;
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::models::{AdminUser, Enquiry, EnquiryInput, EnquiryStatus, Property, PropertyInput};

/// Response envelope used by the backend: `{ success, data, message }`.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: Option<bool>,
    data: Option<T>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginWire {
    #[serde(default)]
    success: bool,
    token: Option<String>,
    #[serde(default)]
    user: Option<AdminUser>,
    message: Option<String>,
}

/// reqwest-backed implementation of [`EstateApi`].
pub struct HttpEstateApi {
    client: Client,
    base_url: String,
}

impl HttpEstateApi {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_payload<T: DeserializeOwned>(&self, response: Response) -> Result<T, ApiError> {
        let status = response.status();
        let body = response.text().await?;
        decode_payload(status, &body)
    }

    async fn read_ack(&self, response: Response) -> Result<(), ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await?;
        Err(classify_failure(status, &body))
    }
}

/// Maps a non-2xx reply onto the error taxonomy, pulling the server's
/// message out of the body when one is present.
fn classify_failure(status: StatusCode, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| status.to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized(message),
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        StatusCode::CONFLICT => ApiError::Conflict(message),
        _ => ApiError::Api(message),
    }
}

fn decode_payload<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, ApiError> {
    if !status.is_success() {
        return Err(classify_failure(status, body));
    }
    let envelope: Envelope<T> = serde_json::from_str(body)
        .map_err(|e| ApiError::Api(format!("malformed response: {e}")))?;
    if envelope.success == Some(false) {
        return Err(ApiError::Api(
            envelope.message.unwrap_or_else(|| "request failed".to_string()),
        ));
    }
    envelope
        .data
        .ok_or_else(|| ApiError::Api("response missing data".to_string()))
}

#[async_trait]
impl EstateApi for HttpEstateApi {
    async fn fetch_properties(&self) -> Result<Vec<Property>, ApiError> {
        let url = self.endpoint("/properties");
        debug!(%url, "fetching property collection");
        let response = self.client.get(&url).send().await?;
        self.read_payload(response).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginReply, ApiError> {
        let url = self.endpoint("/auth/login");
        debug!(%url, %email, "posting login");
        let response = self
            .client
            .post(&url)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(classify_failure(status, &body));
        }
        let wire: LoginWire = serde_json::from_str(&body)
            .map_err(|e| ApiError::Api(format!("malformed login response: {e}")))?;
        match (wire.success, wire.token) {
            (true, Some(token)) => Ok(LoginReply {
                user: wire.user.unwrap_or_default(),
                token,
            }),
            _ => Err(ApiError::Unauthorized(
                wire.message
                    .unwrap_or_else(|| "invalid email or password".to_string()),
            )),
        }
    }

    async fn create_property(
        &self,
        token: &str,
        input: &PropertyInput,
    ) -> Result<Property, ApiError> {
        let url = self.endpoint("/properties");
        debug!(%url, title = %input.title, "creating property");
        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(input)
            .send()
            .await?;
        self.read_payload(response).await
    }

    async fn update_property(
        &self,
        token: &str,
        id: &str,
        input: &PropertyInput,
    ) -> Result<Property, ApiError> {
        let url = self.endpoint(&format!("/properties/{id}"));
        debug!(%url, "updating property");
        let response = self
            .client
            .put(&url)
            .bearer_auth(token)
            .json(input)
            .send()
            .await?;
        self.read_payload(response).await
    }

    async fn delete_property(&self, token: &str, id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("/properties/{id}"));
        debug!(%url, "deleting property");
        let response = self.client.delete(&url).bearer_auth(token).send().await?;
        self.read_ack(response).await
    }

    async fn submit_enquiry(&self, input: &EnquiryInput) -> Result<Enquiry, ApiError> {
        let url = self.endpoint("/enquiries");
        debug!(%url, "submitting enquiry");
        let response = self.client.post(&url).json(input).send().await?;
        self.read_payload(response).await
    }

    async fn fetch_enquiries(&self, token: &str) -> Result<Vec<Enquiry>, ApiError> {
        let url = self.endpoint("/enquiries");
        debug!(%url, "fetching enquiry collection");
        let response = self.client.get(&url).bearer_auth(token).send().await?;
        self.read_payload(response).await
    }

    async fn update_enquiry_status(
        &self,
        token: &str,
        id: &str,
        status: EnquiryStatus,
    ) -> Result<Enquiry, ApiError> {
        let url = self.endpoint(&format!("/enquiries/{id}/status"));
        debug!(%url, status = status.as_str(), "updating enquiry status");
        let response = self
            .client
            .put(&url)
            .bearer_auth(token)
            .json(&json!({ "status": status }))
            .send()
            .await?;
        self.read_payload(response).await
    }

    async fn delete_enquiry(&self, token: &str, id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("/enquiries/{id}"));
        debug!(%url, "deleting enquiry");
        let response = self.client.delete(&url).bearer_auth(token).send().await?;
        self.read_ack(response).await
    }
}
