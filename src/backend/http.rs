//! HTTP implementation of `CoachingBackend` over the service's JSON API.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::BackendError;
use crate::questionnaire::AnswerRecord;
use crate::results::{PlanRecord, ProfileId, ProfileRecord, QuestionnaireId};

use super::traits::CoachingBackend;

const SUBMIT_QUESTIONNAIRE: &str = "submit_questionnaire";
const CREATE_PROFILE: &str = "create_profile";
const CREATE_PLAN: &str = "create_plan";
const FETCH_PLAN: &str = "fetch_plan";
const HEALTH: &str = "health";

/// Only the identifier of the stored questionnaire is consumed.
#[derive(Debug, Deserialize)]
struct SubmittedQuestionnaire {
    id: QuestionnaireId,
}

#[derive(Debug, Deserialize)]
struct HealthResponse {
    message: String,
}

/// Coaching service client.
pub struct HttpBackend {
    api_url: String,
    api_token: Option<SecretString>,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> Result<Self, BackendError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| BackendError::RequestFailed {
            operation: "client".into(),
            reason: format!("Failed to build HTTP client: {e}"),
        })?;

        Ok(Self {
            api_url: format!("{}/api", config.base_url.trim_end_matches('/')),
            api_token: config.api_token.clone(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.api_url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    /// Probe the service root. Returns its greeting message.
    pub async fn health(&self) -> Result<String, BackendError> {
        let request = self.client.get(self.url(""));
        let body: HealthResponse = self.send(HEALTH, request).await?;
        Ok(body.message)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        operation: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, BackendError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| BackendError::RequestFailed {
                operation: operation.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound {
                operation: operation.to_string(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(operation, status = status.as_u16(), "Coaching service rejected request");
            return Err(BackendError::Status {
                operation: operation.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| BackendError::RequestFailed {
                operation: operation.to_string(),
                reason: e.to_string(),
            })?;
        serde_json::from_str(&text).map_err(|e| BackendError::InvalidResponse {
            operation: operation.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl CoachingBackend for HttpBackend {
    async fn submit_questionnaire(
        &self,
        answers: &AnswerRecord,
    ) -> Result<QuestionnaireId, BackendError> {
        let request = self.client.post(self.url("questionnaire")).json(answers);
        let stored: SubmittedQuestionnaire = self.send(SUBMIT_QUESTIONNAIRE, request).await?;
        Ok(stored.id)
    }

    async fn create_profile(
        &self,
        questionnaire_id: &QuestionnaireId,
    ) -> Result<ProfileRecord, BackendError> {
        let request = self
            .client
            .post(self.url("profile"))
            .query(&[("questionnaire_id", questionnaire_id.as_str())]);
        self.send(CREATE_PROFILE, request).await
    }

    async fn create_plan(&self, profile_id: &ProfileId) -> Result<PlanRecord, BackendError> {
        let request = self
            .client
            .post(self.url("plan"))
            .query(&[("profile_id", profile_id.as_str())]);
        self.send(CREATE_PLAN, request).await
    }

    async fn fetch_plan(&self, profile_id: &ProfileId) -> Result<PlanRecord, BackendError> {
        let request = self
            .client
            .get(self.url(&format!("plan/{}", profile_id.as_str())));
        self.send(FETCH_PLAN, request).await
    }
}
