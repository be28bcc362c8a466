//! Hosted question-answering knowledge base client (support bot backend).
//!
//! `POST {endpoint}` with `{"question": ..., "top": 1}` and the
//! `Ocp-Apim-Subscription-Key` header; the reply's first `answers[]` entry wins.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Knowledge-base deployment queried when `QNA_ENDPOINT` is not set.
pub const DEFAULT_QNA_ENDPOINT: &str = "https://language-service-resource.cognitiveservices.azure.com/language/:query-knowledgebases?projectName=custom-qna&api-version=2021-10-01&deploymentName=production";

/// Returned when the knowledge base has no answer.
pub const FALLBACK_ANSWER: &str = "I'm sorry, I don't have an answer for that question.";

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

#[derive(Debug, thiserror::Error)]
pub enum QnaError {
    #[error("knowledge base request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("knowledge base returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("LANGUAGE_QNA_KEY is not set")]
    MissingKey,
}

/// Something that answers free-form questions.
#[async_trait]
pub trait AnswerSource: Send + Sync {
    /// Best answer, or [`FALLBACK_ANSWER`] when there is none.
    async fn ask(&self, question: &str) -> Result<String, QnaError>;
}

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    question: &'a str,
    top: u32,
}

/// One ranked answer from the knowledge base.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct KbAnswer {
    pub answer: String,
    #[serde(rename = "confidenceScore", default)]
    pub confidence_score: f64,
}

#[derive(Debug, Default, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    answers: Vec<KbAnswer>,
}

/// Parses a query response body; `None` when it lists no answers.
pub fn top_answer_from_json(body: &str) -> Result<Option<KbAnswer>, serde_json::Error> {
    let parsed: QueryResponse = serde_json::from_str(body)?;
    Ok(parsed.answers.into_iter().next())
}

/// Client for the knowledge-base query endpoint.
pub struct KnowledgeBaseClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl KnowledgeBaseClient {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Queries the knowledge base for its single best answer.
    pub async fn top_answer(&self, question: &str) -> Result<Option<KbAnswer>, QnaError> {
        let key = self.api_key.as_deref().ok_or(QnaError::MissingKey)?;
        debug!(endpoint = %self.endpoint, question_len = question.len(), "knowledge base query");
        let response = self
            .client
            .post(&self.endpoint)
            .header(SUBSCRIPTION_KEY_HEADER, key)
            .json(&QueryRequest { question, top: 1 })
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        trace!(status = %status, body = %body, "knowledge base response");
        if !status.is_success() {
            return Err(QnaError::Status {
                status: status.as_u16(),
                body,
            });
        }
        // An undecodable body is treated like an empty answer list.
        let answer = top_answer_from_json(&body).unwrap_or_default();
        if let Some(a) = &answer {
            debug!(confidence = a.confidence_score, "knowledge base answer");
        }
        Ok(answer)
    }
}

#[async_trait]
impl AnswerSource for KnowledgeBaseClient {
    async fn ask(&self, question: &str) -> Result<String, QnaError> {
        Ok(self
            .top_answer(question)
            .await?
            .map(|a| a.answer)
            .unwrap_or_else(|| FALLBACK_ANSWER.to_string()))
    }
}
