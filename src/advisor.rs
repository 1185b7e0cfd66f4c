//! Diet advisor client: posts the user's question and reads back a suggestion.

use serde::Serialize;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;
use thiserror::Error;

pub const EMPTY_QUERY_MESSAGE: &str = "❌ Please enter a question.";
pub const FAILURE_MESSAGE: &str =
    "⚠️ Failed to fetch AI suggestion. Please check your internet connection or try again later.";

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("Question is empty")]
    EmptyQuery,
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Response did not contain a suggestion")]
    MissingSuggestion,
}

impl AdvisorError {
    /// Text shown to the user; every non-validation failure maps to the same message
    pub fn user_message(&self) -> &'static str {
        match self {
            AdvisorError::EmptyQuery => EMPTY_QUERY_MESSAGE,
            _ => FAILURE_MESSAGE,
        }
    }
}

#[derive(Debug, Serialize)]
struct AdviceRequest<'a> {
    query: &'a str,
}

#[derive(Debug, Clone)]
pub struct AdvisorClient {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl AdvisorClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, AdvisorError> {
        let client = reqwest::blocking::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: endpoint.to_string(),
            client,
        })
    }

    /// Ask a question and return the raw suggestion text
    pub fn ask(&self, query: &str) -> Result<String, AdvisorError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AdvisorError::EmptyQuery);
        }

        let result = self.request(query);
        if let Err(ref e) = result {
            tracing::error!(error = %e, endpoint = %self.endpoint, "error fetching AI suggestion");
        }
        result
    }

    fn request(&self, query: &str) -> Result<String, AdvisorError> {
        let response = self.client
            .post(&self.endpoint)
            .json(&AdviceRequest { query })
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdvisorError::Status(status.as_u16()));
        }

        let body: serde_json::Value = response.json()?;
        body.get("suggestion")
            .and_then(|s| s.as_str())
            .map(str::to_string)
            .ok_or(AdvisorError::MissingSuggestion)
    }

    /// Run `ask` on a worker thread
    pub fn spawn_ask(&self, query: String) -> Receiver<Result<String, AdvisorError>> {
        let (tx, rx) = mpsc::channel();
        let client = self.clone();
        thread::spawn(move || {
            let _ = tx.send(client.ask(&query));
        });
        rx
    }
}

/// Line shown to the user for a finished request
pub fn format_answer(result: &Result<String, AdvisorError>) -> String {
    match result {
        Ok(suggestion) => format!("🤖 AI Suggestion: {}", suggestion),
        Err(e) => e.user_message().to_string(),
    }
}
