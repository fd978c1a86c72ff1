//! Client for the external service that writes AI summaries of a patient's
//! clinical history.
//!
//! The service reads the records itself; it only needs the patient id and
//! answers with plain text.

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::domain::types::PatientId;

/// Path of the summary endpoint relative to the service base URL.
pub const SUMMARY_PATH: &str = "/chatgpt/clinical_records";

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("summary service unreachable: {0}")]
    Transport(String),

    #[error("summary service answered with status {0}")]
    Status(u16),
}

pub trait SummaryClient {
    /// Asks for a summary of the clinical history of `patient_id`.
    fn summarize(
        &self,
        patient_id: PatientId,
    ) -> impl Future<Output = Result<String, SummaryError>> + Send;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryRequest {
    patient_id: i32,
}

/// [`SummaryClient`] speaking HTTP to the summary service.
#[derive(Clone, Debug)]
pub struct HttpSummaryClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSummaryClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SummaryError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| SummaryError::Transport(err.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

impl SummaryClient for HttpSummaryClient {
    async fn summarize(&self, patient_id: PatientId) -> Result<String, SummaryError> {
        let url = format!("{}{SUMMARY_PATH}", self.base_url);
        let body = SummaryRequest {
            patient_id: patient_id.get(),
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|err| SummaryError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SummaryError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|err| SummaryError::Transport(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_uses_patient_id_key() {
        let body = serde_json::to_value(SummaryRequest { patient_id: 12 }).unwrap();

        assert_eq!(body, serde_json::json!({ "patientId": 12 }));
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let client =
            HttpSummaryClient::new("http://summary.local/", Duration::from_secs(1)).unwrap();

        assert_eq!(client.base_url, "http://summary.local");
    }
}
