// Blocking HTTP client for the analysis servers
//
// Both endpoints take one multipart file part and answer with a small
// JSON object. Refusals arrive as {"error": ...} bodies, often on a
// non-2xx status, and are still parsed rather than treated as transport
// failures.

use std::path::Path;
use std::time::Duration;

use serde_json::Value;

use crate::config::ServerConfig;
use crate::constants::{DESCRIBE_FIELD_NAME, MP4_MIME_TYPE, PREDICT_FIELD_NAME, WAV_MIME_TYPE};
use crate::error::{DayreelError, Result};
use crate::upload::multipart;
use crate::upload::task::UploadTask;

/// Verdict from the emotion-prediction endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictOutcome {
    /// `{"emotion": ...}` — the value is kept exactly as sent.
    Emotion(Value),
    /// `{"error": ...}` — the server refused the upload.
    Rejected(Value),
}

/// Verdict from the video-description endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum DescribeOutcome {
    /// `{"description": "..."}` — replaces the previously shown text.
    Description(String),
    /// `{"error": ...}` — the server refused the upload.
    Rejected(Value),
}

/// Client for the two analysis endpoints.
///
/// One blocking request per call; no retries, and the only ceiling is
/// the configured request timeout.
#[derive(Clone)]
pub struct AnalysisClient {
    agent: ureq::Agent,
    predict_endpoint: String,
    describe_endpoint: String,
}

impl AnalysisClient {
    pub fn new(server: &ServerConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(server.request_timeout_secs))
            .build();
        log::debug!(
            "Analysis endpoints: predict={} describe={}",
            server.predict_endpoint,
            server.describe_endpoint
        );
        Self {
            agent,
            predict_endpoint: server.predict_endpoint.clone(),
            describe_endpoint: server.describe_endpoint.clone(),
        }
    }

    /// Upload a WAV file for emotion prediction.
    pub fn predict(&self, wav_path: &Path) -> Result<PredictOutcome> {
        let data = std::fs::read(wav_path)?;
        let filename = file_name_or(wav_path, "audio.wav");
        let body = self.post_file(
            &self.predict_endpoint,
            PREDICT_FIELD_NAME,
            &filename,
            WAV_MIME_TYPE,
            &data,
        )?;
        parse_predict_response(&body)
    }

    /// Upload a video file for description.
    pub fn describe(&self, video_path: &Path) -> Result<DescribeOutcome> {
        let data = std::fs::read(video_path)?;
        let filename = file_name_or(video_path, "video.mov");
        let body = self.post_file(
            &self.describe_endpoint,
            DESCRIBE_FIELD_NAME,
            &filename,
            MP4_MIME_TYPE,
            &data,
        )?;
        parse_describe_response(&body)
    }

    /// Run `describe` on a background thread.
    pub fn describe_in_background(&self, video_path: &Path) -> Result<UploadTask<DescribeOutcome>> {
        let client = self.clone();
        let path = video_path.to_path_buf();
        UploadTask::spawn("describe-upload", move || client.describe(&path))
    }

    /// Run `predict` on a background thread.
    pub fn predict_in_background(&self, wav_path: &Path) -> Result<UploadTask<PredictOutcome>> {
        let client = self.clone();
        let path = wav_path.to_path_buf();
        UploadTask::spawn("predict-upload", move || client.predict(&path))
    }

    /// POST one file as a single multipart part and return the raw
    /// response body.
    fn post_file(
        &self,
        url: &str,
        field: &str,
        filename: &str,
        content_type: &str,
        data: &[u8],
    ) -> Result<String> {
        let boundary = multipart::new_boundary();
        let body = multipart::encode_file_part(&boundary, field, filename, content_type, data);

        log::debug!("POST {} ({} bytes, field {})", url, body.len(), field);
        let response = self
            .agent
            .post(url)
            .set("Content-Type", &multipart::content_type_header(&boundary))
            .send_bytes(&body);

        match response {
            Ok(resp) => Ok(resp.into_string()?),
            // Refusals carry a JSON error body on a 4xx/5xx status; read
            // it and let the parser decide.
            Err(ureq::Error::Status(code, resp)) => {
                log::debug!("{} answered HTTP {}", url, code);
                Ok(resp.into_string()?)
            }
            Err(e) => Err(DayreelError::Http(e.to_string())),
        }
    }
}

/// Interpret a predict-endpoint response body.
///
/// Any `emotion` value counts as success; any `error` value as a
/// refusal. Everything else, including bodies that do not parse, is an
/// unexpected response.
pub fn parse_predict_response(body: &str) -> Result<PredictOutcome> {
    let json: Value =
        serde_json::from_str(body).map_err(|_| DayreelError::UnexpectedResponse(snippet(body)))?;

    if let Some(emotion) = json.get("emotion") {
        return Ok(PredictOutcome::Emotion(emotion.clone()));
    }
    if let Some(error) = json.get("error") {
        return Ok(PredictOutcome::Rejected(error.clone()));
    }
    Err(DayreelError::UnexpectedResponse(snippet(body)))
}

/// Interpret a describe-endpoint response body.
///
/// The description must be a string; a non-string `description` falls
/// through to the `error` check, then to unexpected.
pub fn parse_describe_response(body: &str) -> Result<DescribeOutcome> {
    let json: Value =
        serde_json::from_str(body).map_err(|_| DayreelError::UnexpectedResponse(snippet(body)))?;

    if let Some(text) = json.get("description").and_then(|d| d.as_str()) {
        return Ok(DescribeOutcome::Description(text.to_string()));
    }
    if let Some(error) = json.get("error") {
        return Ok(DescribeOutcome::Rejected(error.clone()));
    }
    Err(DayreelError::UnexpectedResponse(snippet(body)))
}

fn file_name_or(path: &Path, fallback: &str) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(fallback)
        .to_string()
}

/// First part of a response body, for error messages.
fn snippet(body: &str) -> String {
    const MAX: usize = 200;
    let trimmed = body.trim();
    if trimmed.len() <= MAX {
        return trimmed.to_string();
    }
    let mut end = MAX;
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &trimmed[..end])
}
