use reqwest::blocking::{Client, Response, multipart};
use serde::Deserialize;
use serde_json::{Value, json};
use std::path::Path;

use super::Recognizer;
use crate::config::RecognitionConfig;
use crate::error::RecognitionError;

/// Client for a formula-recognition model hosted as a Gradio space.
///
/// One recognition is three requests: upload the image, start a call whose
/// argument is a sketchpad value pointing at the upload, then read the
/// call's event stream until it completes.
pub struct GradioRecognizer {
    client: Client,
    base_url: String,
    api_name: String,
}

#[derive(Debug, Deserialize)]
struct CallResponse {
    event_id: String,
}

impl GradioRecognizer {
    pub fn new(config: &RecognitionConfig) -> Result<Self, RecognitionError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            base_url: config.endpoint.trim_end_matches('/').to_owned(),
            api_name: config.api_name.trim_start_matches('/').to_owned(),
        })
    }

    fn upload(&self, image_path: &Path) -> Result<String, RecognitionError> {
        let form = multipart::Form::new().file("files", image_path)?;
        let resp = self
            .client
            .post(format!("{}/gradio_api/upload", self.base_url))
            .multipart(form)
            .send()?;
        let body = check_status(resp)?.text()?;
        parse_upload_response(&body)
    }

    fn start_call(&self, remote_path: &str) -> Result<String, RecognitionError> {
        let resp = self
            .client
            .post(format!("{}/gradio_api/call/{}", self.base_url, self.api_name))
            .json(&sketchpad_payload(remote_path))
            .send()?;
        let call: CallResponse = check_status(resp)?.json()?;
        Ok(call.event_id)
    }

    fn await_result(&self, event_id: &str) -> Result<String, RecognitionError> {
        let resp = self
            .client
            .get(format!("{}/gradio_api/call/{}/{}", self.base_url, self.api_name, event_id))
            .send()?;
        let stream = check_status(resp)?.text()?;
        parse_event_stream(&stream)
    }
}

impl Recognizer for GradioRecognizer {
    fn recognize(&self, image_path: &Path) -> Result<String, RecognitionError> {
        let remote_path = self.upload(image_path)?;
        log::debug!("Uploaded sketch as {}", remote_path);
        let event_id = self.start_call(&remote_path)?;
        log::debug!("Recognition call started, event {}", event_id);
        self.await_result(&event_id)
    }
}

fn check_status(resp: Response) -> Result<Response, RecognitionError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().unwrap_or_default();
    Err(RecognitionError::Rejected {
        status: status.as_u16(),
        body,
    })
}

/// Request body: the sketchpad value with the uploaded file as its composite layer
fn sketchpad_payload(remote_path: &str) -> Value {
    json!({
        "data": [{
            "background": null,
            "layers": [],
            "composite": {
                "path": remote_path,
                "meta": { "_type": "gradio.FileData" }
            }
        }]
    })
}

fn parse_upload_response(body: &str) -> Result<String, RecognitionError> {
    let paths: Vec<String> = serde_json::from_str(body)
        .map_err(|e| RecognitionError::MalformedResponse(format!("upload: {}", e)))?;
    paths
        .into_iter()
        .next()
        .ok_or_else(|| RecognitionError::MalformedResponse("upload returned no files".to_owned()))
}

/// Extracts the text from a server-sent event stream. The last `complete`
/// or `error` event decides the outcome.
fn parse_event_stream(stream: &str) -> Result<String, RecognitionError> {
    let mut event = "";
    for line in stream.lines() {
        if let Some(name) = line.strip_prefix("event:") {
            event = name.trim();
        } else if let Some(data) = line.strip_prefix("data:") {
            let data = data.trim();
            match event {
                "complete" => return extract_text(data),
                "error" => {
                    let message = match serde_json::from_str::<Value>(data) {
                        Ok(Value::String(s)) => s,
                        Ok(Value::Null) => "no details".to_owned(),
                        _ if data.is_empty() => "no details".to_owned(),
                        _ => data.to_owned(),
                    };
                    return Err(RecognitionError::Service(message));
                }
                _ => {}
            }
        }
    }
    Err(RecognitionError::MalformedResponse(
        "event stream ended without a result".to_owned(),
    ))
}

fn extract_text(data: &str) -> Result<String, RecognitionError> {
    let value: Value = serde_json::from_str(data)
        .map_err(|e| RecognitionError::MalformedResponse(format!("result: {}", e)))?;
    let first = match value {
        Value::Array(mut items) if !items.is_empty() => items.swap_remove(0),
        Value::Array(_) => {
            return Err(RecognitionError::MalformedResponse("empty result".to_owned()));
        }
        other => other,
    };
    Ok(match first {
        Value::String(text) => text,
        other => other.to_string(),
    })
}
