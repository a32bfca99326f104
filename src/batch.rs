//! Batch conversion of requests read from a JSON file.
//!
//! Each request is converted on its own; a failing entry records its error
//! and the rest of the batch carries on.

use crate::dispatch::{convert, Action, ConversionResult};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::Path;

/// One `(action, input, extra)` request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BatchRequest {
    pub action: Action,
    pub input: String,
    #[serde(default)]
    pub extra: Option<String>,
}

/// A request together with what it produced.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    #[serde(flatten)]
    pub request: BatchRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ConversionResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Parse a JSON array of requests. Errors name the JSON path of the bad
/// entry, e.g. `[3].action`.
pub fn parse_batch(json: &str) -> Result<Vec<BatchRequest>, Box<dyn Error>> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    let requests: Vec<BatchRequest> = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| format!("Error parsing batch JSON: path={} error={}", e.path(), e))?;
    log::info!("Parsed {} batch requests", requests.len());
    Ok(requests)
}

/// Read and parse a batch file.
pub fn read_batch_file(batch_file: &str) -> Result<Vec<BatchRequest>, Box<dyn Error>> {
    if !Path::new(batch_file).exists() {
        return Err(format!("Batch file does not exist: {batch_file}").into());
    }
    log::info!("Reading batch file: {batch_file}");
    let json = std::fs::read_to_string(batch_file)
        .map_err(|e| format!("Error reading batch file {batch_file}: {e}"))?;
    parse_batch(&json)
}

/// Convert every request.
pub fn run_batch(requests: Vec<BatchRequest>) -> Vec<BatchOutcome> {
    requests
        .into_iter()
        .enumerate()
        .map(|(i, request)| {
            match convert(request.action, &request.input, request.extra.as_deref()) {
                Ok(result) => BatchOutcome {
                    request,
                    result: Some(result),
                    error: None,
                },
                Err(e) => {
                    log::warn!("batch entry #{i} ({}) failed: {e}", request.action);
                    BatchOutcome {
                        request,
                        result: None,
                        error: Some(e.to_string()),
                    }
                }
            }
        })
        .collect()
}
