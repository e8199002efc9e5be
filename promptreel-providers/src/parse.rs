use crate::error::GenerateError;
use promptreel_core::types::{Job, JobId, MediaRef};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Operation {
    name: Option<String>,
    #[serde(default)]
    done: bool,
    response: Option<OperationResult>,
    error: Option<ProviderError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OperationResult {
    #[serde(default)]
    generated_videos: Vec<GeneratedVideo>,
}

#[derive(Debug, Deserialize)]
struct GeneratedVideo {
    video: Option<VideoHandle>,
}

#[derive(Debug, Deserialize)]
struct VideoHandle {
    uri: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    status: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ProviderError,
}

/// Decodes an operation payload (submit response and status response share
/// the shape). An operation that finished with an embedded error decodes to
/// `Err`, so "done with media" and "done with error" cannot be confused.
pub fn parse_operation(body: &[u8]) -> Result<Job, GenerateError> {
    let op: Operation = serde_json::from_slice(body).map_err(|e| GenerateError::Provider {
        status: None,
        message: format!("could not decode operation response: {e}"),
    })?;

    if let Some(error) = op.error {
        return Err(provider_error(None, error));
    }

    let name = op.name.ok_or_else(|| GenerateError::Provider {
        status: None,
        message: "operation response carried no name".to_string(),
    })?;

    let media = op
        .response
        .map(|r| {
            r.generated_videos
                .into_iter()
                .filter_map(|v| v.video.and_then(|h| h.uri))
                .map(MediaRef::new)
                .collect()
        })
        .unwrap_or_default();

    Ok(Job {
        id: JobId::new(name),
        done: op.done,
        media,
    })
}

/// Turns a non-2xx response body into the matching error. Bodies that are
/// not JSON pass through as raw text; that fallback is deliberate.
pub fn error_from_body(status: u16, body: &[u8]) -> GenerateError {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(parsed) => provider_error(Some(status), parsed.error),
        Err(_) => GenerateError::Provider {
            status: Some(status),
            message: String::from_utf8_lossy(body).into_owned(),
        },
    }
}

fn provider_error(status: Option<u16>, error: ProviderError) -> GenerateError {
    let message = error
        .message
        .unwrap_or_else(|| "provider returned an error without a message".to_string());
    match error.status.as_deref() {
        Some("RESOURCE_EXHAUSTED") => GenerateError::QuotaExhausted { message },
        _ => GenerateError::Provider { status, message },
    }
}
