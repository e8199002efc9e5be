use anyhow::Context;
use base64::Engine;
use promptreel_core::types::{GenerationRequest, MediaArtifact};
use promptreel_core::wire::{WireError, WireGenerationRequest};
use promptreel_providers::error::GenerateError;
use std::time::Duration;

/// Runs one generation through a proxy server instead of talking to the
/// provider directly. The proxy holds the credential and returns the first
/// finished video as raw bytes.
pub async fn generate_via_proxy(
    base: &str,
    request: &GenerationRequest,
) -> Result<Vec<MediaArtifact>, GenerateError> {
    let wire = WireGenerationRequest {
        prompt: request.prompt.clone(),
        image_bytes: request
            .reference_image
            .as_ref()
            .map(|image| base64::engine::general_purpose::STANDARD.encode(&image.bytes)),
        aspect_ratio: request.aspect_ratio,
        number_of_videos: request.video_count,
        duration_seconds: request.duration_seconds,
    };
    let url = format!("{}/generate-video", base.trim_end_matches('/'));

    // No overall timeout here: the proxy holds the connection open for the
    // whole generation, which can run for minutes.
    let client = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .build()
        .context("build http client")?;
    let response = client
        .post(&url)
        .json(&wire)
        .send()
        .await
        .with_context(|| format!("send generation request to {url}"))?;

    let status = response.status().as_u16();
    let mime_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("video/mp4")
        .to_string();
    let bytes = response
        .bytes()
        .await
        .context("read generation response body")?;

    if !(200..=299).contains(&status) {
        return Err(proxy_error(status, &bytes));
    }
    Ok(vec![MediaArtifact {
        bytes: bytes.to_vec(),
        mime_type,
    }])
}

fn proxy_error(status: u16, body: &[u8]) -> GenerateError {
    let message = match serde_json::from_slice::<WireError>(body) {
        Ok(reply) => reply.error,
        Err(_) => String::from_utf8_lossy(body).into_owned(),
    };
    let message = if message.trim().is_empty() {
        "Failed to generate video.".to_string()
    } else {
        message
    };
    GenerateError::Provider {
        status: Some(status),
        message,
    }
}
