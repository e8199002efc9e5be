use crate::request::{Body, HttpRequest};
use base64::Engine;
use promptreel_core::types::{GenerationRequest, JobId, MediaRef};
use serde_json::json;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "veo-2.0-generate-001";

#[derive(Clone, PartialEq, Eq)]
pub struct VeoConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl VeoConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.into(),
            base_url: DEFAULT_BASE_URL.into(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl std::fmt::Debug for VeoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VeoConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Starts a video generation job. The reference image, when present, rides
/// along as base64 with its mime type.
pub fn build_generate_videos_request(cfg: &VeoConfig, request: &GenerationRequest) -> HttpRequest {
    let mut config = json!({
        "numberOfVideos": request.video_count,
        "durationSeconds": request.duration_seconds,
    });
    if let Some(ratio) = request.aspect_ratio {
        config["aspectRatio"] = json!(ratio.as_str());
    }

    let mut payload = json!({
        "prompt": request.prompt,
        "config": config,
    });
    if let Some(image) = &request.reference_image {
        payload["image"] = json!({
            "imageBytes": base64::engine::general_purpose::STANDARD.encode(&image.bytes),
            "mimeType": image.mime_type,
        });
    }

    HttpRequest {
        method: "POST".into(),
        url: format!(
            "{}?key={}",
            join_url(&cfg.base_url, &format!("models/{}:generateVideos", cfg.model)),
            cfg.api_key
        ),
        headers: vec![("Content-Type".into(), "application/json".into())],
        body: Body::Json(payload.to_string()),
    }
}

/// Re-fetches the job status. The job id is the operation name the submit
/// call returned and is used verbatim as the URL path.
pub fn build_operation_status_request(cfg: &VeoConfig, id: &JobId) -> HttpRequest {
    HttpRequest {
        method: "GET".into(),
        url: format!("{}?key={}", join_url(&cfg.base_url, id.as_str()), cfg.api_key),
        headers: vec![],
        body: Body::Empty,
    }
}

/// Downloads one finished video. Media URIs already carry their own query
/// string; the credential is appended as one more parameter.
pub fn build_media_fetch_request(cfg: &VeoConfig, media: &MediaRef) -> HttpRequest {
    let url = match url::Url::parse(&media.uri) {
        Ok(mut parsed) => {
            parsed.query_pairs_mut().append_pair("key", &cfg.api_key);
            parsed.to_string()
        }
        Err(_) => {
            let separator = if media.uri.contains('?') { '&' } else { '?' };
            format!("{}{}key={}", media.uri, separator, cfg.api_key)
        }
    };

    HttpRequest {
        method: "GET".into(),
        url,
        headers: vec![],
        body: Body::Empty,
    }
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptreel_core::types::AspectRatio;

    fn test_config() -> VeoConfig {
        VeoConfig::new("k-123")
    }

    #[test]
    fn submit_request_carries_prompt_and_config() {
        let request = GenerationRequest::new("a paper boat in the rain")
            .with_video_count(3)
            .with_duration_seconds(8)
            .with_aspect_ratio(AspectRatio::Landscape);

        let req = build_generate_videos_request(&test_config(), &request);
        assert_eq!(req.method, "POST");
        assert_eq!(
            req.url,
            format!("{DEFAULT_BASE_URL}/models/{DEFAULT_MODEL}:generateVideos?key=k-123")
        );
        assert_eq!(req.header("content-type"), Some("application/json"));

        match &req.body {
            Body::Json(s) => {
                let v: serde_json::Value = serde_json::from_str(s).unwrap();
                assert_eq!(v["prompt"], "a paper boat in the rain");
                assert_eq!(v["config"]["numberOfVideos"], 3);
                assert_eq!(v["config"]["durationSeconds"], 8);
                assert_eq!(v["config"]["aspectRatio"], "16:9");
                assert!(v.get("image").is_none());
            }
            other => panic!("expected json body, got {other:?}"),
        }
    }

    #[test]
    fn submit_request_encodes_reference_image() {
        let request = GenerationRequest::new("p").with_reference_image(b"hi".to_vec(), "image/png");
        let req = build_generate_videos_request(&test_config(), &request);

        match &req.body {
            Body::Json(s) => {
                let v: serde_json::Value = serde_json::from_str(s).unwrap();
                assert_eq!(v["image"]["imageBytes"], "aGk=");
                assert_eq!(v["image"]["mimeType"], "image/png");
            }
            other => panic!("expected json body, got {other:?}"),
        }
    }

    #[test]
    fn aspect_ratio_is_omitted_when_unset() {
        let request = GenerationRequest::new("p");
        let req = build_generate_videos_request(&test_config(), &request);
        match &req.body {
            Body::Json(s) => {
                let v: serde_json::Value = serde_json::from_str(s).unwrap();
                assert!(v["config"].get("aspectRatio").is_none());
            }
            other => panic!("expected json body, got {other:?}"),
        }
    }

    #[test]
    fn status_request_uses_operation_name_as_path() {
        let id = JobId::new("models/veo-2.0-generate-001/operations/abc123");
        let req = build_operation_status_request(&test_config(), &id);
        assert_eq!(req.method, "GET");
        assert_eq!(
            req.url,
            format!("{DEFAULT_BASE_URL}/models/veo-2.0-generate-001/operations/abc123?key=k-123")
        );
        assert_eq!(req.body, Body::Empty);
    }

    #[test]
    fn media_fetch_appends_key_to_existing_query() {
        let media = MediaRef::new("https://cdn.example.com/v1/files/f-1:download?alt=media");
        let req = build_media_fetch_request(&test_config(), &media);
        assert!(req.url.contains("alt=media"));
        assert!(req.url.contains("key=k-123"));
    }

    #[test]
    fn media_fetch_starts_query_when_uri_has_none() {
        let media = MediaRef::new("https://cdn.example.com/files/f-1");
        let req = build_media_fetch_request(&test_config(), &media);
        assert_eq!(req.url, "https://cdn.example.com/files/f-1?key=k-123");
    }

    #[test]
    fn config_debug_redacts_api_key() {
        let s = format!("{:?}", test_config());
        assert!(!s.contains("k-123"));
        assert!(s.contains("[REDACTED]"));
    }
}
