//! JSON contract between clients and the proxy endpoint.

use crate::types::AspectRatio;
use serde::{Deserialize, Serialize};

/// Body of `POST /generate-video`. Field names are camelCase on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireGenerationRequest {
    pub prompt: String,

    /// Base64 of the reference image, when one was picked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_bytes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<AspectRatio>,

    pub number_of_videos: u32,
    pub duration_seconds: u32,
}

/// Error body used by the proxy for every failure status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireError {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_camel_case_body() {
        let body = r#"{
            "prompt": "a lighthouse at dawn",
            "imageBytes": "aGk=",
            "aspectRatio": "9:16",
            "numberOfVideos": 2,
            "durationSeconds": 6
        }"#;
        let req: WireGenerationRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.prompt, "a lighthouse at dawn");
        assert_eq!(req.image_bytes.as_deref(), Some("aGk="));
        assert_eq!(req.aspect_ratio, Some(AspectRatio::Portrait));
        assert_eq!(req.number_of_videos, 2);
        assert_eq!(req.duration_seconds, 6);
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let body = r#"{"prompt":"p","numberOfVideos":1,"durationSeconds":5}"#;
        let req: WireGenerationRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.image_bytes, None);
        assert_eq!(req.aspect_ratio, None);
    }

    #[test]
    fn skips_absent_fields_when_encoding() {
        let req = WireGenerationRequest {
            prompt: "p".into(),
            image_bytes: None,
            aspect_ratio: None,
            number_of_videos: 1,
            duration_seconds: 5,
        };
        let encoded = serde_json::to_string(&req).unwrap();
        assert!(!encoded.contains("imageBytes"));
        assert!(!encoded.contains("aspectRatio"));
        assert!(encoded.contains("numberOfVideos"));
    }
}
