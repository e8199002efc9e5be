use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenerationId(pub Uuid);

impl GenerationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GenerationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GenerationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// The provider's operation name. Opaque to us; it only travels back into
// the status URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

impl JobId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "16:9")]
    Landscape,
    #[serde(rename = "9:16")]
    Portrait,
}

impl AspectRatio {
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Landscape => "16:9",
            AspectRatio::Portrait => "9:16",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported aspect ratio: {0} (use 16:9 or 9:16)")]
pub struct ParseAspectRatioError(String);

impl std::str::FromStr for AspectRatio {
    type Err = ParseAspectRatioError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "16:9" => Ok(AspectRatio::Landscape),
            "9:16" => Ok(AspectRatio::Portrait),
            other => Err(ParseAspectRatioError(other.to_string())),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ReferenceImage {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }
}

impl std::fmt::Debug for ReferenceImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReferenceImage")
            .field("bytes", &format!("len={}", self.bytes.len()))
            .field("mime_type", &self.mime_type)
            .finish()
    }
}

/// One user-triggered generation attempt, assembled fresh from the form
/// inputs. Prompt emptiness is deliberately not validated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub reference_image: Option<ReferenceImage>,
    pub aspect_ratio: Option<AspectRatio>,
    pub video_count: u32,
    pub duration_seconds: u32,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            reference_image: None,
            aspect_ratio: None,
            video_count: 1,
            duration_seconds: 5,
        }
    }

    pub fn with_reference_image(mut self, bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        self.reference_image = Some(ReferenceImage::new(bytes, mime_type));
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: AspectRatio) -> Self {
        self.aspect_ratio = Some(aspect_ratio);
        self
    }

    pub fn with_video_count(mut self, video_count: u32) -> Self {
        self.video_count = video_count;
        self
    }

    pub fn with_duration_seconds(mut self, duration_seconds: u32) -> Self {
        self.duration_seconds = duration_seconds;
        self
    }
}

/// A media reference handed out by the provider. Downloading it requires
/// the credential to be appended as a query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaRef {
    pub uri: String,
}

impl MediaRef {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }
}

/// Snapshot of the remote job as of the last status fetch. `done` flips to
/// true exactly once; a fresh snapshot replaces the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub done: bool,
    pub media: Vec<MediaRef>,
}

#[derive(Clone, PartialEq, Eq)]
pub struct MediaArtifact {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl std::fmt::Debug for MediaArtifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaArtifact")
            .field("bytes", &format!("len={}", self.bytes.len()))
            .field("mime_type", &self.mime_type)
            .finish()
    }
}
