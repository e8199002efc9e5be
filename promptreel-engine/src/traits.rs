use async_trait::async_trait;
use promptreel_core::types::{GenerationRequest, Job, JobId, MediaArtifact, MediaRef};
use promptreel_providers::error::GenerateError;

/// The three calls a generative-video backend has to answer. The engine
/// never looks past this seam; tests script it, production wires it to the
/// Veo HTTP surface.
#[async_trait]
pub trait VideoJobProvider: Send + Sync {
    /// Starts a job. The returned snapshot usually has `done == false`.
    async fn submit_job(&self, request: &GenerationRequest) -> Result<Job, GenerateError>;

    /// Re-fetches the job status.
    async fn poll_job(&self, id: &JobId) -> Result<Job, GenerateError>;

    /// Downloads the bytes behind one media reference.
    async fn fetch_media(&self, media: &MediaRef) -> Result<MediaArtifact, GenerateError>;
}
