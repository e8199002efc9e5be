use crate::traits::VideoJobProvider;
use async_trait::async_trait;
use promptreel_core::types::{GenerationRequest, Job, JobId, MediaArtifact, MediaRef};
use promptreel_providers::error::GenerateError;
use promptreel_providers::parse::{error_from_body, parse_operation};
use promptreel_providers::runtime;
use promptreel_providers::veo::{
    VeoConfig, build_generate_videos_request, build_media_fetch_request,
    build_operation_status_request,
};

/// [`VideoJobProvider`] backed by the Veo HTTP surface.
pub struct VeoVideoProvider {
    cfg: VeoConfig,
}

impl VeoVideoProvider {
    pub fn new(cfg: VeoConfig) -> Self {
        Self { cfg }
    }
}

#[async_trait]
impl VideoJobProvider for VeoVideoProvider {
    async fn submit_job(&self, request: &GenerationRequest) -> Result<Job, GenerateError> {
        let req = build_generate_videos_request(&self.cfg, request);
        let resp = runtime::execute(&req).await?;
        if !(200..=299).contains(&resp.status) {
            return Err(error_from_body(resp.status, &resp.body));
        }
        parse_operation(&resp.body)
    }

    async fn poll_job(&self, id: &JobId) -> Result<Job, GenerateError> {
        let req = build_operation_status_request(&self.cfg, id);
        let resp = runtime::execute(&req).await?;
        if !(200..=299).contains(&resp.status) {
            return Err(error_from_body(resp.status, &resp.body));
        }
        parse_operation(&resp.body)
    }

    async fn fetch_media(&self, media: &MediaRef) -> Result<MediaArtifact, GenerateError> {
        let req = build_media_fetch_request(&self.cfg, media);
        let resp = runtime::execute(&req).await?;
        if !(200..=299).contains(&resp.status) {
            return Err(error_from_body(resp.status, &resp.body));
        }
        Ok(MediaArtifact {
            bytes: resp.body,
            mime_type: resp
                .content_type
                .unwrap_or_else(|| "video/mp4".to_string()),
        })
    }
}
