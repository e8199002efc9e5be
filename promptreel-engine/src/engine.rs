use crate::outcome::{GeneratedVideos, GenerationOutcome, GenerationPhase, GenerationTimings, ms};
use crate::traits::VideoJobProvider;
use futures_util::future::try_join_all;
use promptreel_core::types::{GenerationId, GenerationRequest, MediaArtifact, MediaRef};
use promptreel_providers::error::GenerateError;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How the engine waits on a running job. The default matches the provider
/// guidance: re-check every 10 seconds, for as long as it takes. A maximum
/// check count is injectable so tests and cautious deployments can put a
/// ceiling on the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_checks: Option<u32>,
}

impl PollPolicy {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);

    pub fn new() -> Self {
        Self {
            interval: Self::DEFAULT_INTERVAL,
            max_checks: None,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_max_checks(mut self, max_checks: u32) -> Self {
        self.max_checks = Some(max_checks);
        self
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new()
    }
}

pub struct PromptreelEngine {
    provider: Arc<dyn VideoJobProvider>,
    poll: PollPolicy,
}

impl PromptreelEngine {
    pub fn new(provider: Arc<dyn VideoJobProvider>) -> Self {
        Self {
            provider,
            poll: PollPolicy::default(),
        }
    }

    pub fn with_poll_policy(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }

    /// Submits the job once and polls until the provider reports it done.
    pub async fn run_to_completion(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationOutcome, GenerateError> {
        self.run_to_completion_with_hook(request, |_phase| async {})
            .await
    }

    /// Same as `run_to_completion`, but emits a phase hook as the job
    /// progresses.
    ///
    /// The hook is intended for progress display (status line, logs) and
    /// must be fast. Checks are strictly sequential: every wait runs to
    /// completion before the next status fetch, and polling stops at the
    /// first `done` observation.
    pub async fn run_to_completion_with_hook<F, Fut>(
        &self,
        request: &GenerationRequest,
        on_phase: F,
    ) -> Result<GenerationOutcome, GenerateError>
    where
        F: Fn(GenerationPhase) -> Fut,
        Fut: Future<Output = ()>,
    {
        let generation = GenerationId::new();

        on_phase(GenerationPhase::Submitting).await;
        let mut job = self.provider.submit_job(request).await?;

        let t0 = Instant::now();
        let mut checks: u32 = 0;
        while !job.done {
            if let Some(max) = self.poll.max_checks {
                if checks >= max {
                    return Err(GenerateError::PollBudgetExhausted { checks });
                }
            }
            tokio::time::sleep(self.poll.interval).await;
            checks += 1;
            on_phase(GenerationPhase::Polling { check: checks }).await;
            job = self.provider.poll_job(&job.id).await?;
        }
        let polling_ms = ms(t0.elapsed());

        if job.media.is_empty() {
            return Err(GenerateError::EmptyResult);
        }

        Ok(GenerationOutcome {
            generation,
            job,
            checks,
            timings: GenerationTimings {
                polling_ms: Some(polling_ms),
                fetch_ms: None,
            },
        })
    }

    /// Downloads every media reference of a completed job, preserving
    /// provider order. Fetches run concurrently but independently; one
    /// failure aborts the whole set, and partial results are never returned.
    pub async fn fetch_artifacts(
        &self,
        media: &[MediaRef],
    ) -> Result<Vec<MediaArtifact>, GenerateError> {
        try_join_all(media.iter().map(|m| self.provider.fetch_media(m))).await
    }

    /// Downloads a single media reference.
    pub async fn fetch_artifact(&self, media: &MediaRef) -> Result<MediaArtifact, GenerateError> {
        self.provider.fetch_media(media).await
    }

    /// Runs the full pipeline (submit -> poll -> download all videos).
    pub async fn run_generation(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedVideos, GenerateError> {
        self.run_generation_with_hook(request, |_phase| async {})
            .await
    }

    pub async fn run_generation_with_hook<F, Fut>(
        &self,
        request: &GenerationRequest,
        on_phase: F,
    ) -> Result<GeneratedVideos, GenerateError>
    where
        F: Fn(GenerationPhase) -> Fut,
        Fut: Future<Output = ()>,
    {
        let mut outcome = self.run_to_completion_with_hook(request, &on_phase).await?;

        on_phase(GenerationPhase::Fetching {
            count: outcome.job.media.len(),
        })
        .await;

        let f0 = Instant::now();
        let artifacts = self.fetch_artifacts(&outcome.job.media).await?;
        outcome.timings.fetch_ms = Some(ms(f0.elapsed()));

        on_phase(GenerationPhase::Done).await;
        Ok(GeneratedVideos { outcome, artifacts })
    }
}
