use promptreel_core::types::{GenerationId, Job, MediaArtifact};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationPhase {
    Submitting,
    /// `check` counts status fetches, starting at 1.
    Polling { check: u32 },
    Fetching { count: usize },
    Done,
}

impl GenerationPhase {
    // A stable string label for display and logs.
    // This is intentionally not derived from `Debug`.
    pub fn label(&self) -> &'static str {
        match self {
            GenerationPhase::Submitting => "submitting",
            GenerationPhase::Polling { .. } => "polling",
            GenerationPhase::Fetching { .. } => "fetching",
            GenerationPhase::Done => "done",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenerationTimings {
    pub polling_ms: Option<u64>,
    pub fetch_ms: Option<u64>,
}

/// What a completed poll cycle produced, before any bytes were downloaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOutcome {
    pub generation: GenerationId,
    pub job: Job,
    pub checks: u32,
    pub timings: GenerationTimings,
}

/// A finished generation with its downloaded videos, in provider order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedVideos {
    pub outcome: GenerationOutcome,
    pub artifacts: Vec<MediaArtifact>,
}

pub fn ms(d: Duration) -> u64 {
    d.as_millis().try_into().unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_labels_are_stable() {
        assert_eq!(GenerationPhase::Submitting.label(), "submitting");
        assert_eq!(GenerationPhase::Polling { check: 3 }.label(), "polling");
        assert_eq!(GenerationPhase::Fetching { count: 1 }.label(), "fetching");
        assert_eq!(GenerationPhase::Done.label(), "done");
    }
}
