use thiserror::Error;

/// Everything that can go wrong between submitting a prompt and holding
/// video bytes. One attempt maps to at most one of these; there is no
/// partial success and nothing is retried.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("API_KEY environment variable not set.")]
    MissingApiKey,

    /// The provider rejected the call for quota reasons. Recognized from
    /// the structured error payload, not by sniffing message text.
    #[error("{message}")]
    QuotaExhausted { message: String },

    #[error("No videos were generated.")]
    EmptyResult,

    /// Provider-reported failure. The message is passed through untouched,
    /// including bodies that were not JSON to begin with.
    #[error("{message}")]
    Provider { status: Option<u16>, message: String },

    /// Only reachable when a maximum check count was configured.
    #[error("video generation still running after {checks} status checks")]
    PollBudgetExhausted { checks: u32 },

    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

/// Maps an error to the line a person should see. Quota errors get billing
/// guidance instead of the raw provider text; everything else is shown as-is.
pub fn user_facing_generate_error(err: &GenerateError) -> String {
    match err {
        GenerateError::QuotaExhausted { .. } => {
            "You have exceeded your API quota. Please check your plan and billing details."
                .to_string()
        }
        other => other.to_string(),
    }
}
