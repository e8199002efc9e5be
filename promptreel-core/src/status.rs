/// How long each loading phrase stays on screen.
pub const STATUS_ROTATION_INTERVAL_MS: u64 = 4_000;

/// Shown while a generation is in flight, in this order, wrapping around.
pub const LOADING_MESSAGES: [&str; 6] = [
    "Sending to the server...",
    "Generating... this can take a few minutes.",
    "The model is working on your creation.",
    "Fetching results, please be patient.",
    "Finishing up the video...",
    "Almost there...",
];

/// Cursor over [`LOADING_MESSAGES`]. The display layer owns the timer; this
/// only tracks which phrase is current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRotation {
    index: usize,
}

impl StatusRotation {
    pub fn new() -> Self {
        Self { index: 0 }
    }

    pub fn current(&self) -> &'static str {
        LOADING_MESSAGES[self.index]
    }

    pub fn advance(&mut self) -> &'static str {
        self.index = (self.index + 1) % LOADING_MESSAGES.len();
        self.current()
    }
}

impl Default for StatusRotation {
    fn default() -> Self {
        Self::new()
    }
}
