use promptreel_core::status::{STATUS_ROTATION_INTERVAL_MS, StatusRotation};
use std::future::Future;
use std::io::Write;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Rotating status line shown on stderr while a generation runs. Consuming
/// `finish` makes stopping it twice impossible.
pub struct StatusTicker {
    handle: JoinHandle<()>,
}

impl StatusTicker {
    pub fn start() -> Self {
        let handle = tokio::spawn(async move {
            let mut rotation = StatusRotation::new();
            loop {
                print_status(rotation.current());
                tokio::time::sleep(Duration::from_millis(STATUS_ROTATION_INTERVAL_MS)).await;
                rotation.advance();
            }
        });
        Self { handle }
    }

    /// Stops the rotation and erases the status line.
    pub async fn finish(self) {
        self.handle.abort();
        let _ = self.handle.await;
        clear_status();
    }
}

/// Runs `work` behind the rotating status line. The line starts before the
/// work is polled and is erased when the work settles, on success and
/// failure alike.
pub async fn with_ticker<T>(work: impl Future<Output = T>) -> T {
    let ticker = StatusTicker::start();
    let result = work.await;
    ticker.finish().await;
    result
}

fn print_status(message: &str) {
    let mut err = std::io::stderr();
    let _ = write!(err, "\r\x1b[2K{message}");
    let _ = err.flush();
}

fn clear_status() {
    let mut err = std::io::stderr();
    let _ = write!(err, "\r\x1b[2K");
    let _ = err.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn finish_returns_promptly() {
        let ticker = StatusTicker::start();
        // Must not wait out the rotation interval.
        tokio::time::timeout(Duration::from_secs(1), ticker.finish())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn wrapped_work_finishes_the_ticker_on_both_outcomes() {
        // The timeout proves the ticker was torn down instead of running out
        // its 4s rotation; the passthrough proves neither outcome is eaten.
        let ok = tokio::time::timeout(
            Duration::from_secs(1),
            with_ticker(async { Ok::<_, String>(7u32) }),
        )
        .await
        .unwrap();
        assert_eq!(ok, Ok(7));

        let err = tokio::time::timeout(
            Duration::from_secs(1),
            with_ticker(async { Err::<u32, _>("boom".to_string()) }),
        )
        .await
        .unwrap();
        assert_eq!(err, Err("boom".to_string()));
    }
}
