use client_core::{AssignmentEvent, Step};
use tokio::sync::broadcast::{error::RecvError, Receiver};
use tracing::debug;

/// Waits for the controller to enter `Confirming`. Returns `false` once the
/// controller is gone. Falling behind the channel only skips events.
pub async fn next_confirming(events: &mut Receiver<AssignmentEvent>) -> bool {
    loop {
        match events.recv().await {
            Ok(AssignmentEvent::StateChanged {
                step: Step::Confirming,
                ..
            }) => return true,
            Ok(_) => {}
            Err(RecvError::Lagged(skipped)) => {
                debug!(skipped, "progress watcher lagged behind controller events");
            }
            Err(RecvError::Closed) => return false,
        }
    }
}

#[cfg(test)]
#[path = "tests/progress_tests.rs"]
mod tests;
