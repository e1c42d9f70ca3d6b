use tracing::{debug, error, info};
use web_time::Instant;

use crate::display::DisplaySurface;
use crate::protocol::StateReply;
use crate::service::GameService;
use crate::types::{GameSnapshot, ScorePair};

/// Reads the current snapshot from the engine.
///
/// Never fails: the no-game reply resets the score labels to the opening
/// count, and transport failures are logged. Both yield `None`, which callers
/// read as "state unknown, do not advance".
pub async fn fetch_snapshot<S, D>(service: &S, display: &D) -> Option<GameSnapshot>
where
    S: GameService + ?Sized,
    D: DisplaySurface + ?Sized,
{
    let started = Instant::now();

    match service.fetch_state().await {
        Ok(StateReply::Snapshot(snapshot)) => {
            debug!(
                elapsed_ms = started.elapsed().as_millis() as u64,
                black = snapshot.scores.black,
                white = snapshot.scores.white,
                hints = snapshot.board.hint_count(),
                active = ?snapshot.active_player_type,
                finished = snapshot.is_finished,
                "fetched game state"
            );
            Some(snapshot)
        }
        Ok(StateReply::NoInstance) => {
            info!("no game instance on the server, showing default scores");
            display.set_scores(ScorePair::default());
            None
        }
        Err(err) => {
            error!(error = %err, "failed to fetch game state");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::board::Board;
    use crate::error::ClientError;
    use crate::test_support::{FakeService, Journal, RecordingDisplay, init_test_logging, snapshot};
    use crate::types::PlayerType;

    #[test]
    fn returns_snapshot_untouched() {
        init_test_logging();
        let journal = Journal::default();
        let service = FakeService::new(&journal);
        let snap = snapshot(Board::new(), PlayerType::Human);
        service.set_state(StateReply::Snapshot(snap.clone()));

        let fetched = block_on(fetch_snapshot(&service, &RecordingDisplay::default()));

        assert_eq!(fetched, Some(snap));
    }

    #[test]
    fn no_instance_forces_default_scores() {
        init_test_logging();
        let journal = Journal::default();
        let service = FakeService::new(&journal);
        service.set_state(StateReply::NoInstance);
        let display = RecordingDisplay::default();

        let fetched = block_on(fetch_snapshot(&service, &display));

        assert_eq!(fetched, None);
        assert_eq!(display.labels(), ("Black: 2".to_string(), "White: 2".to_string()));
    }

    #[test]
    fn transport_failure_yields_none_without_touching_display() {
        init_test_logging();
        let journal = Journal::default();
        let service = FakeService::new(&journal);
        service.fail_state(ClientError::Transport("connection refused".to_string()));
        let display = RecordingDisplay::default();

        let fetched = block_on(fetch_snapshot(&service, &display));

        assert_eq!(fetched, None);
        assert_eq!(display.score_writes(), 0);
    }
}
