//! Rotating bot presence.

use std::time::Duration;

use rand::Rng;
use serenity::gateway::ActivityData;
use serenity::prelude::Context;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::debug;

const MIN_CYCLE: Duration = Duration::from_secs(5 * 60);
const MAX_CYCLE: Duration = Duration::from_secs(10 * 60);

/// Cycle the bot's "playing" activity through the configured list, picking a
/// random entry and a random 5 to 10 minute delay each round. Runs until
/// shutdown; does nothing when the list is empty.
pub async fn cycle_status(
    context: Context,
    statuses: Vec<String>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    if statuses.is_empty() {
        return;
    }

    loop {
        // Sample in a block so the rng is not held across an await.
        let (delay, status) = {
            let mut rng = rand::thread_rng();
            let delay = rng.gen_range(MIN_CYCLE..=MAX_CYCLE);
            let status = statuses[rng.gen_range(0..statuses.len())].clone();
            (delay, status)
        };

        debug!("Setting bot activity to '{}'", status);
        context.set_activity(Some(ActivityData::playing(status)));

        tokio::select! {
            _ = sleep(delay) => {}
            changed = shutdown_rx.changed() => {
                if changed.is_err() || *shutdown_rx.borrow() {
                    return;
                }
            }
        }
    }
}
