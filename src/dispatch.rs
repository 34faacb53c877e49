use crate::state::AppState;
use std::sync::Arc;

/// Spawn the background task that feeds fired timers back into the battle state
pub fn spawn_timer_dispatcher(state: Arc<AppState>) {
    tokio::spawn(async move {
        let Some(mut fired) = state.take_fired_timers().await else {
            tracing::warn!("Timer dispatcher already running");
            return;
        };

        while let Some(timer) = fired.recv().await {
            tracing::debug!("Dispatching {} for {}", timer.id, timer.channel);
            state.handle_timer(timer).await;
        }
    });
}
