use super::AppState;
use crate::types::*;

/// A correct guess and what it earned
#[derive(Debug, Clone, PartialEq)]
pub struct GuessOutcome {
    pub player: Player,
    pub points: u32,
    pub total: u32,
    pub elapsed_secs: u64,
}

impl AppState {
    /// Check a chat message against the running round in `channel`.
    ///
    /// Returns `None` for anything that is not a correct guess by a player:
    /// no battle, battle not running, author not on the roster, or wrong word.
    pub async fn evaluate_guess(
        &self,
        channel: &str,
        author_id: &str,
        text: &str,
    ) -> Option<GuessOutcome> {
        let mut registry = self.registry.lock().await;
        let session = registry.get_mut(channel)?;
        if !session.is_running() {
            return None;
        }

        let player = session.players.iter().find(|p| p.id == author_id)?.clone();
        let guess = text.to_lowercase();
        if session.current_word.as_deref() != Some(guess.as_str()) {
            return None;
        }

        session.cancel_round_timer();
        session.current_word = None;

        let elapsed_secs = session
            .round_started_at
            .map(|started| started.elapsed().as_secs())
            .unwrap_or(0);
        let points = self.config.points_for(elapsed_secs);
        let total = session.add_points(&player, points);
        let channel = session.channel.clone();

        tracing::info!(
            "{} solved round {} of battle {} in {}s (+{} pts)",
            player.name,
            session.round,
            session.id,
            elapsed_secs,
            points
        );

        self.say(
            &channel,
            &format!("✅ Correct, {}! You earned **{} pts**.", player.name, points),
        )
        .await;
        self.advance_round(&mut registry, &channel).await;

        Some(GuessOutcome {
            player,
            points,
            total,
            elapsed_secs,
        })
    }
}
