use super::AppState;
use crate::types::*;

impl AppState {
    /// Record a reaction on a join announcement.
    ///
    /// Silently ignored unless the reaction is the join emoji on the
    /// announcement of a battle that is still waiting for players. Bot
    /// reactions must be filtered out before calling this.
    /// Returns whether the roster changed.
    pub async fn record_join(&self, message_id: &str, emoji: &str, player: Player) -> bool {
        let mut registry = self.registry.lock().await;

        let Some(channel) = registry.channel_for_join(message_id).cloned() else {
            return false;
        };
        if emoji != JOIN_EMOJI {
            return false;
        }
        let Some(session) = registry.get_mut(&channel) else {
            return false;
        };
        if !session.is_waiting() {
            tracing::debug!(
                "Ignoring late join from {} to battle {}",
                player.name,
                session.id
            );
            return false;
        }

        let name = player.name.clone();
        let added = session.add_player(player);
        if added {
            tracing::info!(
                "{} joined battle {} ({} players)",
                name,
                session.id,
                session.players.len()
            );
        }
        added
    }
}
