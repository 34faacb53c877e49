//! Battle lifecycle: creation, start, rounds, scoreboard
//!
//! `NONE -> WAITING -> RUNNING -> NONE`, or `WAITING -> NONE` when nobody
//! joined. Timers re-enter through [`AppState::handle_timer`].

use tokio::time::Instant;

use super::{AppState, Session, SessionRegistry};
use crate::error::{BattleError, BattleResult};
use crate::scheduler::{Timer, TimerKind};
use crate::state::format_scoreboard;
use crate::types::*;
use crate::words::scramble;

/// Request to open a new battle
#[derive(Debug, Clone)]
pub struct CreateBattle {
    pub channel: ChannelId,
    pub host: UserId,
    pub game_type: GameType,
    pub start_mode: StartMode,
    pub rounds: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BattleCreated {
    pub session_id: SessionId,
    pub join_message_id: MessageId,
    pub game_type: GameType,
    pub start_mode: StartMode,
    pub rounds: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// Rounds are under way
    Started,
    /// Nobody joined; the battle was called off
    Cancelled,
}

/// "2 mins", "90 secs"
fn describe_delay(secs: u64) -> String {
    if secs >= 60 && secs % 60 == 0 {
        let mins = secs / 60;
        format!("{} min{}", mins, if mins == 1 { "" } else { "s" })
    } else {
        format!("{} sec{}", secs, if secs == 1 { "" } else { "s" })
    }
}

impl AppState {
    /// Rounds a battle will run: quick is always one, tournaments default from config
    pub fn resolve_rounds(&self, game_type: GameType, requested: Option<u32>) -> u32 {
        match game_type {
            GameType::Quick => 1,
            GameType::Tournament => requested
                .unwrap_or(self.config.default_rounds)
                .max(1),
        }
    }

    fn join_announcement(&self, game_type: GameType, start_mode: StartMode, rounds: u32) -> String {
        let start = match start_mode {
            StartMode::Manual => "Manually by host".to_string(),
            StartMode::Auto => format!("Auto in {}", describe_delay(self.config.auto_start_secs)),
        };
        format!(
            "🎮 **Word Battle Starting!** Type: **{}** ({} round{})\nReact with {} to join!\nStart: **{}**",
            game_type.as_str(),
            rounds,
            if rounds > 1 { "s" } else { "" },
            JOIN_EMOJI,
            start,
        )
    }

    /// Open a battle and post its join announcement
    pub async fn create_battle(&self, request: CreateBattle) -> BattleResult<BattleCreated> {
        let rounds = self.resolve_rounds(request.game_type, request.rounds);

        let mut registry = self.registry.lock().await;
        if registry.has_conflict(&request.channel) {
            tracing::info!(
                "Rejecting battle in {}: another battle is active",
                request.channel
            );
            return Err(BattleError::Conflict);
        }

        let text = self.join_announcement(request.game_type, request.start_mode, rounds);
        let join_message_id = self.announcer.announce(&request.channel, &text).await?;

        let mut session = Session::new(
            request.channel.clone(),
            request.host,
            request.game_type,
            request.start_mode,
            rounds,
            join_message_id,
        );

        if request.start_mode == StartMode::Auto {
            session.auto_start_timer = Some(self.scheduler.arm(
                self.config.auto_start_delay(),
                session.channel.clone(),
                TimerKind::AutoStart,
            ));
        }

        let created = BattleCreated {
            session_id: session.id.clone(),
            join_message_id: session.join_message_id.clone(),
            game_type: session.game_type,
            start_mode: session.start_mode,
            rounds,
        };

        tracing::info!(
            "Battle {} created in {} by {} ({} rounds, {} start)",
            session.id,
            session.channel,
            session.host,
            rounds,
            session.start_mode.as_str()
        );
        registry.insert(session);

        Ok(created)
    }

    /// Manual start by the host
    pub async fn start_game(&self, channel: &str, user: &str) -> BattleResult<StartOutcome> {
        let mut registry = self.registry.lock().await;
        let session = registry
            .resolve(channel)
            .and_then(|key| registry.get(key))
            .ok_or(BattleError::NoSession)?;

        if session.host != user {
            return Err(BattleError::Unauthorized);
        }
        if session.is_running() {
            return Err(BattleError::AlreadyStarted);
        }

        let channel = session.channel.clone();
        Ok(self.start_tournament(&mut registry, &channel).await)
    }

    /// Entry point for fired timers; stale ones are dropped here
    pub async fn handle_timer(&self, timer: Timer) {
        let mut registry = self.registry.lock().await;

        let Some(session) = registry.get_mut(&timer.channel) else {
            tracing::debug!("Ignoring {}: no battle in {}", timer.id, timer.channel);
            return;
        };
        if !session.claim_timer(&timer) {
            tracing::debug!("Ignoring stale {} ({:?})", timer.id, timer.kind);
            return;
        }

        match timer.kind {
            TimerKind::AutoStart => {
                tracing::info!("Auto-starting battle {}", session.id);
                self.start_tournament(&mut registry, &timer.channel).await;
            }
            TimerKind::RoundTimeout { round } => {
                let word = session.current_word.take().unwrap_or_default();
                tracing::info!("Round {} of battle {} timed out", round, session.id);
                self.say(
                    &timer.channel,
                    &format!("⏰ Time's up! The word was **{}**.", word),
                )
                .await;
                self.advance_round(&mut registry, &timer.channel).await;
            }
        }
    }

    async fn start_tournament(
        &self,
        registry: &mut SessionRegistry,
        channel: &ChannelId,
    ) -> StartOutcome {
        let Some(session) = registry.get_mut(channel) else {
            return StartOutcome::Cancelled;
        };
        session.cancel_auto_start();

        if session.players.is_empty() {
            tracing::info!("Battle {} cancelled: no players joined", session.id);
            registry.remove(channel);
            self.say(channel, "⚠️ No players joined. Cancelling the game.")
                .await;
            return StartOutcome::Cancelled;
        }

        session.phase = SessionPhase::Running;
        session.round = 0;
        tracing::info!(
            "Battle {} started with {} players",
            session.id,
            session.players.len()
        );

        self.advance_round(registry, channel).await;
        StartOutcome::Started
    }

    /// Start the next round, or finish the battle when all rounds are played
    pub(super) async fn advance_round(&self, registry: &mut SessionRegistry, channel: &ChannelId) {
        let Some(session) = registry.get_mut(channel) else {
            return;
        };

        if session.rounds_exhausted() {
            self.end_session(registry, channel).await;
            return;
        }

        session.round += 1;
        let word = self.words.pick_word().to_string();
        let scrambled = scramble(&word);
        session.current_word = Some(word);
        session.round_started_at = Some(Instant::now());
        session.round_timer = Some(self.scheduler.arm(
            self.config.round_timeout(),
            channel.clone(),
            TimerKind::RoundTimeout {
                round: session.round,
            },
        ));

        tracing::debug!(
            "Battle {} round {}/{}",
            session.id,
            session.round,
            session.max_rounds
        );
        let text = format!(
            "🔤 **Round {}**: Unscramble this word: **{}** ({}s)",
            session.round, scrambled, self.config.round_secs
        );
        self.say(channel, &text).await;
    }

    async fn end_session(&self, registry: &mut SessionRegistry, channel: &ChannelId) {
        let Some(session) = registry.remove(channel) else {
            return;
        };

        let board = session.scoreboard();
        tracing::info!(
            "Battle {} finished after {} rounds",
            session.id,
            session.round
        );
        let text = format!(
            "🏁 **Tournament Over!**\n\n**Final Scores:**\n{}",
            format_scoreboard(&board)
        );
        self.say(channel, &text).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_delay() {
        assert_eq!(describe_delay(120), "2 mins");
        assert_eq!(describe_delay(60), "1 min");
        assert_eq!(describe_delay(90), "90 secs");
        assert_eq!(describe_delay(1), "1 sec");
    }
}
