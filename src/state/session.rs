use chrono::{DateTime, Utc};
use tokio::time::Instant;

use crate::scheduler::{ArmedTimer, Timer, TimerKind};
use crate::types::*;

/// One battle, from join announcement to scoreboard
#[derive(Debug)]
pub struct Session {
    pub id: SessionId,
    pub channel: ChannelId,
    pub host: UserId,
    pub game_type: GameType,
    pub start_mode: StartMode,
    pub max_rounds: u32,
    /// Number of the round in progress (0 before the first one)
    pub round: u32,
    pub phase: SessionPhase,
    pub players: Vec<Player>,
    /// Insertion-ordered; a player gets an entry on their first score
    pub scores: Vec<ScoreEntry>,
    pub current_word: Option<String>,
    pub round_started_at: Option<Instant>,
    pub round_timer: Option<ArmedTimer>,
    pub auto_start_timer: Option<ArmedTimer>,
    pub join_message_id: MessageId,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(
        channel: ChannelId,
        host: UserId,
        game_type: GameType,
        start_mode: StartMode,
        max_rounds: u32,
        join_message_id: MessageId,
    ) -> Self {
        Self {
            id: ulid::Ulid::new().to_string(),
            channel,
            host,
            game_type,
            start_mode,
            max_rounds,
            round: 0,
            phase: SessionPhase::WaitingForPlayers,
            players: Vec::new(),
            scores: Vec::new(),
            current_word: None,
            round_started_at: None,
            round_timer: None,
            auto_start_timer: None,
            join_message_id,
            created_at: Utc::now(),
        }
    }

    pub fn is_waiting(&self) -> bool {
        self.phase == SessionPhase::WaitingForPlayers
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn has_player(&self, user_id: &str) -> bool {
        self.players.iter().any(|p| p.id == user_id)
    }

    pub fn rounds_exhausted(&self) -> bool {
        self.round >= self.max_rounds
    }

    /// Add a player to the roster. Only allowed while waiting; duplicates are ignored.
    /// Returns whether the roster changed.
    pub fn add_player(&mut self, player: Player) -> bool {
        if !self.is_waiting() || self.has_player(&player.id) {
            return false;
        }
        self.players.push(player);
        true
    }

    /// Credit `points` to `player`, returning their new total
    pub fn add_points(&mut self, player: &Player, points: u32) -> u32 {
        match self.scores.iter_mut().find(|s| s.player.id == player.id) {
            Some(entry) => {
                entry.points += points;
                entry.points
            }
            None => {
                self.scores.push(ScoreEntry {
                    player: player.clone(),
                    points,
                });
                points
            }
        }
    }

    /// Scores sorted descending; ties keep the order in which players first scored
    pub fn scoreboard(&self) -> Vec<ScoreEntry> {
        let mut board = self.scores.clone();
        board.sort_by(|a, b| b.points.cmp(&a.points));
        board
    }

    /// Whether a fired timer is still the one this session is waiting on.
    ///
    /// A match consumes the armed slot so the same timer can never be handled twice.
    pub fn claim_timer(&mut self, timer: &Timer) -> bool {
        let (slot, relevant) = match timer.kind {
            TimerKind::AutoStart => (
                &mut self.auto_start_timer,
                self.phase == SessionPhase::WaitingForPlayers,
            ),
            TimerKind::RoundTimeout { round } => (
                &mut self.round_timer,
                self.phase == SessionPhase::Running && self.round == round,
            ),
        };

        let claimed = relevant && slot.as_ref().is_some_and(|armed| armed.id == timer.id);
        if claimed {
            *slot = None;
        }
        claimed
    }

    pub fn cancel_round_timer(&mut self) {
        if let Some(armed) = self.round_timer.take() {
            armed.cancel();
        }
    }

    pub fn cancel_auto_start(&mut self) {
        if let Some(armed) = self.auto_start_timer.take() {
            armed.cancel();
        }
    }

    pub fn cancel_timers(&mut self) {
        self.cancel_round_timer();
        self.cancel_auto_start();
    }

    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            id: self.id.clone(),
            channel_id: self.channel.clone(),
            host_id: self.host.clone(),
            game_type: self.game_type,
            start_mode: self.start_mode,
            phase: self.phase,
            round: self.round,
            max_rounds: self.max_rounds,
            players: self.players.clone(),
            scores: self.scores.clone(),
            join_message_id: self.join_message_id.clone(),
            created_at: self.created_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::Scheduler;
    use std::time::Duration;

    fn session() -> Session {
        Session::new(
            "chan".to_string(),
            "host".to_string(),
            GameType::Tournament,
            StartMode::Manual,
            3,
            "join-msg".to_string(),
        )
    }

    #[test]
    fn test_new_session_is_waiting() {
        let s = session();
        assert!(s.is_waiting());
        assert!(!s.is_running());
        assert_eq!(s.round, 0);
        assert!(s.players.is_empty());
        assert!(s.scores.is_empty());
        assert!(s.current_word.is_none());
    }

    #[test]
    fn test_add_player_rejects_duplicates() {
        let mut s = session();
        assert!(s.add_player(Player::new("1", "alice")));
        assert!(s.add_player(Player::new("2", "bob")));
        assert!(!s.add_player(Player::new("1", "alice")));
        let names: Vec<_> = s.players.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["alice", "bob"]);
    }

    #[test]
    fn test_roster_frozen_once_running() {
        let mut s = session();
        s.add_player(Player::new("1", "alice"));
        s.phase = SessionPhase::Running;
        assert!(!s.add_player(Player::new("2", "bob")));
        assert_eq!(s.players.len(), 1);
    }

    #[test]
    fn test_scoreboard_descending_with_stable_ties() {
        let mut s = session();
        let alice = Player::new("1", "alice");
        let bob = Player::new("2", "bob");
        let carol = Player::new("3", "carol");

        s.add_points(&bob, 30);
        s.add_points(&alice, 50);
        s.add_points(&carol, 30);
        assert_eq!(s.add_points(&bob, 20), 50);

        let board: Vec<_> = s
            .scoreboard()
            .into_iter()
            .map(|e| (e.player.name, e.points))
            .collect();
        assert_eq!(
            board,
            vec![
                ("bob".to_string(), 50),
                ("alice".to_string(), 50),
                ("carol".to_string(), 30),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_claim_timer_only_once() {
        let (scheduler, _rx) = Scheduler::new();
        let mut s = session();
        s.phase = SessionPhase::Running;
        s.round = 1;

        let armed = scheduler.arm(
            Duration::from_secs(60),
            s.channel.clone(),
            TimerKind::RoundTimeout { round: 1 },
        );
        let fired = Timer {
            id: armed.id,
            channel: s.channel.clone(),
            kind: TimerKind::RoundTimeout { round: 1 },
        };
        s.round_timer = Some(armed);

        assert!(s.claim_timer(&fired));
        assert!(!s.claim_timer(&fired));
    }

    #[tokio::test(start_paused = true)]
    async fn test_claim_timer_rejects_stale_ids() {
        let (scheduler, _rx) = Scheduler::new();
        let mut s = session();
        s.phase = SessionPhase::Running;
        s.round = 2;

        let old = scheduler.arm(
            Duration::from_secs(60),
            s.channel.clone(),
            TimerKind::RoundTimeout { round: 1 },
        );
        let stale = Timer {
            id: old.id,
            channel: s.channel.clone(),
            kind: TimerKind::RoundTimeout { round: 1 },
        };
        old.cancel();
        s.round_timer = Some(scheduler.arm(
            Duration::from_secs(60),
            s.channel.clone(),
            TimerKind::RoundTimeout { round: 2 },
        ));

        assert!(!s.claim_timer(&stale));
        assert!(s.round_timer.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_start_irrelevant_once_running() {
        let (scheduler, _rx) = Scheduler::new();
        let mut s = session();
        let armed = scheduler.arm(Duration::from_secs(120), s.channel.clone(), TimerKind::AutoStart);
        let fired = Timer {
            id: armed.id,
            channel: s.channel.clone(),
            kind: TimerKind::AutoStart,
        };
        s.auto_start_timer = Some(armed);
        s.phase = SessionPhase::Running;

        assert!(!s.claim_timer(&fired));
    }
}
