mod guess;
mod join;
mod lifecycle;
mod score;
pub mod session;

pub use guess::GuessOutcome;
pub use lifecycle::{BattleCreated, CreateBattle, StartOutcome};
pub use score::format_scoreboard;
pub use session::Session;

use crate::announce::Announcer;
use crate::config::{GameConfig, SessionScope};
use crate::scheduler::{Scheduler, Timer};
use crate::types::*;
use crate::words::WordList;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

/// Active battles keyed by channel, plus the join-announcement index
#[derive(Debug)]
pub struct SessionRegistry {
    scope: SessionScope,
    sessions: HashMap<ChannelId, Session>,
    join_index: HashMap<MessageId, ChannelId>,
}

impl SessionRegistry {
    pub fn new(scope: SessionScope) -> Self {
        Self {
            scope,
            sessions: HashMap::new(),
            join_index: HashMap::new(),
        }
    }

    /// Whether creating a battle in `channel` would collide with an active one
    pub fn has_conflict(&self, channel: &str) -> bool {
        match self.scope {
            SessionScope::Global => self
                .sessions
                .values()
                .any(|s| s.is_waiting() || s.is_running()),
            SessionScope::Channel => self
                .sessions
                .get(channel)
                .is_some_and(|s| s.is_waiting() || s.is_running()),
        }
    }

    pub fn insert(&mut self, session: Session) {
        self.join_index
            .insert(session.join_message_id.clone(), session.channel.clone());
        let replaced = self.sessions.insert(session.channel.clone(), session);
        debug_assert!(replaced.is_none(), "insert must follow a conflict check");
    }

    /// Channel of the battle a command issued in `channel` refers to.
    ///
    /// In global scope the single active battle is reachable from any channel.
    pub fn resolve(&self, channel: &str) -> Option<&ChannelId> {
        if let Some((key, _)) = self.sessions.get_key_value(channel) {
            return Some(key);
        }
        match self.scope {
            SessionScope::Global if self.sessions.len() == 1 => self.sessions.keys().next(),
            _ => None,
        }
    }

    pub fn get(&self, channel: &str) -> Option<&Session> {
        self.sessions.get(channel)
    }

    pub fn get_mut(&mut self, channel: &str) -> Option<&mut Session> {
        self.sessions.get_mut(channel)
    }

    /// Channel of the session whose join announcement is `message_id`
    pub fn channel_for_join(&self, message_id: &str) -> Option<&ChannelId> {
        self.join_index.get(message_id)
    }

    /// Discard a session: its timers are cancelled and its join anchor forgotten
    pub fn remove(&mut self, channel: &str) -> Option<Session> {
        let mut session = self.sessions.remove(channel)?;
        session.cancel_timers();
        self.join_index.remove(&session.join_message_id);
        Some(session)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn sessions(&self) -> impl Iterator<Item = &Session> {
        self.sessions.values()
    }
}

/// Shared application state
///
/// Every handler holds the registry lock for its whole run, announcements
/// included, so battle state changes never interleave.
pub struct AppState {
    pub config: GameConfig,
    pub words: WordList,
    pub announcer: Arc<dyn Announcer>,
    pub registry: Arc<Mutex<SessionRegistry>>,
    scheduler: Scheduler,
    fired_timers: Mutex<Option<mpsc::UnboundedReceiver<Timer>>>,
}

impl AppState {
    pub fn new(config: GameConfig, words: WordList, announcer: Arc<dyn Announcer>) -> Self {
        let (scheduler, fired_rx) = Scheduler::new();
        Self {
            registry: Arc::new(Mutex::new(SessionRegistry::new(config.session_scope))),
            config,
            words,
            announcer,
            scheduler,
            fired_timers: Mutex::new(Some(fired_rx)),
        }
    }

    /// Hand out the fired-timer stream (only the first caller gets it)
    pub async fn take_fired_timers(&self) -> Option<mpsc::UnboundedReceiver<Timer>> {
        self.fired_timers.lock().await.take()
    }

    /// Public view of the session in `channel`
    pub async fn get_session(&self, channel: &str) -> Option<SessionInfo> {
        self.registry.lock().await.get(channel).map(Session::info)
    }

    /// All active sessions, oldest first
    pub async fn list_sessions(&self) -> Vec<SessionInfo> {
        let registry = self.registry.lock().await;
        let mut sessions: Vec<_> = registry.sessions().collect();
        sessions.sort_by_key(|s| s.created_at);
        sessions.into_iter().map(Session::info).collect()
    }

    /// The answer of the round in progress in `channel`
    pub async fn current_word(&self, channel: &str) -> Option<String> {
        self.registry
            .lock()
            .await
            .get(channel)
            .filter(|s| s.is_running())
            .and_then(|s| s.current_word.clone())
    }

    /// Post to a channel; failures are logged, never propagated
    async fn say(&self, channel: &ChannelId, text: &str) {
        if let Err(e) = self.announcer.announce(channel, text).await {
            tracing::warn!("Failed to announce to {}: {}", channel, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(channel: &str, join_id: &str) -> Session {
        Session::new(
            channel.to_string(),
            "host".to_string(),
            GameType::Tournament,
            StartMode::Manual,
            3,
            join_id.to_string(),
        )
    }

    #[test]
    fn test_global_scope_conflicts_across_channels() {
        let mut registry = SessionRegistry::new(SessionScope::Global);
        assert!(!registry.has_conflict("a"));

        registry.insert(session("a", "m1"));
        assert!(registry.has_conflict("a"));
        assert!(registry.has_conflict("b"));
    }

    #[test]
    fn test_channel_scope_conflicts_per_channel() {
        let mut registry = SessionRegistry::new(SessionScope::Channel);
        registry.insert(session("a", "m1"));
        assert!(registry.has_conflict("a"));
        assert!(!registry.has_conflict("b"));
    }

    #[test]
    fn test_resolve_follows_scope() {
        let mut global = SessionRegistry::new(SessionScope::Global);
        assert!(global.resolve("a").is_none());
        global.insert(session("a", "m1"));
        assert_eq!(global.resolve("a").map(String::as_str), Some("a"));
        assert_eq!(global.resolve("b").map(String::as_str), Some("a"));

        let mut per_channel = SessionRegistry::new(SessionScope::Channel);
        per_channel.insert(session("a", "m1"));
        assert_eq!(per_channel.resolve("a").map(String::as_str), Some("a"));
        assert!(per_channel.resolve("b").is_none());
    }

    #[test]
    #[should_panic(expected = "conflict check")]
    fn test_insert_never_replaces_a_session() {
        let mut registry = SessionRegistry::new(SessionScope::Channel);
        registry.insert(session("a", "m1"));
        registry.insert(session("a", "m2"));
    }

    #[test]
    fn test_remove_drops_join_anchor() {
        let mut registry = SessionRegistry::new(SessionScope::Global);
        registry.insert(session("a", "m1"));
        assert_eq!(registry.channel_for_join("m1").map(String::as_str), Some("a"));

        let removed = registry.remove("a").unwrap();
        assert_eq!(removed.join_message_id, "m1");
        assert!(registry.channel_for_join("m1").is_none());
        assert!(registry.is_empty());
        assert!(registry.remove("a").is_none());
    }

    #[tokio::test]
    async fn test_fired_timers_taken_once() {
        let state = AppState::new(
            GameConfig::default(),
            WordList::builtin().unwrap(),
            Arc::new(crate::announce::MemoryAnnouncer::new()),
        );
        assert!(state.take_fired_timers().await.is_some());
        assert!(state.take_fired_timers().await.is_none());
    }
}
