use serde::{Deserialize, Serialize};

/// Opaque ID types for type safety
pub type SessionId = String;
pub type ChannelId = String;
pub type MessageId = String;
pub type UserId = String;

/// Reaction that marks a user as joining a battle
pub const JOIN_EMOJI: &str = "✅";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    /// Single round
    Quick,
    /// Multiple rounds (defaults to the configured count)
    Tournament,
}

impl GameType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameType::Quick => "quick",
            GameType::Tournament => "tournament",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StartMode {
    /// Host starts the game with a command
    Manual,
    /// Game starts on its own after the auto-start delay
    Auto,
}

impl StartMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StartMode::Manual => "manual",
            StartMode::Auto => "auto",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionPhase {
    WaitingForPlayers,
    Running,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub id: UserId,
    pub name: String,
}

impl Player {
    pub fn new(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreEntry {
    pub player: Player,
    pub points: u32,
}

/// Public view of a session (never includes the current answer)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub id: SessionId,
    pub channel_id: ChannelId,
    pub host_id: UserId,
    pub game_type: GameType,
    pub start_mode: StartMode,
    pub phase: SessionPhase,
    pub round: u32,
    pub max_rounds: u32,
    pub players: Vec<Player>,
    pub scores: Vec<ScoreEntry>,
    pub join_message_id: MessageId,
    pub created_at: String,
}
