use crate::announce::AnnounceError;

/// Result type for battle commands
pub type BattleResult<T> = Result<T, BattleError>;

/// Rejections surfaced to whoever issued a battle command
#[derive(Debug, thiserror::Error)]
pub enum BattleError {
    #[error("A game is already in progress or being prepared")]
    Conflict,

    #[error("Only the host can start the game")]
    Unauthorized,

    #[error("No game is being prepared")]
    NoSession,

    #[error("The game has already started")]
    AlreadyStarted,

    #[error("Failed to send join announcement: {0}")]
    Announce(#[from] AnnounceError),
}

impl BattleError {
    /// Wire error code for the bridge protocol
    pub fn code(&self) -> &'static str {
        match self {
            BattleError::Conflict => "CONFLICT",
            BattleError::Unauthorized => "UNAUTHORIZED",
            BattleError::NoSession => "NO_SESSION",
            BattleError::AlreadyStarted => "ALREADY_STARTED",
            BattleError::Announce(_) => "ANNOUNCE_FAILED",
        }
    }
}
