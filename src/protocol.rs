use crate::types::*;
use serde::{Deserialize, Serialize};

/// Events forwarded by a platform bridge
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ClientMessage {
    /// `/battle` command
    CreateBattle {
        channel_id: ChannelId,
        user_id: UserId,
        game_type: GameType,
        start_mode: StartMode,
        #[serde(default)]
        rounds: Option<u32>,
    },
    /// `/startgame` command (host only)
    StartGame {
        channel_id: ChannelId,
        user_id: UserId,
    },
    ReactionAdded {
        message_id: MessageId,
        emoji: String,
        user_id: UserId,
        username: String,
        #[serde(default)]
        is_bot: bool,
    },
    MessageCreated {
        channel_id: ChannelId,
        author_id: UserId,
        #[serde(default)]
        is_bot: bool,
        text: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Post `text` to `channel_id`. Reactions on it are reported with `message_id`.
    Announce {
        message_id: MessageId,
        channel_id: ChannelId,
        text: String,
    },
    /// Ephemeral answer to the command that was just sent
    Reply {
        content: String,
    },
    Error {
        code: String,
        msg: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_create_battle_without_rounds() {
        let msg: ClientMessage = serde_json::from_str(
            r#"{"t":"create_battle","channel_id":"c1","user_id":"u1","game_type":"tournament","start_mode":"auto"}"#,
        )
        .unwrap();

        match msg {
            ClientMessage::CreateBattle {
                game_type,
                start_mode,
                rounds,
                ..
            } => {
                assert_eq!(game_type, GameType::Tournament);
                assert_eq!(start_mode, StartMode::Auto);
                assert_eq!(rounds, None);
            }
            other => panic!("Expected CreateBattle, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_reaction_defaults_to_human() {
        let msg: ClientMessage = serde_json::from_str(
            r#"{"t":"reaction_added","message_id":"m","emoji":"✅","user_id":"u","username":"alice"}"#,
        )
        .unwrap();
        assert!(matches!(msg, ClientMessage::ReactionAdded { is_bot: false, .. }));
    }

    #[test]
    fn test_reject_unknown_game_type() {
        let result = serde_json::from_str::<ClientMessage>(
            r#"{"t":"create_battle","channel_id":"c","user_id":"u","game_type":"marathon","start_mode":"manual"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_announce_wire_format() {
        let json = serde_json::to_value(ServerMessage::Announce {
            message_id: "m1".to_string(),
            channel_id: "c1".to_string(),
            text: "hi".to_string(),
        })
        .unwrap();
        assert_eq!(json["t"], "announce");
        assert_eq!(json["message_id"], "m1");
        assert_eq!(json["channel_id"], "c1");
    }
}
