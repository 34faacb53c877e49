//! Bridge event dispatch
//!
//! Bot-originated events are dropped here, before they reach the battle state.

use crate::error::BattleError;
use crate::protocol::{ClientMessage, ServerMessage};
use crate::state::{AppState, CreateBattle, StartOutcome};
use crate::types::Player;
use std::sync::Arc;

fn error_message(e: BattleError) -> ServerMessage {
    ServerMessage::Error {
        code: e.code().to_string(),
        msg: e.to_string(),
    }
}

/// Handle a bridge event and return the optional reply for the requester
pub async fn handle_message(msg: ClientMessage, state: &Arc<AppState>) -> Option<ServerMessage> {
    match msg {
        ClientMessage::CreateBattle {
            channel_id,
            user_id,
            game_type,
            start_mode,
            rounds,
        } => {
            tracing::info!(
                "Battle requested in {} by {}: {:?}/{:?} rounds={:?}",
                channel_id,
                user_id,
                game_type,
                start_mode,
                rounds
            );
            let request = CreateBattle {
                channel: channel_id,
                host: user_id,
                game_type,
                start_mode,
                rounds,
            };
            match state.create_battle(request).await {
                Ok(created) => Some(ServerMessage::Reply {
                    content: format!(
                        "📝 Game setup started. Type: **{}**, Rounds: **{}**, Start mode: **{}**",
                        created.game_type.as_str(),
                        created.rounds,
                        created.start_mode.as_str()
                    ),
                }),
                Err(e) => Some(error_message(e)),
            }
        }

        ClientMessage::StartGame {
            channel_id,
            user_id,
        } => {
            tracing::info!("Start requested in {} by {}", channel_id, user_id);
            match state.start_game(&channel_id, &user_id).await {
                Ok(StartOutcome::Started) => Some(ServerMessage::Reply {
                    content: "✅ The game has started!".to_string(),
                }),
                Ok(StartOutcome::Cancelled) => Some(ServerMessage::Reply {
                    content: "⚠️ No players joined, so the game was cancelled.".to_string(),
                }),
                Err(e) => Some(error_message(e)),
            }
        }

        ClientMessage::ReactionAdded {
            message_id,
            emoji,
            user_id,
            username,
            is_bot,
        } => {
            if !is_bot {
                state
                    .record_join(&message_id, &emoji, Player::new(user_id, username))
                    .await;
            }
            None
        }

        ClientMessage::MessageCreated {
            channel_id,
            author_id,
            is_bot,
            text,
        } => {
            if !is_bot {
                state.evaluate_guess(&channel_id, &author_id, &text).await;
            }
            None
        }
    }
}
