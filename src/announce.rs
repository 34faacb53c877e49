//! Outbound announcements
//!
//! The game never talks to the messaging platform directly. Everything it has
//! to say goes through an [`Announcer`], which hands back the id of the posted
//! message so joins can be anchored to it.

use async_trait::async_trait;
use std::sync::Mutex;
use tokio::sync::broadcast;

use crate::protocol::ServerMessage;
use crate::types::{ChannelId, MessageId};

#[derive(Debug, thiserror::Error)]
pub enum AnnounceError {
    #[error("no bridge connected")]
    NoReceivers,

    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// Sink for channel announcements
#[async_trait]
pub trait Announcer: Send + Sync {
    /// Post `text` to `channel`, returning the id of the posted message
    async fn announce(&self, channel: &ChannelId, text: &str) -> Result<MessageId, AnnounceError>;
}

/// Fans announcements out to every connected bridge.
///
/// Message ids are minted here; bridges report reactions against them.
#[derive(Debug, Clone)]
pub struct BroadcastAnnouncer {
    tx: broadcast::Sender<ServerMessage>,
}

impl BroadcastAnnouncer {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ServerMessage> {
        self.tx.subscribe()
    }
}

#[async_trait]
impl Announcer for BroadcastAnnouncer {
    async fn announce(&self, channel: &ChannelId, text: &str) -> Result<MessageId, AnnounceError> {
        let message_id = ulid::Ulid::new().to_string();
        self.tx
            .send(ServerMessage::Announce {
                message_id: message_id.clone(),
                channel_id: channel.clone(),
                text: text.to_string(),
            })
            .map_err(|_| AnnounceError::NoReceivers)?;
        Ok(message_id)
    }
}

/// A posted announcement, as recorded by [`MemoryAnnouncer`]
#[derive(Debug, Clone, PartialEq)]
pub struct Announcement {
    pub message_id: MessageId,
    pub channel_id: ChannelId,
    pub text: String,
}

/// Keeps announcements in memory (dry runs and tests)
#[derive(Debug, Default)]
pub struct MemoryAnnouncer {
    sent: Mutex<Vec<Announcement>>,
}

impl MemoryAnnouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything announced so far, oldest first
    pub fn announcements(&self) -> Vec<Announcement> {
        match self.sent.lock() {
            Ok(sent) => sent.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Texts of everything announced so far
    pub fn texts(&self) -> Vec<String> {
        self.announcements().into_iter().map(|a| a.text).collect()
    }

    /// Number of announcements containing `needle`
    pub fn count_containing(&self, needle: &str) -> usize {
        self.announcements()
            .iter()
            .filter(|a| a.text.contains(needle))
            .count()
    }
}

#[async_trait]
impl Announcer for MemoryAnnouncer {
    async fn announce(&self, channel: &ChannelId, text: &str) -> Result<MessageId, AnnounceError> {
        let announcement = Announcement {
            message_id: ulid::Ulid::new().to_string(),
            channel_id: channel.clone(),
            text: text.to_string(),
        };
        let message_id = announcement.message_id.clone();
        let mut sent = self
            .sent
            .lock()
            .map_err(|e| AnnounceError::Delivery(e.to_string()))?;
        sent.push(announcement);
        Ok(message_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_broadcast_announcer_requires_receiver() {
        let announcer = BroadcastAnnouncer::new(8);
        let result = announcer.announce(&"chan".to_string(), "hello").await;
        assert!(matches!(result, Err(AnnounceError::NoReceivers)));
    }

    #[tokio::test]
    async fn test_broadcast_announcer_delivers_minted_id() {
        let announcer = BroadcastAnnouncer::new(8);
        let mut rx = announcer.subscribe();

        let id = announcer
            .announce(&"chan".to_string(), "hello")
            .await
            .unwrap();

        match rx.recv().await.unwrap() {
            ServerMessage::Announce {
                message_id,
                channel_id,
                text,
            } => {
                assert_eq!(message_id, id);
                assert_eq!(channel_id, "chan");
                assert_eq!(text, "hello");
            }
            other => panic!("Expected Announce, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_memory_announcer_records_in_order() {
        let announcer = MemoryAnnouncer::new();
        let first = announcer.announce(&"a".to_string(), "one").await.unwrap();
        let second = announcer.announce(&"b".to_string(), "two").await.unwrap();

        assert_ne!(first, second);
        assert_eq!(announcer.texts(), vec!["one", "two"]);
        assert_eq!(announcer.count_containing("tw"), 1);
    }
}
