//! # Result Events and Message Log
//!
//! Resolvers never mutate the world beyond their own narrow effect. They
//! describe everything else as [`ResultEvent`]s, which the turn engine sweeps
//! in order.

use crate::game::{Color, EntityId};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A line of user-visible text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub color: Color,
}

impl Message {
    pub fn new(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }
}

/// A unit of effect produced by a resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultEvent {
    /// Text for the message log
    Message(Message),
    /// The entity's hit points reached zero
    Dead(EntityId),
    /// An item entered an inventory and must leave the world list
    ItemAdded(EntityId),
    /// An item was used up and left its inventory
    ItemConsumed(EntityId),
    /// An item left an inventory and must rejoin the world list
    ItemDropped(EntityId),
}

impl ResultEvent {
    pub fn message(text: impl Into<String>, color: Color) -> Self {
        ResultEvent::Message(Message::new(text, color))
    }

    /// Whether this event spends the player's turn.
    pub fn ends_player_turn(&self) -> bool {
        matches!(
            self,
            ResultEvent::ItemAdded(_) | ResultEvent::ItemConsumed(_) | ResultEvent::ItemDropped(_)
        )
    }
}

/// Ordered message history, oldest first.
///
/// Unbounded unless a capacity is given, in which case the oldest entries are
/// dropped as new ones arrive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageLog {
    messages: VecDeque<Message>,
    capacity: Option<usize>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: Option<usize>) -> Self {
        Self {
            messages: VecDeque::new(),
            capacity,
        }
    }

    pub fn add_message(&mut self, message: Message) {
        log::debug!("message: {}", message.text);
        self.messages.push_back(message);
        if let Some(capacity) = self.capacity {
            while self.messages.len() > capacity {
                self.messages.pop_front();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> + '_ {
        self.messages.iter()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.back()
    }

    /// The newest `count` messages, oldest first, for a fixed-height display.
    pub fn tail(&self, count: usize) -> impl Iterator<Item = &Message> + '_ {
        self.messages.iter().skip(self.messages.len().saturating_sub(count))
    }
}
