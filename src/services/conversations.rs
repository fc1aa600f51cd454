use crate::models::{ChatMessage, Conversation, ConversationUser, LastMessage, CURRENT_USER};
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors raised by the in-memory chat
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversationError {
    #[error("Conversation not found: {0}")]
    NotFound(String),

    #[error("Message is empty")]
    EmptyMessage,
}

/// Mocked chat state; nothing leaves the process
pub struct ConversationStore {
    conversations: RwLock<Vec<Conversation>>,
    messages: RwLock<HashMap<String, Vec<ChatMessage>>>,
}

impl ConversationStore {
    pub fn new(conversations: Vec<Conversation>, messages: HashMap<String, Vec<ChatMessage>>) -> Self {
        Self {
            conversations: RwLock::new(conversations),
            messages: RwLock::new(messages),
        }
    }

    /// Demo conversations with a seeded thread in the first one
    pub fn seeded() -> Self {
        let conversations = vec![
            conversation("1", "101", "NeonBlade", "Online", "Are you free for a game tonight?", "10:30 AM", false, "101", 1),
            conversation("2", "102", "PixelWarrior", "5m ago", "GG! That was an awesome match.", "Yesterday", true, "102", 0),
            conversation("3", "103", "StormRider", "3h ago", "I sent you a friend request on Steam.", "Yesterday", true, CURRENT_USER, 0),
        ];

        let thread = vec![
            message("1", "Hey! I saw your profile and I think we'd make a good team.", "10:20 AM", CURRENT_USER),
            message("2", "Hi there! Thanks for reaching out. What rank are you currently?", "10:22 AM", "101"),
            message("3", "I'm Diamond 2 right now. Been looking for a consistent duo partner to grind with.", "10:25 AM", CURRENT_USER),
            message("4", "That's perfect! I'm Diamond 3. What role do you main?", "10:27 AM", "101"),
            message("5", "I'm a support main. You?", "10:29 AM", CURRENT_USER),
            message("6", "ADC main! That works out really well. Are you free for a game tonight?", "10:30 AM", "101"),
        ];

        let mut messages = HashMap::new();
        messages.insert("1".to_string(), thread);

        Self::new(conversations, messages)
    }

    /// Conversations whose other user's tag contains `search` (case-insensitive)
    pub async fn list(&self, search: &str) -> Vec<Conversation> {
        let conversations = self.conversations.read().await;
        if search.is_empty() {
            return conversations.clone();
        }

        let needle = search.to_lowercase();
        conversations
            .iter()
            .filter(|c| c.user.gamer_tag.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Select a conversation, clearing its unread state
    pub async fn mark_read(&self, id: &str) -> Result<Conversation, ConversationError> {
        let mut conversations = self.conversations.write().await;
        let convo = conversations
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| ConversationError::NotFound(id.to_string()))?;

        convo.unread_count = 0;
        convo.last_message.is_read = true;
        Ok(convo.clone())
    }

    pub async fn messages(&self, id: &str) -> Result<Vec<ChatMessage>, ConversationError> {
        self.ensure_exists(id).await?;
        Ok(self.messages.read().await.get(id).cloned().unwrap_or_default())
    }

    /// Append a message from the local user
    pub async fn send(&self, id: &str, content: &str) -> Result<ChatMessage, ConversationError> {
        if content.trim().is_empty() {
            return Err(ConversationError::EmptyMessage);
        }

        let timestamp = chrono::Local::now().format("%H:%M").to_string();
        let msg = ChatMessage {
            id: uuid::Uuid::new_v4().to_string(),
            content: content.to_string(),
            timestamp: timestamp.clone(),
            sender_id: CURRENT_USER.to_string(),
        };

        {
            let mut conversations = self.conversations.write().await;
            let convo = conversations
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| ConversationError::NotFound(id.to_string()))?;

            convo.last_message = LastMessage {
                content: content.to_string(),
                timestamp,
                is_read: false,
                sender_id: CURRENT_USER.to_string(),
            };
        }

        self.messages
            .write()
            .await
            .entry(id.to_string())
            .or_default()
            .push(msg.clone());

        tracing::debug!("Appended message {} to conversation {}", msg.id, id);
        Ok(msg)
    }

    async fn ensure_exists(&self, id: &str) -> Result<(), ConversationError> {
        if self.conversations.read().await.iter().any(|c| c.id == id) {
            Ok(())
        } else {
            Err(ConversationError::NotFound(id.to_string()))
        }
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::seeded()
    }
}

#[allow(clippy::too_many_arguments)]
fn conversation(
    id: &str,
    user_id: &str,
    gamer_tag: &str,
    last_active: &str,
    content: &str,
    timestamp: &str,
    is_read: bool,
    sender_id: &str,
    unread_count: u32,
) -> Conversation {
    Conversation {
        id: id.to_string(),
        user: ConversationUser {
            id: user_id.to_string(),
            gamer_tag: gamer_tag.to_string(),
            last_active: last_active.to_string(),
        },
        last_message: LastMessage {
            content: content.to_string(),
            timestamp: timestamp.to_string(),
            is_read,
            sender_id: sender_id.to_string(),
        },
        unread_count,
    }
}

fn message(id: &str, content: &str, timestamp: &str, sender_id: &str) -> ChatMessage {
    ChatMessage {
        id: id.to_string(),
        content: content.to_string(),
        timestamp: timestamp.to_string(),
        sender_id: sender_id.to_string(),
    }
}
