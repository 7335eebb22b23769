use async_trait::async_trait;
use std::collections::HashMap;
use std::error::Error;
use tokio::sync::Mutex;
use crate::history::HistoryStore;
use crate::models::chat::{ ChatMessage, Conversation, Role };

/// Process-lifetime conversation store. Messages live only in memory: the
/// history grows without bound and is lost on restart.
///
/// The mutex guards individual appends, not whole requests — two concurrent
/// requests may interleave their messages. Every append lands, but no
/// cross-request order is guaranteed.
pub struct MemoryHistoryStore {
    conversations: Mutex<HashMap<String, Vec<ChatMessage>>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self {
            conversations: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryHistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn add_message(
        &self,
        conversation_id: &str,
        role: Role,
        content: &str
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut conversations = self.conversations.lock().await;
        conversations
            .entry(conversation_id.to_string())
            .or_default()
            .push(ChatMessage::new(role, content));
        Ok(())
    }

    async fn get_conversation(
        &self,
        conversation_id: &str
    ) -> Result<Conversation, Box<dyn Error + Send + Sync>> {
        let conversations = self.conversations.lock().await;
        let messages = conversations.get(conversation_id).cloned().unwrap_or_default();

        Ok(Conversation {
            id: conversation_id.to_string(),
            messages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn appends_preserve_order() {
        let store = MemoryHistoryStore::new();
        store.add_message("c1", Role::User, "Hello").await.unwrap();
        store.add_message("c1", Role::Assistant, "Hi there").await.unwrap();

        let conversation = store.get_conversation("c1").await.unwrap();
        assert_eq!(conversation.messages.len(), 2);
        assert_eq!(conversation.messages[0].role, Role::User);
        assert_eq!(conversation.messages[0].content, "Hello");
        assert_eq!(conversation.messages[1].role, Role::Assistant);
        assert_eq!(conversation.messages[1].content, "Hi there");
    }

    #[tokio::test]
    async fn unknown_conversation_is_empty() {
        let store = MemoryHistoryStore::new();
        let conversation = store.get_conversation("nope").await.unwrap();
        assert!(conversation.messages.is_empty());
    }

    #[tokio::test]
    async fn conversations_are_isolated_by_id() {
        let store = MemoryHistoryStore::new();
        store.add_message("a", Role::User, "one").await.unwrap();
        store.add_message("b", Role::User, "two").await.unwrap();

        assert_eq!(store.get_conversation("a").await.unwrap().messages.len(), 1);
        assert_eq!(store.get_conversation("b").await.unwrap().messages.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_appends_all_land() {
        let store = Arc::new(MemoryHistoryStore::new());
        let mut handles = Vec::new();

        for i in 0..16 {
            let store = store.clone();
            handles.push(
                tokio::spawn(async move {
                    store
                        .add_message("shared", Role::User, &format!("message {}", i)).await
                        .unwrap();
                })
            );
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // Order across tasks is unspecified; only the total is guaranteed.
        let conversation = store.get_conversation("shared").await.unwrap();
        assert_eq!(conversation.messages.len(), 16);
    }
}
