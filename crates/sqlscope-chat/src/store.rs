//! The ordered conversation message list.

use std::collections::BTreeMap;

use chrono::Utc;

use sqlscope_core::{Author, Message, MessageId};

/// Owns every message of the session, keyed by id.
///
/// Ids are strictly increasing, so iterating the map is creation order.
/// Messages are never deleted; edits replace the stored message with an
/// updated copy instead of mutating it in place.
#[derive(Debug, Default)]
pub struct ConversationStore {
    messages: BTreeMap<MessageId, Message>,
    next_id: u64,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user message at the tail.
    pub fn append_user(&mut self, text: &str) -> MessageId {
        self.append(Author::User, text, false)
    }

    /// Append an assistant message at the tail.
    pub fn append_assistant(&mut self, text: &str, editable: bool) -> MessageId {
        self.append(Author::Assistant, text, editable)
    }

    fn append(&mut self, author: Author, text: &str, editable: bool) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        self.messages.insert(
            id,
            Message {
                id,
                author,
                text: text.to_string(),
                editable,
                created_at: Utc::now(),
            },
        );
        id
    }

    /// Replace only the `text` of the message with the given id.
    ///
    /// A silent no-op for unknown ids; that is defined behavior, not an
    /// error.
    pub fn edit_message(&mut self, id: MessageId, new_text: &str) {
        if let Some(existing) = self.messages.get(&id) {
            let updated = Message {
                text: new_text.to_string(),
                ..existing.clone()
            };
            self.messages.insert(id, updated);
        }
    }

    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.messages.get(&id)
    }

    /// All messages in creation order.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.values()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_is_empty() {
        let store = ConversationStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_append_assigns_increasing_ids() {
        let mut store = ConversationStore::new();
        let a = store.append_user("first");
        let b = store.append_assistant("second", true);
        let c = store.append_user("third");
        assert!(a < b && b < c);
    }

    #[test]
    fn test_messages_iterate_in_creation_order() {
        let mut store = ConversationStore::new();
        store.append_user("one");
        store.append_assistant("two", true);
        store.append_user("three");
        let texts: Vec<&str> = store.messages().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["one", "two", "three"]);
    }

    #[test]
    fn test_append_sets_author_and_editable() {
        let mut store = ConversationStore::new();
        let user_id = store.append_user("hi");
        let bot_id = store.append_assistant("SELECT 1", true);

        let user = store.get(user_id).unwrap();
        assert_eq!(user.author, Author::User);
        assert!(!user.editable);

        let bot = store.get(bot_id).unwrap();
        assert_eq!(bot.author, Author::Assistant);
        assert!(bot.editable);
    }

    #[test]
    fn test_edit_changes_only_target_text() {
        let mut store = ConversationStore::new();
        let a = store.append_user("question");
        let b = store.append_assistant("SELECT 1", true);
        let c = store.append_assistant("SELECT 2", true);

        store.edit_message(b, "SELECT 1 WHERE x > 0");

        assert_eq!(store.get(a).unwrap().text, "question");
        assert_eq!(store.get(b).unwrap().text, "SELECT 1 WHERE x > 0");
        assert_eq!(store.get(c).unwrap().text, "SELECT 2");
    }

    #[test]
    fn test_edit_preserves_identity_fields() {
        let mut store = ConversationStore::new();
        let id = store.append_assistant("SELECT 1", true);
        let before = store.get(id).unwrap().clone();

        store.edit_message(id, "SELECT 2");

        let after = store.get(id).unwrap();
        assert_eq!(after.id, before.id);
        assert_eq!(after.author, before.author);
        assert_eq!(after.editable, before.editable);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.text, "SELECT 2");
    }

    #[test]
    fn test_edit_unknown_id_is_silent_noop() {
        let mut store = ConversationStore::new();
        store.append_user("only message");
        store.edit_message(MessageId(999), "ignored");
        assert_eq!(store.len(), 1);
        assert_eq!(store.messages().next().unwrap().text, "only message");
    }

    #[test]
    fn test_no_deletion_api_ids_never_reused() {
        let mut store = ConversationStore::new();
        let first = store.append_user("a");
        for _ in 0..10 {
            store.append_user("more");
        }
        let last = store.append_user("z");
        assert_eq!(store.len(), 12);
        assert_eq!(last.0 - first.0, 11);
    }
}
