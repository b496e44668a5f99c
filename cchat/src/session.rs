//! Append-only conversation sessions and their storage contract.

use std::collections::HashMap;
use std::sync::Mutex;

use ccommon::{BoxFuture, MetadataMap, SessionId};
use cprovider::{Message, Role};

use crate::TurnError;

/// Ordered transcript of one conversation. Messages are immutable once
/// appended; the only removal path is [`Session::clear`], which keeps the
/// leading system message.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    id: SessionId,
    messages: Vec<Message>,
}

impl Session {
    pub fn new(id: impl Into<SessionId>) -> Self {
        Self {
            id: id.into(),
            messages: Vec::new(),
        }
    }

    /// Creates a session whose transcript opens with a system message built
    /// from the prompt and a rendered metadata block.
    pub fn with_system_prompt(
        id: impl Into<SessionId>,
        system_prompt: Option<&str>,
        metadata: &MetadataMap,
    ) -> Self {
        let mut session = Self::new(id);
        if let Some(content) = render_system_message(system_prompt, metadata) {
            session.messages.push(Message::system(content));
        }
        session
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn history(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Drops the transcript but keeps the leading system message, so a
    /// cleared session behaves like a fresh one.
    pub fn clear(&mut self) {
        let system = match self.messages.first() {
            Some(message) if message.role == Role::System => Some(message.clone()),
            _ => None,
        };
        self.messages.clear();
        if let Some(message) = system {
            self.messages.push(message);
        }
    }
}

fn render_system_message(system_prompt: Option<&str>, metadata: &MetadataMap) -> Option<String> {
    if system_prompt.is_none() && metadata.is_empty() {
        return None;
    }

    let mut content = system_prompt.unwrap_or_default().to_string();
    if !metadata.is_empty() {
        if !content.is_empty() {
            content.push_str("\n\n");
        }
        content.push_str("---\n## System Metadata\n");

        // Sorted for a deterministic rendering.
        let mut entries: Vec<_> = metadata.iter().collect();
        entries.sort_by_key(|(key, _)| key.as_str());
        for (key, value) in entries {
            content.push_str(&format!("- {key}: {value}\n"));
        }
        content.truncate(content.trim_end().len());
    }

    Some(content)
}

pub type StoreFuture<'a, T> = BoxFuture<'a, Result<T, TurnError>>;

pub trait SessionStore: Send + Sync {
    fn load<'a>(&'a self, id: &'a SessionId) -> StoreFuture<'a, Option<Session>>;

    fn save<'a>(&'a self, session: Session) -> StoreFuture<'a, ()>;

    fn delete<'a>(&'a self, id: &'a SessionId) -> StoreFuture<'a, bool>;
}

#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<SessionId, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn load<'a>(&'a self, id: &'a SessionId) -> StoreFuture<'a, Option<Session>> {
        Box::pin(async move {
            let sessions = self
                .sessions
                .lock()
                .map_err(|_| TurnError::store("session store lock poisoned"))?;
            Ok(sessions.get(id).cloned())
        })
    }

    fn save<'a>(&'a self, session: Session) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let mut sessions = self
                .sessions
                .lock()
                .map_err(|_| TurnError::store("session store lock poisoned"))?;
            sessions.insert(session.id.clone(), session);
            Ok(())
        })
    }

    fn delete<'a>(&'a self, id: &'a SessionId) -> StoreFuture<'a, bool> {
        Box::pin(async move {
            let mut sessions = self
                .sessions
                .lock()
                .map_err(|_| TurnError::store("session store lock poisoned"))?;
            Ok(sessions.remove(id).is_some())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_and_metadata_fold_into_one_system_message() {
        let mut metadata = MetadataMap::new();
        metadata.insert("user".to_string(), "dana".to_string());
        metadata.insert("locale".to_string(), "fr-FR".to_string());

        let session = Session::with_system_prompt("s1", Some("Be concise."), &metadata);

        assert_eq!(session.len(), 1);
        let system = &session.history()[0];
        assert_eq!(system.role, Role::System);
        assert_eq!(
            system.content,
            "Be concise.\n\n---\n## System Metadata\n- locale: fr-FR\n- user: dana"
        );
    }

    #[test]
    fn metadata_without_prompt_still_creates_a_system_message() {
        let mut metadata = MetadataMap::new();
        metadata.insert("user".to_string(), "dana".to_string());

        let session = Session::with_system_prompt("s1", None, &metadata);
        assert_eq!(session.len(), 1);
        assert!(session.history()[0].content.starts_with("---\n## System Metadata"));
    }

    #[test]
    fn no_prompt_and_no_metadata_means_no_system_message() {
        let session = Session::with_system_prompt("s1", None, &MetadataMap::new());
        assert!(session.is_empty());
    }

    #[test]
    fn clear_retains_only_the_system_message() {
        let mut session =
            Session::with_system_prompt("s1", Some("Be concise."), &MetadataMap::new());
        session.append(Message::user("hello"));
        session.append(Message::assistant("hi"));
        assert_eq!(session.len(), 3);

        session.clear();
        assert_eq!(session.len(), 1);
        assert_eq!(session.history()[0].role, Role::System);
    }

    #[tokio::test]
    async fn in_memory_store_round_trips_sessions() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new("s1");

        assert!(store.load(&id).await.unwrap().is_none());

        let mut session = Session::new("s1");
        session.append(Message::user("hello"));
        store.save(session.clone()).await.unwrap();

        let loaded = store.load(&id).await.unwrap().expect("session exists");
        assert_eq!(loaded, session);

        assert!(store.delete(&id).await.unwrap());
        assert!(store.load(&id).await.unwrap().is_none());
    }
}
