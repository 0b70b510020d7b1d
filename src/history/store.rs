use super::Message;
use crate::{Error, Result};
use std::sync::Mutex;
use tracing::debug;

/// In-memory conversation history. Turns live for the lifetime of the
/// process; there is deliberately no persistence behind this.
#[derive(Default)]
pub struct HistoryStore {
    messages: Mutex<Vec<Message>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save(&self, message: Message) -> Result<()> {
        let mut messages = self
            .messages
            .lock()
            .map_err(|e| Error::internal(format!("Mutex lock failed: {e}")))?;
        messages.push(message);
        Ok(())
    }

    pub fn list(&self, session_id: &str) -> Result<Vec<Message>> {
        let messages = self
            .messages
            .lock()
            .map_err(|e| Error::internal(format!("Mutex lock failed: {e}")))?;

        let session_messages: Vec<Message> = messages
            .iter()
            .filter(|msg| msg.session_id == session_id)
            .cloned()
            .collect();

        debug!(
            "Retrieved {} messages for session: {}",
            session_messages.len(),
            session_id
        );
        Ok(session_messages)
    }
}
