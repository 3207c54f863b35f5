use crate::client::{Message, Role};

/// The ordered conversation sent as context on every request.
///
/// Index 0 is always the system message. It survives [`History::clear`].
#[derive(Debug, Clone)]
pub struct History {
    messages: Vec<Message>,
}

impl History {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(system_prompt)],
        }
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }

    /// Drops everything after the system message.
    pub fn clear(&mut self) {
        self.messages.truncate(1);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always `false`: the system message is never removed.
    pub const fn is_empty(&self) -> bool {
        false
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn system_prompt(&self) -> &str {
        self.messages
            .first()
            .filter(|m| m.role() == Role::System)
            .map_or("", Message::content)
    }
}
