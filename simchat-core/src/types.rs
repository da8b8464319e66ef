//! Conversation types: message author, message kinds, the append-only log
//! entry, and terminal actions a conversation can hand off to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a message in the conversation log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Author {
    /// The scripted persona the visitor is chatting with.
    Persona,
    /// The visitor; their messages echo the quick-reply they selected.
    Visitor,
}

/// Message payload, one variant per kind of content a script step can emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessageKind {
    Text {
        text: String,
    },
    Image {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
    /// A message that carries a checkout button next to its text.
    CallToAction {
        text: String,
        /// Button label (e.g. "Secure access").
        label: String,
    },
}

/// One entry in the conversation log. The log is append-only: entries are
/// never mutated once appended and render in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub author: Author,
    pub kind: MessageKind,
    pub sent_at: DateTime<Utc>,
}

impl Message {
    /// Creates a persona-authored message with a fresh id.
    pub fn persona(kind: MessageKind) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            author: Author::Persona,
            kind,
            sent_at: Utc::now(),
        }
    }

    /// Creates a visitor message echoing a selected quick-reply label.
    pub fn visitor_text(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            author: Author::Visitor,
            kind: MessageKind::Text { text: text.into() },
            sent_at: Utc::now(),
        }
    }

    /// The message's main text, if its kind carries one.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            MessageKind::Text { text } => Some(text),
            MessageKind::CallToAction { text, .. } => Some(text),
            MessageKind::Image { caption, .. } => caption.as_deref(),
        }
    }
}

/// Terminal directive a script can end on: control is handed to the checkout
/// surface and the sequencer goes idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Present the external checkout surface (payment link or PIX form).
    OpenCheckout,
    /// Scroll the page to an inline checkout block.
    ScrollToCheckout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persona_message_has_fresh_id() {
        let a = Message::persona(MessageKind::Text {
            text: "hi".to_string(),
        });
        let b = Message::persona(MessageKind::Text {
            text: "hi".to_string(),
        });
        assert_ne!(a.id, b.id);
        assert_eq!(a.author, Author::Persona);
    }

    #[test]
    fn test_visitor_text_echoes_label() {
        let m = Message::visitor_text("Yes, show me");
        assert_eq!(m.author, Author::Visitor);
        assert_eq!(m.text(), Some("Yes, show me"));
    }

    #[test]
    fn test_text_accessor_per_kind() {
        let cta = Message::persona(MessageKind::CallToAction {
            text: "Join now".to_string(),
            label: "Secure access".to_string(),
        });
        assert_eq!(cta.text(), Some("Join now"));

        let img = Message::persona(MessageKind::Image {
            url: "https://cdn.example.com/teaser.jpg".to_string(),
            caption: None,
        });
        assert_eq!(img.text(), None);
    }
}
