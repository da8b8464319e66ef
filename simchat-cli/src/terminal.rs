//! Terminal implementation of [`ConversationSink`]: prints chat lines and
//! forwards control events (actions, payment prompts, ready choices) to the
//! surface loop through a channel.

use async_trait::async_trait;
use script::Persona;
use simchat_core::{Action, Author, ConversationSink, Message, MessageKind, Result, SimchatError};
use tokio::sync::mpsc;

/// Control events the surface loop reacts to; rendering itself happens here.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    /// The script handed control to checkout.
    ActionRequested(Action),
    /// The escalation timer expired.
    PaymentPromptDue,
    /// Quick replies are on screen; the loop maps numbers to these labels.
    ChoicesReady(Vec<String>),
}

pub struct TerminalSink {
    persona: Persona,
    events: mpsc::UnboundedSender<SurfaceEvent>,
}

impl TerminalSink {
    pub fn new(persona: Persona, events: mpsc::UnboundedSender<SurfaceEvent>) -> Self {
        Self { persona, events }
    }

    fn forward(&self, event: SurfaceEvent) -> Result<()> {
        self.events
            .send(event)
            .map_err(|e| SimchatError::Sink(e.to_string()))
    }
}

#[async_trait]
impl ConversationSink for TerminalSink {
    async fn typing_changed(&self, typing: bool) -> Result<()> {
        if typing {
            println!("  {} is typing…", self.persona.name);
        }
        Ok(())
    }

    async fn message_appended(&self, message: &Message) -> Result<()> {
        let who = match message.author {
            Author::Persona => self.persona.name.as_str(),
            Author::Visitor => "You",
        };
        match &message.kind {
            MessageKind::Text { text } => println!("{who}: {text}"),
            MessageKind::Image { url, caption } => {
                match caption {
                    Some(caption) => println!("{who} sent a photo: {caption} ({url})"),
                    None => println!("{who} sent a photo ({url})"),
                }
            }
            MessageKind::CallToAction { text, label } => {
                println!("{who}: {text}");
                println!("    [{label}]  (type 'buy' to open checkout)");
            }
        }
        Ok(())
    }

    async fn choices_presented(&self, labels: &[String]) -> Result<()> {
        for (i, label) in labels.iter().enumerate() {
            println!("  {}. {label}", i + 1);
        }
        self.forward(SurfaceEvent::ChoicesReady(labels.to_vec()))
    }

    async fn action_triggered(&self, action: &Action) -> Result<()> {
        self.forward(SurfaceEvent::ActionRequested(*action))
    }

    async fn payment_prompt_requested(&self) -> Result<()> {
        self.forward(SurfaceEvent::PaymentPromptDue)
    }
}
