//! Chat transcript projection and the interactive chat session.
//!
//! There is no chat store. The transcript is rebuilt from chat-category
//! records of the interaction log, and clearing chat removes exactly those
//! records.

use crate::agent::Generator;
use crate::interaction_log::InteractionLog;
use crate::kv::KeyValueStore;
use devagent_types::{Category, ChatExchange, ChatMessage, InteractionRecord};
use tracing::{debug, warn};

/// Agent reply shown when generation fails.
pub const GENERATION_APOLOGY: &str =
    "Sorry, I encountered an error connecting to the neural network. Please try again.";

/// Chat records as user/agent pairs, oldest first.
///
/// The agent message is stamped one millisecond after the user message so the
/// pair sorts stably. Records sharing a millisecond keep insertion order.
pub fn exchanges(records: &[InteractionRecord]) -> Vec<ChatExchange> {
    // The log is newest-first; reverse before the stable sort so ties come
    // out in insertion order.
    let mut chats: Vec<&InteractionRecord> = records
        .iter()
        .rev()
        .filter(|r| r.category == Category::Chat)
        .collect();
    chats.sort_by_key(|r| r.created_at);

    chats
        .into_iter()
        .map(|r| ChatExchange {
            user: ChatMessage::user(r.input.clone(), r.created_at),
            agent: ChatMessage::agent(r.output.clone(), r.created_at.saturating_add(1)),
        })
        .collect()
}

/// The chat transcript implied by the log, oldest message first.
pub fn reconstruct(records: &[InteractionRecord]) -> Vec<ChatMessage> {
    exchanges(records)
        .into_iter()
        .flat_map(ChatExchange::into_messages)
        .collect()
}

/// An open chat view: an in-memory transcript seeded from the log.
pub struct ChatSession<'a, S> {
    log: &'a InteractionLog<S>,
    messages: Vec<ChatMessage>,
}

impl<'a, S: KeyValueStore> ChatSession<'a, S> {
    /// Open a session, seeding the transcript from the log's chat records.
    pub fn open(log: &'a InteractionLog<S>) -> Self {
        let messages = reconstruct(&log.all());
        debug!(target: "devagent::chat", "Restored {} chat message(s)", messages.len());
        Self { log, messages }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Send a user message and append the reply.
    ///
    /// Blank input is ignored and returns `None`. A successful exchange is
    /// recorded in the log; a failed one appends [`GENERATION_APOLOGY`] to
    /// the transcript and records nothing.
    pub fn send(&mut self, generator: &dyn Generator, text: &str) -> Option<&ChatMessage> {
        if text.trim().is_empty() {
            return None;
        }

        let history_len = self.messages.len();
        self.messages.push(ChatMessage::user(text, self.log.now()));

        let reply = match generator.chat(&self.messages[..history_len], text) {
            Ok(reply) => {
                self.log.append(Category::Chat, text, reply.clone(), None);
                ChatMessage::agent(reply, self.log.now())
            }
            Err(e) => {
                warn!(target: "devagent::chat", "Chat generation failed: {}", e);
                ChatMessage::agent(GENERATION_APOLOGY, self.log.now())
            }
        };

        self.messages.push(reply);
        self.messages.last()
    }

    /// Empty the transcript and remove chat records from the log.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.log.remove_category(Category::Chat);
    }
}
