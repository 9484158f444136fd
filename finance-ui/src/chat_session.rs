//! The chat surface: message log updates and deferred assistant replies.

use std::collections::HashMap;
use std::time::Duration;

use finance_core::chat::QUICK_PROMPTS;
use finance_core::{ChatMessage, ResponseLookup};
use tracing::{debug, info};

use crate::error::AppError;
use crate::scheduler::{Scheduler, TaskId};
use crate::state::AppState;

/// Default "thinking" time before the assistant answers.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1000);

pub struct ChatSession {
    responder: Box<dyn ResponseLookup>,
    reply_delay: Duration,
    /// Prompt awaiting an answer, per scheduled reply.
    pending: HashMap<TaskId, String>,
}

impl ChatSession {
    pub fn new(
        responder: Box<dyn ResponseLookup>,
        reply_delay: Duration,
    ) -> Self {
        Self {
            responder,
            reply_delay,
            pending: HashMap::new(),
        }
    }

    /// Records a user message and schedules the assistant's reply.
    ///
    /// Blank input is ignored: nothing is recorded and `None` is returned.
    pub fn send(
        &mut self,
        state: &mut AppState,
        scheduler: &mut Scheduler,
        text: &str,
    ) -> Option<TaskId> {
        let text = text.trim();
        if text.is_empty() {
            debug!("ignoring blank chat message");
            return None;
        }

        state.push_message(ChatMessage::user(text));
        let reply = scheduler.schedule(self.reply_delay);
        self.pending.insert(reply, text.to_string());

        info!(%reply, "user message sent");
        Some(reply)
    }

    /// Sends the quick prompt at `index` exactly as if it had been typed.
    pub fn send_quick_prompt(
        &mut self,
        state: &mut AppState,
        scheduler: &mut Scheduler,
        index: usize,
    ) -> Result<TaskId, AppError> {
        let prompt = *QUICK_PROMPTS
            .get(index)
            .ok_or(AppError::UnknownQuickPrompt(index))?;

        // Quick prompts are never blank.
        self.send(state, scheduler, prompt)
            .ok_or(AppError::UnknownQuickPrompt(index))
    }

    /// Empties the log, restoring the welcome placeholder, and cancels every
    /// reply still pending. Returns how many replies were cancelled.
    pub fn clear(
        &mut self,
        state: &mut AppState,
        scheduler: &mut Scheduler,
    ) -> usize {
        let cancelled = self
            .pending
            .drain()
            .filter(|(id, _)| scheduler.cancel(*id))
            .count();
        state.clear_messages();

        info!(cancelled, "chat cleared");
        cancelled
    }

    /// Whether `id` is one of this session's pending replies.
    pub fn owns(
        &self,
        id: TaskId,
    ) -> bool {
        self.pending.contains_key(&id)
    }

    /// Generates and appends the reply for a fired task.
    ///
    /// The user type in effect now, not when the message was sent, shapes
    /// the reply.
    pub fn deliver_reply<'s>(
        &mut self,
        state: &'s mut AppState,
        id: TaskId,
    ) -> Option<&'s ChatMessage> {
        let prompt = self.pending.remove(&id)?;
        let reply = self.responder.respond(&prompt, state.user_type);

        state.push_message(ChatMessage::assistant(reply));
        debug!(%id, "assistant reply delivered");
        state.messages().last()
    }

    pub fn pending_replies(&self) -> usize {
        self.pending.len()
    }
}
