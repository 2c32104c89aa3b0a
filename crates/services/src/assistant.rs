//! Assistant conversation store and the scripted reply service.
//!
//! Replies are delivered by a one-shot task. Every task carries the chat
//! epoch it was scheduled in and only writes if the epoch is unchanged, so a
//! cleared conversation never receives a reply meant for the old one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use course_core::Clock;
use course_core::model::{ChatMessage, Sentiment};
use tokio::runtime::Handle;
use tokio::task::{AbortHandle, JoinHandle};

use crate::error::AssistantError;
use crate::store::{Reducer, Store};

pub const CANNED_REPLY: &str = "I'm here to help! This is a demo response.";

/// Replies still in flight, keyed by the order they were scheduled.
type PendingReplies = Arc<Mutex<Vec<(u64, AbortHandle)>>>;

/// Forgets reply `seq` and any finished ones. Returns whether another reply
/// is still outstanding.
fn settle(pending: &PendingReplies, seq: u64) -> bool {
    let mut pending = pending.lock().unwrap_or_else(PoisonError::into_inner);
    pending.retain(|(id, handle)| *id != seq && !handle.is_finished());
    !pending.is_empty()
}

#[derive(Debug)]
pub enum AiCommand {
    AddMessage(ChatMessage),
    SetTyping(bool),
    SetStreaming(bool),
    UpdateContext(Vec<String>),
    /// `score` is clipped to `-1.0..=1.0`.
    SetSentiment { score: f32, sentiment: Sentiment },
    ClearChat,
    SetError(Option<String>),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AiState {
    chat_history: Vec<ChatMessage>,
    is_typing: bool,
    is_streaming: bool,
    context: Vec<String>,
    sentiment_score: f32,
    frustration_detected: bool,
    error: Option<String>,
}

impl AiState {
    /// Messages in the order they were added.
    #[must_use]
    pub fn chat_history(&self) -> &[ChatMessage] {
        &self.chat_history
    }

    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.is_typing
    }

    #[must_use]
    pub fn is_streaming(&self) -> bool {
        self.is_streaming
    }

    #[must_use]
    pub fn context(&self) -> &[String] {
        &self.context
    }

    #[must_use]
    pub fn sentiment_score(&self) -> f32 {
        self.sentiment_score
    }

    #[must_use]
    pub fn frustration_detected(&self) -> bool {
        self.frustration_detected
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl Reducer for AiState {
    type Command = AiCommand;
    const NAME: &'static str = "ai";

    fn reduce(&mut self, command: AiCommand) {
        match command {
            AiCommand::AddMessage(message) => self.chat_history.push(message),
            AiCommand::SetTyping(typing) => self.is_typing = typing,
            AiCommand::SetStreaming(streaming) => self.is_streaming = streaming,
            AiCommand::UpdateContext(context) => self.context = context,
            AiCommand::SetSentiment { score, sentiment } => {
                self.sentiment_score = if score.is_nan() {
                    0.0
                } else {
                    score.clamp(-1.0, 1.0)
                };
                self.frustration_detected = sentiment == Sentiment::Frustrated;
            }
            AiCommand::ClearChat => {
                self.chat_history.clear();
                self.context.clear();
                self.sentiment_score = 0.0;
                self.frustration_detected = false;
            }
            AiCommand::SetError(error) => self.error = error,
        }
    }
}

pub struct AssistantService {
    store: Store<AiState>,
    clock: Clock,
    reply_delay: Duration,
    epoch: Arc<AtomicU64>,
    next_reply: AtomicU64,
    pending: PendingReplies,
}

impl AssistantService {
    #[must_use]
    pub fn new(clock: Clock, reply_delay: Duration) -> Self {
        Self {
            store: Store::new(AiState::default()),
            clock,
            reply_delay,
            epoch: Arc::new(AtomicU64::new(0)),
            next_reply: AtomicU64::new(0),
            pending: Arc::new(Mutex::new(Vec::new())),
        }
    }

    #[must_use]
    pub fn store(&self) -> &Store<AiState> {
        &self.store
    }

    /// Appends the user's message and schedules the scripted reply.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `AssistantError::EmptyMessage` for blank input, leaving the
    /// conversation untouched, or `AssistantError::NoRuntime` when no tokio
    /// runtime is running.
    pub fn send(&self, text: &str) -> Result<ReplyHandle, AssistantError> {
        if text.trim().is_empty() {
            return Err(AssistantError::EmptyMessage);
        }
        let runtime = Handle::try_current().map_err(|_| AssistantError::NoRuntime)?;
        let seq = self.next_reply.fetch_add(1, Ordering::Relaxed);
        let delay = self.reply_delay;

        // Registered under the store lock so a concurrent cancel never sees
        // the typing flag without its reply.
        let task = self.store.transact(|state| {
            state.reduce(AiCommand::AddMessage(ChatMessage::user(text, self.clock.now())));
            state.reduce(AiCommand::SetTyping(true));
            let issued = self.epoch.load(Ordering::SeqCst);

            let store = self.store.clone();
            let epoch = Arc::clone(&self.epoch);
            let pending = Arc::clone(&self.pending);
            let clock = self.clock;
            let task = runtime.spawn(async move {
                tokio::time::sleep(delay).await;
                let delivered = store.transact(|state| {
                    let others = settle(&pending, seq);
                    if epoch.load(Ordering::SeqCst) != issued {
                        return false;
                    }
                    state.reduce(AiCommand::AddMessage(ChatMessage::assistant(
                        CANNED_REPLY,
                        Some(Sentiment::Positive),
                        clock.now(),
                    )));
                    state.reduce(AiCommand::SetTyping(others));
                    true
                });
                if !delivered {
                    tracing::debug!(epoch = issued, "dropping reply for cleared chat");
                }
                delivered
            });

            let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
            pending.retain(|(_, handle)| !handle.is_finished());
            pending.push((seq, task.abort_handle()));
            task
        });
        tracing::debug!(?delay, seq, "assistant reply scheduled");

        Ok(ReplyHandle {
            task: Some(task),
            seq,
            pending: Arc::clone(&self.pending),
            store: self.store.clone(),
        })
    }

    /// Resets the conversation and cancels every reply still in flight.
    pub fn clear_chat(&self) {
        self.store.transact(|state| {
            self.epoch.fetch_add(1, Ordering::SeqCst);
            state.reduce(AiCommand::ClearChat);
            state.reduce(AiCommand::SetTyping(false));
        });

        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let cancelled = pending.len();
        for (_, handle) in pending.drain(..) {
            handle.abort();
        }
        tracing::debug!(cancelled, "chat cleared");
    }
}

/// Handle to one scheduled reply. Dropping it cancels the reply.
#[must_use = "dropping a ReplyHandle cancels the reply"]
pub struct ReplyHandle {
    task: Option<JoinHandle<bool>>,
    seq: u64,
    pending: PendingReplies,
    store: Store<AiState>,
}

impl ReplyHandle {
    pub fn cancel(mut self) {
        self.abort();
    }

    /// Waits for the reply. Returns whether it was added to the conversation.
    pub async fn join(mut self) -> bool {
        let Some(task) = self.task.take() else {
            return false;
        };
        task.await.unwrap_or(false)
    }

    fn abort(&mut self) {
        let Some(task) = self.task.take() else {
            return;
        };
        if task.is_finished() {
            return;
        }
        task.abort();
        self.store.transact(|state| {
            if !settle(&self.pending, self.seq) {
                state.reduce(AiCommand::SetTyping(false));
            }
        });
        tracing::debug!(seq = self.seq, "assistant reply cancelled");
    }
}

impl Drop for ReplyHandle {
    fn drop(&mut self) {
        self.abort();
    }
}
