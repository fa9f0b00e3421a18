// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Advisor conversation state.
//!
//! Two sequences are kept side by side: the transcript shown to the user
//! and the history sent back to the advisor. They only grow together on a
//! successful round trip; a failed turn adds a fallback reply to the
//! transcript and leaves the history alone.

use tracing::{debug, warn};

use crate::api::FinanceApi;
use crate::error::{ApiError, SessionError};
use crate::models::{ChatRequest, ChatTurn, Expense, Goal};

pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatState {
    #[default]
    Idle,
    AwaitingResponse,
}

/// A request that has been echoed to the transcript and is waiting for its reply.
#[derive(Debug, Clone)]
pub struct PendingTurn {
    ticket: u64,
    user: ChatTurn,
    pub request: ChatRequest,
}

impl PendingTurn {
    pub fn ticket(&self) -> u64 {
        self.ticket
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    Replied,
    FellBack,
    /// The session was reset while the request was out; the reply was dropped.
    Discarded,
}

#[derive(Debug, Default)]
pub struct ChatSession {
    transcript: Vec<ChatTurn>,
    history: Vec<ChatTurn>,
    input: String,
    state: ChatState,
    // Incremented on every send and reset; only the newest ticket may complete.
    ticket: u64,
    outstanding: Option<PendingTurn>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &[ChatTurn] {
        &self.transcript
    }

    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    pub fn is_awaiting(&self) -> bool {
        self.state == ChatState::AwaitingResponse
    }

    /// Idle -> AwaitingResponse. Echoes the user turn and snapshots the request.
    pub fn begin_send(
        &mut self,
        expenses: &[Expense],
        goals: &[Goal],
    ) -> Result<PendingTurn, SessionError> {
        if self.is_awaiting() {
            return Err(SessionError::Busy);
        }
        if self.input.trim().is_empty() {
            return Err(SessionError::EmptyMessage);
        }
        let message = std::mem::take(&mut self.input);
        let user = ChatTurn::user(message.clone());
        self.transcript.push(user.clone());
        self.state = ChatState::AwaitingResponse;
        self.ticket += 1;

        let pending = PendingTurn {
            ticket: self.ticket,
            user,
            request: ChatRequest {
                message,
                expenses: expenses.to_vec(),
                goals: goals.to_vec(),
                history: self.history.clone(),
            },
        };
        self.outstanding = Some(pending.clone());
        debug!(
            ticket = self.ticket,
            history = self.history.len(),
            "chat turn started"
        );
        Ok(pending)
    }

    /// AwaitingResponse -> Idle.
    pub fn complete(
        &mut self,
        ticket: u64,
        result: Result<String, ApiError>,
    ) -> CompletionOutcome {
        let pending = match self.outstanding.take() {
            Some(p) if p.ticket == ticket => p,
            other => {
                self.outstanding = other;
                debug!(ticket, "dropping reply for a turn that is no longer current");
                return CompletionOutcome::Discarded;
            }
        };
        self.state = ChatState::Idle;
        match result {
            Ok(text) => {
                let reply = ChatTurn::assistant(text);
                self.transcript.push(reply.clone());
                self.history.push(pending.user);
                self.history.push(reply);
                CompletionOutcome::Replied
            }
            Err(e) => {
                warn!(error = %e, "advisor request failed");
                self.transcript.push(ChatTurn::assistant(FALLBACK_REPLY));
                CompletionOutcome::FellBack
            }
        }
    }

    /// Run one full turn for the current input against `api`.
    pub fn send<A: FinanceApi + ?Sized>(
        &mut self,
        api: &A,
        expenses: &[Expense],
        goals: &[Goal],
    ) -> Result<CompletionOutcome, SessionError> {
        let pending = self.begin_send(expenses, goals)?;
        let result = api.chat(&pending.request).map(|r| r.response);
        Ok(self.complete(pending.ticket, result))
    }

    pub fn reset(&mut self) {
        self.transcript.clear();
        self.history.clear();
        self.input.clear();
        self.state = ChatState::Idle;
        self.outstanding = None;
        self.ticket += 1;
    }
}
