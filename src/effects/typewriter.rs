//! Typewriter text effect.
//!
//! [`TypewriterMachine`] is the pure state machine:
//!
//! ```text
//! Idle ──start()──▶ Running ──tick() × N──▶ Done
//!   └──start() on empty text──────────────▶ Done
//! ```
//!
//! [`Typewriter`] schedules it on tokio timers: it waits the initial delay,
//! clears the target, then appends one character per interval. It owns the
//! cancellation token of its run, so starting again cancels the run in
//! progress instead of racing it.

use crate::config::TypewriterConfig;
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypewriterState {
    Idle,
    Running,
    Done,
}

/// Character-by-character reveal of one string.
#[derive(Debug, Clone)]
pub struct TypewriterMachine {
    chars: Vec<char>,
    index: usize,
    state: TypewriterState,
}

impl TypewriterMachine {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            index: 0,
            state: TypewriterState::Idle,
        }
    }

    pub const fn state(&self) -> TypewriterState {
        self.state
    }

    /// Leave `Idle`. Empty text goes straight to `Done`.
    pub fn start(&mut self) -> TypewriterState {
        if self.state == TypewriterState::Idle {
            self.state = if self.chars.is_empty() {
                TypewriterState::Done
            } else {
                TypewriterState::Running
            };
        }
        self.state
    }

    /// Next character to append, or `None` once `Done` (or before `start`).
    pub fn tick(&mut self) -> Option<char> {
        if self.state != TypewriterState::Running {
            return None;
        }
        let ch = self.chars[self.index];
        self.index += 1;
        if self.index == self.chars.len() {
            self.state = TypewriterState::Done;
        }
        Some(ch)
    }
}

/// Where the typewriter writes.
pub trait TextTarget: Send + 'static {
    fn clear(&mut self);
    fn append(&mut self, ch: char);
}

/// Shared in-memory text, e.g. a DOM text node stand-in.
impl TextTarget for Arc<Mutex<String>> {
    fn clear(&mut self) {
        if let Ok(mut text) = self.lock() {
            text.clear();
        }
    }

    fn append(&mut self, ch: char) {
        if let Ok(mut text) = self.lock() {
            text.push(ch);
        }
    }
}

/// Timer-driven typewriter with at most one run in flight.
pub struct Typewriter {
    delay: Duration,
    interval: Duration,
    token: Option<CancellationToken>,
}

impl Typewriter {
    pub const fn new(delay: Duration, interval: Duration) -> Self {
        Self {
            delay,
            interval,
            token: None,
        }
    }

    pub const fn from_config(config: &TypewriterConfig) -> Self {
        Self::new(config.delay(), config.interval())
    }

    /// Start typing `text` into `target`, cancelling any run in progress.
    ///
    /// Must be called inside a tokio runtime. The returned handle resolves
    /// to the final state: `Done` on completion, or the state at which the
    /// run was cancelled.
    pub fn start<T: TextTarget>(&mut self, text: &str, target: T) -> JoinHandle<TypewriterState> {
        self.cancel();

        let token = CancellationToken::new();
        let handle = tokio::spawn(run(
            TypewriterMachine::new(text),
            target,
            self.delay,
            self.interval,
            token.clone(),
        ));
        self.token = Some(token);
        handle
    }

    /// Cancel the run in progress, if any.
    pub fn cancel(&mut self) {
        if let Some(token) = self.token.take() {
            token.cancel();
        }
    }
}

impl Drop for Typewriter {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn run<T: TextTarget>(
    mut machine: TypewriterMachine,
    mut target: T,
    delay: Duration,
    interval: Duration,
    token: CancellationToken,
) -> TypewriterState {
    tokio::select! {
        () = token.cancelled() => return machine.state(),
        () = tokio::time::sleep(delay) => {}
    }

    target.clear();
    machine.start();

    while let Some(ch) = machine.tick() {
        target.append(ch);
        if machine.state() == TypewriterState::Done {
            break;
        }
        tokio::select! {
            () = token.cancelled() => return machine.state(),
            () = tokio::time::sleep(interval) => {}
        }
    }

    machine.state()
}
