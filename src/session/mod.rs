//! Scan session: the time-boxed window during which captures are accepted.
//!
//! ```text
//! Idle --start()--> Active --stop()--> Idle
//!                     |
//!                     +--timeout / expire()--> Expired (terminal)
//! ```
//!
//! All transitions happen on the caller's thread, in response to discrete
//! events (`tick`, `on_decoded`, `on_decode_error`, user actions). Observers
//! receive [`SessionEvent`]s through [`ScanSession::subscribe`].

pub mod capture;
pub mod countdown;
pub mod stdin;

use crate::db::kv::KeyValueStorage;
use crate::errors::{AppError, AppResult};
use crate::models::{AttendeeRecord, RecordParser};
use crate::store::AttendeeStore;
use capture::{CaptureConfig, CaptureDevice, CaptureHandle, DecodeResult};
use chrono::NaiveDateTime;
use std::sync::mpsc::{Receiver, Sender, channel};

/// Default scan window: five minutes.
pub const DEFAULT_DURATION_SECS: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Active,
    Expired,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Active => "active",
            SessionState::Expired => "expired",
        }
    }
}

/// What observers are told about.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Started { remaining: u32 },
    Tick { remaining: u32 },
    /// A record was added to the roster; views should refresh.
    Captured(AttendeeRecord),
    DecodeFailed(String),
    /// The record was captured but could not be written to storage.
    PersistFailed(String),
    Stopped { remaining: u32 },
    Expired,
    StartRejected,
}

pub struct ScanSession<D: CaptureDevice> {
    state: SessionState,
    remaining: u32,
    capture_config: CaptureConfig,
    handle: CaptureHandle<D>,
    parser: RecordParser,
    decoded: Option<Receiver<DecodeResult>>,
    subscribers: Vec<Sender<SessionEvent>>,
}

impl<D: CaptureDevice> ScanSession<D> {
    pub fn new(device: D, duration_secs: u32, capture_config: CaptureConfig) -> Self {
        Self {
            state: SessionState::Idle,
            remaining: duration_secs,
            capture_config,
            handle: CaptureHandle::new(device),
            parser: RecordParser::default(),
            decoded: None,
            subscribers: Vec::new(),
        }
    }

    pub fn with_parser(mut self, parser: RecordParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    pub fn device(&self) -> &D {
        self.handle.device()
    }

    /// Decode results delivered by the device since the last `start()`.
    pub fn decoded(&self) -> Option<&Receiver<DecodeResult>> {
        self.decoded.as_ref()
    }

    pub fn subscribe(&mut self) -> Receiver<SessionEvent> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    /// Begin (or resume) scanning.
    ///
    /// Rejected once the session has expired; a stopped session resumes with
    /// the countdown where it was paused.
    pub fn start(&mut self) -> AppResult<()> {
        match self.state {
            SessionState::Active => Ok(()),
            SessionState::Expired => {
                self.emit(SessionEvent::StartRejected);
                Err(AppError::SessionExpired)
            }
            SessionState::Idle => {
                let (tx, rx) = channel();
                self.handle.acquire(&self.capture_config, tx)?;
                self.decoded = Some(rx);
                self.state = SessionState::Active;
                self.emit(SessionEvent::Started {
                    remaining: self.remaining,
                });
                Ok(())
            }
        }
    }

    /// Pause scanning. Not terminal: `start()` may follow.
    pub fn stop(&mut self) {
        if self.state != SessionState::Active {
            return;
        }
        self.release();
        self.state = SessionState::Idle;
        self.emit(SessionEvent::Stopped {
            remaining: self.remaining,
        });
    }

    /// One second elapsed. Returns the remaining seconds while active.
    pub fn tick(&mut self) -> Option<u32> {
        if self.state != SessionState::Active {
            return None;
        }

        self.remaining = self.remaining.saturating_sub(1);
        self.emit(SessionEvent::Tick {
            remaining: self.remaining,
        });

        if self.remaining == 0 {
            self.expire();
        }
        Some(self.remaining)
    }

    /// Force the terminal state.
    pub fn expire(&mut self) {
        if self.state == SessionState::Expired {
            return;
        }
        self.release();
        self.remaining = 0;
        self.state = SessionState::Expired;
        self.emit(SessionEvent::Expired);
    }

    /// Handle a decoded payload: parse it and prepend it to `store`.
    ///
    /// Ignored unless the session is active. A storage failure is reported
    /// as [`SessionEvent::PersistFailed`] but the capture still counts.
    pub fn on_decoded<S: KeyValueStorage>(
        &mut self,
        payload: &str,
        captured_at: NaiveDateTime,
        store: &mut AttendeeStore<S>,
    ) -> Option<AttendeeRecord> {
        if self.state != SessionState::Active {
            return None;
        }

        let record = self.parser.parse(payload, captured_at);

        if let Err(e) = store.add(record.clone()) {
            self.emit(SessionEvent::PersistFailed(e.to_string()));
        }

        self.emit(SessionEvent::Captured(record.clone()));
        Some(record)
    }

    /// A decode attempt failed; the session keeps going.
    pub fn on_decode_error(&mut self, message: &str) {
        self.emit(SessionEvent::DecodeFailed(message.to_string()));
    }

    fn release(&mut self) {
        self.handle.release();
        self.decoded = None;
    }

    fn emit(&mut self, event: SessionEvent) {
        self.subscribers
            .retain(|tx| tx.send(event.clone()).is_ok());
    }
}
