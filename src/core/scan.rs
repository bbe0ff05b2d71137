use crate::db::kv::KeyValueStorage;
use crate::errors::AppResult;
use crate::models::AttendeeRecord;
use crate::session::capture::CaptureDevice;
use crate::session::countdown::{EXPIRED_LABEL, format_remaining, is_final_minute};
use crate::session::{ScanSession, SessionEvent, SessionState};
use crate::store::AttendeeStore;
use crate::ui::messages::{countdown, error, info, scan, success, warning};
use chrono::Local;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

/// Outcome of one scanning run.
#[derive(Debug, Default)]
pub struct ScanSummary {
    pub captured: Vec<AttendeeRecord>,
    pub decode_failures: usize,
    pub persist_failures: usize,
    pub expired: bool,
    pub remaining: u32,
}

pub struct ScanLogic;

impl ScanLogic {
    /// Drive `session` until it expires or the device runs out of input.
    ///
    /// Everything happens on the calling thread: the loop waits for the next
    /// decode result at most until the next tick is due, and a due tick runs
    /// before any queued result.
    pub fn run<D: CaptureDevice, S: KeyValueStorage>(
        session: &mut ScanSession<D>,
        store: &mut AttendeeStore<S>,
        tick: Duration,
    ) -> AppResult<ScanSummary> {
        let events = session.subscribe();
        let mut summary = ScanSummary::default();

        session.start()?;
        report(&events, &mut summary);

        let mut next_tick = Instant::now() + tick;

        while session.is_active() {
            let now = Instant::now();

            if now >= next_tick {
                session.tick();
                next_tick += tick;
                report(&events, &mut summary);
                continue;
            }

            let received = match session.decoded() {
                Some(rx) => rx.recv_timeout(next_tick - now),
                None => break,
            };

            match received {
                Ok(Ok(payload)) => {
                    session.on_decoded(&payload, Local::now().naive_local(), store);
                }
                Ok(Err(msg)) => session.on_decode_error(&msg),
                Err(RecvTimeoutError::Timeout) => {}
                // input closed: same as the user pressing "stop"
                Err(RecvTimeoutError::Disconnected) => session.stop(),
            }

            report(&events, &mut summary);
        }

        summary.expired = session.state() == SessionState::Expired;
        summary.remaining = session.remaining_seconds();
        Ok(summary)
    }
}

fn report(events: &Receiver<SessionEvent>, summary: &mut ScanSummary) {
    for event in events.try_iter() {
        match event {
            SessionEvent::Started { remaining } => {
                scan("Scanner started. Present a code to register an attendee.");
                countdown(&format_remaining(remaining), is_final_minute(remaining));
            }
            SessionEvent::Tick { remaining } => {
                if remaining > 0 && (remaining % 60 == 0 || remaining <= 10) {
                    countdown(&format_remaining(remaining), is_final_minute(remaining));
                }
            }
            SessionEvent::Captured(record) => {
                success(format!("Captured: {} (ID: {})", record.name, record.id));
                summary.captured.push(record);
            }
            SessionEvent::DecodeFailed(msg) => {
                warning(format!("Scan failed: {msg}"));
                summary.decode_failures += 1;
            }
            SessionEvent::PersistFailed(msg) => {
                error(format!("Attendee kept in memory but not saved: {msg}"));
                summary.persist_failures += 1;
            }
            SessionEvent::Stopped { remaining } => {
                info(format!(
                    "Scanner stopped with {} left.",
                    format_remaining(remaining)
                ));
            }
            SessionEvent::Expired => {
                countdown(EXPIRED_LABEL, true);
                warning("Scanner expired. Please reload to restart.");
            }
            SessionEvent::StartRejected => {
                warning("Scanner expired. Please reload to restart.");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::kv::MemoryStorage;
    use crate::session::capture::{CaptureConfig, DecodeResult};
    use crate::session::stdin::ReaderDevice;
    use std::io::Cursor;
    use std::sync::mpsc::Sender;

    #[test]
    fn run_captures_until_input_ends() {
        let input = "Name:Bob\nID:7\n\nName:Alice\nID:42\n";
        let dev = ReaderDevice::new(Cursor::new(input.as_bytes().to_vec()));
        let mut session = ScanSession::new(dev, 300, CaptureConfig::default());
        let mut store = AttendeeStore::open(MemoryStorage::new());

        let summary = ScanLogic::run(&mut session, &mut store, Duration::from_secs(1)).unwrap();

        assert_eq!(summary.captured.len(), 2);
        assert!(!summary.expired);
        assert_eq!(session.state(), SessionState::Idle);

        let names: Vec<_> = store.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Alice", "Bob"]);
    }

    /// Keeps the channel open without ever delivering anything.
    #[derive(Default)]
    struct SilentDevice {
        held: Option<Sender<DecodeResult>>,
    }

    impl CaptureDevice for SilentDevice {
        fn start(&mut self, _config: &CaptureConfig, deliver: Sender<DecodeResult>) -> AppResult<()> {
            self.held = Some(deliver);
            Ok(())
        }
        fn stop(&mut self) {
            self.held = None;
        }
    }

    /// Queues a large backlog at start and keeps the channel open.
    #[derive(Default)]
    struct BacklogDevice {
        held: Option<Sender<DecodeResult>>,
    }

    const BACKLOG: usize = 2000;

    impl CaptureDevice for BacklogDevice {
        fn start(&mut self, _config: &CaptureConfig, deliver: Sender<DecodeResult>) -> AppResult<()> {
            for i in 0..BACKLOG {
                deliver.send(Ok(format!("Name:P{i}\nID:{i}"))).unwrap();
            }
            self.held = Some(deliver);
            Ok(())
        }
        fn stop(&mut self) {
            self.held = None;
        }
    }

    #[test]
    fn queued_input_does_not_hold_off_the_countdown() {
        let mut session = ScanSession::new(BacklogDevice::default(), 2, CaptureConfig::default());
        let mut store = AttendeeStore::open(MemoryStorage::new());

        let summary = ScanLogic::run(&mut session, &mut store, Duration::from_millis(1)).unwrap();

        assert!(summary.expired);
        assert!(summary.captured.len() < BACKLOG);
        assert_eq!(store.len(), summary.captured.len());
    }

    #[test]
    fn run_ends_when_the_window_expires() {
        let mut session = ScanSession::new(SilentDevice::default(), 3, CaptureConfig::default());
        let mut store = AttendeeStore::open(MemoryStorage::new());

        let summary = ScanLogic::run(&mut session, &mut store, Duration::from_millis(5)).unwrap();

        assert!(summary.expired);
        assert_eq!(summary.remaining, 0);
        assert!(session.device().held.is_none());
        assert!(ScanLogic::run(&mut session, &mut store, Duration::from_millis(5)).is_err());
    }
}
