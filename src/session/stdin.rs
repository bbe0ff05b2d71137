//! Text-stream capture device: each payload is a block of lines terminated
//! by a blank line (or end of input). Used by the CLI with stdin, where a
//! scanner in keyboard-wedge mode or a pipe provides the decoded text.

use super::capture::{CaptureConfig, CaptureDevice, DecodeResult};
use crate::errors::AppResult;
use std::io::{BufRead, BufReader, Stdin};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::thread;

type Slot = Arc<Mutex<Option<Sender<DecodeResult>>>>;

pub struct ReaderDevice<R: BufRead + Send + 'static> {
    source: Option<R>,
    slot: Slot,
}

pub type StdinDevice = ReaderDevice<BufReader<Stdin>>;

impl StdinDevice {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(std::io::stdin()))
    }
}

impl<R: BufRead + Send + 'static> ReaderDevice<R> {
    pub fn new(source: R) -> Self {
        Self {
            source: Some(source),
            slot: Arc::new(Mutex::new(None)),
        }
    }
}

impl<R: BufRead + Send + 'static> CaptureDevice for ReaderDevice<R> {
    fn start(&mut self, _config: &CaptureConfig, deliver: Sender<DecodeResult>) -> AppResult<()> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(deliver);
        }

        // The reader thread is spawned once and outlives stop/start cycles;
        // payloads read while stopped are dropped.
        if let Some(source) = self.source.take() {
            let slot = Arc::clone(&self.slot);
            thread::spawn(move || read_payloads(source, slot));
        }
        Ok(())
    }

    fn stop(&mut self) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
    }
}

fn read_payloads<R: BufRead>(mut source: R, slot: Slot) {
    let mut payload: Vec<u8> = Vec::new();
    let mut line: Vec<u8> = Vec::new();

    loop {
        line.clear();
        match source.read_until(b'\n', &mut line) {
            Ok(0) => {
                flush(&mut payload, &slot);
                break;
            }
            Ok(_) => {
                if line.iter().all(u8::is_ascii_whitespace) {
                    flush(&mut payload, &slot);
                } else {
                    payload.extend_from_slice(&line);
                }
            }
            Err(e) => {
                deliver(&slot, Err(format!("read error: {e}")));
                break;
            }
        }
    }

    // end of input: closing the channel tells the session nothing more comes
    if let Ok(mut slot) = slot.lock() {
        *slot = None;
    }
}

fn flush(payload: &mut Vec<u8>, slot: &Slot) {
    if payload.is_empty() {
        return;
    }
    let bytes = std::mem::take(payload);
    let result = String::from_utf8(bytes)
        .map(|s| s.trim_end().to_string())
        .map_err(|_| "payload is not valid UTF-8".to_string());
    deliver(slot, result);
}

fn deliver(slot: &Slot, result: DecodeResult) {
    if let Ok(slot) = slot.lock()
        && let Some(tx) = slot.as_ref()
    {
        let _ = tx.send(result);
    }
}
