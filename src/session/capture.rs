//! Capture device capability and the scoped handle the session owns.

use crate::errors::AppResult;
use std::sync::mpsc::Sender;

/// Outcome of one decode attempt: decoded text, or a decoder message.
pub type DecodeResult = Result<String, String>;

const DEFAULT_SCAN_RATE: u32 = 120;
const MAX_BOX_SIZE: u32 = 600;
const FALLBACK_VIEWPORT: u32 = 300;

/// Hints handed to the device when scanning starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureConfig {
    /// Frames per second the decoder should attempt.
    pub scan_rate_hint: u32,
    /// Side of the square scan box, in pixels.
    pub box_size_hint: u32,
    /// Try mirrored frames as well.
    pub allow_flip: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self::for_viewport(0)
    }
}

impl CaptureConfig {
    /// Scan box is 90% of the viewport, capped at 600px.
    /// A zero width means "unknown" and falls back to 300px.
    pub fn for_viewport(width: u32) -> Self {
        let width = if width == 0 { FALLBACK_VIEWPORT } else { width };
        let box_size = if width > MAX_BOX_SIZE {
            MAX_BOX_SIZE
        } else {
            width * 9 / 10
        };

        Self {
            scan_rate_hint: DEFAULT_SCAN_RATE,
            box_size_hint: box_size,
            allow_flip: true,
        }
    }
}

/// A scanning device (camera decoder, stdin reader, ...).
///
/// Decode attempts are pushed to `deliver` until `stop` is called.
pub trait CaptureDevice {
    fn start(&mut self, config: &CaptureConfig, deliver: Sender<DecodeResult>) -> AppResult<()>;
    fn stop(&mut self);
}

/// Owns a device and guarantees one `stop` per successful `start`.
pub struct CaptureHandle<D: CaptureDevice> {
    device: D,
    acquired: bool,
}

impl<D: CaptureDevice> CaptureHandle<D> {
    pub fn new(device: D) -> Self {
        Self {
            device,
            acquired: false,
        }
    }

    pub fn acquire(&mut self, config: &CaptureConfig, deliver: Sender<DecodeResult>) -> AppResult<()> {
        if self.acquired {
            return Ok(());
        }
        self.device.start(config, deliver)?;
        self.acquired = true;
        Ok(())
    }

    /// Safe to call when already released.
    pub fn release(&mut self) {
        if self.acquired {
            self.acquired = false;
            self.device.stop();
        }
    }

    pub fn is_acquired(&self) -> bool {
        self.acquired
    }

    pub fn device(&self) -> &D {
        &self.device
    }
}

impl<D: CaptureDevice> Drop for CaptureHandle<D> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::errors::AppError;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Counts start/stop calls; can be told to refuse starting.
    #[derive(Clone, Default)]
    pub struct MockDevice {
        pub starts: Rc<Cell<u32>>,
        pub stops: Rc<Cell<u32>>,
        pub fail_start: bool,
        pub last_config: Rc<Cell<Option<CaptureConfig>>>,
    }

    impl CaptureDevice for MockDevice {
        fn start(&mut self, config: &CaptureConfig, _deliver: Sender<DecodeResult>) -> AppResult<()> {
            if self.fail_start {
                return Err(AppError::Capture("camera busy".into()));
            }
            self.starts.set(self.starts.get() + 1);
            self.last_config.set(Some(*config));
            Ok(())
        }

        fn stop(&mut self) {
            self.stops.set(self.stops.get() + 1);
        }
    }
}
