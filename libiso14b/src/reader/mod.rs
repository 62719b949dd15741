// libiso14b-rs/libiso14b/src/reader/mod.rs

//! Reader (PCD) personality: transceiver primitives, ISO 14443-3 selection,
//! ISO 14443-4 APDU exchange, SRx memory access and the host raw-command
//! dispatcher.

mod apdu;
pub mod raw;
mod select;
mod srx;
mod transceive;

pub use raw::{RawFlags, RawReply, RawRequest};
pub use srx::SrxDump;

use log::debug;

use crate::constants::{FWT_DEFAULT, MAX_FRAME_SIZE, MAX_TIMEOUT};
use crate::frontend::{Frontend, Mode};
use crate::phy::ToSend;
use crate::trace::TraceLog;

/// A reader session over a radio front-end.
///
/// Owns the send buffer, the trace log, the ISO 14443-4 block-number toggle
/// and the negotiated timeout/frame-size parameters. At most one session
/// drives the hardware at a time.
pub struct Reader<F: Frontend> {
    frontend: F,
    tosend: ToSend,
    trace: TraceLog,
    timeout: u32,
    max_frame_size: u16,
    pcb_block_num: u8,
    trigger: bool,
}

impl<F: Frontend> Reader<F> {
    /// New session with the default frame waiting time and frame size.
    pub fn new(frontend: F) -> Self {
        Self {
            frontend,
            tosend: ToSend::new(),
            trace: TraceLog::new(),
            timeout: FWT_DEFAULT,
            max_frame_size: MAX_FRAME_SIZE as u16,
            pcb_block_num: 0,
            trigger: false,
        }
    }

    /// Power the field up in reader mode and start a fresh trace.
    pub fn connect(&mut self) {
        self.frontend.set_mode(Mode::ReaderTx);
        self.trace.clear();
        debug!("field up, reader mode");
    }

    /// Power the field down.
    pub fn disconnect(&mut self) {
        self.frontend.field_off();
        debug!("field down");
    }

    /// Set the frame waiting time in sub-carrier ticks, clamped to
    /// [`MAX_TIMEOUT`].
    pub fn set_timeout(&mut self, fwt: u32) {
        self.timeout = fwt.min(MAX_TIMEOUT);
        debug!("timeout set to {} fwt", self.timeout);
    }

    /// Currently configured frame waiting time.
    pub fn timeout(&self) -> u32 {
        self.timeout
    }

    /// Set the negotiated maximum frame size. Sizes above 256 fall back to
    /// [`MAX_FRAME_SIZE`].
    pub fn set_max_frame_size(&mut self, size: u16) {
        let size = if size > 256 {
            MAX_FRAME_SIZE as u16
        } else {
            size
        };
        self.max_frame_size = size;
        debug!("max frame size set to {} bytes", self.max_frame_size);
    }

    /// Currently negotiated maximum frame size.
    pub fn max_frame_size(&self) -> u16 {
        self.max_frame_size
    }

    /// Current ISO 14443-4 block number (0 or 1).
    pub fn pcb_block_num(&self) -> u8 {
        self.pcb_block_num
    }

    /// True while a raw call with REQUEST_TRIGGER is in flight.
    pub fn trigger_armed(&self) -> bool {
        self.trigger
    }

    /// Captured traffic of this session.
    pub fn trace(&self) -> &TraceLog {
        &self.trace
    }

    /// Borrow the front-end.
    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    /// Give the front-end back, ending the session.
    pub fn into_frontend(self) -> F {
        self.frontend
    }
}
