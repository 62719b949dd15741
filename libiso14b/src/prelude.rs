// libiso14b-rs/libiso14b/src/prelude.rs

pub use crate::emulator::{simulate_tag, CardState, Emulator};
pub use crate::frontend::{Frontend, MockFrontend, Mode};
pub use crate::reader::{RawFlags, RawReply, RawRequest, Reader, SrxDump};
pub use crate::sniffer::{SniffSummary, Sniffer};
pub use crate::trace::{Direction, TraceLog, TraceRecord};
pub use crate::{Atqb, CardSelect, Error, Pupi, Result, SrxUid};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced};
