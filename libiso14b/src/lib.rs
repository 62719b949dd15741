// libiso14b-rs/libiso14b/src/lib.rs

//! libiso14b
//!
//! Pure Rust implementation of the ISO/IEC 14443-3/4 Type B protocol stack:
//! the bit-level software modem (ASK reader uplink, BPSK tag downlink), the
//! reader-side selection and APDU drivers, a Type B tag emulator, and a
//! passive sniffer. The radio front-end is abstracted behind a trait so the
//! whole stack can run against real hardware or a scripted mock.
#![warn(missing_docs)]

pub mod constants;
pub mod emulator;
pub mod error;
pub mod frontend;
pub mod phy;
pub mod prelude;
pub mod protocol;
pub mod reader;
pub mod sniffer;
pub mod test_support;
pub mod trace;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
