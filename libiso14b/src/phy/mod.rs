// libiso14b-rs/libiso14b/src/phy/mod.rs

//! The bit-level software modem.
//!
//! Type B traffic is ASK/NRZ-L from reader to tag and BPSK on an 848 kHz
//! subcarrier from tag to reader. [`ToSend`] collects outgoing frame bits,
//! [`encode`] builds the two framings into it, [`Uart`] recovers reader
//! commands from a sliced 1-bit stream at 4x oversampling, and [`Demod`]
//! recovers tag responses from signed I/Q correlator pairs with no a-priori
//! phase reference.

pub mod demod;
pub mod encode;
pub mod tosend;
pub mod uart;

pub use demod::{Demod, DemodState};
pub use encode::{code_as_reader, code_as_tag};
pub use tosend::ToSend;
pub use uart::{Uart, UartState};
