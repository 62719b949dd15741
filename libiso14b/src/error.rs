// libiso14b-rs/libiso14b/src/error.rs

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// No subcarrier was detected before the sample budget ran out.
    #[error("no tag answer within the sample budget")]
    Timeout,

    /// A decoded frame would exceed the receive buffer capacity.
    #[error("frame exceeds receive buffer capacity")]
    BufferOverflow,

    /// A reply was shorter (or longer) than the protocol requires.
    #[error("invalid reply length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// The CRC-B trailer of a received frame did not verify.
    #[error("crc mismatch: expected {expected:#06x}, got {actual:#06x}")]
    CrcMismatch { expected: u16, actual: u16 },

    /// An SRx SELECT echo carried a different chip id than we sent.
    #[error("chip id mismatch: sent {sent:#04x}, echoed {echoed:#04x}")]
    SelectionMismatch { sent: u8, echoed: u8 },

    /// The host asked us to stop at a cooperative poll point.
    #[error("operation cancelled by host")]
    Cancelled,
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
