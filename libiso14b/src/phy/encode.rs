// libiso14b-rs/libiso14b/src/phy/encode.rs

//! Frame encoders for both link directions.
//!
//! Both framings share the 10-bit character structure: start bit 0, eight
//! data bits LSB-first, stop bit 1. SOF is 10 ETU of zeros then 2 ETU of
//! ones, EOF is 10 ETU of zeros.

use super::tosend::ToSend;

/// Code a reader-to-tag command (ASK, NRZ-L) into `ts`, one stuffed bit per
/// ETU. Returns the finalized frame length in bytes.
pub fn code_as_reader(ts: &mut ToSend, cmd: &[u8]) -> usize {
    ts.reset();

    // SOF: 10 ETU of zeros, 2 ETU of ones.
    for _ in 0..10 {
        ts.stuff_bit(false);
    }
    ts.stuff_bit(true);
    ts.stuff_bit(true);

    for &b in cmd {
        ts.stuff_bit(false);
        for j in 0..8 {
            ts.stuff_bit(b & (1 << j) != 0);
        }
        ts.stuff_bit(true);
    }

    // EOF
    for _ in 0..10 {
        ts.stuff_bit(false);
    }

    // Fill the trailing byte with unmodulated ones.
    while ts.bit_len() % 8 != 0 {
        ts.stuff_bit(true);
    }

    ts.finalize()
}

/// Code a tag-to-reader response (BPSK subcarrier) into `ts`, four stuffed
/// bits per ETU. The leading burst of ones is TR1, which gives the reader
/// its phase reference. Returns the finalized frame length in bytes.
pub fn code_as_tag(ts: &mut ToSend, cmd: &[u8]) -> usize {
    ts.reset();

    // TR1: 20 ETU of ones.
    for _ in 0..20 {
        ts.stuff4(true);
    }

    // SOF
    for _ in 0..10 {
        ts.stuff4(false);
    }
    ts.stuff4(true);
    ts.stuff4(true);

    for &b in cmd {
        ts.stuff4(false);
        for j in 0..8 {
            ts.stuff4(b & (1 << j) != 0);
        }
        ts.stuff4(true);
    }

    // EOF
    for _ in 0..10 {
        ts.stuff4(false);
    }

    // Trailing ones after EOF; no Type B specification mandates these but
    // the wire format is kept bit-exact.
    ts.stuff4(true);
    ts.stuff4(true);

    ts.finalize()
}
