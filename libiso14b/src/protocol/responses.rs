// libiso14b-rs/libiso14b/src/protocol/responses.rs

//! Parsing of tag answers on the reader side.

use crate::protocol::crc;
use crate::types::{Atqb, Pupi};
use crate::{Error, Result};

/// Parse a raw ATQB answer (12 payload bytes + 2 CRC) into the PUPI and the
/// protocol/application-data block. Verifies length and CRC.
pub fn parse_atqb(raw: &[u8]) -> Result<(Pupi, Atqb)> {
    if raw.len() < 14 {
        return Err(Error::InvalidLength {
            expected: 14,
            actual: raw.len(),
        });
    }
    crc::verify(raw)?;
    let pupi = Pupi::try_from(&raw[1..5])?;
    let atqb = Atqb::try_from(&raw[5..12])?;
    Ok((pupi, atqb))
}
