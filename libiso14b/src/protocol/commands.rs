// libiso14b-rs/libiso14b/src/protocol/commands.rs

//! Builders for the reader-side Type B command frames. Every builder returns
//! the full frame including the CRC-B trailer.

use crate::constants::{
    ISO14443B_ATTRIB, ISO14443B_GET_UID, ISO14443B_READ_BLK, ISO14443B_SELECT,
};
use crate::protocol::crc;
use crate::types::{Atqb, Pupi};

/// Build the ATTRIB frame that binds a tag after ATQB: PUPI, Param 1 = 0,
/// Param 2 = 0x08 (106 kbit/s, max frame size 256), Param 3 = the protocol
/// type nibble echoed from ATQB, Param 4 = CID 0.
pub fn encode_attrib(pupi: &Pupi, atqb: &Atqb) -> Vec<u8> {
    let mut buf = Vec::with_capacity(11);
    buf.push(ISO14443B_ATTRIB);
    buf.extend_from_slice(pupi.as_bytes());
    buf.push(0x00);
    buf.push(0x08);
    buf.push(atqb.protocol_type());
    buf.push(0x00);
    crc::append(&mut buf);
    buf
}

/// Build the SRx SELECT frame echoing the chip id learned from INITIATE.
pub fn encode_srx_select(chip_id: u8) -> Vec<u8> {
    let mut buf = vec![ISO14443B_SELECT, chip_id];
    crc::append(&mut buf);
    buf
}

/// Build the SRx GET UID frame.
pub fn encode_srx_get_uid() -> Vec<u8> {
    let mut buf = vec![ISO14443B_GET_UID];
    crc::append(&mut buf);
    buf
}

/// Build the SRx READ BLOCK frame. Address 0xFF is the system block.
pub fn encode_srx_read_block(addr: u8) -> Vec<u8> {
    let mut buf = vec![ISO14443B_READ_BLK, addr];
    crc::append(&mut buf);
    buf
}

/// Frame an ISO 14443-4 I-block: PCB carrying the block-number toggle,
/// CID 0, the payload, and the CRC trailer.
pub fn encode_i_block(block_num: u8, payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(payload.len() + 4);
    buf.push(0x0A | (block_num & 1));
    buf.push(0x00);
    buf.extend_from_slice(payload);
    crc::append(&mut buf);
    buf
}
