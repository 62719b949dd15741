// libiso14b-rs/libiso14b/src/constants.rs
//! Protocol command bytes, timing constants and canned frames.
//!
//! Timing values are in sub-carrier clock ticks (13.56 MHz / 4 = 3.39 MHz
//! when acting as reader). All transmit slot alignments are multiples of 16.

/// REQB/WUPB command byte (Type B selection layer).
pub const ISO14443B_REQB: u8 = 0x05;
/// ATTRIB command byte.
pub const ISO14443B_ATTRIB: u8 = 0x1D;
/// HLTB command byte.
pub const ISO14443B_HLTB: u8 = 0x50;
/// SRx INITIATE command byte.
pub const ISO14443B_INITIATE: u8 = 0x06;
/// SRx SELECT command byte.
pub const ISO14443B_SELECT: u8 = 0x0E;
/// SRx GET UID command byte.
pub const ISO14443B_GET_UID: u8 = 0x0B;
/// SRx READ BLOCK command byte.
pub const ISO14443B_READ_BLK: u8 = 0x08;

/// Delay from scheduling a reader TX slot to the field actually changing.
pub const DELAY_ARM_TO_TAG: u32 = 16;
/// Delay from the antenna to the demodulated sample reaching us.
pub const DELAY_TAG_TO_ARM: u32 = 32;
/// Gap between the end of a tag response and the next reader command.
pub const DELAY_VICC_TO_VCD: u32 = 600;
/// Gap between the end of a reader command and the earliest tag response.
pub const DELAY_VCD_TO_VICC: u32 = 600;

/// Base receive budget for protocol replies, in samples.
pub const ISO14443B_READER_TIMEOUT: u32 = 1700;
/// Default frame waiting time in sub-carrier ticks (about 2 s).
pub const FWT_DEFAULT: u32 = 35_312;
/// Upper bound for any configured frame waiting time.
pub const MAX_TIMEOUT: u32 = 40_542_464;
/// Largest frame either decoder will buffer.
pub const MAX_FRAME_SIZE: usize = 256;

/// Minimum correlator amplitude that counts as a present subcarrier.
pub const SUBCARRIER_DETECT_THRESHOLD: i32 = 8;
/// Minimum antenna voltage (mV) for the emulator to consider a field present.
pub const MIN_FIELD_STRENGTH: u16 = 4000;

/// WUPB, AFI=0, select all, N=1, CRC included. Wakes tags in HALT state too.
pub const WUPB: [u8; 5] = [ISO14443B_REQB, 0x00, 0x08, 0x39, 0x73];

/// SRx INITIATE frame, CRC included.
pub const INITIATE: [u8; 4] = [ISO14443B_INITIATE, 0x00, 0x97, 0x5B];

/// Canned ATQB: PUPI = 820de174, application data = 0x20381922,
/// 106 kbit/s both directions, max frame size 32 bytes, ISO 14443-4
/// supported, FWI = 8 (77 ms), NAD supported, CID not supported.
pub const DEFAULT_ATQB: [u8; 14] = [
    0x50, 0x82, 0x0D, 0xE1, 0x74, 0x20, 0x38, 0x19, 0x22, 0x00, 0x21, 0x85, 0x5E, 0xD7,
];

/// Response to HLTB and ATTRIB.
pub const RESP_OK: [u8; 3] = [0x00, 0x78, 0xF0];
