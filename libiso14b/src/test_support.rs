//! Channel-simulation helpers shared by unit and integration tests.
//!
//! These model a noise-free air interface: reader frames become the sliced
//! 1-bit stream a listening tag sees (four samples per ETU), tag frames
//! become the I/Q correlator pairs a reader sees (two pairs per ETU), and
//! both can be packed into the word format the sniffer consumes.
#![allow(dead_code)]

use crate::phy::{code_as_reader, code_as_tag, Demod, ToSend, Uart};

/// Reference-phase amplitudes used for synthesized BPSK samples. The LSBs
/// are zero so the sniffer's reader decoder sees silence on the same words.
pub const IQ_HI: (i8, i8) = (40, 20);
/// Inverted phase, a logic 0 on the subcarrier.
pub const IQ_LO: (i8, i8) = (-40, -20);

fn frame_bits(frame: &[u8]) -> impl Iterator<Item = bool> + '_ {
    frame
        .iter()
        .flat_map(|&b| (0..8).map(move |i| b & (0x80 >> i) != 0))
}

/// Encode `cmd` as a reader frame and expand it to the 4x oversampled sliced
/// stream, packed MSB-first into bytes for `Frontend::rx_byte`.
pub fn reader_frame_as_sliced_bytes(cmd: &[u8]) -> Vec<u8> {
    let mut ts = ToSend::new();
    code_as_reader(&mut ts, cmd);

    let mut out = Vec::with_capacity(ts.len() * 4);
    let mut acc = 0u8;
    let mut nbits = 0u8;
    for bit in frame_bits(ts.frame()) {
        for _ in 0..4 {
            acc = (acc << 1) | u8::from(bit);
            nbits += 1;
            if nbits == 8 {
                out.push(acc);
                acc = 0;
                nbits = 0;
            }
        }
    }
    out
}

/// Encode `cmd` as a reader frame and pack the sliced stream into sniffer
/// words: two consecutive samples per word, in the I and Q LSBs.
pub fn reader_frame_as_sniff_words(cmd: &[u8]) -> Vec<u16> {
    let mut ts = ToSend::new();
    code_as_reader(&mut ts, cmd);

    let bits: Vec<bool> = frame_bits(ts.frame())
        .flat_map(|b| std::iter::repeat(b).take(4))
        .collect();
    bits.chunks(2)
        .map(|pair| {
            let i = u16::from(pair[0]);
            let q = u16::from(*pair.get(1).unwrap_or(&pair[0]));
            (i << 8) | q
        })
        .collect()
}

/// Encode `cmd` as a tag frame and synthesize the I/Q pairs a reader's
/// correlator would deliver, one word per pair, two pairs per ETU.
pub fn tag_frame_as_iq_words(cmd: &[u8]) -> Vec<u16> {
    let mut ts = ToSend::new();
    code_as_tag(&mut ts, cmd);
    stuffed_bits_as_iq_words(ts.frame())
}

/// Synthesize I/Q pairs from an already-encoded tag frame (four stuffed bits
/// per ETU, as produced by `code_as_tag`).
pub fn stuffed_bits_as_iq_words(frame: &[u8]) -> Vec<u16> {
    let bits: Vec<bool> = frame_bits(frame).collect();
    bits.chunks(2)
        .map(|pair| {
            let (i, q) = if pair[0] { IQ_HI } else { IQ_LO };
            (u16::from(i as u8) << 8) | u16::from(q as u8)
        })
        .collect()
}

/// Idle air for inter-frame gaps: unmodulated carrier, so the sliced reader
/// line reads 1 while the subcarrier channel stays silent.
pub fn idle_words(n: usize) -> Vec<u16> {
    vec![0x0101u16; n]
}

/// Reconstruct the command a reader transmitted from its recorded TX words
/// (two identical words per ETU, 0x0000 for a one, 0xFFFF for a zero).
pub fn reader_tx_words_to_frame(words: &[u16]) -> Option<Vec<u8>> {
    let mut uart = Uart::new(crate::constants::MAX_FRAME_SIZE);
    for pair in words.chunks(2) {
        let bit = pair[0] == 0x0000;
        for _ in 0..4 {
            if uart.feed(bit) {
                return Some(uart.take_data());
            }
        }
    }
    None
}

/// Reconstruct the frame a tag transmitted from its recorded modulator
/// bytes, by running them back through the demodulator.
pub fn tag_tx_bytes_to_frame(bytes: &[u8]) -> Option<Vec<u8>> {
    let mut demod = Demod::new(crate::constants::MAX_FRAME_SIZE);
    for word in stuffed_bits_as_iq_words(bytes) {
        let ci = (word >> 8) as i8;
        let cq = word as i8;
        if demod.feed(ci, cq) {
            return Some(demod.take_data());
        }
    }
    None
}
