// libiso14b-rs/libiso14b/src/reader/transceive.rs

//! Transceiver primitives: slot-aligned transmit and the receive loop that
//! drains the sample ring into the demodulator.

use crate::constants::{DELAY_ARM_TO_TAG, DELAY_TAG_TO_ARM};
use crate::frontend::{Frontend, Mode};
use crate::phy::{code_as_reader, Demod, DemodState};
use crate::trace::Direction;
use crate::{Error, Result};

use super::Reader;

impl<F: Frontend> Reader<F> {
    /// Transmit the finalized send buffer. The slot is aligned down to a
    /// multiple of 16 ticks; a slot already in the past slips forward by one
    /// 16-tick quantum. Returns the actual start time plus the ARM-to-tag
    /// delay, which is what the EOF estimate is based on.
    fn transmit_as_reader(&mut self, start_time: u32) -> u32 {
        self.frontend.set_mode(Mode::ReaderTx);

        let mut start = start_time.max(DELAY_ARM_TO_TAG);
        start = (start - DELAY_ARM_TO_TAG) & !0xF;
        if self.frontend.tick() > start {
            // Missed the intended slot; take the next possible one.
            start = self.frontend.tick().wrapping_add(16) & !0xF;
        }
        while self.frontend.tick() < start {}

        for &byte in self.tosend.frame() {
            for i in 0..8 {
                let word = if byte & (0x80 >> i) != 0 { 0x0000 } else { 0xFFFF };
                self.frontend.tx_word(word);
                self.frontend.tx_word(word);
            }
        }

        start.wrapping_add(DELAY_ARM_TO_TAG)
    }

    /// Encode `cmd`, transmit it at `start_time`, trace it, and return the
    /// estimated end-of-frame time.
    pub(crate) fn code_and_transmit(&mut self, cmd: &[u8], start_time: u32) -> u32 {
        let len = code_as_reader(&mut self.tosend, cmd);
        let start = self.transmit_as_reader(start_time);
        let eof = start.wrapping_add(32 * (8 * len as u32));
        self.trace.log(cmd, start, eof, Direction::Reader);
        eof
    }

    /// Receive one tag answer of at most `max_len` bytes.
    ///
    /// `timeout` is the sample budget granted for the subcarrier to appear;
    /// once samples arrive the frame is followed to its EOF regardless.
    /// Returns the frame bytes and the end-of-frame timestamp.
    pub fn get_answer_from_tag(&mut self, max_len: usize, timeout: u32) -> Result<(Vec<u8>, u32)> {
        let mut demod = Demod::new(max_len);

        self.frontend.tx_flush();
        self.frontend.set_mode(Mode::ReaderRxIq);

        let mut samples: u32 = 0;
        let mut dma_start_time: u32 = 0;
        let eof_time;

        loop {
            let Some(word) = self.frontend.rx_word() else {
                if self.frontend.cancel_requested() {
                    return Err(Error::Cancelled);
                }
                continue;
            };

            samples += 1;
            if samples == 1 {
                dma_start_time = self.frontend.tick() & !0xF;
            }

            let ci = (word >> 8) as i8;
            let cq = word as i8;

            if demod.feed(ci, cq) {
                eof_time = dma_start_time
                    .wrapping_add(samples.wrapping_mul(16))
                    .wrapping_sub(DELAY_TAG_TO_ARM);
                if demod.overflow() {
                    return Err(Error::BufferOverflow);
                }
                break;
            }

            if samples > timeout && demod.state() < DemodState::PhaseRefTraining {
                return Err(Error::Timeout);
            }
        }

        let data = demod.take_data();
        if !data.is_empty() {
            let sof_time = eof_time
                .wrapping_sub(data.len() as u32 * 8 * 8 * 16)
                .wrapping_sub(32 * 16);
            self.trace.log(&data, sof_time, eof_time, Direction::Tag);
        }
        Ok((data, eof_time))
    }
}
