// libiso14b-rs/libiso14b/src/sniffer/mod.rs

//! Passive capture of a reader/tag conversation.
//!
//! Both decoders run against the same I/Q sample stream: the reader UART on
//! the I/Q LSBs (two sliced samples per word), the tag demodulator on the
//! halved I/Q values. Only one decoder is live at a time; once a side is
//! past its SOF edge the other is muted, which both saves CPU and keeps a
//! noisy idle channel from aliasing into phantom frames.

use log::info;

use crate::constants::MAX_FRAME_SIZE;
use crate::frontend::{Frontend, Mode};
use crate::phy::{Demod, DemodState, Uart, UartState};
use crate::trace::{Direction, TraceLog};

/// End-of-run statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SniffSummary {
    /// Reader frames captured.
    pub reader_frames: usize,
    /// Tag frames captured.
    pub tag_frames: usize,
    /// Samples consumed.
    pub samples: u32,
}

/// A sniffer session.
pub struct Sniffer<F: Frontend> {
    frontend: F,
    uart: Uart,
    demod: Demod,
    trace: TraceLog,
}

impl<F: Frontend> Sniffer<F> {
    /// New sniffer over a front-end.
    pub fn new(frontend: F) -> Self {
        Self {
            frontend,
            uart: Uart::new(MAX_FRAME_SIZE),
            demod: Demod::new(MAX_FRAME_SIZE),
            trace: TraceLog::new(),
        }
    }

    /// Captured traffic, reader and tag frames interleaved in air order.
    pub fn trace(&self) -> &TraceLog {
        &self.trace
    }

    /// Give the front-end back, ending the session.
    pub fn into_frontend(self) -> F {
        self.frontend
    }

    /// Capture until the host cancels.
    pub fn run(&mut self) -> SniffSummary {
        self.frontend.set_mode(Mode::SniffIq);
        self.uart.reset();
        self.demod.reset();

        let mut tag_is_active = false;
        let mut reader_is_active = false;
        let mut expect_tag_answer = false;
        let mut samples: u32 = 0;
        let mut dma_start_time: u32 = 0;
        let mut reader_frames = 0usize;
        let mut tag_frames = 0usize;

        loop {
            let Some(word) = self.frontend.rx_word() else {
                if self.frontend.cancel_requested() {
                    break;
                }
                continue;
            };

            samples += 1;
            if samples == 1 {
                dma_start_time = self.frontend.tick() & !0xF;
            }

            let ci = (word >> 8) as i8;
            let cq = word as i8;

            // Reader side: the I then Q LSBs are two consecutive sliced
            // samples of the ASK uplink.
            if !tag_is_active {
                for (offset, bit) in [(8u32, ci & 0x01 != 0), (16, cq & 0x01 != 0)] {
                    if self.uart.feed(bit) {
                        let eof_time = dma_start_time
                            .wrapping_add(samples.wrapping_mul(16))
                            .wrapping_add(offset);
                        let byte_cnt = self.uart.data().len() as u32;
                        if byte_cnt > 0 {
                            let sof_time = eof_time
                                .wrapping_sub(byte_cnt)
                                .wrapping_sub(32 * 16)
                                .wrapping_sub(16 * 16);
                            self.trace
                                .log(self.uart.data(), sof_time, eof_time, Direction::Reader);
                            reader_frames += 1;
                        }
                        self.uart.reset();
                        self.demod.reset();
                        reader_is_active = false;
                        expect_tag_answer = true;
                    }
                }
                reader_is_active = self.uart.state() > UartState::GotFallingEdgeOfSof;
            }

            // Tag side, only while a response is pending.
            if !reader_is_active && expect_tag_answer {
                if self.demod.feed(ci >> 1, cq >> 1) {
                    let eof_time = dma_start_time.wrapping_add(samples.wrapping_mul(16));
                    let sof_time = eof_time
                        .wrapping_sub(self.demod.data().len() as u32 * 8 * 8 * 16)
                        .wrapping_sub(32 * 16);
                    self.trace
                        .log(self.demod.data(), sof_time, eof_time, Direction::Tag);
                    tag_frames += 1;
                    self.uart.reset();
                    self.demod.reset();
                    expect_tag_answer = false;
                    tag_is_active = false;
                } else {
                    tag_is_active = self.demod.state() > DemodState::GotFallingEdgeOfSof;
                }
            }
        }

        self.frontend.field_off();

        let summary = SniffSummary {
            reader_frames,
            tag_frames,
            samples,
        };
        info!(
            "sniff stopped: {} reader frames, {} tag frames, {} samples, trace length {}",
            reader_frames,
            tag_frames,
            samples,
            self.trace.len()
        );
        summary
    }
}
