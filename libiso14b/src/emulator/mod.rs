// libiso14b-rs/libiso14b/src/emulator/mod.rs

//! Tag (PICC) personality: wait for a reader field, decode commands with the
//! software UART and answer with pre-encoded Type B responses.

use log::{debug, info};

use crate::constants::{
    DEFAULT_ATQB, ISO14443B_ATTRIB, ISO14443B_HLTB, ISO14443B_REQB, MAX_FRAME_SIZE,
    MIN_FIELD_STRENGTH, RESP_OK,
};
use crate::frontend::{Frontend, Mode};
use crate::phy::{code_as_tag, ToSend, Uart};
use crate::protocol::crc;
use crate::trace::{Direction, TraceLog};
use crate::types::Pupi;
use crate::{Error, Result};

/// Emulated card state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    /// No reader field present.
    NoField,
    /// Field present, not selected.
    Idle,
    /// Halted; only WUPB wakes us.
    Halted,
    /// REQB/WUPB seen; ATQB goes out next.
    Selecting,
    /// HLTB acknowledged; OK goes out next.
    Halting,
    /// ATTRIB acknowledged; OK goes out next.
    Acknowledge,
    /// Selected and attributed, expecting higher-layer traffic.
    Work,
}

/// A Type B tag emulation session.
pub struct Emulator<F: Frontend> {
    frontend: F,
    state: CardState,
    uart: Uart,
    atqb: Vec<u8>,
    encoded_atqb: Vec<u8>,
    encoded_ok: Vec<u8>,
    trace: TraceLog,
    commands_processed: u32,
}

impl<F: Frontend> Emulator<F> {
    /// New emulator answering with the canned ATQB.
    pub fn new(frontend: F) -> Self {
        Self::build(frontend, DEFAULT_ATQB.to_vec())
    }

    /// New emulator answering with a custom PUPI. The ATQB is rebuilt and
    /// its CRC recomputed before pre-encoding.
    pub fn with_pupi(frontend: F, pupi: Pupi) -> Self {
        let mut atqb = DEFAULT_ATQB[..12].to_vec();
        atqb[1..5].copy_from_slice(pupi.as_bytes());
        crc::append(&mut atqb);
        Self::build(frontend, atqb)
    }

    fn build(frontend: F, atqb: Vec<u8>) -> Self {
        // Both responses are encoded once here so the answer path does no
        // per-frame encoding work.
        let mut ts = ToSend::new();
        code_as_tag(&mut ts, &atqb);
        let encoded_atqb = ts.frame().to_vec();
        code_as_tag(&mut ts, &RESP_OK);
        let encoded_ok = ts.frame().to_vec();

        Self {
            frontend,
            state: CardState::NoField,
            uart: Uart::new(MAX_FRAME_SIZE),
            atqb,
            encoded_atqb,
            encoded_ok,
            trace: TraceLog::new(),
            commands_processed: 0,
        }
    }

    /// Current card state.
    pub fn state(&self) -> CardState {
        self.state
    }

    /// Captured traffic of this session.
    pub fn trace(&self) -> &TraceLog {
        &self.trace
    }

    /// Borrow the front-end.
    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    /// Give the front-end back, ending the session.
    pub fn into_frontend(self) -> F {
        self.frontend
    }

    /// Main emulation loop: field detection, then classify-respond until the
    /// host cancels. Returns the number of reader commands processed.
    pub fn run(&mut self) -> u32 {
        self.frontend.set_mode(Mode::TagListen);

        loop {
            if self.frontend.cancel_requested() {
                break;
            }

            // Field detection, and detection of the field going away.
            if self.state == CardState::NoField {
                if self.frontend.field_strength() > MIN_FIELD_STRENGTH {
                    self.state = CardState::Idle;
                    debug!("reader field detected");
                } else {
                    continue;
                }
            } else if self.frontend.field_strength() <= MIN_FIELD_STRENGTH {
                self.state = CardState::NoField;
                debug!("reader field lost");
                continue;
            }

            let cmd = match self.get_command_from_reader() {
                Ok(cmd) => cmd,
                Err(_) => break,
            };

            self.classify(&cmd);
            self.respond(&cmd);
            self.commands_processed += 1;
        }

        info!(
            "emulator stopped, {} commands, trace length {}",
            self.commands_processed,
            self.trace.len()
        );
        self.frontend.field_off();
        self.commands_processed
    }

    // Selection-layer commands act from any state: REQB/WUPB restart the
    // selection, except that a halted card ignores REQB.
    fn classify(&mut self, cmd: &[u8]) {
        if cmd.len() == 5 && cmd[0] == ISO14443B_REQB {
            let wupb = cmd[2] & 0x08 != 0;
            if self.state != CardState::Halted || wupb {
                self.trace.log(cmd, 0, 0, Direction::Reader);
                self.state = CardState::Selecting;
            }
        }
    }

    fn respond(&mut self, cmd: &[u8]) {
        loop {
            match self.state {
                CardState::Selecting => {
                    Self::transmit_as_tag(&mut self.frontend, &self.encoded_atqb);
                    self.trace.log(&self.atqb, 0, 0, Direction::Tag);
                    self.state = CardState::Work;
                    return;
                }
                CardState::Acknowledge => {
                    Self::transmit_as_tag(&mut self.frontend, &self.encoded_ok);
                    self.trace.log(&RESP_OK, 0, 0, Direction::Tag);
                    self.state = CardState::Idle;
                    return;
                }
                CardState::Halting => {
                    Self::transmit_as_tag(&mut self.frontend, &self.encoded_ok);
                    self.trace.log(&RESP_OK, 0, 0, Direction::Tag);
                    self.state = CardState::Halted;
                    return;
                }
                CardState::Work => {
                    if cmd.len() == 7 && cmd[0] == ISO14443B_HLTB {
                        self.state = CardState::Halted;
                    } else if cmd.len() == 11 && cmd[0] == ISO14443B_ATTRIB {
                        self.state = CardState::Acknowledge;
                        continue;
                    } else {
                        debug!(
                            "unhandled command in work state, len {}, crc {}",
                            cmd.len(),
                            if crc::check(cmd) { "ok" } else { "fail" }
                        );
                        self.trace.log(cmd, 0, 0, Direction::Reader);
                        self.state = CardState::Idle;
                    }
                    return;
                }
                CardState::Idle | CardState::Halted => {
                    self.trace.log(cmd, 0, 0, Direction::Reader);
                    return;
                }
                CardState::NoField => return,
            }
        }
    }

    // Run the software UART over the sliced sample stream until a frame is
    // delimited or the host cancels.
    fn get_command_from_reader(&mut self) -> Result<Vec<u8>> {
        self.frontend.set_mode(Mode::TagListen);
        self.uart.reset();

        loop {
            let Some(byte) = self.frontend.rx_byte() else {
                if self.frontend.cancel_requested() {
                    return Err(Error::Cancelled);
                }
                continue;
            };
            for i in 0..8 {
                if self.uart.feed(byte & (0x80 >> i) != 0) {
                    return Ok(self.uart.take_data());
                }
            }
        }
    }

    fn transmit_as_tag(frontend: &mut F, frame: &[u8]) {
        frontend.set_mode(Mode::TagTxBpsk);
        for &b in frame {
            frontend.tx_byte(b);
        }
        frontend.tx_flush();
    }
}

/// Host entry point: emulate a Type B tag until cancelled. A zero `pupi`
/// selects the canned ATQB. Returns the number of commands processed.
pub fn simulate_tag<F: Frontend>(frontend: F, pupi: u32) -> u32 {
    let mut emulator = if pupi == 0 {
        Emulator::new(frontend)
    } else {
        Emulator::with_pupi(frontend, Pupi::from_u32(pupi))
    };
    emulator.run()
}
