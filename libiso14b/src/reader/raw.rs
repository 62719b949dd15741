// libiso14b-rs/libiso14b/src/reader/raw.rs

//! Host raw-command surface: one call chains connect, timeout, selection,
//! APDU, raw exchange and disconnect in a fixed order.

use bitflags::bitflags;
use log::debug;

use crate::constants::ISO14443B_READER_TIMEOUT;
use crate::frontend::Frontend;
use crate::protocol::crc;
use crate::types::CardSelect;
use crate::Result;

use super::Reader;

bitflags! {
    /// Steps and modifiers of a raw call.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RawFlags: u16 {
        /// Power the field up and start a fresh trace first.
        const CONNECT = 1 << 0;
        /// Power the field down when the chain is done.
        const DISCONNECT = 1 << 1;
        /// Exchange `data` as an ISO 14443-4 I-block.
        const APDU = 1 << 2;
        /// Exchange `data` as-is (optionally with CRC appended).
        const RAW = 1 << 3;
        /// Arm the session trigger for the duration of the call.
        const REQUEST_TRIGGER = 1 << 4;
        /// Append a CRC-B trailer to the RAW step's data.
        const APPEND_CRC = 1 << 5;
        /// Run ATTRIB-based selection.
        const SELECT_STD = 1 << 6;
        /// Run SRx selection.
        const SELECT_SR = 1 << 7;
        /// Apply `timeout` before any exchange.
        const SET_TIMEOUT = 1 << 8;
    }
}

/// One host raw call.
#[derive(Debug, Clone)]
pub struct RawRequest {
    /// Steps to run.
    pub flags: RawFlags,
    /// Payload for the APDU/RAW steps.
    pub data: Vec<u8>,
    /// Frame waiting time for the SET_TIMEOUT step, in sub-carrier ticks.
    pub timeout: u32,
}

/// Status reply for each step that produced one, in execution order.
#[derive(Debug)]
pub enum RawReply {
    /// Outcome of the SELECT_STD step.
    Select(Result<CardSelect>),
    /// Outcome of the SELECT_SR step.
    SelectSrx(Result<CardSelect>),
    /// Outcome of the APDU step.
    Apdu(Result<Vec<u8>>),
    /// Outcome of the RAW step.
    Raw(Result<Vec<u8>>),
}

impl<F: Frontend> Reader<F> {
    /// Run a raw call. Execution order is fixed: CONNECT, SET_TIMEOUT,
    /// SELECT_STD, SELECT_SR, APDU, RAW, DISCONNECT. A failed selection
    /// stops the chain, but DISCONNECT still runs.
    pub fn run_raw(&mut self, req: &RawRequest) -> Vec<RawReply> {
        debug!("raw call: {:?}", req.flags);

        if req.flags.contains(RawFlags::REQUEST_TRIGGER) {
            self.trigger = true;
        }
        if req.flags.contains(RawFlags::CONNECT) {
            self.connect();
        }
        if req.flags.contains(RawFlags::SET_TIMEOUT) {
            self.set_timeout(req.timeout);
        }

        let mut replies = Vec::new();
        let mut aborted = false;

        if req.flags.contains(RawFlags::SELECT_STD) {
            let r = self.select_card();
            aborted = r.is_err();
            replies.push(RawReply::Select(r));
        }

        if !aborted && req.flags.contains(RawFlags::SELECT_SR) {
            let r = self.select_srx_card();
            aborted = r.is_err();
            replies.push(RawReply::SelectSrx(r));
        }

        if !aborted && req.flags.contains(RawFlags::APDU) {
            replies.push(RawReply::Apdu(self.apdu(&req.data)));
        }

        if !aborted && req.flags.contains(RawFlags::RAW) {
            let append = req.flags.contains(RawFlags::APPEND_CRC);
            replies.push(RawReply::Raw(self.raw_exchange(&req.data, append)));
        }

        if req.flags.contains(RawFlags::REQUEST_TRIGGER) {
            self.trigger = false;
        }
        if req.flags.contains(RawFlags::DISCONNECT) {
            self.disconnect();
        }

        replies
    }

    fn raw_exchange(&mut self, data: &[u8], append_crc: bool) -> Result<Vec<u8>> {
        let mut cmd = data.to_vec();
        if append_crc {
            crc::append(&mut cmd);
        }
        let _ = self.code_and_transmit(&cmd, 0);
        let (resp, _eof) =
            self.get_answer_from_tag(self.max_frame_size() as usize, 5 * ISO14443B_READER_TIMEOUT)?;
        Ok(resp)
    }
}
