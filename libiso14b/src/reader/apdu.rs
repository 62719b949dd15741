// libiso14b-rs/libiso14b/src/reader/apdu.rs

//! ISO 14443-4 I-block exchange.

use crate::frontend::Frontend;
use crate::protocol::{commands, crc};
use crate::{Error, Result};

use super::Reader;

impl<F: Frontend> Reader<F> {
    /// Send `message` as an I-block and return the tag's reply, CRC trailer
    /// included.
    ///
    /// The block number toggles on every transmission, before the answer is
    /// seen; a retry after an error therefore runs with the flipped number,
    /// as real PCDs in the field do.
    pub fn apdu(&mut self, message: &[u8]) -> Result<Vec<u8>> {
        self.send_i_block(message);

        let (resp, _eof) = self.get_answer_from_tag(self.max_frame_size as usize, self.timeout)?;

        if resp.len() < 3 {
            return Err(Error::InvalidLength {
                expected: 3,
                actual: resp.len(),
            });
        }
        crc::verify(&resp)?;
        Ok(resp)
    }

    /// Transmit an I-block without waiting for an answer.
    pub fn apdu_no_response(&mut self, message: &[u8]) {
        let _ = self.send_i_block(message);
    }

    fn send_i_block(&mut self, message: &[u8]) -> u32 {
        let frame = commands::encode_i_block(self.pcb_block_num, message);
        self.pcb_block_num ^= 1;
        self.code_and_transmit(&frame, 0)
    }
}
