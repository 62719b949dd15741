// libiso14b-rs/libiso14b/src/reader/select.rs

//! ISO 14443-3 selection. No anticollision: a single tag in the field is
//! assumed.

use log::debug;

use crate::constants::{DELAY_VICC_TO_VCD, WUPB};
use crate::frontend::Frontend;
use crate::protocol::{commands, crc, parse_atqb};
use crate::types::CardSelect;
use crate::{Error, Result};

use super::Reader;

impl<F: Frontend> Reader<F> {
    /// Wake and bind the tag in the field: WUPB, then ATTRIB built from the
    /// ATQB answer. Applies the negotiated maximum frame size and frame
    /// waiting time, and resets the ISO 14443-4 block number.
    pub fn select_card(&mut self) -> Result<CardSelect> {
        // WUPB wakes up all tags; REQB would leave halted ones alone.
        let _ = self.code_and_transmit(&WUPB, 0);
        let (r_atqb, eof) = self.get_answer_from_tag(14, self.timeout)?;

        let (pupi, atqb) = parse_atqb(&r_atqb)?;
        debug!("atqb from {}", pupi.to_hex());

        let mut card = CardSelect {
            uid: pupi.as_bytes().to_vec(),
            atqb,
            ..CardSelect::default()
        };

        let attrib = commands::encode_attrib(&pupi, &atqb);
        let start = eof.wrapping_add(DELAY_VICC_TO_VCD);
        let _ = self.code_and_transmit(&attrib, start);
        let (r_attrib, _eof) = self.get_answer_from_tag(3, self.timeout)?;

        if r_attrib.len() < 3 {
            return Err(Error::InvalidLength {
                expected: 3,
                actual: r_attrib.len(),
            });
        }
        crc::verify(&r_attrib)?;
        card.cid = r_attrib[0];

        self.set_max_frame_size(card.atqb.max_frame_size());
        let fwi = card.atqb.fwi();
        if fwi < 16 {
            self.set_timeout(302u32 << fwi);
        }

        self.pcb_block_num = 0;
        Ok(card)
    }
}
