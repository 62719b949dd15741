// libiso14b-rs/libiso14b/src/reader/srx.rs

//! ST SRx (SRI512/SRIX4K family) selection and memory access. These are
//! simple memory tags: INITIATE assigns a chip id, SELECT binds it, GET UID
//! and READ BLOCK do the rest.

use log::{debug, warn};

use crate::constants::{DELAY_VICC_TO_VCD, INITIATE};
use crate::frontend::Frontend;
use crate::protocol::{commands, crc};
use crate::types::CardSelect;
use crate::utils::bytes_to_hex;
use crate::{Error, Result};

use super::Reader;

/// Result of an SRx memory dump: 4 data bytes per block, the system block
/// (address 0xFF) last.
#[derive(Debug, Clone)]
pub struct SrxDump {
    /// The card the dump was read from.
    pub card: CardSelect,
    /// Concatenated block contents.
    pub data: Vec<u8>,
    /// False when a block read failed and the dump stopped early.
    pub complete: bool,
}

impl<F: Frontend> Reader<F> {
    /// Select an SRx tag: INITIATE, SELECT echoing the chip id, GET UID.
    pub fn select_srx_card(&mut self) -> Result<CardSelect> {
        let _ = self.code_and_transmit(&INITIATE, 0);
        let (r_init, eof) = self.get_answer_from_tag(3, self.timeout)?;
        if r_init.len() != 3 {
            return Err(Error::InvalidLength {
                expected: 3,
                actual: r_init.len(),
            });
        }
        crc::verify(&r_init)?;
        let chip_id = r_init[0];

        let select = commands::encode_srx_select(chip_id);
        let start = eof.wrapping_add(DELAY_VICC_TO_VCD);
        let _ = self.code_and_transmit(&select, start);
        let (r_select, eof) = self.get_answer_from_tag(3, self.timeout)?;
        if r_select.len() != 3 {
            return Err(Error::InvalidLength {
                expected: 3,
                actual: r_select.len(),
            });
        }
        crc::verify(&r_select)?;
        if r_select[0] != chip_id {
            return Err(Error::SelectionMismatch {
                sent: chip_id,
                echoed: r_select[0],
            });
        }

        let get_uid = commands::encode_srx_get_uid();
        let start = eof.wrapping_add(DELAY_VICC_TO_VCD);
        let _ = self.code_and_transmit(&get_uid, start);
        let (r_uid, _eof) = self.get_answer_from_tag(10, self.timeout)?;
        if r_uid.len() != 10 {
            return Err(Error::InvalidLength {
                expected: 10,
                actual: r_uid.len(),
            });
        }
        crc::verify(&r_uid)?;

        debug!("srx chip {:#04x}, uid {}", chip_id, bytes_to_hex(&r_uid[..8]));
        Ok(CardSelect {
            uid: r_uid[..8].to_vec(),
            chip_id,
            ..CardSelect::default()
        })
    }

    /// Read one 4-byte SRx block. Address 0xFF is the system block.
    pub fn read_st_block(&mut self, addr: u8) -> Result<[u8; 4]> {
        let cmd = commands::encode_srx_read_block(addr);
        let _ = self.code_and_transmit(&cmd, 0);
        let (r_block, _eof) = self.get_answer_from_tag(6, self.timeout)?;
        if r_block.len() != 6 {
            return Err(Error::InvalidLength {
                expected: 6,
                actual: r_block.len(),
            });
        }
        crc::verify(&r_block)?;

        let mut block = [0u8; 4];
        block.copy_from_slice(&r_block[..4]);
        debug!("block {:#04x}: {}", addr, bytes_to_hex(&block));
        Ok(block)
    }

    /// Select an SRx tag and dump blocks `0..=num_blocks` plus the system
    /// block. A failed block read ends the dump early with `complete` false.
    pub fn read_st_memory(&mut self, num_blocks: u16) -> Result<SrxDump> {
        let card = self.select_srx_card()?;

        let last = num_blocks.min(0xFE) as u8;
        let mut data = Vec::with_capacity((usize::from(last) + 2) * 4);
        let mut complete = true;

        for addr in 0..=last {
            match self.read_st_block(addr) {
                Ok(block) => data.extend_from_slice(&block),
                Err(e) => {
                    warn!("block {:#04x} read failed: {}", addr, e);
                    complete = false;
                    break;
                }
            }
        }

        match self.read_st_block(0xFF) {
            Ok(block) => data.extend_from_slice(&block),
            Err(e) => {
                warn!("system block read failed: {}", e);
                complete = false;
            }
        }

        Ok(SrxDump {
            card,
            data,
            complete,
        })
    }
}
