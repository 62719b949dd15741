// fixtures.rs — canned frames and scripted sample streams shared by the
// integration tests

#![allow(dead_code)]

use libiso14b::constants::{DEFAULT_ATQB, RESP_OK, WUPB};
use libiso14b::frontend::MockFrontend;
use libiso14b::protocol::crc;
use libiso14b::test_support;

/// REQB, AFI=0, normal request, N=1, CRC included.
pub const REQB: [u8; 5] = [0x05, 0x00, 0x00, 0x71, 0xFF];

pub fn hltb() -> Vec<u8> {
    let mut cmd = vec![0x50, 0xFF, 0xFF, 0xFF, 0xFF];
    crc::append(&mut cmd);
    cmd
}

pub fn with_crc(body: &[u8]) -> Vec<u8> {
    let mut v = body.to_vec();
    crc::append(&mut v);
    v
}

/// Front-end scripted with tag answers for a full ATTRIB selection.
pub fn frontend_with_standard_tag() -> MockFrontend {
    let mut frontend = MockFrontend::new();
    frontend.push_rx_words(test_support::tag_frame_as_iq_words(&DEFAULT_ATQB));
    frontend.push_rx_words(test_support::tag_frame_as_iq_words(&RESP_OK));
    frontend
}

/// Front-end scripted with the INITIATE/SELECT/GET UID answers of an SRx
/// tag with the given chip id and UID.
pub fn frontend_with_srx_tag(chip_id: u8, uid: &[u8; 8]) -> MockFrontend {
    let mut frontend = MockFrontend::new();
    frontend.push_rx_words(test_support::tag_frame_as_iq_words(&with_crc(&[chip_id])));
    frontend.push_rx_words(test_support::tag_frame_as_iq_words(&with_crc(&[chip_id])));
    frontend.push_rx_words(test_support::tag_frame_as_iq_words(&with_crc(uid)));
    frontend
}

/// The sliced WUPB stream an emulated tag receives.
pub fn wupb_sliced() -> Vec<u8> {
    test_support::reader_frame_as_sliced_bytes(&WUPB)
}

/// The sliced REQB stream an emulated tag receives.
pub fn reqb_sliced() -> Vec<u8> {
    test_support::reader_frame_as_sliced_bytes(&REQB)
}

/// The sliced HLTB stream an emulated tag receives.
pub fn hltb_sliced() -> Vec<u8> {
    test_support::reader_frame_as_sliced_bytes(&hltb())
}
