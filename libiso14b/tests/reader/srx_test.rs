#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use libiso14b::prelude::*;
use libiso14b::test_support;

#[test]
fn srx_selection_yields_the_eight_byte_uid() {
    let uid = [0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77];
    let mut reader = Reader::new(fixtures::frontend_with_srx_tag(0xA5, &uid));
    let card = reader.select_srx_card().expect("srx selection");

    assert_eq!(card.chip_id, 0xA5);
    assert_eq!(card.uid.len(), 8);
    assert_eq!(card.uid, uid.to_vec());
}

#[test]
fn srx_selection_wire_order() {
    let uid = [1, 2, 3, 4, 5, 6, 7, 8];
    let mut reader = Reader::new(fixtures::frontend_with_srx_tag(0x42, &uid));
    reader.select_srx_card().expect("srx selection");

    let sent: Vec<Vec<u8>> = reader
        .trace()
        .records()
        .iter()
        .filter(|r| r.direction == Direction::Reader)
        .map(|r| r.data.clone())
        .collect();
    assert_eq!(sent.len(), 3);
    // INITIATE is the canned frame; SELECT echoes the chip id.
    assert_eq!(sent[0], vec![0x06, 0x00, 0x97, 0x5B]);
    assert_eq!(&sent[1][..2], &[0x0E, 0x42]);
    assert_eq!(sent[2][0], 0x0B);
}

#[test]
fn dump_reads_data_blocks_then_the_system_block() {
    let uid = [9, 9, 9, 9, 9, 9, 9, 9];
    let mut frontend = fixtures::frontend_with_srx_tag(0x10, &uid);
    for b in 0u8..4 {
        frontend.push_rx_words(test_support::tag_frame_as_iq_words(
            &fixtures::with_crc(&[b, 0, 0, b]),
        ));
    }
    frontend.push_rx_words(test_support::tag_frame_as_iq_words(&fixtures::with_crc(&[
        0xCA, 0xFE, 0xBA, 0xBE,
    ])));

    let mut reader = Reader::new(frontend);
    let dump = reader.read_st_memory(3).expect("dump");
    assert!(dump.complete);
    assert_eq!(dump.card.chip_id, 0x10);
    assert_eq!(dump.data.len(), 20);
    assert_eq!(&dump.data[..4], &[0, 0, 0, 0]);
    assert_eq!(&dump.data[16..], &[0xCA, 0xFE, 0xBA, 0xBE]);

    // The READ BLOCK frames address 0, 1, 2, 3, then the system block.
    let addrs: Vec<u8> = reader
        .trace()
        .records()
        .iter()
        .filter(|r| r.direction == Direction::Reader && r.data[0] == 0x08)
        .map(|r| r.data[1])
        .collect();
    assert_eq!(addrs, vec![0, 1, 2, 3, 0xFF]);
}
