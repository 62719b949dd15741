#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use libiso14b::prelude::*;
use libiso14b::protocol::crc;
use libiso14b::test_support;

#[test]
fn full_chain_select_then_apdu() {
    let mut frontend = fixtures::frontend_with_standard_tag();
    let mut reply = vec![0x0A, 0x00, 0x6A, 0x82];
    crc::append(&mut reply);
    frontend.push_rx_words(test_support::tag_frame_as_iq_words(&reply));

    let mut reader = Reader::new(frontend);
    let replies = reader.run_raw(&RawRequest {
        flags: RawFlags::CONNECT
            | RawFlags::SELECT_STD
            | RawFlags::APDU
            | RawFlags::DISCONNECT,
        data: vec![0x00, 0xA4, 0x04, 0x00],
        timeout: 0,
    });

    assert_eq!(replies.len(), 2);
    match &replies[0] {
        RawReply::Select(Ok(card)) => assert_eq!(card.uid, vec![0x82, 0x0D, 0xE1, 0x74]),
        other => panic!("unexpected first reply: {:?}", other),
    }
    match &replies[1] {
        RawReply::Apdu(Ok(resp)) => assert_eq!(resp[0], 0x0A),
        other => panic!("unexpected second reply: {:?}", other),
    }
}

#[test]
fn set_timeout_applies_before_the_exchanges() {
    let mut reader = Reader::new(MockFrontend::new());
    reader.run_raw(&RawRequest {
        flags: RawFlags::SET_TIMEOUT,
        data: Vec::new(),
        timeout: 4242,
    });
    assert_eq!(reader.timeout(), 4242);
}

#[test]
fn failed_selection_short_circuits_the_remaining_steps() {
    let mut frontend = MockFrontend::new();
    frontend.set_idle_budget(1000);
    let mut reader = Reader::new(frontend);
    let replies = reader.run_raw(&RawRequest {
        flags: RawFlags::SET_TIMEOUT
            | RawFlags::SELECT_STD
            | RawFlags::SELECT_SR
            | RawFlags::APDU
            | RawFlags::RAW
            | RawFlags::DISCONNECT,
        data: vec![0x00],
        timeout: 128,
    });
    assert_eq!(replies.len(), 1);
    assert!(matches!(&replies[0], RawReply::Select(Err(Error::Timeout))));
    // DISCONNECT still powered the field down.
    assert_eq!(
        reader.into_frontend().modes.last(),
        Some(&Mode::FieldOff)
    );
}
