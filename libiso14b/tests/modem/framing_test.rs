use libiso14b::phy::{code_as_reader, code_as_tag, ToSend};

fn bits(frame: &[u8]) -> Vec<bool> {
    frame
        .iter()
        .flat_map(|&b| (0..8).map(move |i| b & (0x80 >> i) != 0))
        .collect()
}

#[test]
fn reader_framing_starts_and_ends_with_zeros() {
    let mut ts = ToSend::new();
    for payload in [&[0x00u8][..], &[0xFF, 0x00, 0xA5][..]] {
        code_as_reader(&mut ts, payload);
        let bits = bits(ts.frame());
        // First 10 bits zero, then the 2-bit SOF high phase.
        assert!(bits[..10].iter().all(|&b| !b));
        assert!(bits[10] && bits[11]);
        // The 10 bits before the trailing pad are the EOF zeros.
        let data_end = 12 + payload.len() * 10;
        assert!(bits[data_end..data_end + 10].iter().all(|&b| !b));
        // Whatever follows the EOF is idle ones only.
        assert!(bits[data_end + 10..].iter().all(|&b| b));
    }
}

#[test]
fn tag_framing_carries_tr1_sof_and_eof() {
    let mut ts = ToSend::new();
    for payload in [&[0x50u8][..], &[0x00, 0x78, 0xF0][..]] {
        let len = code_as_tag(&mut ts, payload);
        let bits = bits(ts.frame());
        // 20 ETU of ones (TR1) before the 10-ETU SOF low phase.
        assert!(bits[..80].iter().all(|&b| b));
        assert!(bits[80..120].iter().all(|&b| !b));
        assert!(bits[120..128].iter().all(|&b| b));
        // EOF zeros sit just before the preserved trailing ones.
        let total = len * 8;
        assert!(bits[total - 48..total - 8].iter().all(|&b| !b));
        assert!(bits[total - 8..].iter().all(|&b| b));
    }
}

#[test]
fn character_structure_is_start_data_stop() {
    let mut ts = ToSend::new();
    code_as_reader(&mut ts, &[0xC3]);
    let bits = bits(ts.frame());
    let ch = &bits[12..22];
    // Start bit 0, stop bit 1.
    assert!(!ch[0]);
    assert!(ch[9]);
    // 0xC3 LSB-first: 1 1 0 0 0 0 1 1.
    let expected = [true, true, false, false, false, false, true, true];
    assert_eq!(&ch[1..9], &expected);
}
