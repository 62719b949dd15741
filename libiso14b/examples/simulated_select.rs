// Select a scripted Type B tag end-to-end and dump the captured trace.
//
// The mock front-end plays the role of the radio: it is seeded with the
// I/Q sample streams a real tag would produce for ATQB, the ATTRIB answer
// and one APDU reply.

use libiso14b::prelude::*;
use libiso14b::protocol::crc;
use libiso14b::test_support;

fn main() {
    let mut frontend = MockFrontend::new();
    frontend.push_rx_words(test_support::tag_frame_as_iq_words(
        &libiso14b::constants::DEFAULT_ATQB,
    ));
    frontend.push_rx_words(test_support::tag_frame_as_iq_words(
        &libiso14b::constants::RESP_OK,
    ));
    let mut apdu_reply = vec![0x0A, 0x00, 0x90, 0x00];
    crc::append(&mut apdu_reply);
    frontend.push_rx_words(test_support::tag_frame_as_iq_words(&apdu_reply));

    let mut reader = Reader::new(frontend);
    reader.connect();

    let card = reader.select_card().expect("selection failed");
    println!("selected card:");
    println!("  uid        {}", bytes_to_hex(&card.uid));
    println!("  cid        {:#04x}", card.cid);
    println!("  frame size {} bytes", reader.max_frame_size());
    println!("  fwt        {} ticks", reader.timeout());

    let resp = reader.apdu(&[0x00, 0xA4, 0x04, 0x00]).expect("apdu failed");
    println!("apdu answer  {}", bytes_to_hex_spaced(&resp));

    println!("\ntrace:");
    for rec in reader.trace().records() {
        let dir = match rec.direction {
            Direction::Reader => "rdr",
            Direction::Tag => "tag",
        };
        println!(
            "  [{:>10}..{:>10}] {} {} {}",
            rec.start_ts,
            rec.end_ts,
            dir,
            bytes_to_hex_spaced(&rec.data),
            if rec.crc_ok { "crc ok" } else { "crc --" },
        );
    }

    reader.disconnect();
}
