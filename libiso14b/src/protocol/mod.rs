// libiso14b-rs/libiso14b/src/protocol/mod.rs

pub mod commands;
pub mod crc;
pub mod responses;

pub use commands::*;
pub use responses::parse_atqb;
