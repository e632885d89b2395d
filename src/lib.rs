//! h2gen - HTTP/2 request frame generator
//!
//! This crate encodes HTTP/2 client traffic byte for byte (connection
//! preface, SETTINGS and HEADERS frames with literal header fields) so it
//! can be replayed against a real endpoint with an external TLS client.

pub mod generate;
pub mod h2;
pub mod logging;
