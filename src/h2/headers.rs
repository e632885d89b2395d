//! Uncompressed header blocks
//!
//! Header fields are written as HPACK "literal header field without
//! indexing, new name" representations (RFC 7541 Section 6.2.2) with raw,
//! non-Huffman strings. No table state is involved, so every block decodes
//! on its own.

use super::error::{Error, Result};
use super::MAX_HEADER_STRING_LEN;
use bytes::{BufMut, Bytes, BytesMut};

/// Literal header field without indexing, new name
const LITERAL_WITHOUT_INDEXING: u8 = 0x00;

/// Bits available in the first byte of a string length (RFC 7541 Section 5.2)
const STRING_LENGTH_PREFIX_BITS: u8 = 7;

/// A single header name/value pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderField {
    name: String,
    value: String,
}

impl HeaderField {
    /// Create a header field; the name is lowercased
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        HeaderField {
            name: name.into().to_ascii_lowercase(),
            value: value.into(),
        }
    }

    /// Get header name (always lowercase)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get header value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Check if this is a pseudo-header (`:method`, `:path`, ...)
    pub fn is_pseudo(&self) -> bool {
        self.name.starts_with(':')
    }

    /// Encode this field as a literal representation
    pub fn encode_into(&self, buf: &mut BytesMut) -> Result<()> {
        encode_literal(buf, &self.name, &self.value)
    }
}

/// Encode a single header field
///
/// The name is lowercased; the value is written unmodified. Each length is
/// an HPACK integer with a 7-bit prefix: one byte below 127, two or three
/// bytes for 127..=255. Overhead is therefore 3 bytes only when both name
/// and value are shorter than 127 bytes.
pub fn encode_header_field(name: &str, value: &str) -> Result<Bytes> {
    let name = name.to_ascii_lowercase();
    let mut buf = BytesMut::with_capacity(3 + name.len() + value.len());
    encode_literal(&mut buf, &name, value)?;
    Ok(buf.freeze())
}

fn encode_literal(buf: &mut BytesMut, name: &str, value: &str) -> Result<()> {
    check_length(name, name)?;
    check_length(name, value)?;

    buf.put_u8(LITERAL_WITHOUT_INDEXING);
    encode_string(buf, name.as_bytes());
    encode_string(buf, value.as_bytes());
    Ok(())
}

fn check_length(name: &str, s: &str) -> Result<()> {
    if s.len() > MAX_HEADER_STRING_LEN {
        return Err(Error::HeaderTooLong {
            name: name.to_string(),
            len: s.len(),
        });
    }
    Ok(())
}

/// Write a raw string literal: H bit clear, 7-bit prefix length, octets
fn encode_string(buf: &mut BytesMut, s: &[u8]) {
    encode_integer(buf, s.len(), STRING_LENGTH_PREFIX_BITS, 0x00);
    buf.put_slice(s);
}

/// HPACK integer representation (RFC 7541 Section 5.1)
///
/// `flags` holds the bits above the prefix in the first byte.
fn encode_integer(buf: &mut BytesMut, value: usize, prefix_bits: u8, flags: u8) {
    let max_prefix = (1usize << prefix_bits) - 1;

    if value < max_prefix {
        buf.put_u8(flags | value as u8);
        return;
    }

    buf.put_u8(flags | max_prefix as u8);
    let mut rest = value - max_prefix;
    while rest >= 0x80 {
        buf.put_u8((rest & 0x7f) as u8 | 0x80);
        rest >>= 7;
    }
    buf.put_u8(rest as u8);
}

/// Ordered header block
///
/// Names are compared case-insensitively and stored lowercase. Inserting a
/// name that is already present replaces its value in place, so the first
/// position is kept and the last value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderBlock {
    fields: Vec<HeaderField>,
}

impl HeaderBlock {
    /// Create an empty header block
    pub fn new() -> Self {
        HeaderBlock { fields: Vec::new() }
    }

    /// Insert a field, replacing the value of an existing field with the same name
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let field = HeaderField::new(name, value);
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => existing.value = field.value,
            None => self.fields.push(field),
        }
    }

    /// Overlay `overrides` on top of this block in order (last writer wins)
    pub fn merge<I, K, V>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in overrides {
            self.set(name, value);
        }
    }

    /// Get the value for a header (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
            .map(|f| f.value.as_str())
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the block is empty
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over fields in block order
    pub fn iter(&self) -> impl Iterator<Item = &HeaderField> {
        self.fields.iter()
    }

    /// Encode every field, in block order, into one header block fragment
    pub fn encode(&self) -> Result<Bytes> {
        let mut buf = BytesMut::new();
        for field in &self.fields {
            field.encode_into(&mut buf)?;
        }
        Ok(buf.freeze())
    }
}

impl<'a> IntoIterator for &'a HeaderBlock {
    type Item = &'a HeaderField;
    type IntoIter = std::slice::Iter<'a, HeaderField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_header_field() {
        let encoded = encode_header_field(":method", "GET").unwrap();
        assert_eq!(&encoded[..], b"\x00\x07:method\x03GET");
    }

    #[test]
    fn test_name_lowercased_value_untouched() {
        let encoded = encode_header_field("X-Custom", "MiXeD").unwrap();
        assert_eq!(&encoded[..], b"\x00\x08x-custom\x05MiXeD");
    }

    #[test]
    fn test_empty_value() {
        let encoded = encode_header_field("x-empty", "").unwrap();
        assert_eq!(&encoded[..], b"\x00\x07x-empty\x00");
    }

    #[test]
    fn test_long_value_length_encoding() {
        // 126 still fits in the 7-bit prefix
        let value = "a".repeat(126);
        let encoded = encode_header_field("x", &value).unwrap();
        assert_eq!(encoded[3], 126);
        assert_eq!(encoded.len(), 4 + 126);

        // 127 spills into a continuation byte
        let value = "a".repeat(127);
        let encoded = encode_header_field("x", &value).unwrap();
        assert_eq!(&encoded[3..5], &[0x7f, 0x00]);
        assert_eq!(encoded.len(), 5 + 127);

        let value = "a".repeat(255);
        let encoded = encode_header_field("x", &value).unwrap();
        assert_eq!(&encoded[3..6], &[0x7f, 0x80, 0x01]);
        assert_eq!(encoded.len(), 6 + 255);
    }

    #[test]
    fn test_header_too_long() {
        let value = "v".repeat(256);
        match encode_header_field("x-big", &value) {
            Err(Error::HeaderTooLong { name, len }) => {
                assert_eq!(name, "x-big");
                assert_eq!(len, 256);
            }
            other => panic!("expected HeaderTooLong, got {:?}", other),
        }

        let name = "n".repeat(300);
        assert!(matches!(
            encode_header_field(&name, "v"),
            Err(Error::HeaderTooLong { len: 300, .. })
        ));
    }

    #[test]
    fn test_encode_integer_multi_byte() {
        // RFC 7541 Appendix C.1.2: 1337 with a 5-bit prefix
        let mut buf = BytesMut::new();
        encode_integer(&mut buf, 1337, 5, 0);
        assert_eq!(&buf[..], &[0x1f, 0x9a, 0x0a]);
    }

    #[test]
    fn test_block_override_keeps_position() {
        let mut block = HeaderBlock::new();
        block.set(":authority", "example.com");
        block.set(":path", "/");
        block.set(":method", "GET");
        block.merge([(":METHOD", "POST"), ("x-extra", "1")]);

        assert_eq!(block.len(), 4);
        let names: Vec<&str> = block.iter().map(|f| f.name()).collect();
        assert_eq!(names, vec![":authority", ":path", ":method", "x-extra"]);
        assert_eq!(block.get(":method"), Some("POST"));
    }

    #[test]
    fn test_block_last_writer_wins() {
        let mut block = HeaderBlock::new();
        block.merge([("Accept", "a"), ("accept", "b"), ("ACCEPT", "c")]);
        assert_eq!(block.len(), 1);
        assert_eq!(block.get("accept"), Some("c"));
    }

    #[test]
    fn test_block_encode_concatenates_in_order() {
        let mut block = HeaderBlock::new();
        block.set("a", "1");
        block.set("b", "2");
        let encoded = block.encode().unwrap();
        assert_eq!(&encoded[..], b"\x00\x01a\x011\x00\x01b\x012");
    }

    #[test]
    fn test_pseudo_header_detection() {
        assert!(HeaderField::new(":path", "/").is_pseudo());
        assert!(!HeaderField::new("user-agent", "x").is_pseudo());
    }
}
