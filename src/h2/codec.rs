//! HTTP/2 frame encoding
//!
//! Low-level frame serialisation: a 9-byte header (24-bit length, type,
//! flags, 31-bit stream ID, all big-endian) followed by the payload verbatim.
//! Out-of-range lengths and stream IDs are rejected, never masked or truncated.

use super::error::{Error, Result};
use super::frames::*;
use super::{MAX_FRAME_PAYLOAD, MAX_STREAM_ID};
use bytes::{BufMut, Bytes, BytesMut};

/// HTTP/2 frame header size (9 bytes)
pub const FRAME_HEADER_SIZE: usize = 9;

/// Frame encoder
pub struct FrameCodec;

impl FrameCodec {
    /// Encode a frame header
    pub fn encode_header(
        kind: impl Into<FrameKind>,
        flags: FrameFlags,
        stream_id: u32,
        length: usize,
    ) -> Result<[u8; FRAME_HEADER_SIZE]> {
        if length > MAX_FRAME_PAYLOAD {
            return Err(Error::InvalidFrame(format!(
                "payload length {} exceeds 2^24-1",
                length
            )));
        }
        if stream_id > MAX_STREAM_ID {
            return Err(Error::InvalidFrame(format!(
                "stream ID 0x{:x} exceeds 2^31-1",
                stream_id
            )));
        }

        let mut header = [0u8; FRAME_HEADER_SIZE];

        // Length (24 bits, big-endian)
        let len = (length as u32).to_be_bytes();
        header[0..3].copy_from_slice(&len[1..4]);

        header[3] = kind.into().as_u8();
        header[4] = flags.as_u8();

        // Stream ID (31 bits, big-endian, reserved bit is 0)
        header[5..9].copy_from_slice(&stream_id.to_be_bytes());

        Ok(header)
    }

    /// Encode a complete frame: header followed by the payload
    pub fn encode_frame(
        kind: impl Into<FrameKind>,
        flags: FrameFlags,
        stream_id: u32,
        payload: &[u8],
    ) -> Result<Bytes> {
        let kind = kind.into();
        let header = Self::encode_header(kind, flags, stream_id, payload.len())?;

        let mut buf = BytesMut::with_capacity(FRAME_HEADER_SIZE + payload.len());
        buf.put_slice(&header);
        buf.put_slice(payload);

        tracing::trace!(
            frame = %kind,
            flags = flags.as_u8(),
            stream_id,
            length = payload.len(),
            "encoded frame"
        );

        Ok(buf.freeze())
    }

    /// Encode a [`Frame`]
    pub fn encode(frame: &Frame) -> Result<Bytes> {
        Self::encode_frame(frame.kind, frame.flags, frame.stream_id, &frame.payload)
    }

    /// Encode an empty SETTINGS frame (stream 0, no flags, no parameters)
    pub fn encode_settings_frame() -> Result<Bytes> {
        Self::encode(&Frame::empty_settings())
    }

    /// Encode a HEADERS frame that carries a whole bodiless request
    ///
    /// Sets END_HEADERS and END_STREAM; the header block must fit in one frame.
    pub fn encode_headers_frame(stream_id: u32, header_block: &[u8]) -> Result<Bytes> {
        Self::encode_frame(
            FrameType::Headers,
            FrameFlags::request_headers(),
            stream_id,
            header_block,
        )
    }
}
