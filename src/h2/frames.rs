//! HTTP/2 frame types and utilities
//!
//! This module defines the frame header fields specified in RFC 7540 Section 4.1.
//! Only HEADERS and SETTINGS are ever emitted by the generator, but the type
//! byte is carried as-is so any kind can be framed.

use super::CONNECTION_STREAM_ID;
use bytes::Bytes;
use std::fmt;

/// Frame types the generator emits (RFC 7540 Section 6)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FrameType {
    /// HEADERS (0x1), opens a stream and carries a header block
    Headers = 0x1,
    /// SETTINGS (0x4), connection parameters
    Settings = 0x4,
}

impl FrameType {
    /// Type byte
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Wire name
    pub fn name(&self) -> &'static str {
        match self {
            FrameType::Headers => "HEADERS",
            FrameType::Settings => "SETTINGS",
        }
    }
}

impl fmt::Display for FrameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:x})", self.name(), self.as_u8())
    }
}

/// Frame flags byte
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameFlags(u8);

impl FrameFlags {
    /// END_STREAM (0x1)
    pub const END_STREAM: u8 = 0x1;

    /// END_HEADERS (0x4)
    pub const END_HEADERS: u8 = 0x4;

    /// No flags
    pub fn empty() -> Self {
        FrameFlags(0)
    }

    /// Raw flags byte, unchecked
    pub fn from_u8(flags: u8) -> Self {
        FrameFlags(flags)
    }

    /// END_HEADERS | END_STREAM: a complete, bodiless request
    pub fn request_headers() -> Self {
        FrameFlags(Self::END_HEADERS | Self::END_STREAM)
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }

    pub fn contains(&self, flag: u8) -> bool {
        self.0 & flag == flag
    }
}

/// Frame type byte as written on the wire
///
/// Anything other than HEADERS or SETTINGS is carried as its raw byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// HEADERS or SETTINGS
    Known(FrameType),
    /// Any other type byte
    Unknown(u8),
}

impl FrameKind {
    /// Raw type byte
    pub fn as_u8(self) -> u8 {
        match self {
            FrameKind::Known(t) => t.as_u8(),
            FrameKind::Unknown(b) => b,
        }
    }
}

impl From<FrameType> for FrameKind {
    fn from(frame_type: FrameType) -> Self {
        FrameKind::Known(frame_type)
    }
}

impl From<u8> for FrameKind {
    fn from(byte: u8) -> Self {
        match byte {
            0x1 => FrameKind::Known(FrameType::Headers),
            0x4 => FrameKind::Known(FrameType::Settings),
            _ => FrameKind::Unknown(byte),
        }
    }
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameKind::Known(t) => write!(f, "{}", t),
            FrameKind::Unknown(b) => write!(f, "UNKNOWN (0x{:x})", b),
        }
    }
}

/// Generic HTTP/2 frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Frame type
    pub kind: FrameKind,
    /// Frame flags
    pub flags: FrameFlags,
    /// Stream ID
    pub stream_id: u32,
    /// Frame payload
    pub payload: Bytes,
}

impl Frame {
    /// Create a new frame
    pub fn new(kind: impl Into<FrameKind>, flags: FrameFlags, stream_id: u32, payload: Bytes) -> Self {
        Frame {
            kind: kind.into(),
            flags,
            stream_id,
            payload,
        }
    }

    /// Empty SETTINGS frame on the connection stream
    pub fn empty_settings() -> Self {
        Frame::new(FrameType::Settings, FrameFlags::empty(), CONNECTION_STREAM_ID, Bytes::new())
    }

    /// Get payload size
    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }
}
