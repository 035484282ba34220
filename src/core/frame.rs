//! # LV Frame Codec
//!
//! Stateless pack/unpack for the length-value wire format.
//!
//! ## Wire Format
//! ```text
//! [length (decimal ASCII)] [gap] [tag (2 chars)] [gap] [payload (length bytes)] [gap]
//! ```
//!
//! The gap is `"\r\n"`. The length field is the payload byte length written
//! without leading zeros. Two payload kinds exist, identified by tag:
//! `"PB"` for the binary schema codec and `"JS"` for the structured codec.
//!
//! ## Security
//! - Maximum frame payload: 16 MB. A length field above the cap (or longer
//!   than [`MAX_LEN_DIGITS`] digits) is rejected before any allocation.

use bytes::Bytes;

use crate::core::accumulator::FrameAccumulator;

/// Fixed field separator. Per-accumulator override exists but is never
/// negotiated on the wire.
pub const DEFAULT_GAP: &[u8] = b"\r\n";

/// Max allowed payload length (16 MB); bounds memory against a corrupt or
/// malicious length field.
pub const MAX_FRAME_LEN: usize = 16 * 1024 * 1024;

/// Max digits a length field may span. 16 MB needs 8; anything past 10
/// cannot be a sane length and is rejected without waiting for a gap.
pub const MAX_LEN_DIGITS: usize = 10;

/// Payload serialization kind carried in a frame's tag field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Binary-schema payload (wire marker `"PB"`).
    Binary,
    /// Generic structured payload (wire marker `"JS"`).
    Structured,
}

impl Tag {
    /// The 2-character wire marker.
    pub fn wire(self) -> &'static [u8; 2] {
        match self {
            Tag::Binary => b"PB",
            Tag::Structured => b"JS",
        }
    }

    /// Parse a wire marker.
    pub fn from_wire(bytes: &[u8]) -> Option<Self> {
        match bytes {
            b"PB" => Some(Tag::Binary),
            b"JS" => Some(Tag::Structured),
            _ => None,
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Tag::Binary => "Binary",
            Tag::Structured => "Structured",
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One complete length-value message unit.
///
/// Ephemeral: constructed during unpacking and consumed immediately by a
/// handler or discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub tag: Tag,
    pub payload: Bytes,
}

impl Frame {
    pub fn new(tag: Tag, payload: impl Into<Bytes>) -> Self {
        Self {
            tag,
            payload: payload.into(),
        }
    }
}

/// Pack a payload into its wire representation.
///
/// Deterministic, pure formatting: `pack` output for the same inputs is
/// byte-identical every time.
pub fn pack(tag: Tag, payload: &[u8]) -> Vec<u8> {
    let len_field = payload.len().to_string();
    let mut out =
        Vec::with_capacity(len_field.len() + 2 + payload.len() + 3 * DEFAULT_GAP.len());
    out.extend_from_slice(len_field.as_bytes());
    out.extend_from_slice(DEFAULT_GAP);
    out.extend_from_slice(tag.wire());
    out.extend_from_slice(DEFAULT_GAP);
    out.extend_from_slice(payload);
    out.extend_from_slice(DEFAULT_GAP);
    out
}

/// Bulk, stateless unpack: extract every complete frame starting at offset
/// 0, walking forward. Trailing bytes that do not form a complete valid
/// frame are discarded, not retained; use [`FrameAccumulator`] when bytes
/// arrive incrementally.
pub fn unpack_all(data: &[u8]) -> Vec<Frame> {
    let mut acc = FrameAccumulator::new();
    acc.append(data);

    let mut frames = Vec::new();
    while let Ok(Some(frame)) = acc.next_frame() {
        frames.push(frame);
    }
    frames
}
