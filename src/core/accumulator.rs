//! # Frame Accumulator
//!
//! Per-connection resolver for TCP "sticky packets": one socket read may
//! carry zero, one, or many logical frames, or a partial frame. The
//! accumulator buffers bytes as they arrive and yields complete frames in
//! arrival order, no matter how the reads were chunked.
//!
//! Every connection owns exactly one accumulator. Sharing one across
//! connections would interleave unrelated byte streams and corrupt framing
//! state.

use bytes::BytesMut;

use crate::core::frame::{Frame, Tag, DEFAULT_GAP, MAX_FRAME_LEN, MAX_LEN_DIGITS};
use crate::error::{Result, WireError};

const TAG_LEN: usize = 2;

/// Accumulates received bytes and extracts complete LV frames.
#[derive(Debug)]
pub struct FrameAccumulator {
    buf: BytesMut,
    gap: Vec<u8>,
}

impl Default for FrameAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameAccumulator {
    pub fn new() -> Self {
        Self::with_gap(DEFAULT_GAP)
    }

    /// Accumulator with a non-default field separator. There is no wire
    /// negotiation: writer and reader must agree out of band.
    pub fn with_gap(gap: &[u8]) -> Self {
        Self {
            buf: BytesMut::with_capacity(8 * 1024),
            gap: gap.to_vec(),
        }
    }

    /// Append newly received bytes.
    pub fn append(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    /// Number of buffered, not-yet-resolved bytes.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The buffered bytes, unconsumed.
    pub fn buffered(&self) -> &[u8] {
        &self.buf
    }

    /// Discard all buffered bytes. This is the caller's recovery path after
    /// a hard parse fault, which otherwise recurs on every call.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Try to parse one frame starting at offset 0.
    ///
    /// - `Ok(Some(frame))`: the frame's span (header + payload + trailing
    ///   gap) has been removed from the front of the buffer.
    /// - `Ok(None)`: not enough bytes yet; the buffer is untouched. Call
    ///   again once more bytes arrive.
    /// - `Err(_)`: hard validation fault (bad length, unknown tag, gap
    ///   mismatch). The buffer is untouched, so the fault recurs until the
    ///   caller discards bytes.
    pub fn next_frame(&mut self) -> Result<Option<Frame>> {
        let g = self.gap.len();
        let buf = &self.buf[..];

        // Length field, terminated by the first gap.
        let search_end = std::cmp::min(buf.len(), MAX_LEN_DIGITS + g);
        let len_end = match find_subslice(&buf[..search_end], &self.gap) {
            Some(idx) => idx,
            None if buf.len() >= MAX_LEN_DIGITS + g => {
                return Err(WireError::InvalidLength(format!(
                    "no terminator within {MAX_LEN_DIGITS} digits"
                )));
            }
            None => return Ok(None),
        };

        let len_field = &buf[..len_end];
        if len_field.is_empty() || !len_field.iter().all(u8::is_ascii_digit) {
            return Err(WireError::InvalidLength(
                String::from_utf8_lossy(len_field).into_owned(),
            ));
        }
        let length: usize = String::from_utf8_lossy(len_field)
            .parse()
            .map_err(|_| WireError::InvalidLength(String::from_utf8_lossy(len_field).into_owned()))?;
        if length > MAX_FRAME_LEN {
            return Err(WireError::OversizedFrame(length));
        }

        // Tag field plus its terminating gap.
        let tag_start = len_end + g;
        if buf.len() < tag_start + TAG_LEN + g {
            return Ok(None);
        }
        let tag = Tag::from_wire(&buf[tag_start..tag_start + TAG_LEN]).ok_or_else(|| {
            WireError::UnknownTag(
                String::from_utf8_lossy(&buf[tag_start..tag_start + TAG_LEN]).into_owned(),
            )
        })?;
        if buf[tag_start + TAG_LEN..tag_start + TAG_LEN + g] != self.gap[..] {
            return Err(WireError::GapMismatch);
        }

        // Payload plus trailing gap.
        let payload_start = tag_start + TAG_LEN + g;
        let total = payload_start + length + g;
        if buf.len() < total {
            return Ok(None);
        }
        if buf[payload_start + length..total] != self.gap[..] {
            return Err(WireError::GapMismatch);
        }

        // Complete frame: consume its span from the front.
        let span = self.buf.split_to(total).freeze();
        let payload = span.slice(payload_start..payload_start + length);
        Ok(Some(Frame { tag, payload }))
    }
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
