#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//! Framing properties: pack/unpack round trips, sticky-packet resolution
//! under arbitrary chunk boundaries, partial-frame stability, and buffer
//! growth safety.

use lvwire::core::buffer::ByteBuffer;
use lvwire::{pack, unpack_all, Frame, FrameAccumulator, Tag};

fn drain(acc: &mut FrameAccumulator) -> Vec<Frame> {
    let mut frames = Vec::new();
    while let Some(frame) = acc.next_frame().unwrap() {
        frames.push(frame);
    }
    frames
}

// ============================================================================
// ROUND TRIP
// ============================================================================

#[test]
fn test_round_trip_all_tags() {
    let payloads: &[&[u8]] = &[b"", b"x", b"hello world", &[0u8, 255, 13, 10, 0]];

    for &tag in &[Tag::Binary, Tag::Structured] {
        for &payload in payloads {
            let mut acc = FrameAccumulator::new();
            acc.append(&pack(tag, payload));
            let frame = acc.next_frame().unwrap().expect("complete frame");
            assert_eq!(frame.tag, tag);
            assert_eq!(&frame.payload[..], payload);
            assert!(acc.is_empty());
        }
    }
}

#[test]
fn test_round_trip_binary_payload_with_embedded_gaps() {
    // Payload bytes that look like gaps and length fields must survive.
    let payload = b"7\r\nPB\r\ninner\r\n";
    let mut acc = FrameAccumulator::new();
    acc.append(&pack(Tag::Binary, payload));
    let frame = acc.next_frame().unwrap().unwrap();
    assert_eq!(&frame.payload[..], &payload[..]);
    assert!(acc.is_empty());
}

// ============================================================================
// ACCUMULATOR CORRECTNESS UNDER CHUNKING
// ============================================================================

#[test]
fn test_n_frames_arbitrary_chunking() {
    let payloads: Vec<Vec<u8>> = vec![
        b"alpha".to_vec(),
        vec![],
        b"{\"k\":[1,2,3]}".to_vec(),
        vec![0xAB; 300],
        b"omega".to_vec(),
    ];
    let tags = [
        Tag::Binary,
        Tag::Structured,
        Tag::Structured,
        Tag::Binary,
        Tag::Binary,
    ];

    let mut wire = Vec::new();
    for (payload, &tag) in payloads.iter().zip(&tags) {
        wire.extend_from_slice(&pack(tag, payload));
    }

    for chunk_size in [1, 2, 3, 7, 16, 64, wire.len()] {
        let mut acc = FrameAccumulator::new();
        let mut frames = Vec::new();
        for chunk in wire.chunks(chunk_size) {
            acc.append(chunk);
            frames.extend(drain(&mut acc));
        }
        assert_eq!(frames.len(), payloads.len(), "chunk size {chunk_size}");
        for ((frame, payload), &tag) in frames.iter().zip(&payloads).zip(&tags) {
            assert_eq!(frame.tag, tag);
            assert_eq!(&frame.payload[..], &payload[..]);
        }
        assert!(acc.is_empty(), "chunk size {chunk_size}");
    }
}

#[test]
fn test_back_to_back_frames_single_drain() {
    // Two frames written in one socket write come out of one drain loop.
    let mut wire = pack(Tag::Binary, b"req-1");
    wire.extend_from_slice(&pack(Tag::Binary, b"req-2"));

    let mut acc = FrameAccumulator::new();
    acc.append(&wire);
    let frames = drain(&mut acc);

    assert_eq!(frames.len(), 2);
    assert_eq!(&frames[0].payload[..], b"req-1");
    assert_eq!(&frames[1].payload[..], b"req-2");
    assert!(acc.is_empty());
}

#[test]
fn test_partial_frame_stability() {
    // Any strict prefix yields zero frames and leaves the accumulator
    // holding exactly the fed bytes.
    let wire = pack(Tag::Structured, b"{\"status\":\"ok\"}");
    for cut in 0..wire.len() {
        let mut acc = FrameAccumulator::new();
        acc.append(&wire[..cut]);
        assert!(acc.next_frame().unwrap().is_none(), "prefix len {cut}");
        assert_eq!(acc.buffered(), &wire[..cut], "prefix len {cut}");
        assert_eq!(acc.len(), cut, "prefix len {cut}");
    }
}

#[test]
fn test_split_across_reads_like_tcp() {
    // One frame delivered as two "reads" with the split inside the payload.
    let wire = pack(Tag::Binary, b"response body bytes");
    let split = wire.len() - 6;

    let mut acc = FrameAccumulator::new();
    acc.append(&wire[..split]);
    assert!(acc.next_frame().unwrap().is_none());
    acc.append(&wire[split..]);

    let frames = drain(&mut acc);
    assert_eq!(frames.len(), 1);
    assert_eq!(&frames[0].payload[..], b"response body bytes");
}

// ============================================================================
// BULK UNPACK
// ============================================================================

#[test]
fn test_unpack_all_matches_accumulator() {
    let mut wire = pack(Tag::Binary, b"a");
    wire.extend_from_slice(&pack(Tag::Structured, b"b"));
    wire.extend_from_slice(b"trailing junk that is not a frame");

    let frames = unpack_all(&wire);
    assert_eq!(frames.len(), 2);
    assert_eq!(&frames[0].payload[..], b"a");
    assert_eq!(&frames[1].payload[..], b"b");
}

// ============================================================================
// BUFFER GROWTH SAFETY
// ============================================================================

#[test]
fn test_growth_preserves_pending_bytes() {
    let mut buf = ByteBuffer::with_capacity(32);
    buf.append(b"pending-unread-data");
    let _ = buf.read(8); // leave the readable region mid-buffer

    let snapshot = buf.readable().to_vec();
    let readable = buf.readable_size();

    for request in [1, 31, 32, 1000, 64 * 1024] {
        buf.ensure_capacity(request);
        assert!(buf.writable_size() >= request);
        assert_eq!(buf.readable_size(), readable, "request {request}");
        assert_eq!(buf.readable(), &snapshot[..], "request {request}");
    }
}

#[test]
fn test_interleaved_append_and_drain_stays_compact() {
    // Long-lived connection pattern: repeated append/drain cycles must not
    // grow the buffer without bound.
    let mut buf = ByteBuffer::with_capacity(64);
    for round in 0..1000 {
        buf.append(format!("message-{round:04}").as_bytes());
        let drained = buf.read_all();
        assert_eq!(drained, format!("message-{round:04}").as_bytes());
    }
    assert!(buf.capacity() <= 64);
}
