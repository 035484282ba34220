//! # Byte Buffer
//!
//! Growable byte container with independent read and write cursors, the
//! foundation every connection accumulates and drains data through.
//!
//! ## Layout
//! ```text
//! [ consumed | readable            | writable        ]
//!   0         read_pos              write_pos          capacity
//! ```
//!
//! The readable region is `[read_pos, write_pos)`. Draining all readable
//! bytes resets both cursors to 0, which bounds growth on long-lived
//! connections. `ensure_capacity` compacts before it reallocates, so
//! readable bytes are never lost or reordered.

/// Growable byte buffer with independent read/write cursors.
///
/// Invariant: `read_pos <= write_pos <= capacity`.
#[derive(Debug, Default)]
pub struct ByteBuffer {
    buf: Vec<u8>,
    read_pos: usize,
    write_pos: usize,
}

impl ByteBuffer {
    /// Create an empty buffer with no backing storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer with `capacity` zeroed bytes of backing storage.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: vec![0; capacity],
            read_pos: 0,
            write_pos: 0,
        }
    }

    /// Total backing storage size.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Number of bytes available to read.
    pub fn readable_size(&self) -> usize {
        self.write_pos - self.read_pos
    }

    /// Number of bytes writable without growing.
    pub fn writable_size(&self) -> usize {
        self.buf.len() - self.write_pos
    }

    pub fn is_empty(&self) -> bool {
        self.readable_size() == 0
    }

    /// The readable region.
    pub fn readable(&self) -> &[u8] {
        &self.buf[self.read_pos..self.write_pos]
    }

    /// The writable region. Callers read socket data directly into this
    /// slice and then `advance_write` by the number of bytes filled.
    pub fn writable_mut(&mut self) -> &mut [u8] {
        &mut self.buf[self.write_pos..]
    }

    /// Make room for at least `required` writable bytes.
    ///
    /// Compacts first: if `read_pos > 0` the readable region is moved to
    /// offset 0 and the cursors reset. Only if that still leaves too little
    /// room does the storage grow, to `max(2 * capacity, write_pos + required)`,
    /// amortizing reallocation while bounding copy cost.
    pub fn ensure_capacity(&mut self, required: usize) {
        if self.writable_size() >= required {
            return;
        }

        if self.read_pos > 0 {
            let len = self.readable_size();
            self.buf.copy_within(self.read_pos..self.write_pos, 0);
            self.read_pos = 0;
            self.write_pos = len;
        }

        if self.writable_size() < required {
            let new_size = std::cmp::max(self.buf.len() * 2, self.write_pos + required);
            self.buf.resize(new_size, 0);
        }
    }

    /// Append bytes, growing as needed.
    pub fn append(&mut self, data: &[u8]) {
        if data.is_empty() {
            return;
        }
        self.ensure_capacity(data.len());
        self.buf[self.write_pos..self.write_pos + data.len()].copy_from_slice(data);
        self.write_pos += data.len();
    }

    /// Consume up to `n` readable bytes.
    pub fn read(&mut self, n: usize) -> Vec<u8> {
        let n = std::cmp::min(n, self.readable_size());
        let out = self.buf[self.read_pos..self.read_pos + n].to_vec();
        self.advance_read(n);
        out
    }

    /// Consume every readable byte.
    pub fn read_all(&mut self) -> Vec<u8> {
        self.read(self.readable_size())
    }

    /// Consume up to `n` readable bytes as a lossy UTF-8 string.
    pub fn read_string(&mut self, n: usize) -> String {
        String::from_utf8_lossy(&self.read(n)).into_owned()
    }

    /// Consume every readable byte as a lossy UTF-8 string.
    pub fn read_all_string(&mut self) -> String {
        let n = self.readable_size();
        self.read_string(n)
    }

    /// Record that `n` bytes were written into the writable region.
    pub fn advance_write(&mut self, n: usize) {
        debug_assert!(n <= self.writable_size());
        self.write_pos += n;
    }

    /// Skip `n` readable bytes without copying them out.
    pub fn advance_read(&mut self, n: usize) {
        debug_assert!(n <= self.readable_size());
        self.read_pos += n;
        // Fully drained: rewind so the next write starts at offset 0.
        if self.read_pos == self.write_pos {
            self.read_pos = 0;
            self.write_pos = 0;
        }
    }

    /// Drop all readable bytes and reset both cursors.
    pub fn clear(&mut self) {
        self.read_pos = 0;
        self.write_pos = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_then_read_roundtrip() {
        let mut buf = ByteBuffer::new();
        buf.append(b"hello ");
        buf.append(b"world");
        assert_eq!(buf.readable_size(), 11);
        assert_eq!(buf.read_all(), b"hello world");
        assert!(buf.is_empty());
    }

    #[test]
    fn test_partial_read_preserves_order() {
        let mut buf = ByteBuffer::new();
        buf.append(b"abcdef");
        assert_eq!(buf.read(2), b"ab");
        assert_eq!(buf.read(2), b"cd");
        assert_eq!(buf.read_all(), b"ef");
    }

    #[test]
    fn test_drain_resets_cursors() {
        let mut buf = ByteBuffer::with_capacity(16);
        buf.append(b"12345678");
        let _ = buf.read_all();
        // After a full drain the whole capacity is writable again.
        assert_eq!(buf.writable_size(), buf.capacity());
    }

    #[test]
    fn test_ensure_capacity_compacts_before_growing() {
        let mut buf = ByteBuffer::with_capacity(8);
        buf.append(b"abcdefgh");
        assert_eq!(buf.read(6), b"abcdef");

        // 2 readable bytes at offset 6; asking for 6 writable bytes must
        // compact within the existing 8-byte storage, not grow.
        buf.ensure_capacity(6);
        assert_eq!(buf.capacity(), 8);
        assert_eq!(buf.readable(), b"gh");
        assert!(buf.writable_size() >= 6);
    }

    #[test]
    fn test_growth_preserves_readable_bytes() {
        let mut buf = ByteBuffer::with_capacity(4);
        buf.append(b"abcd");
        buf.ensure_capacity(100);
        assert_eq!(buf.readable(), b"abcd");
        assert!(buf.writable_size() >= 100);
        // Doubling floor: growth target is at least twice the old capacity.
        assert!(buf.capacity() >= 8);
    }

    #[test]
    fn test_growth_never_changes_readable_content() {
        let mut buf = ByteBuffer::new();
        buf.append(b"pending");
        let before = buf.readable().to_vec();
        let readable_before = buf.readable_size();

        buf.ensure_capacity(64 * 1024);

        assert_eq!(buf.readable_size(), readable_before);
        assert_eq!(buf.readable(), &before[..]);
    }

    #[test]
    fn test_writable_region_write_cycle() {
        let mut buf = ByteBuffer::new();
        buf.ensure_capacity(4);
        buf.writable_mut()[..4].copy_from_slice(b"data");
        buf.advance_write(4);
        assert_eq!(buf.read_all_string(), "data");
    }

    #[test]
    fn test_read_string_lossy() {
        let mut buf = ByteBuffer::new();
        buf.append(b"ok");
        assert_eq!(buf.read_string(10), "ok");
    }

    #[test]
    fn test_clear() {
        let mut buf = ByteBuffer::new();
        buf.append(b"junk");
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.read_all(), b"");
    }
}
