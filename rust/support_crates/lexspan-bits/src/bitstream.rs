//! Ordered bit streams over byte buffers.
//!
//! [`BitWriter`] accumulates bits into a pending byte and appends it to the
//! output every eight bits. [`BitReader`] is the exact inverse: it pulls one
//! byte at a time and serves its bits LSB-first, tracking how many bits of
//! the current byte are still unread.

use lexspan_common::{Result, error::Error};

/// Bit-level writer over a growable byte buffer.
///
/// Bits are packed least-significant first within each byte. Whole bytes can
/// be appended with [`BitWriter::write_bytes`] once the stream is aligned to a
/// byte boundary, which is how the byte-aligned tail of a payload follows its
/// bit-packed header.
#[derive(Debug, Default, Clone)]
pub struct BitWriter {
    /// Completed bytes.
    bytes: Vec<u8>,
    /// Bits of the byte under construction, LSB-first.
    bit_buffer: u8,
    /// Number of bits in `bit_buffer` (always `< 8`).
    bit_count: u32,
}

impl BitWriter {
    /// Creates an empty writer.
    pub fn new() -> BitWriter {
        BitWriter::default()
    }

    /// Creates an empty writer whose buffer can hold `capacity` bytes
    /// without reallocating.
    pub fn with_capacity(capacity: usize) -> BitWriter {
        BitWriter {
            bytes: Vec::with_capacity(capacity),
            bit_buffer: 0,
            bit_count: 0,
        }
    }

    /// Appends a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) {
        self.bit_buffer |= (bit as u8) << self.bit_count;
        self.bit_count += 1;
        if self.bit_count == 8 {
            self.create_byte();
        }
    }

    /// Appends the same bit `count` times.
    pub fn write_bits(&mut self, bit: bool, count: usize) {
        for _ in 0..count {
            self.write_bit(bit);
        }
    }

    /// Flushes a partially filled byte, zero-padding its unused high bits.
    ///
    /// Does nothing when the stream is already at a byte boundary.
    pub fn create_byte(&mut self) {
        if self.bit_count > 0 {
            self.bytes.push(self.bit_buffer);
            self.bit_buffer = 0;
            self.bit_count = 0;
        }
    }

    /// Appends whole bytes verbatim.
    ///
    /// # Panics
    ///
    /// Panics if the stream is not at a byte boundary; call
    /// [`BitWriter::create_byte`] first.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        assert!(
            self.is_aligned(),
            "write_bytes requires a byte-aligned bit stream"
        );
        self.bytes.extend_from_slice(bytes);
    }

    /// Returns `true` if no partial byte is pending.
    pub fn is_aligned(&self) -> bool {
        self.bit_count == 0
    }

    /// Total number of bits written so far, including pending ones.
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.bit_count as usize
    }

    /// Flushes any pending bits and returns the encoded bytes.
    pub fn finish(mut self) -> Vec<u8> {
        self.create_byte();
        self.bytes
    }
}

/// Bit-level reader over a byte slice, the inverse of [`BitWriter`].
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Index of the next byte to load.
    pos: usize,
    /// Byte currently being consumed.
    bit_buffer: u8,
    /// Number of bits of `bit_buffer` already served. Zero means the next
    /// read loads a fresh byte.
    bit_count: u32,
}

impl<'a> BitReader<'a> {
    /// Creates a reader positioned at the first bit of `data`.
    pub fn new(data: &'a [u8]) -> BitReader<'a> {
        BitReader {
            data,
            pos: 0,
            bit_buffer: 0,
            bit_count: 0,
        }
    }

    /// Reads the next bit.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidFormat` error if the stream is exhausted.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.bit_count == 0 {
            let Some(&byte) = self.data.get(self.pos) else {
                return Err(Error::invalid_format(
                    "bitstream",
                    format!("truncated after {} bytes: no more bits", self.data.len()),
                ));
            };
            self.bit_buffer = byte;
            self.pos += 1;
        }
        let bit = (self.bit_buffer >> self.bit_count) & 1 == 1;
        self.bit_count += 1;
        if self.bit_count == 8 {
            self.bit_count = 0;
        }
        Ok(bit)
    }

    /// Returns all unread whole bytes and exhausts the reader.
    ///
    /// Bits left in a partially consumed byte are padding written by
    /// [`BitWriter::create_byte`] and are skipped. The returned slice may be
    /// empty.
    pub fn read_remaining_bytes(&mut self) -> &'a [u8] {
        let remaining = &self.data[self.pos..];
        self.pos = self.data.len();
        self.bit_count = 0;
        remaining
    }

    /// Returns `true` if the reader sits at a byte boundary.
    pub fn is_aligned(&self) -> bool {
        self.bit_count == 0
    }

    /// Number of bits that can still be read, including unread bits of the
    /// current byte.
    pub fn remaining_bits(&self) -> usize {
        let partial = if self.bit_count == 0 {
            0
        } else {
            (8 - self.bit_count) as usize
        };
        (self.data.len() - self.pos) * 8 + partial
    }
}
