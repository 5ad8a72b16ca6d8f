//! Bit-level stream primitives for lexspan payload encoding.
//!
//! This crate provides the lowest layer of the occurrence payload format:
//!
//! - [`BitWriter`] / [`BitReader`]: ordered bit streams over a byte buffer,
//!   least-significant bit first within each byte.
//! - Elias-Gamma coding of positive, non-negative and signed integers,
//!   exposed as methods on the writer and reader (see the [`gamma`] module).
//!
//! # Bit Order
//!
//! Bits are packed LSB-first: the first bit written to a fresh byte becomes
//! bit 0 of that byte. A partially filled final byte is zero-padded in its
//! unused high bits when it is flushed with [`BitWriter::create_byte`].
//!
//! ```rust
//! use lexspan_bits::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_positive(5);
//! writer.write_signed(-3);
//! let bytes = writer.finish();
//!
//! let mut reader = BitReader::new(&bytes);
//! assert_eq!(reader.read_positive().unwrap(), 5);
//! assert_eq!(reader.read_signed().unwrap(), -3);
//! ```

pub mod bitstream;
pub mod gamma;

pub use bitstream::{BitReader, BitWriter};
pub use gamma::gamma_bit_len;
