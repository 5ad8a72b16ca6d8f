//! Elias-Gamma integer coding on top of the bit streams.
//!
//! A positive integer `n` is written as `k` zero bits, where `k` is the index
//! of its highest set bit, followed by the `k + 1` significant bits of `n`
//! from the most significant one down. This is the same bit sequence as the
//! recursive definition "`1` for `n = 1`, otherwise `0`, the code of `n / 2`,
//! then `n % 2`".
//!
//! Two derived encodings share the primitive:
//!
//! - non-negative: `n` is written as the positive code of `n + 1`;
//! - signed (zig-zag): `n >= 0` is written as `2n + 1`, `n < 0` as `-2n`.
//!
//! | value | positive code |
//! |-------|---------------|
//! | 1     | `1`           |
//! | 2     | `010`         |
//! | 3     | `011`         |
//! | 5     | `00101`       |

use lexspan_common::{Result, error::Error};

use crate::{BitReader, BitWriter};

/// Longest unary prefix a 64-bit value can produce.
const MAX_PREFIX_BITS: u32 = 63;

/// Returns the number of bits in the Elias-Gamma code of `value`.
///
/// # Panics
///
/// Panics if `value` is zero.
#[inline]
pub fn gamma_bit_len(value: u64) -> usize {
    assert!(value > 0, "Elias-Gamma coding is defined for positive values only");
    let k = MAX_PREFIX_BITS - value.leading_zeros();
    2 * k as usize + 1
}

impl BitWriter {
    /// Writes the Elias-Gamma code of a positive integer.
    ///
    /// # Panics
    ///
    /// Panics if `value` is zero; passing zero is a caller bug.
    pub fn write_positive(&mut self, value: u64) {
        assert!(value > 0, "Elias-Gamma coding is defined for positive values only");
        let k = MAX_PREFIX_BITS - value.leading_zeros();
        self.write_bits(false, k as usize);
        for shift in (0..=k).rev() {
            self.write_bit((value >> shift) & 1 == 1);
        }
    }

    /// Writes a non-negative integer as the positive code of `value + 1`.
    ///
    /// # Panics
    ///
    /// Panics if `value` is `u64::MAX`.
    pub fn write_non_negative(&mut self, value: u64) {
        let shifted = value
            .checked_add(1)
            .expect("non-negative value out of Elias-Gamma range");
        self.write_positive(shifted);
    }

    /// Writes a signed integer using the zig-zag mapping
    /// `n >= 0 -> 2n + 1`, `n < 0 -> -2n`.
    ///
    /// # Panics
    ///
    /// Panics if `value` is `i64::MIN`.
    pub fn write_signed(&mut self, value: i64) {
        assert!(value != i64::MIN, "signed value out of Elias-Gamma range");
        let mapped = if value >= 0 {
            2 * value as u64 + 1
        } else {
            2 * value.unsigned_abs()
        };
        self.write_positive(mapped);
    }
}

impl BitReader<'_> {
    /// Reads an Elias-Gamma coded positive integer.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` if the stream ends inside the code or the
    /// unary prefix is longer than a 64-bit value allows.
    pub fn read_positive(&mut self) -> Result<u64> {
        let mut k = 0u32;
        while !self.read_bit()? {
            k += 1;
            if k > MAX_PREFIX_BITS {
                return Err(Error::invalid_format(
                    "elias-gamma",
                    format!("length prefix exceeds {MAX_PREFIX_BITS} bits"),
                ));
            }
        }
        let mut value = 1u64;
        for _ in 0..k {
            value = (value << 1) | self.read_bit()? as u64;
        }
        Ok(value)
    }

    /// Reads a non-negative integer written by [`BitWriter::write_non_negative`].
    pub fn read_non_negative(&mut self) -> Result<u64> {
        Ok(self.read_positive()? - 1)
    }

    /// Reads a signed integer written by [`BitWriter::write_signed`].
    pub fn read_signed(&mut self) -> Result<i64> {
        let value = self.read_positive()?;
        if value % 2 == 0 {
            Ok(-((value / 2) as i64))
        } else {
            Ok(((value - 1) / 2) as i64)
        }
    }
}
