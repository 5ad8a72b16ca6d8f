use crate::error::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Returns an `InvalidArgument` error from the enclosing function unless
/// the condition holds. The error carries the stringified condition.
#[macro_export]
macro_rules! verify_arg {
    ($name:expr, $expr:expr) => {{
        let result = $expr;
        $crate::result::verify_arg(result, stringify!($name), stringify!($expr))?;
    }};
}

/// Returns an `InvalidFormat` error from the enclosing function unless
/// the condition holds. Used when validating decoded data.
#[macro_export]
macro_rules! verify_data {
    ($name:expr, $expr:expr) => {{
        let result = $expr;
        $crate::result::verify_data(result, stringify!($name), stringify!($expr))?;
    }};
}

#[inline]
pub fn verify_arg(predicate: bool, name: &str, condition: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        Err(invalid_arg(name, condition))
    }
}

#[inline]
pub fn verify_data(predicate: bool, name: &str, condition: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        Err(invalid_format(name, condition))
    }
}

#[cold]
fn invalid_arg(name: &str, condition: &str) -> Error {
    Error::invalid_arg(name, format!("expected {condition}"))
}

#[cold]
fn invalid_format(name: &str, condition: &str) -> Error {
    Error::invalid_format(name, format!("expected {condition}"))
}

/// Converts a decoded 64-bit value into the 32-bit domain used for
/// positions, offsets and ids, failing with `InvalidFormat` on overflow.
#[inline]
pub fn narrow_u32(value: u64, element: &str) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| Error::invalid_format(element, format!("value {value} exceeds u32 range")))
}
