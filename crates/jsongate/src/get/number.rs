//! Conversion of validated number text into concrete numeric types.

use core::str::FromStr;

use super::options::IntOptions;
use crate::error::{Error, ErrorKind, Result};

mod sealed {
    pub trait Sealed {}
}

/// Integer types [`Session::get_int`](crate::Session::get_int) can produce.
///
/// This trait is sealed.
pub trait Integer: Copy + sealed::Sealed {
    #[doc(hidden)]
    const SIGNED: bool;
    #[doc(hidden)]
    const LOWEST: Self;
    #[doc(hidden)]
    const HIGHEST: Self;
    #[doc(hidden)]
    fn widen(self) -> i128;
    #[doc(hidden)]
    fn narrow(wide: i128) -> Self;
}

macro_rules! impl_integer {
    ($($ty:ty => $signed:literal),* $(,)?) => {$(
        impl sealed::Sealed for $ty {}

        impl Integer for $ty {
            const SIGNED: bool = $signed;
            const LOWEST: Self = <$ty>::MIN;
            const HIGHEST: Self = <$ty>::MAX;

            fn widen(self) -> i128 {
                i128::try_from(self).unwrap_or(i128::MAX)
            }

            fn narrow(wide: i128) -> Self {
                <$ty>::try_from(wide).unwrap_or(if wide < 0 { Self::LOWEST } else { Self::HIGHEST })
            }
        }
    )*};
}

impl_integer! {
    i8 => true, i16 => true, i32 => true, i64 => true, isize => true,
    u8 => false, u16 => false, u32 => false, u64 => false, usize => false,
}

/// Floating point types [`Session::get_float`](crate::Session::get_float)
/// can produce.
///
/// This trait is sealed.
pub trait Float: Copy + FromStr + sealed::Sealed {
    #[doc(hidden)]
    const NAME: &'static str;
    #[doc(hidden)]
    fn is_finite_value(self) -> bool;
    #[doc(hidden)]
    fn is_zero(self) -> bool;
}

macro_rules! impl_float {
    ($($ty:ty),*) => {$(
        impl sealed::Sealed for $ty {}

        impl Float for $ty {
            const NAME: &'static str = stringify!($ty);

            fn is_finite_value(self) -> bool {
                self.is_finite()
            }

            fn is_zero(self) -> bool {
                self == 0.0
            }
        }
    )*};
}

impl_float!(f32, f64);

fn saturate_i64(wide: i128) -> i64 {
    i64::try_from(wide).unwrap_or(if wide < 0 { i64::MIN } else { i64::MAX })
}

fn saturate_u64(wide: i128) -> u64 {
    u64::try_from(wide).unwrap_or(if wide < 0 { 0 } else { u64::MAX })
}

/// Magnitude of a digit string, saturating far beyond any target type.
fn magnitude(digits: &str) -> u128 {
    digits.bytes().fold(0u128, |acc, b| {
        acc.saturating_mul(10)
            .saturating_add(u128::from(b.wrapping_sub(b'0')))
    })
}

/// Converts number text to `T`, enforcing the type's range and the caller's
/// bounds. `at` is the offset reported with every error.
pub(crate) fn to_int<T: Integer>(text: &str, at: usize, opts: &IntOptions<'_, T>) -> Result<T> {
    if text.contains(['.', 'e', 'E']) {
        return Err(Error::at(ErrorKind::NumNotInteger, at));
    }
    let (negative, digits) = match text.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, text),
    };
    if negative && !T::SIGNED {
        return Err(Error::at(ErrorKind::NumNotUnsigned, at));
    }
    let mag = magnitude(digits);
    let wide = if negative {
        0i128.saturating_sub_unsigned(mag)
    } else {
        0i128.saturating_add_unsigned(mag)
    };

    let (min, min_reason) = match opts.min {
        Some(min) => (min.widen(), opts.min_reason),
        None => (T::LOWEST.widen(), None),
    };
    let (max, max_reason) = match opts.max {
        Some(max) => (max.widen(), opts.max_reason),
        None => (T::HIGHEST.widen(), None),
    };
    if wide < min {
        let kind = if T::SIGNED {
            ErrorKind::NumSignedTooSmall {
                min: saturate_i64(min),
            }
        } else {
            ErrorKind::NumUnsignedTooSmall {
                min: saturate_u64(min),
            }
        };
        return Err(Error::at(kind, at).because(min_reason));
    }
    if wide > max {
        let kind = if T::SIGNED {
            ErrorKind::NumSignedTooLarge {
                max: saturate_i64(max),
            }
        } else {
            ErrorKind::NumUnsignedTooLarge {
                max: saturate_u64(max),
            }
        };
        return Err(Error::at(kind, at).because(max_reason));
    }
    Ok(T::narrow(wide))
}

/// Converts number text to `T`. Results that overflow to infinity or
/// underflow to zero are out of range.
pub(crate) fn to_float<T: Float>(text: &str, at: usize) -> Result<T> {
    // Parser-validated number text always converts; only foreign text fails.
    let value: T = text
        .parse()
        .map_err(|_| Error::at(ErrorKind::NumNotFloat, at))?;
    let mantissa = text.split(['e', 'E']).next().unwrap_or(text);
    let underflow = value.is_zero() && mantissa.contains(|c: char| matches!(c, '1'..='9'));
    if !value.is_finite_value() || underflow {
        return Err(Error::at(ErrorKind::NumFloatOutOfRange { ty: T::NAME }, at));
    }
    Ok(value)
}
