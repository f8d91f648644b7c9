// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Numeric scalar payloads.
//!
//! A token is classified by probing the numeric types from smallest to
//! largest, integers before floating point. The first type that accepts the
//! whole token wins.

/// A parsed number, stored in the smallest type that accepted its text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i32),
    Long(i64),
    LongLong(i128),
    Float(f32),
    Double(f64),
}

impl Number {
    /// Parse a scalar token as a number.
    ///
    /// Integers prefixed with `0x` are hexadecimal and those with a leading `0` octal.
    /// Returns `None` if no numeric type accepts the complete token.
    pub fn parse(token: &str) -> Option<Self> {
        if let Some(number) = parse_integer(token) {
            return Some(number);
        }
        parse_float(token)
    }

    /// Returns `true` for the integer variants.
    pub const fn is_integer(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Long(_) | Self::LongLong(_))
    }

    /// Convert to the requested numeric type. Floating point values are
    /// rounded to the nearest integer when an integer type is requested.
    pub fn value<T: FromNumber>(&self) -> T {
        T::from_number(*self)
    }

    #[allow(
        clippy::cast_precision_loss,
        reason = "Callers asking for f64 accept the usual precision loss"
    )]
    fn as_f64(self) -> f64 {
        match self {
            Self::Int(val) => f64::from(val),
            Self::Long(val) => val as f64,
            Self::LongLong(val) => val as f64,
            Self::Float(val) => f64::from(val),
            Self::Double(val) => val,
        }
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "Float to int `as` casts saturate, which is the wanted behavior"
    )]
    fn as_i128(self) -> i128 {
        match self {
            Self::Int(val) => i128::from(val),
            Self::Long(val) => i128::from(val),
            Self::LongLong(val) => val,
            Self::Float(val) => f64::from(val).round() as i128,
            Self::Double(val) => val.round() as i128,
        }
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(val) => write!(f, "{val}"),
            Self::Long(val) => write!(f, "{val}"),
            Self::LongLong(val) => write!(f, "{val}"),
            // Debug keeps a fractional part (`1.0`), so the text reads back as a float.
            Self::Float(val) => write!(f, "{val:?}"),
            Self::Double(val) => write!(f, "{val:?}"),
        }
    }
}

macro_rules! impl_from_primitive {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Number {
                fn from(val: $ty) -> Self {
                    Self::$variant(val.into())
                }
            }
        )*
    };
}

impl_from_primitive!(
    i8 => Int,
    i16 => Int,
    i32 => Int,
    u8 => Int,
    u16 => Int,
    i64 => Long,
    u32 => Long,
    i128 => LongLong,
    u64 => LongLong,
    f32 => Float,
    f64 => Double,
);

/// Conversion out of a [`Number`].
pub trait FromNumber {
    fn from_number(number: Number) -> Self;
}

macro_rules! impl_from_number_int {
    ($($ty:ty),*) => {
        $(
            impl FromNumber for $ty {
                fn from_number(number: Number) -> Self {
                    let wide = number.as_i128();
                    <$ty>::try_from(wide).unwrap_or(if wide < 0 { <$ty>::MIN } else { <$ty>::MAX })
                }
            }
        )*
    };
}

impl_from_number_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64, usize, isize);

impl FromNumber for f64 {
    fn from_number(number: Number) -> Self {
        number.as_f64()
    }
}

impl FromNumber for f32 {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Narrowing to f32 is what the caller asked for"
    )]
    fn from_number(number: Number) -> Self {
        match number {
            Number::Float(val) => val,
            other => other.as_f64() as f32,
        }
    }
}

fn parse_integer(token: &str) -> Option<Number> {
    let (negative, unsigned) = match token.as_bytes().first()? {
        b'-' => (true, token.get(1..)?),
        b'+' => (false, token.get(1..)?),
        _ => (false, token),
    };
    let (digits, radix) = if let Some(hex) = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        (hex, 16)
    } else if unsigned.len() > 1 && unsigned.starts_with('0') {
        (unsigned.get(1..)?, 8)
    } else {
        (unsigned, 10)
    };
    // from_str_radix accepts its own sign, which must not appear a second time.
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return None;
    }
    let magnitude = i128::from_str_radix(digits, radix).ok()?;
    let value = if negative { -magnitude } else { magnitude };
    if let Ok(val) = i32::try_from(value) {
        Some(Number::Int(val))
    } else if let Ok(val) = i64::try_from(value) {
        Some(Number::Long(val))
    } else {
        Some(Number::LongLong(value))
    }
}

fn parse_float(token: &str) -> Option<Number> {
    // Rust also accepts `inf`/`NaN` spellings; YAML scalars like that stay strings.
    let looks_numeric = token
        .bytes()
        .all(|byte| byte.is_ascii_digit() || matches!(byte, b'.' | b'+' | b'-' | b'e' | b'E'))
        && token.bytes().any(|byte| byte.is_ascii_digit());
    if !looks_numeric {
        return None;
    }
    if let Ok(val) = token.parse::<f32>()
        && val.is_finite()
    {
        return Some(Number::Float(val));
    }
    match token.parse::<f64>() {
        Ok(val) if val.is_finite() => Some(Number::Double(val)),
        _ => None,
    }
}
