//! This module contains the implementation of string conversion: decimal and
//! hex printing, and parsing.

use core::fmt::{self, Debug, Display, LowerHex};
use core::str::FromStr;

use thiserror::Error;

use crate::real::{Category, Real};

impl<const LIMBS: usize> Real<LIMBS> {
    /// Returns 10^n. The power is exact for as long as 5^n fits in the
    /// mantissa.
    fn pow10(n: u64) -> Self {
        Self::from_u64(10).powi(n as i64)
    }

    /// Multiply by 10^e. Negative powers divide by 10^|e|. The power is
    /// applied in two steps, so that the intermediate power doesn't leave the
    /// exponent range for numbers near the limits.
    fn scale_by_pow10(&self, e: i64) -> Self {
        let n = e.unsigned_abs();
        let (first, second) = (Self::pow10(n / 2), Self::pow10(n - n / 2));
        if e < 0 {
            *self / first / second
        } else {
            *self * first * second
        }
    }

    /// Convert the number to a decimal string in scientific notation, with
    /// exactly `digits` significant digits: one digit, the point, and
    /// `digits - 1` fraction digits, followed by the decimal exponent if it
    /// is not zero. For example, 1/3 with 5 digits prints as "3.3333e-1".
    /// The last digit is rounded by adding a bias, which is a naive rounding
    /// that can be off by one in the last place.
    pub fn to_string_with_digits(&self, digits: usize) -> String {
        let mut result = String::new();
        if self.is_negative() {
            result.push('-');
        }
        match self.get_category() {
            Category::NaN => return String::from("NaN"),
            Category::Infinity => {
                result.push_str("Inf");
                return result;
            }
            Category::Zero => {
                result.push_str("0.0");
                return result;
            }
            Category::Normal => {}
        }
        let digits = digits.max(1);

        // Move the number into the range [1, 10). The estimate of the exponent
        // may be off by one in both directions.
        let mut x = self.abs();
        let mut exponent = x.log10().ceil().as_i64();
        x = x.scale_by_pow10(-exponent);
        let ten = Self::from_u64(10);
        if x < Self::one(false) {
            x *= ten;
            exponent -= 1;
        } else if x >= ten {
            x /= ten;
            exponent += 1;
        }

        // Add a bias to round the last printed digit. The rounding may carry
        // all the way to 10.
        x += Self::from_f64(4.99) / Self::pow10(digits as u64);
        if x >= ten {
            x /= ten;
            exponent += 1;
        }

        for i in 0..digits {
            let digit = x.trunc().as_u32().min(9);
            result.push(char::from(b'0' + digit as u8));
            if i == 0 {
                result.push('.');
            }
            x = (x - i64::from(digit)) * 10;
        }

        if exponent != 0 {
            let sign = if exponent > 0 { '+' } else { '-' };
            result.push('e');
            result.push(sign);
            result.push_str(&exponent.unsigned_abs().to_string());
        }
        result
    }

    /// Convert the number to the exact hexadecimal form 0x1.<mantissa>p<exp>.
    /// Trailing zeros of the mantissa are dropped.
    pub fn to_hex_string(&self) -> String {
        let mut result = String::new();
        if self.is_negative() {
            result.push('-');
        }
        match self.get_category() {
            Category::NaN => return String::from("NaN"),
            Category::Infinity => result.push_str("Inf"),
            Category::Zero => result.push_str("0x0.0p0"),
            Category::Normal => {
                let mut body = String::new();
                for limb in self.get_mantissa() {
                    body.push_str(&format!("{:08x}", limb));
                }
                let body = body.trim_end_matches('0');
                let body = if body.is_empty() { "0" } else { body };
                result.push_str(&format!("0x1.{}p{}", body, self.get_exp()));
            }
        }
        result
    }
}

impl<const LIMBS: usize> Display for Real<LIMBS> {
    /// Prints the number with the formatter precision as the digit count,
    /// or with `DECIMAL_DIGITS` digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = f.precision().unwrap_or(Self::DECIMAL_DIGITS);
        f.write_str(&self.to_string_with_digits(digits))
    }
}

impl<const LIMBS: usize> Debug for Real<LIMBS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

impl<const LIMBS: usize> LowerHex for Real<LIMBS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

/// The reasons for rejecting a string that does not describe a number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseRealError {
    #[error("cannot parse a number from an empty string")]
    Empty,
    #[error("invalid character {found:?} at position {position}")]
    InvalidDigit { position: usize, found: char },
    #[error("invalid exponent")]
    InvalidExponent,
}

/// The digits of a number, split at the point and at the exponent marker.
struct Parts<'a> {
    // The digits of the number, without the point.
    digits: Vec<u32>,
    // The number of digits after the point.
    fraction_len: usize,
    // The text after the exponent marker.
    exponent: Option<&'a str>,
}

/// Split 'value' into digits of base 'radix'. The character 'marker' (in any
/// case) starts the exponent. 'offset' is the position of 'value' in the
/// input, for error reporting.
fn split_digits(
    value: &str,
    radix: u32,
    marker: char,
    offset: usize,
) -> Result<Parts<'_>, ParseRealError> {
    let mut digits = Vec::new();
    let mut fraction_len = 0;
    let mut seen_point = false;
    let mut exponent = None;

    for (i, chr) in value.char_indices() {
        if chr.eq_ignore_ascii_case(&marker) {
            exponent = Some(&value[i + 1..]);
            break;
        }
        if chr == '.' && !seen_point {
            seen_point = true;
            continue;
        }
        match chr.to_digit(radix) {
            Some(d) => {
                digits.push(d);
                if seen_point {
                    fraction_len += 1;
                }
            }
            None => {
                return Err(ParseRealError::InvalidDigit {
                    position: offset + i,
                    found: chr,
                })
            }
        }
    }

    if digits.is_empty() {
        // A point or an exponent without any digits.
        return match value.chars().next() {
            Some(found) => Err(ParseRealError::InvalidDigit {
                position: offset,
                found,
            }),
            None => Err(ParseRealError::Empty),
        };
    }
    Ok(Parts {
        digits,
        fraction_len,
        exponent,
    })
}

/// Parse the text after an exponent marker: an optional sign and digits.
fn parse_exponent(value: Option<&str>) -> Result<i64, ParseRealError> {
    match value {
        None => Ok(0),
        Some(exp) => exp
            .parse::<i64>()
            .map_err(|_| ParseRealError::InvalidExponent),
    }
}

impl<const LIMBS: usize> Real<LIMBS> {
    /// Parse a number from a string. Accepts an optional sign followed by
    /// decimal numbers (`-12.5e-3`), hexadecimal numbers with a binary
    /// exponent (`0x1.8p3`), `inf` and `nan` (in any case). Decimal numbers
    /// are accumulated digit by digit, and then scaled by the power of ten,
    /// which may lose precision. Hex numbers are exact for up to TOTAL_BITS
    /// bits.
    pub fn try_from_str(value: &str) -> Result<Self, ParseRealError> {
        let res = Self::parse_number(value);
        if let Err(err) = &res {
            tracing::trace!(input = value, error = %err, "rejected number");
        }
        res
    }

    fn parse_number(value: &str) -> Result<Self, ParseRealError> {
        // Handle the plus or minus in front of the number.
        let (sign, skip) = match value.as_bytes().first() {
            None => return Err(ParseRealError::Empty),
            Some(b'-') => (true, 1),
            Some(b'+') => (false, 1),
            Some(_) => (false, 0),
        };
        let body = &value[skip..];
        if body.is_empty() {
            return Err(ParseRealError::Empty);
        }

        if body.eq_ignore_ascii_case("nan") {
            return Ok(Self::nan(sign));
        }
        if body.eq_ignore_ascii_case("inf") || body.eq_ignore_ascii_case("infinity") {
            return Ok(Self::inf(sign));
        }

        let ret = match body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
            Some(hex) => Self::parse_hex(hex, skip + 2)?,
            None => Self::parse_decimal(body, skip)?,
        };
        Ok(ret.with_sign(sign))
    }

    /// Parse an unsigned decimal number: value = value * 10 + digit.
    fn parse_decimal(value: &str, offset: usize) -> Result<Self, ParseRealError> {
        let parts = split_digits(value, 10, 'e', offset)?;
        let exp = parse_exponent(parts.exponent)?;

        let mut ret = Self::zero(false);
        for d in parts.digits {
            ret = ret * 10 + i64::from(d);
        }
        let exp = exp.saturating_sub(parts.fraction_len as i64);

        // Dividing by the exact power of ten is more accurate than
        // multiplying by its inexact reciprocal.
        if exp == 0 || ret.is_zero() {
            return Ok(ret);
        }
        Ok(ret.scale_by_pow10(exp))
    }

    /// Parse an unsigned hexadecimal number, with an optional binary exponent
    /// that starts with 'p'.
    fn parse_hex(value: &str, offset: usize) -> Result<Self, ParseRealError> {
        let parts = split_digits(value, 16, 'p', offset)?;
        let exp = parse_exponent(parts.exponent)?;

        let mut ret = Self::zero(false);
        for d in parts.digits {
            ret = ret.ldexp(4) + i64::from(d);
        }
        let shift = exp.saturating_sub((parts.fraction_len as i64).saturating_mul(4));
        Ok(ret.ldexp(shift))
    }
}

impl<const LIMBS: usize> FromStr for Real<LIMBS> {
    type Err = ParseRealError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::try_from_str(value)
    }
}

impl<const LIMBS: usize> TryFrom<&str> for Real<LIMBS> {
    type Error = ParseRealError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::try_from_str(value)
    }
}

#[test]
fn test_print_digits() {
    use crate::{Real128, Real256};

    let third = Real128::one(false) / 3;
    assert_eq!(third.to_string_with_digits(5), "3.3333e-1");
    assert_eq!(third.neg().to_string_with_digits(3), "-3.33e-1");
    assert_eq!(Real128::from(-123.456).to_string_with_digits(6), "-1.23456e+2");
    assert_eq!(Real128::one(false).to_string_with_digits(3), "1.00");
    assert_eq!(Real128::from(1000).to_string_with_digits(2), "1.0e+3");
    assert_eq!(Real128::from(0.5).to_string_with_digits(1), "5.e-1");
    assert_eq!(Real128::from(2.0 / 3.0).to_string_with_digits(4), "6.667e-1");
    assert_eq!(Real128::from(12345).to_string_with_digits(3), "1.23e+4");

    // Rounding carries into the exponent.
    assert_eq!(Real128::from(9.9999999).to_string_with_digits(3), "1.00e+1");
    assert_eq!(Real128::from(0.099999999).to_string_with_digits(3), "1.00e-1");

    let pi = Real256::pi();
    assert_eq!(pi.to_string_with_digits(20), "3.1415926535897932385");
    assert_eq!(pi.neg().to_string_with_digits(2), "-3.1");
}

#[test]
fn test_print_special_values() {
    use crate::Real128;
    assert_eq!(Real128::zero(false).to_string_with_digits(5), "0.0");
    assert_eq!(Real128::zero(true).to_string_with_digits(5), "-0.0");
    assert_eq!(Real128::inf(false).to_string_with_digits(5), "Inf");
    assert_eq!(Real128::inf(true).to_string_with_digits(5), "-Inf");
    assert_eq!(Real128::nan(false).to_string_with_digits(5), "NaN");
    assert_eq!(Real128::nan(true).to_string_with_digits(5), "NaN");

    // Numbers at the ends of the exponent range.
    // Verify the digits with:
    // from mpmath import mp
    // mp.mpf(2)**(-1073741822)
    assert_eq!(
        Real128::max_value().to_string_with_digits(5),
        "4.1972e+323228496"
    );
    assert_eq!(
        Real128::min_positive().to_string_with_digits(5),
        "9.5303e-323228497"
    );
}

#[test]
fn test_display() {
    use crate::Real128;
    let x = Real128::from(0.1);
    assert_eq!(format!("{:.4}", x), "1.000e-1");
    assert_eq!(format!("{:.1}", Real128::from(7)), "7.");
    // The default digit count is the decimal accuracy of the type.
    let text = format!("{}", Real128::one(false) / 3);
    assert_eq!(text.len(), "3.".len() + Real128::DECIMAL_DIGITS - 1 + "e-1".len());
    assert!(text.starts_with("3.333333333333333333333333333333333"));
    assert_eq!(Real128::DECIMAL_DIGITS, 40);
    assert_eq!(crate::Real256::DECIMAL_DIGITS, 79);
}

#[test]
fn test_hex_string() {
    use crate::Real128;
    assert_eq!(Real128::from(12).to_hex_string(), "0x1.8p3");
    assert_eq!(Real128::from(-1).to_hex_string(), "-0x1.0p0");
    assert_eq!(Real128::from(0.1).to_hex_string(), "0x1.999999999999ap-4");
    assert_eq!(Real128::zero(true).to_hex_string(), "-0x0.0p0");
    assert_eq!(format!("{:x}", Real128::from(0.75)), "0x1.8p-1");
    assert_eq!(format!("{:?}", Real128::inf(true)), "-Inf");
    // The division polishes the quotient so that 3 * third is one.
    let third = Real128::one(false) / 3;
    assert_eq!(
        third.to_hex_string(),
        "0x1.55555555555555555555555555555556p-2"
    );
}

#[test]
fn test_from_string() {
    use crate::Real128;

    fn parse(s: &str) -> f64 {
        Real128::try_from_str(s).unwrap().as_f64()
    }

    assert_eq!(parse("-3.0"), -3.0);
    assert_eq!(parse("30"), 30.0);
    assert_eq!(parse("+430.56"), 430.56);
    assert_eq!(parse("5.2"), 5.2);
    assert_eq!(parse("-123.456"), -123.456);
    assert_eq!(parse("3.2e1"), 32.0);
    assert_eq!(parse("44.e-1"), 4.4);
    assert_eq!(parse("54E-1"), 5.4);
    assert_eq!(parse("-54.85e-1"), -5.485);
    assert_eq!(parse(".5"), 0.5);
    assert_eq!(parse("1e-10"), 1e-10);
    assert_eq!(parse("6.02214076e23"), 6.02214076e23);
    assert_eq!(parse("0.000"), 0.0);
    assert!(parse("-0").is_sign_negative());
    assert_eq!(parse("inf"), f64::INFINITY);
    assert_eq!(parse("-Infinity"), f64::NEG_INFINITY);
    assert!(parse("NaN").is_nan());

    // Hex floats.
    assert_eq!(parse("0x1.8p3"), 12.0);
    assert_eq!(parse("-0X10"), -16.0);
    assert_eq!(parse("0xa.8P-2"), 2.625);
    assert_eq!(parse("0x1e"), 30.0);

    // Exponents at the limits of i64 saturate.
    assert_eq!(parse("0x1p9223372036854775807"), f64::INFINITY);
    assert_eq!(parse("-0x1p-9223372036854775808"), -0.0);
    assert!(parse("-0x1p-9223372036854775808").is_sign_negative());
    assert_eq!(parse("1e9223372036854775807"), f64::INFINITY);
    assert_eq!(parse("1e-9223372036854775808"), 0.0);
    assert!(Real128::try_from_str("1e-9223372036854775808").unwrap().is_zero());
    assert!(Real128::try_from_str("0.1e-9223372036854775808").unwrap().is_zero());

    // The traits.
    let x: Real128 = "2.5".parse().unwrap();
    assert_eq!(x.as_f64(), 2.5);
    assert_eq!(Real128::try_from("2.5").unwrap(), x);
}

#[test]
fn test_from_string_errors() {
    use crate::{ParseRealError, Real128};

    assert_eq!(Real128::try_from_str(""), Err(ParseRealError::Empty));
    assert_eq!(Real128::try_from_str("-"), Err(ParseRealError::Empty));
    assert_eq!(
        Real128::try_from_str("abc.de"),
        Err(ParseRealError::InvalidDigit {
            position: 0,
            found: 'a'
        })
    );
    assert_eq!(
        Real128::try_from_str("-1.2.3"),
        Err(ParseRealError::InvalidDigit {
            position: 4,
            found: '.'
        })
    );
    assert_eq!(
        Real128::try_from_str("e.-21"),
        Err(ParseRealError::InvalidDigit {
            position: 0,
            found: 'e'
        })
    );
    assert_eq!(
        Real128::try_from_str("0x1g"),
        Err(ParseRealError::InvalidDigit {
            position: 3,
            found: 'g'
        })
    );
    assert_eq!(Real128::try_from_str("1e"), Err(ParseRealError::InvalidExponent));
    assert_eq!(Real128::try_from_str("1e+x"), Err(ParseRealError::InvalidExponent));
    assert_eq!(Real128::try_from_str("0x1p"), Err(ParseRealError::InvalidExponent));
    assert!("12 ".parse::<Real128>().is_err());

    let err = Real128::try_from_str("1.5q").unwrap_err();
    assert_eq!(err.to_string(), "invalid character 'q' at position 3");
}

#[test]
fn test_string_round_trip() {
    use crate::utils::Lfsr;
    use crate::{Real128, Real512};

    // Printing enough digits and parsing them back recovers the double.
    let mut lfsr = Lfsr::new();
    for _ in 0..300 {
        let v = f64::from_bits(lfsr.get64());
        if !v.is_normal() {
            continue;
        }
        let text = Real128::from_f64(v).to_string_with_digits(25);
        let back: Real128 = text.parse().unwrap();
        assert_eq!(back.as_f64(), v, "{}", text);
    }

    // The hex form is exact.
    let values = [
        Real512::pi(),
        Real512::one(true) / 7,
        Real512::max_value(),
        Real512::min_positive(),
        Real512::from(1e300).sqrt(),
    ];
    for v in values {
        let back: Real512 = v.to_hex_string().parse().unwrap();
        assert_eq!(back, v);
    }
}

#[test]
fn test_fuzz_printing() {
    use crate::utils::Lfsr;
    use crate::Real256;

    let mut lfsr = Lfsr::new();
    for _ in 0..200 {
        let v = f64::from_bits(lfsr.get64());
        let text = Real256::from_f64(v).to_string();
        if v.is_finite() && v != 0.0 {
            let mantissa = text.trim_start_matches('-');
            assert!(mantissa.as_bytes()[0].is_ascii_digit(), "{}", text);
            assert_eq!(mantissa.as_bytes()[1], b'.', "{}", text);
            assert_ne!(mantissa.as_bytes()[0], b'0', "{}", text);
        }
    }
}
