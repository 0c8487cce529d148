use crate::utils::error::{Result, SerializeError};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Largest adjusted exponent (exponent of the leading digit) a finite value may have.
pub const MAX_ADJUSTED_EXPONENT: i64 = 999_999_999_999_999_999;

/// Smallest exponent of the least significant digit.
pub const MIN_EXPONENT: i64 = -1_999_999_999_999_999_997;

fn exponent_in_range(digit_count: usize, exponent: i64) -> bool {
    let adjusted = i128::from(exponent) + digit_count as i128 - 1;
    exponent >= MIN_EXPONENT && adjusted <= i128::from(MAX_ADJUSTED_EXPONENT)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Repr {
    /// `digits` has no leading zeros unless it is exactly `"0"`.
    Finite { digits: String, exponent: i64 },
    Infinity,
    NaN { signaling: bool, payload: String },
}

/// Arbitrary-precision decimal that remembers how it was written.
///
/// The value is kept as sign, coefficient digits and exponent, so `42.00`
/// keeps its trailing zeros and `1E+2` keeps its exponent. `Display` renders
/// the canonical scientific string of the General Decimal Arithmetic
/// specification, which is what serializers emit for decimal fields.
///
/// Equality is representational: `1.0` and `1.00` are different values here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decimal {
    negative: bool,
    repr: Repr,
}

impl Decimal {
    /// Builds a finite decimal from a signed coefficient and a base-10 exponent.
    ///
    /// Fails with [`SerializeError::InvalidDecimal`] when the exponent falls
    /// outside [`MIN_EXPONENT`] and [`MAX_ADJUSTED_EXPONENT`].
    pub fn from_parts(coefficient: i128, exponent: i64) -> Result<Self> {
        let digits = coefficient.unsigned_abs().to_string();
        if !exponent_in_range(digits.len(), exponent) {
            return Err(SerializeError::InvalidDecimal {
                literal: format!("{}E{}", coefficient, exponent),
            });
        }
        Ok(Self {
            negative: coefficient < 0,
            repr: Repr::Finite { digits, exponent },
        })
    }

    pub fn is_finite(&self) -> bool {
        matches!(self.repr, Repr::Finite { .. })
    }

    pub fn is_nan(&self) -> bool {
        matches!(self.repr, Repr::NaN { .. })
    }

    pub fn is_sign_negative(&self) -> bool {
        self.negative
    }

    /// Coefficient digits, `None` for infinities and NaNs.
    pub fn coefficient(&self) -> Option<&str> {
        match &self.repr {
            Repr::Finite { digits, .. } => Some(digits),
            _ => None,
        }
    }

    pub fn exponent(&self) -> Option<i64> {
        match &self.repr {
            Repr::Finite { exponent, .. } => Some(*exponent),
            _ => None,
        }
    }
}

fn parse_exponent(text: &str) -> Option<i64> {
    let digits = text.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse::<i64>().ok()
}

/// Drops `_` group separators. Each one must sit between two digits.
fn strip_digit_separators(text: &str) -> Option<Cow<'_, str>> {
    if !text.contains('_') {
        return Some(Cow::Borrowed(text));
    }
    let bytes = text.as_bytes();
    let separated = bytes.iter().enumerate().all(|(i, b)| {
        *b != b'_'
            || (i > 0
                && bytes[i - 1].is_ascii_digit()
                && bytes.get(i + 1).is_some_and(|next| next.is_ascii_digit()))
    });
    separated.then(|| Cow::Owned(text.replace('_', "")))
}

impl FromStr for Decimal {
    type Err = SerializeError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || SerializeError::InvalidDecimal {
            literal: s.to_string(),
        };

        let cleaned = strip_digit_separators(s.trim()).ok_or_else(invalid)?;
        let text: &str = &cleaned;
        let (negative, body) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };

        let lower = body.to_ascii_lowercase();
        if lower == "inf" || lower == "infinity" {
            return Ok(Self {
                negative,
                repr: Repr::Infinity,
            });
        }

        let nan = match lower.strip_prefix("snan") {
            Some(rest) => Some((true, rest)),
            None => lower.strip_prefix("nan").map(|rest| (false, rest)),
        };
        if let Some((signaling, payload)) = nan {
            if !payload.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            return Ok(Self {
                negative,
                repr: Repr::NaN {
                    signaling,
                    payload: payload.trim_start_matches('0').to_string(),
                },
            });
        }

        let (mantissa, exponent) = match body.find(|c: char| c == 'e' || c == 'E') {
            Some(pos) => (
                &body[..pos],
                parse_exponent(&body[pos + 1..]).ok_or_else(invalid)?,
            ),
            None => (body, 0),
        };

        let (int_part, frac_part) = match mantissa.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (mantissa, ""),
        };

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if int_part.len() + frac_part.len() == 0 || !all_digits(int_part) || !all_digits(frac_part)
        {
            return Err(invalid());
        }

        let combined = format!("{}{}", int_part, frac_part);
        let trimmed = combined.trim_start_matches('0');
        let digits = if trimmed.is_empty() { "0" } else { trimmed };

        let exponent = i64::try_from(frac_part.len())
            .ok()
            .and_then(|len| exponent.checked_sub(len))
            .ok_or_else(invalid)?;

        if !exponent_in_range(digits.len(), exponent) {
            return Err(invalid());
        }

        Ok(Self {
            negative,
            repr: Repr::Finite {
                digits: digits.to_string(),
                exponent,
            },
        })
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }

        let (digits, exponent) = match &self.repr {
            Repr::Infinity => return f.write_str("Infinity"),
            Repr::NaN { signaling, payload } => {
                let tag = if *signaling { "sNaN" } else { "NaN" };
                return write!(f, "{}{}", tag, payload);
            }
            Repr::Finite { digits, exponent } => (digits.as_str(), *exponent),
        };

        // Widened so no exponent and digit count can overflow.
        let len = digits.len() as i128;
        let left_digits = i128::from(exponent) + len;

        // Plain notation only when nothing has to be appended to the coefficient
        // and there are at most five leading zeros after the point.
        let dot_place = if exponent <= 0 && left_digits > -6 {
            left_digits
        } else {
            1
        };

        if dot_place <= 0 {
            f.write_str("0.")?;
            for _ in 0..-dot_place {
                f.write_str("0")?;
            }
            f.write_str(digits)?;
        } else if dot_place >= len {
            f.write_str(digits)?;
            for _ in 0..(dot_place - len) {
                f.write_str("0")?;
            }
        } else {
            let (int_part, frac_part) = digits.split_at(dot_place as usize);
            write!(f, "{}.{}", int_part, frac_part)?;
        }

        if left_digits != dot_place {
            write!(f, "E{:+}", left_digits - dot_place)?;
        }
        Ok(())
    }
}

impl From<rust_decimal::Decimal> for Decimal {
    fn from(value: rust_decimal::Decimal) -> Self {
        Self {
            negative: value.is_sign_negative(),
            repr: Repr::Finite {
                digits: value.mantissa().unsigned_abs().to_string(),
                exponent: -i64::from(value.scale()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(literal: &str) -> String {
        literal.parse::<Decimal>().unwrap().to_string()
    }

    #[test]
    fn test_plain_values_keep_their_scale() {
        assert_eq!(render("10.55"), "10.55");
        assert_eq!(render("42.00"), "42.00");
        assert_eq!(render("0.00"), "0.00");
        assert_eq!(render("-3.1"), "-3.1");
        assert_eq!(render("+7"), "7");
        assert_eq!(render("007.50"), "7.50");
        assert_eq!(render(".5"), "0.5");
        assert_eq!(render("5."), "5");
        assert_eq!(
            render("12345.67890123456789012345"),
            "12345.67890123456789012345"
        );
    }

    #[test]
    fn test_scientific_notation_is_not_normalized() {
        assert_eq!(render("1E+2"), "1E+2");
        assert_eq!(render("1e2"), "1E+2");
        assert_eq!(render("12.5E+3"), "1.25E+4");
        assert_eq!(render("1E-7"), "1E-7");
        assert_eq!(render("0.0000001"), "1E-7");
        assert_eq!(render("0.000001"), "0.000001");
        assert_eq!(render("0E-7"), "0E-7");
        assert_eq!(render("100E-2"), "1.00");
    }

    #[test]
    fn test_signed_zero_and_specials() {
        assert_eq!(render("-0"), "-0");
        assert_eq!(render("-0.0"), "-0.0");
        assert_eq!(render("Infinity"), "Infinity");
        assert_eq!(render("-inf"), "-Infinity");
        assert_eq!(render("nan"), "NaN");
        assert_eq!(render("sNaN"), "sNaN");
        assert_eq!(render("NaN0012"), "NaN12");
        assert!(render("-NaN").starts_with('-'));
    }

    #[test]
    fn test_invalid_literals() {
        for literal in ["", "abc", "1.2.3", "1E", "1E+", "--1", ".", "NaNx", "1,5"] {
            assert!(
                literal.parse::<Decimal>().is_err(),
                "{:?} should be rejected",
                literal
            );
        }
    }

    #[test]
    fn test_accessors() {
        let value: Decimal = "-12.340".parse().unwrap();
        assert!(value.is_finite());
        assert!(value.is_sign_negative());
        assert_eq!(value.coefficient(), Some("12340"));
        assert_eq!(value.exponent(), Some(-3));

        let nan: Decimal = "NaN".parse().unwrap();
        assert!(nan.is_nan());
        assert_eq!(nan.coefficient(), None);
    }

    #[test]
    fn test_from_parts() {
        assert_eq!(Decimal::from_parts(4200, -2).unwrap().to_string(), "42.00");
        assert_eq!(Decimal::from_parts(-5, 3).unwrap().to_string(), "-5E+3");
        assert!(Decimal::from_parts(1, i64::MAX).is_err());
        assert!(Decimal::from_parts(10, MAX_ADJUSTED_EXPONENT).is_err());
        assert!(Decimal::from_parts(1, i64::MIN).is_err());
    }

    #[test]
    fn test_exponent_limits() {
        assert_eq!(render("1E999999999999999999"), "1E+999999999999999999");
        assert_eq!(render("1.5E999999999999999999"), "1.5E+999999999999999999");
        assert_eq!(render("100E999999999999999997"), "1.00E+999999999999999999");
        assert_eq!(render("0E999999999999999999"), "0E+999999999999999999");
        assert_eq!(render("1E-1999999999999999997"), "1E-1999999999999999997");
        assert_eq!(render("123E-1999999999999999997"), "1.23E-1999999999999999995");

        for literal in [
            "1E9223372036854775807",
            "1E1000000000000000000",
            "12345E999999999999999999",
            "100E999999999999999998",
            "1E-1999999999999999998",
            "1E-9223372036854775808",
        ] {
            assert!(
                matches!(
                    literal.parse::<Decimal>(),
                    Err(SerializeError::InvalidDecimal { .. })
                ),
                "{:?} should be rejected",
                literal
            );
        }
    }

    #[test]
    fn test_digit_group_separators() {
        assert_eq!(render("1_000"), "1000");
        assert_eq!(render("1_0.0_1"), "10.01");
        assert_eq!(render("-2_500.00"), "-2500.00");
        assert_eq!(render("1E1_0"), "1E+10");
        assert_eq!(render("NaN1_2"), "NaN12");

        for literal in ["_1", "1_", "1__000", "1_.5", "1._5", "1_E2", "-_1"] {
            assert!(
                literal.parse::<Decimal>().is_err(),
                "{:?} should be rejected",
                literal
            );
        }
    }

    #[test]
    fn test_from_rust_decimal_keeps_scale() {
        let value = rust_decimal::Decimal::new(4200, 2);
        assert_eq!(Decimal::from(value).to_string(), "42.00");

        let tiny = rust_decimal::Decimal::new(1, 7);
        assert_eq!(Decimal::from(tiny).to_string(), "1E-7");

        let negative = rust_decimal::Decimal::new(-1999, 2);
        assert_eq!(Decimal::from(negative).to_string(), "-19.99");
    }
}
