//! Partially-typed numeric input for allocation amounts.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::common::finite_or_zero;

/// Raw amount text as typed by the user, paired with its numeric reading.
///
/// The raw text may be transiently incomplete (`""`, `"."`, `"12."`). Every
/// arithmetic use goes through [`AmountInput::to_number`], which reads blank
/// and `"."`-only input as zero and never yields NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct AmountInput {
    raw: String,
    value: f64,
}

impl AmountInput {
    /// Parses input that may only contain digits and a single decimal point.
    pub fn parse(raw: impl Into<String>) -> Result<Self, AmountInputError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if let Some(invalid) = trimmed.chars().find(|ch| !ch.is_ascii_digit() && *ch != '.') {
            return Err(AmountInputError::InvalidCharacter(invalid));
        }
        if trimmed.matches('.').count() > 1 {
            return Err(AmountInputError::MultipleDecimalPoints);
        }
        let value = match trimmed {
            "" | "." => 0.0,
            digits => digits
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or(AmountInputError::OutOfRange)?,
        };
        Ok(Self { raw, value })
    }

    /// Keeps digits and the first decimal point, dropping everything else.
    pub fn sanitize(raw: &str) -> Self {
        let mut cleaned = String::with_capacity(raw.len());
        let mut seen_point = false;
        for ch in raw.chars() {
            if ch.is_ascii_digit() {
                cleaned.push(ch);
            } else if ch == '.' && !seen_point {
                cleaned.push(ch);
                seen_point = true;
            }
        }
        let value = read_number(&cleaned);
        Self {
            raw: cleaned,
            value,
        }
    }

    /// Builds an input from an already-numeric amount.
    pub fn from_value(value: f64) -> Self {
        let value = finite_or_zero(value).max(0.0);
        Self {
            raw: format!("{value}"),
            value,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Numeric reading used for every calculation.
    pub fn to_number(&self) -> f64 {
        self.value
    }

    /// `true` while the field holds nothing numeric yet (`""` or `"."`).
    pub fn is_blank(&self) -> bool {
        matches!(self.raw.trim(), "" | ".")
    }
}

impl Default for AmountInput {
    fn default() -> Self {
        Self {
            raw: String::new(),
            value: 0.0,
        }
    }
}

impl fmt::Display for AmountInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn read_number(text: &str) -> f64 {
    if text.is_empty() || text == "." {
        return 0.0;
    }
    finite_or_zero(text.parse::<f64>().unwrap_or(0.0))
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Errors raised by [`AmountInput::parse`].
pub enum AmountInputError {
    InvalidCharacter(char),
    MultipleDecimalPoints,
    OutOfRange,
}

impl fmt::Display for AmountInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountInputError::InvalidCharacter(ch) => {
                write!(f, "amount contains invalid character `{ch}`")
            }
            AmountInputError::MultipleDecimalPoints => {
                f.write_str("amount contains more than one decimal point")
            }
            AmountInputError::OutOfRange => f.write_str("amount is too large"),
        }
    }
}

impl std::error::Error for AmountInputError {}

impl Serialize for AmountInput {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.raw)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredAmount {
    Number(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for AmountInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match StoredAmount::deserialize(deserializer)? {
            StoredAmount::Number(value) => AmountInput::from_value(value),
            StoredAmount::Text(text) => AmountInput::sanitize(&text),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_lone_point_read_as_zero() {
        for raw in ["", ".", "   "] {
            let input = AmountInput::parse(raw).expect("valid partial input");
            assert_eq!(input.to_number(), 0.0);
            assert!(input.is_blank());
        }
    }

    #[test]
    fn partial_decimal_keeps_raw_text() {
        let input = AmountInput::parse("12.").unwrap();
        assert_eq!(input.raw(), "12.");
        assert_eq!(input.to_number(), 12.0);

        let input = AmountInput::parse(".5").unwrap();
        assert_eq!(input.to_number(), 0.5);
    }

    #[test]
    fn parse_rejects_letters_and_second_point() {
        assert_eq!(
            AmountInput::parse("12a"),
            Err(AmountInputError::InvalidCharacter('a'))
        );
        assert_eq!(
            AmountInput::parse("-5"),
            Err(AmountInputError::InvalidCharacter('-'))
        );
        assert_eq!(
            AmountInput::parse("1.2.3"),
            Err(AmountInputError::MultipleDecimalPoints)
        );
    }

    #[test]
    fn raw_text_is_kept_as_typed() {
        let input = AmountInput::parse(" 12. ").unwrap();
        assert_eq!(input.raw(), " 12. ");
        assert_eq!(input.to_number(), 12.0);
    }

    #[test]
    fn amounts_beyond_f64_are_rejected() {
        let huge = "9".repeat(400);
        assert_eq!(AmountInput::parse(huge), Err(AmountInputError::OutOfRange));
    }

    #[test]
    fn sanitize_strips_disallowed_characters() {
        let input = AmountInput::sanitize("$1,250.50.7");
        assert_eq!(input.raw(), "1250.507");
        assert!((input.to_number() - 1250.507).abs() < 1e-9);
    }

    #[test]
    fn deserializes_from_number_or_string() {
        let from_number: AmountInput = serde_json::from_str("2500").unwrap();
        assert_eq!(from_number.to_number(), 2500.0);
        assert_eq!(from_number.raw(), "2500");

        let from_text: AmountInput = serde_json::from_str("\".\"").unwrap();
        assert_eq!(from_text.to_number(), 0.0);
        assert_eq!(from_text.raw(), ".");

        let json = serde_json::to_string(&from_number).unwrap();
        assert_eq!(json, "\"2500\"");
    }
}
