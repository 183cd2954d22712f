//! Price data and native → reference currency conversion.
//!
//! The feed's `updated_at` is reported as-is. Nothing here assumes the
//! datum is fresh; callers opt into a freshness bound with `check_age`.

use serde::{Deserialize, Deserializer};

use crate::errors::{OracleError, Result};

/// Latest datum from a price feed.
///
/// `answer` is the price of one native unit in the reference currency,
/// scaled by `10^decimals`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PriceDatum {
    #[serde(deserialize_with = "de_i128")]
    pub answer: i128,
    pub decimals: u32,
    pub updated_at: u64,
}

impl PriceDatum {
    pub fn validate(&self) -> Result<()> {
        if self.answer <= 0 {
            return Err(OracleError::InvalidPrice(self.answer));
        }
        if self.decimals > 30 {
            return Err(OracleError::Feed(format!(
                "unsupported decimals: {}",
                self.decimals
            )));
        }
        Ok(())
    }

    /// Seconds elapsed between `updated_at` and `now` (0 if the feed is
    /// ahead of the local clock).
    pub fn age_secs(&self, now: u64) -> u64 {
        now.saturating_sub(self.updated_at)
    }

    /// Reject the datum if it is older than `max_age_secs`.
    pub fn check_age(&self, now: u64, max_age_secs: u64) -> Result<()> {
        let age_secs = self.age_secs(now);
        if age_secs > max_age_secs {
            return Err(OracleError::StalePrice {
                age_secs,
                max_age_secs,
            });
        }
        Ok(())
    }

    /// Convert `amount` native base units to reference currency, keeping the
    /// native scale (the result has the same number of decimals as `amount`).
    pub fn convert(&self, amount: i128) -> Result<i128> {
        let scale = 10i128
            .checked_pow(self.decimals)
            .ok_or(OracleError::Overflow(amount))?;
        amount
            .checked_mul(self.answer)
            .map(|v| v / scale)
            .ok_or(OracleError::Overflow(amount))
    }

    /// Price of one native unit as a decimal string.
    pub fn display_price(&self) -> String {
        format_units(self.answer, self.decimals)
    }
}

/// Render a fixed-point integer as a decimal string.
pub fn format_units(value: i128, decimals: u32) -> String {
    let sign = if value < 0 { "-" } else { "" };
    let digits = value.unsigned_abs().to_string();
    let decimals = decimals as usize;

    if decimals == 0 {
        return format!("{sign}{digits}");
    }

    let padded = format!("{digits:0>width$}", width = decimals + 1);
    let (whole, frac) = padded.split_at(padded.len() - decimals);
    format!("{sign}{whole}.{frac}")
}

/// Accept i128 values encoded either as JSON numbers or as strings.
///
/// JSON numbers are read over the full `i64` and `u64` ranges; anything
/// wider must arrive as a decimal string, which is how Stellar tooling
/// emits 128-bit amounts.
pub fn de_i128<'de, D>(deserializer: D) -> std::result::Result<i128, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        UInt(u64),
        Str(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Int(v) => Ok(i128::from(v)),
        Raw::UInt(v) => Ok(i128::from(v)),
        Raw::Str(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn datum(answer: i128, decimals: u32, updated_at: u64) -> PriceDatum {
        PriceDatum {
            answer,
            decimals,
            updated_at,
        }
    }

    #[test]
    fn test_deserialize_number_and_string_answers() {
        let a: PriceDatum =
            serde_json::from_str(r#"{"answer": 12345678, "decimals": 8, "updated_at": 10}"#)
                .unwrap();
        let b: PriceDatum = serde_json::from_str(
            r#"{"answer": "12345678", "decimals": 8, "updated_at": 10}"#,
        )
        .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.answer, 12_345_678);

        let bad = serde_json::from_str::<PriceDatum>(
            r#"{"answer": "twelve", "decimals": 8, "updated_at": 10}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_deserialize_answers_beyond_i64() {
        let d: PriceDatum = serde_json::from_str(
            r#"{"answer": 18446744073709551615, "decimals": 8, "updated_at": 18446744073709551615}"#,
        )
        .unwrap();
        assert_eq!(d.answer, i128::from(u64::MAX));
        assert_eq!(d.updated_at, u64::MAX);

        let d: PriceDatum = serde_json::from_str(
            r#"{"answer": "170141183460469231731687303715884105727", "decimals": 8, "updated_at": 1}"#,
        )
        .unwrap();
        assert_eq!(d.answer, i128::MAX);

        let d: PriceDatum =
            serde_json::from_str(r#"{"answer": -5, "decimals": 8, "updated_at": 1}"#).unwrap();
        assert_eq!(d.answer, -5);
    }

    #[test]
    fn test_validate() {
        assert!(datum(1, 8, 0).validate().is_ok());
        assert!(matches!(
            datum(0, 8, 0).validate(),
            Err(OracleError::InvalidPrice(0))
        ));
        assert!(datum(1, 31, 0).validate().is_err());
    }

    #[test]
    fn test_check_age() {
        let d = datum(1, 8, 1_000);
        assert!(d.check_age(1_060, 60).is_ok());
        assert!(matches!(
            d.check_age(1_061, 60),
            Err(OracleError::StalePrice {
                age_secs: 61,
                max_age_secs: 60
            })
        ));
        // Feed clock ahead of ours counts as fresh.
        assert_eq!(d.age_secs(900), 0);
    }

    #[test]
    fn test_convert() {
        // 0.12 reference per native unit; 2 XLM -> 0.24.
        let d = datum(12_000_000, 8, 0);
        assert_eq!(d.convert(20_000_000).unwrap(), 2_400_000);
        assert!(matches!(d.convert(i128::MAX), Err(OracleError::Overflow(_))));
    }

    #[test]
    fn test_format_units() {
        assert_eq!(format_units(19_000_000, 7), "1.9000000");
        assert_eq!(format_units(5, 7), "0.0000005");
        assert_eq!(format_units(-25, 1), "-2.5");
        assert_eq!(format_units(42, 0), "42");
        assert_eq!(datum(12_000_000, 8, 0).display_price(), "0.12000000");
    }
}
