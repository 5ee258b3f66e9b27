//! Scenario IDs of the form `LLM-2026-A7F3`
//!
//! The hash covers the usage parameters plus the minute the simulation
//! ran, so the same scenario run a minute later gets a new ID.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, TimeZone, Timelike};
use serde::Serialize;

use crate::engine::{UsageScenario, round_to};

const PREFIX: &str = "LLM";
const HASH_LEN: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioId {
    pub year: u16,
    /// Four uppercase hex digits
    pub hash: String,
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PREFIX}-{:04}-{}", self.year, self.hash)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid scenario ID: {0} (expected LLM-YYYY-XXXX)")]
pub struct ParseScenarioIdError(String);

impl FromStr for ScenarioId {
    type Err = ParseScenarioIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_scenario_id(s).ok_or_else(|| ParseScenarioIdError(s.to_string()))
    }
}

/// Builds the ID for `usage` simulated at `at`, in that instant's own timezone.
pub fn generate_scenario_id<Tz: TimeZone>(usage: &UsageScenario, at: &DateTime<Tz>) -> ScenarioId {
    let hash_input = format!(
        "{}-{}-{}-{}-{}-{}-{}-{}",
        usage.messages_per_day,
        usage.tokens_input_per_message,
        usage.tokens_output_per_message,
        round_to(usage.cache_hit_rate * 100.0, 0) as i64,
        at.month0(),
        at.day(),
        at.hour(),
        at.minute(),
    );

    let hex = format!("{:X}", djb2(&hash_input).unsigned_abs());
    let tail = &hex[hex.len().saturating_sub(HASH_LEN)..];

    ScenarioId {
        year: at.year().clamp(0, 9999) as u16,
        hash: format!("{tail:0>width$}", width = HASH_LEN),
    }
}

/// djb2 over UTF-16 code units with 32-bit wraparound
fn djb2(input: &str) -> i32 {
    input.encode_utf16().fold(5381i32, |hash, unit| {
        (hash << 5).wrapping_add(hash).wrapping_add(i32::from(unit))
    })
}

pub fn parse_scenario_id(s: &str) -> Option<ScenarioId> {
    let mut parts = s.split('-');
    let (Some(PREFIX), Some(year), Some(hash), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };

    let year_ok = year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit());
    let hash_ok = hash.len() == HASH_LEN
        && hash
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b));
    if !year_ok || !hash_ok {
        return None;
    }

    Some(ScenarioId {
        year: year.parse().ok()?,
        hash: hash.to_string(),
    })
}

pub fn is_valid_scenario_id(s: &str) -> bool {
    parse_scenario_id(s).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn usage() -> UsageScenario {
        UsageScenario {
            messages_per_day: 500,
            tokens_input_per_message: 150,
            tokens_output_per_message: 300,
            cache_hit_rate: 0.2,
        }
    }

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn djb2_reference_values() {
        assert_eq!(djb2(""), 5381);
        // 5381 * 33 + 'a'
        assert_eq!(djb2("a"), 177_670);
        // wraps instead of overflowing
        let long = "9".repeat(64);
        let _ = djb2(&long);
    }

    #[test]
    fn generated_ids_are_valid() {
        let id = generate_scenario_id(&usage(), &at(2026, 3, 14, 9, 26, 0));
        assert_eq!(id.year, 2026);
        assert!(is_valid_scenario_id(&id.to_string()));
        assert!(id.to_string().starts_with("LLM-2026-"));
    }

    #[test]
    fn same_minute_same_id() {
        let a = generate_scenario_id(&usage(), &at(2026, 3, 14, 9, 26, 1));
        let b = generate_scenario_id(&usage(), &at(2026, 3, 14, 9, 26, 59));
        assert_eq!(a, b);
    }

    #[test]
    fn matches_reference_hash() {
        let when = at(2026, 3, 14, 9, 26, 0);
        let input = "500-150-300-20-2-14-9-26";
        let hex = format!("{:X}", djb2(input).unsigned_abs());
        let expected = format!("{:0>4}", &hex[hex.len().saturating_sub(4)..]);
        assert_eq!(generate_scenario_id(&usage(), &when).hash, expected);
    }

    #[test]
    fn parse_round_trip() {
        let parsed = parse_scenario_id("LLM-2026-A7F3").unwrap();
        assert_eq!(parsed.year, 2026);
        assert_eq!(parsed.hash, "A7F3");
        assert_eq!(parsed.to_string(), "LLM-2026-A7F3");
        assert_eq!("LLM-2026-A7F3".parse::<ScenarioId>(), Ok(parsed));
    }

    #[test]
    fn rejects_malformed_ids() {
        for bad in [
            "",
            "LLM-2026",
            "LLM-2026-a7f3",
            "LLM-2026-A7F",
            "LLM-2026-A7F3X",
            "LLM-26-A7F3",
            "LLM-2026-G7F3",
            "XYZ-2026-A7F3",
            "LLM-2026-A7F3-00",
            "llm-2026-A7F3",
        ] {
            assert!(!is_valid_scenario_id(bad), "{bad} should be rejected");
        }
        assert!("nope".parse::<ScenarioId>().is_err());
    }
}
