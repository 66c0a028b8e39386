use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

/// Number of weeks in the curriculum (`S1`..`S24`).
pub const WEEK_COUNT: u32 = 24;

/// Number of blocks in the curriculum (`B1`..`B5`, with optional `A`/`B` halves).
pub const BLOCK_COUNT: u32 = 5;

pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

pub fn normalize_tag(raw: &str) -> String {
    raw.trim().to_uppercase()
}

pub fn normalize_topic(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Parses a week tag such as `s7` or `S07` into its canonical form `S7`.
pub fn parse_week(raw: &str) -> Result<String, String> {
    let tag = normalize_tag(raw);
    let digits = tag
        .strip_prefix('S')
        .ok_or_else(|| format!("invalid week '{}' (use S1..S{})", raw.trim(), WEEK_COUNT))?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!(
            "invalid week '{}' (use S1..S{})",
            raw.trim(),
            WEEK_COUNT
        ));
    }

    let number: u32 = digits
        .parse()
        .map_err(|_| format!("invalid week '{}' (use S1..S{})", raw.trim(), WEEK_COUNT))?;
    if !(1..=WEEK_COUNT).contains(&number) {
        return Err(format!(
            "week '{}' out of range (1..{})",
            raw.trim(),
            WEEK_COUNT
        ));
    }

    Ok(format!("S{}", number))
}

/// Parses a block tag such as `b5a` into `B5A`.
pub fn parse_block(raw: &str) -> Result<String, String> {
    let tag = normalize_tag(raw);
    let invalid = || format!("invalid block '{}' (use B1..B{}[A|B])", raw.trim(), BLOCK_COUNT);

    let rest = tag.strip_prefix('B').ok_or_else(invalid)?;
    let mut chars = rest.chars();
    let number = chars
        .next()
        .and_then(|c| c.to_digit(10))
        .ok_or_else(invalid)?;
    if !(1..=BLOCK_COUNT).contains(&number) {
        return Err(invalid());
    }

    match chars.as_str() {
        "" | "A" | "B" => Ok(tag),
        _ => Err(invalid()),
    }
}

pub fn is_week_tag(raw: &str) -> bool {
    parse_week(raw).map(|w| w == raw).unwrap_or(false)
}

pub fn is_block_tag(raw: &str) -> bool {
    parse_block(raw).map(|b| b == raw).unwrap_or(false)
}

pub fn all_weeks() -> Vec<String> {
    (1..=WEEK_COUNT).map(|i| format!("S{}", i)).collect()
}

/// Expands an inclusive week range, e.g. `S10`..`S14`.
pub fn weeks_from_range(from: &str, to: &str) -> Result<Vec<String>, String> {
    let first = week_number(&parse_week(from)?);
    let last = week_number(&parse_week(to)?);
    if first > last {
        return Err(format!(
            "inverted range {}..{} (FROM must not come after TO)",
            from.trim(),
            to.trim()
        ));
    }
    Ok((first..=last).map(|i| format!("S{}", i)).collect())
}

fn week_number(canonical: &str) -> u32 {
    canonical[1..].parse().unwrap_or(0)
}

pub fn backup_timestamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format(BACKUP_TIMESTAMP_FORMAT).to_string()
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        _ => None,
    }
}

/// Reads a required scalar as a string, so numeric ids still load.
pub fn de_scalar<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    scalar_to_string(&value).ok_or_else(|| serde::de::Error::custom("expected a string value"))
}

/// Reads an optional scalar (string, number or bool) as a string. Anything
/// else, including blank strings, becomes `None`.
pub fn de_opt_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(&value).filter(|s| !s.trim().is_empty()))
}

/// Reads a tag list leniently: a sequence of scalars, a single scalar or
/// nothing at all. Malformed values are treated as an empty list.
pub fn de_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let tags = match value {
        Value::Sequence(items) => items.iter().filter_map(scalar_to_string).collect(),
        other => scalar_to_string(&other).into_iter().collect(),
    };
    Ok(tags)
}

/// Reads a label → offset mapping, keeping file order.
pub fn de_timestamps<'de, D>(deserializer: D) -> Result<IndexMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let mut out = IndexMap::new();
    if let Value::Mapping(map) = value {
        for (label, offset) in map.iter() {
            if let (Some(label), Some(offset)) = (scalar_to_string(label), scalar_to_string(offset))
            {
                out.insert(label, offset);
            }
        }
    }
    Ok(out)
}

/// Treats an explicit `null` like a missing field.
pub fn de_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
