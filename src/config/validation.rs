use crate::config::types::{CrawlConfig, Region, Split, WeekSpec};
use crate::{ConfigError, HarvestError};
use toml::{Table, Value};

/// Name of the mandatory configuration table
pub const DEFAULT_INIT: &str = "default-init";

/// Keys that must appear, and only appear, in [`DEFAULT_INIT`]
const REQUIRED_KEYS: [&str; 3] = ["region", "split", "week"];

/// Validates a parsed configuration document and resolves it into a [`CrawlConfig`]
pub fn validate(document: &Table) -> Result<CrawlConfig, HarvestError> {
    let init = validate_default_init(document)?;
    let extra = collect_extras(document);

    let region: Region = init["region"].parse()?;
    let split: Split = init["split"].parse()?;
    let flag = parse_flag(extra.get("flag"))?;
    let week = resolve_week(&init["week"], flag)?;

    let mut config = CrawlConfig::new(region, split, week);
    config.base_url = parse_base_url(extra.get("base-url"))?;
    config.year = parse_year(extra.get("year"))?;

    for key in extra.keys() {
        if !matches!(key.as_str(), "base-url" | "year" | "flag") {
            tracing::debug!("Ignoring unrecognised config key '{}'", key);
        }
    }

    Ok(config)
}

/// Checks the mandatory table and returns its three values as strings
///
/// The table must hold exactly `region`, `split` and `week`, none of them empty.
fn validate_default_init(
    document: &Table,
) -> Result<std::collections::HashMap<&'static str, String>, ConfigError> {
    let section = document
        .get(DEFAULT_INIT)
        .and_then(Value::as_table)
        .ok_or_else(|| ConfigError::MissingSection(DEFAULT_INIT.to_string()))?;

    if section.len() > REQUIRED_KEYS.len() {
        return Err(ConfigError::Validation(format!(
            "[{}] has extra items in it: expected exactly {:?}, got {} keys",
            DEFAULT_INIT,
            REQUIRED_KEYS,
            section.len()
        )));
    }

    let mut values = std::collections::HashMap::new();
    for key in REQUIRED_KEYS {
        let value = section.get(key).ok_or_else(|| {
            ConfigError::Validation(format!("[{}] is missing '{}'", DEFAULT_INIT, key))
        })?;

        let text = scalar_to_string(value).ok_or_else(|| {
            ConfigError::Validation(format!(
                "[{}] '{}' must be a string or integer",
                DEFAULT_INIT, key
            ))
        })?;

        if text.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "[{}] '{}' cannot be empty",
                DEFAULT_INIT, key
            )));
        }

        values.insert(key, text);
    }

    Ok(values)
}

/// Flattens every table other than [`DEFAULT_INIT`] into one set of extra keys
///
/// Empty string values are dropped, so an empty `base-url = ""` behaves as unset.
fn collect_extras(document: &Table) -> Table {
    let mut extra = Table::new();

    for (name, value) in document {
        if name == DEFAULT_INIT {
            continue;
        }
        let Some(section) = value.as_table() else {
            tracing::debug!("Ignoring top-level key '{}' outside any table", name);
            continue;
        };
        for (key, value) in section {
            if matches!(value, Value::String(s) if s.is_empty()) {
                continue;
            }
            extra.insert(key.clone(), value.clone());
        }
    }

    extra
}

/// Resolves the configured week token into a [`WeekSpec`]
///
/// A numeric token is a single week, or weeks one through that number when
/// `flag` is set. `all` and `playoffs` select every week or every bracket;
/// anything else names a single playoff bracket.
pub fn resolve_week(raw: &str, flag: bool) -> Result<WeekSpec, HarvestError> {
    let token = raw.trim();

    if let Some(week) = parse_week_number(token)? {
        if !flag {
            return Ok(WeekSpec::Single(week));
        }
        if week == 0 {
            return Err(HarvestError::WeekResolution(
                "a week range must end at week 1 or later".to_string(),
            ));
        }
        return Ok(WeekSpec::up_to(week));
    }

    match token.to_lowercase().as_str() {
        "all" => Ok(WeekSpec::All),
        "playoffs" => Ok(WeekSpec::Playoffs),
        _ => Ok(WeekSpec::Named(raw.to_string())),
    }
}

/// Parses a numeric week token, returning `None` for non-numeric tokens
fn parse_week_number(token: &str) -> Result<Option<u32>, HarvestError> {
    let digits = token.strip_prefix(['+', '-']).unwrap_or(token);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Ok(None);
    }

    if token.starts_with('-') {
        return Err(HarvestError::WeekResolution(format!(
            "week '{}' cannot be negative",
            token
        )));
    }

    digits
        .parse::<u32>()
        .map(Some)
        .map_err(|e| HarvestError::WeekResolution(format!("week '{}' is invalid: {}", token, e)))
}

fn parse_flag(value: Option<&Value>) -> Result<bool, ConfigError> {
    match value {
        None => Ok(false),
        Some(Value::Boolean(flag)) => Ok(*flag),
        Some(Value::String(flag)) => Ok(flag.trim().eq_ignore_ascii_case("true")),
        Some(other) => Err(ConfigError::Validation(format!(
            "'flag' must be a boolean, got {}",
            other.type_str()
        ))),
    }
}

fn parse_base_url(value: Option<&Value>) -> Result<Option<String>, ConfigError> {
    match value {
        None => Ok(None),
        Some(Value::String(base)) => Ok(Some(base.clone())),
        Some(other) => Err(ConfigError::InvalidBaseExtension(format!(
            "expected a string, got {}",
            other.type_str()
        ))),
    }
}

fn parse_year(value: Option<&Value>) -> Result<Option<i32>, ConfigError> {
    let year = match value {
        None => return Ok(None),
        Some(Value::Integer(year)) => i32::try_from(*year).ok(),
        Some(Value::String(year)) => year.trim().parse::<i32>().ok(),
        Some(_) => None,
    };

    year.map(Some)
        .ok_or_else(|| ConfigError::Validation(format!("'year' must be a year, got {:?}", value)))
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Integer(i) => Some(i.to_string()),
        _ => None,
    }
}
