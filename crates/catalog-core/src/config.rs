//! Environment variable parsing shared by the binaries' config loaders.
//!
//! Loaders take a lookup function instead of reading `std::env` directly so
//! they can be exercised with a plain map in tests.

use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Read a variable, treating empty or whitespace-only values as unset.
pub fn env_string<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Parse a variable with `FromStr`; a malformed value is an error.
pub fn env_parse<F, T>(lookup: &F, name: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(v) = env_string(lookup, name) else {
        return Ok(None);
    };
    v.parse::<T>()
        .map(Some)
        .map_err(|e| anyhow!("{name} is invalid ({v}): {e}"))
}

/// Parse a boolean flag (true/false/1/0/yes/no).
pub fn env_bool<F>(lookup: &F, name: &str) -> Result<Option<bool>>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(v) = env_string(lookup, name) else {
        return Ok(None);
    };
    match v.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(Some(true)),
        "false" | "0" | "no" | "n" => Ok(Some(false)),
        _ => Err(anyhow!("{name} must be a boolean (true/false/1/0)")),
    }
}

/// Lookup backed by the process environment.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
