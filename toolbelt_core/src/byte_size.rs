//! Byte unit conversion and size string parsing
//!
//! All units are binary: a kilobyte is 1024 bytes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Result;
use crate::error::ValidationError;

const KIB: u64 = 1024;
const MIB: u64 = KIB * 1024;
const GIB: u64 = MIB * 1024;
const TIB: u64 = GIB * 1024;

/// A 1024-based size unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteUnit {
    Kilobyte,
    Megabyte,
    Gigabyte,
    Terabyte,
}

crate::impl_cyclic!(ByteUnit: Kilobyte, Megabyte, Gigabyte, Terabyte);

impl ByteUnit {
    /// Number of bytes in one unit
    pub const fn bytes_per_unit(self) -> u64 {
        match self {
            Self::Kilobyte => KIB,
            Self::Megabyte => MIB,
            Self::Gigabyte => GIB,
            Self::Terabyte => TIB,
        }
    }

    /// Convert an amount of this unit to bytes, `None` on overflow
    pub fn to_bytes(self, amount: u64) -> Option<u64> {
        amount.checked_mul(self.bytes_per_unit())
    }

    /// Express a byte count in this unit
    pub fn from_bytes(self, bytes: u64) -> f64 {
        bytes as f64 / self.bytes_per_unit() as f64
    }

    /// Short suffix, e.g. `MB`
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Kilobyte => "KB",
            Self::Megabyte => "MB",
            Self::Gigabyte => "GB",
            Self::Terabyte => "TB",
        }
    }
}

impl fmt::Display for ByteUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for ByteUnit {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "K" | "KB" | "KIB" => Ok(Self::Kilobyte),
            "M" | "MB" | "MIB" => Ok(Self::Megabyte),
            "G" | "GB" | "GIB" => Ok(Self::Gigabyte),
            "T" | "TB" | "TIB" => Ok(Self::Terabyte),
            _ => Err(ValidationError::invalid_argument(
                "unit",
                &format!("unknown unit '{s}', expected KB, MB, GB or TB"),
            )
            .into()),
        }
    }
}

/// Parse a size such as `4096`, `10MB`, `1.5 GiB` or `512k` into bytes
///
/// Suffixes are case-insensitive and every one of them is 1024-based.
/// Fractional amounts are rounded to the nearest byte.
pub fn parse_size(input: &str) -> Result<u64> {
    let input = input.trim();

    if let Ok(bytes) = input.parse::<u64>() {
        return Ok(bytes);
    }

    let split = input
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(input.len());
    let (number, suffix) = input.split_at(split);

    if number.is_empty() {
        return Err(invalid_size(input, "missing number"));
    }

    let value: f64 = number
        .parse()
        .map_err(|_| invalid_size(input, "malformed number"))?;

    let multiplier = match suffix.trim().to_ascii_uppercase().as_str() {
        "" | "B" => 1,
        other => other
            .parse::<ByteUnit>()
            .map_err(|_| invalid_size(input, &format!("unknown suffix '{}'", suffix.trim())))?
            .bytes_per_unit(),
    };

    let bytes = (value * multiplier as f64).round();
    if !bytes.is_finite() || bytes >= u64::MAX as f64 {
        return Err(invalid_size(input, "value is too large"));
    }

    Ok(bytes as u64)
}

fn invalid_size(input: &str, reason: &str) -> crate::Error {
    ValidationError::invalid_argument("size", &format!("'{input}': {reason}")).into()
}
