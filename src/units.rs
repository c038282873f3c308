//! Byte-size units and human-readable size formatting.
//!
//! The unit table is a fixed, ordered list where each entry is 1024× the
//! previous one:
//!
//! | Label | Exponent | Bytes |
//! |-------|----------|-------|
//! | `B`   | 0 | 1 |
//! | `KB`  | 1 | 1024 |
//! | `MB`  | 2 | 1024² |
//! | …     | … | … |
//! | `YB`  | 8 | 1024⁸ |
//!
//! [`format_size`] turns a raw byte count into a [`DisplaySize`], either
//! picking the largest unit that keeps the value ≥ 1 or using the unit the
//! caller asked for.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A unit from the byte-size table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SizeUnit {
    B,
    KB,
    MB,
    GB,
    TB,
    PB,
    EB,
    ZB,
    YB,
}

/// The unit table: `(unit, label, power-of-1024 exponent)`, smallest first.
pub const UNIT_TABLE: [(SizeUnit, &str, u32); 9] = [
    (SizeUnit::B, "B", 0),
    (SizeUnit::KB, "KB", 1),
    (SizeUnit::MB, "MB", 2),
    (SizeUnit::GB, "GB", 3),
    (SizeUnit::TB, "TB", 4),
    (SizeUnit::PB, "PB", 5),
    (SizeUnit::EB, "EB", 6),
    (SizeUnit::ZB, "ZB", 7),
    (SizeUnit::YB, "YB", 8),
];

impl SizeUnit {
    fn entry(self) -> &'static (SizeUnit, &'static str, u32) {
        &UNIT_TABLE[self as usize]
    }

    /// Position in the unit table, which is also the power of 1024.
    pub fn exponent(self) -> u32 {
        self.entry().2
    }

    pub fn label(self) -> &'static str {
        self.entry().1
    }

    /// Unit at a given table index, if it exists.
    pub fn from_exponent(exponent: u32) -> Option<Self> {
        UNIT_TABLE
            .iter()
            .find(|(_, _, exp)| *exp == exponent)
            .map(|(unit, _, _)| *unit)
    }

    /// Number of bytes in one of this unit, saturating at `u64::MAX`.
    ///
    /// ZB and YB do not fit in a `u64`.
    pub fn bytes(self) -> u64 {
        1024u64.checked_pow(self.exponent()).unwrap_or(u64::MAX)
    }

    /// Convert `count` of this unit into bytes, saturating at `u64::MAX`.
    pub fn to_bytes(self, count: u64) -> u64 {
        count.saturating_mul(self.bytes())
    }
}

impl fmt::Display for SizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("size type should be one of: B, KB, MB, GB, TB, PB, EB, ZB, YB (got '{0}')")]
pub struct UnknownUnit(pub String);

impl FromStr for SizeUnit {
    type Err = UnknownUnit;

    /// Case-insensitive lookup by label (`"kb"`, `"Kb"`, `"KB"` are all KB).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        UNIT_TABLE
            .iter()
            .find(|(_, label, _)| label.eq_ignore_ascii_case(wanted))
            .map(|(unit, _, _)| *unit)
            .ok_or_else(|| UnknownUnit(s.to_string()))
    }
}

/// Parse an optional unit token. Empty or whitespace-only means "auto".
pub fn parse_optional_unit(token: Option<&str>) -> Result<Option<SizeUnit>, UnknownUnit> {
    match token.map(str::trim) {
        None | Some("") => Ok(None),
        Some(t) => t.parse().map(Some),
    }
}

/// A byte count scaled into a unit for display, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplaySize {
    pub value: f64,
    pub unit: SizeUnit,
}

impl fmt::Display for DisplaySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// Largest unit whose magnitude does not exceed `bytes`. `bytes` must be > 0.
fn auto_unit(bytes: u64) -> SizeUnit {
    let mut exponent = 0;
    let mut threshold: u64 = 1024;
    while bytes >= threshold {
        exponent += 1;
        match threshold.checked_mul(1024) {
            Some(next) => threshold = next,
            None => break,
        }
    }
    SizeUnit::from_exponent(exponent).unwrap_or(SizeUnit::YB)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Convert a raw byte count into a human-readable size.
///
/// - `0` bytes is always `0 B`, whatever unit was asked for.
/// - With `unit = None` the largest unit keeping the value ≥ 1 is chosen.
/// - With an explicit unit that unit is used as-is, even if the value ends
///   up tiny (`0.01 GB`) or huge (`1500 B`).
pub fn format_size(bytes: u64, unit: Option<SizeUnit>) -> DisplaySize {
    if bytes == 0 {
        return DisplaySize {
            value: 0.0,
            unit: SizeUnit::B,
        };
    }
    let unit = unit.unwrap_or_else(|| auto_unit(bytes));
    let divisor = 1024f64.powi(unit.exponent() as i32);
    DisplaySize {
        value: round2(bytes as f64 / divisor),
        unit,
    }
}

/// Maximum acceptable output size plus the unit sizes are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeBudget {
    pub bytes: u64,
    /// `None` auto-selects a unit per reported size.
    pub display_unit: Option<SizeUnit>,
}

impl SizeBudget {
    /// Build a budget from the `-s` amount and optional `-t` unit.
    ///
    /// With `scale_with_unit` the amount is counted in `unit` (`500 KB` is
    /// 512 000 bytes); otherwise it is always raw bytes and the unit only
    /// affects display.
    pub fn new(amount: u64, unit: Option<SizeUnit>, scale_with_unit: bool) -> Self {
        let bytes = match unit {
            Some(unit) if scale_with_unit => unit.to_bytes(amount),
            _ => amount,
        };
        Self {
            bytes,
            display_unit: unit,
        }
    }

    /// Format a byte count in this budget's display unit.
    pub fn display(&self, bytes: u64) -> DisplaySize {
        format_size(bytes, self.display_unit)
    }
}

impl fmt::Display for SizeBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display(self.bytes))
    }
}
