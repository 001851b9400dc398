//! Human-readable byte sizes for the Size column.
//!
//! Units are powers of 1024. A size is shown in the largest unit it reaches,
//! with exactly two decimals:
//!
//! ```text
//! 0           → 0.00B
//! 1023        → 1023.00B
//! 1024        → 1.00KB
//! 1536        → 1.50KB
//! 1048576     → 1.00MB
//! ```
//!
//! `ZB` and `YB` lie beyond `u64` and are unreachable for real files, but the
//! table carries them so the rule is complete for `u128` inputs.

use std::fmt;

/// Unit suffixes paired with their power-of-1024 exponent, largest first.
const UNITS: &[(&str, u32)] = &[
    ("YB", 8),
    ("ZB", 7),
    ("EB", 6),
    ("PB", 5),
    ("TB", 4),
    ("GB", 3),
    ("MB", 2),
    ("KB", 1),
];

/// A byte count that formats itself for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ByteSize(pub u128);

impl From<u64> for ByteSize {
    fn from(bytes: u64) -> Self {
        Self(u128::from(bytes))
    }
}

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &(suffix, exp) in UNITS {
            let unit = 1u128 << (10 * exp);
            if self.0 >= unit {
                return write!(f, "{:.2}{}", self.0 as f64 / unit as f64, suffix);
            }
        }
        write!(f, "{:.2}B", self.0 as f64)
    }
}
