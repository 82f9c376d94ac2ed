//! Calorie totals
//!
//! Derived per-record (or per-range) figures handed to the presentation layer.

use serde::{Deserialize, Serialize};

/// Consumed, burned and net calories
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalorieTotals {
    pub consumed: u64,
    pub burned: u64,
    /// consumed - burned, may be negative
    pub net: i64,
}

impl CalorieTotals {
    /// Build totals from the two sums
    pub fn new(consumed: u64, burned: u64) -> Self {
        Self {
            consumed,
            burned,
            net: consumed as i64 - burned as i64,
        }
    }

    /// Create totals with all zeros
    pub fn zero() -> Self {
        Self::default()
    }

    /// Net with an explicit sign when not negative: "+250", "+0", "-80"
    pub fn net_display(&self) -> String {
        if self.net >= 0 {
            format!("+{}", self.net)
        } else {
            self.net.to_string()
        }
    }

    /// Whether anything was consumed or burned at all
    pub fn has_activity(&self) -> bool {
        self.consumed > 0 || self.burned > 0
    }
}

impl std::ops::Add for CalorieTotals {
    type Output = CalorieTotals;

    fn add(self, other: CalorieTotals) -> CalorieTotals {
        CalorieTotals::new(self.consumed + other.consumed, self.burned + other.burned)
    }
}

impl std::iter::Sum for CalorieTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(CalorieTotals::zero(), |acc, t| acc + t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_net_display_sign() {
        assert_eq!(CalorieTotals::new(300, 50).net_display(), "+250");
        assert_eq!(CalorieTotals::new(0, 0).net_display(), "+0");
        assert_eq!(CalorieTotals::new(20, 100).net_display(), "-80");
    }

    #[test]
    fn test_sum_recomputes_net() {
        let total: CalorieTotals = vec![CalorieTotals::new(100, 300), CalorieTotals::new(500, 0)]
            .into_iter()
            .sum();
        assert_eq!(total, CalorieTotals::new(600, 300));
        assert_eq!(total.net, 300);
        assert!(total.has_activity());
        assert!(!CalorieTotals::zero().has_activity());
    }
}
