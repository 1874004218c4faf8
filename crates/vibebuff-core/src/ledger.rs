//! XP ledger formulas
//!
//! XP is a monotonic integer balance; level and title are always derived
//! from it. Anything that stores them must recompute through these
//! functions in the same write, never patch them independently.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// XP required per level
pub const XP_PER_LEVEL: u64 = 1000;

/// Level for a given XP balance: `xp / 1000 + 1`
pub fn level_for_xp(xp: u64) -> u32 {
    (xp / XP_PER_LEVEL) as u32 + 1
}

/// Display title for a level
pub fn title_for_level(level: u32) -> &'static str {
    if level >= 50 {
        "Legendary Architect"
    } else if level >= 30 {
        "Master Developer"
    } else if level >= 20 {
        "Senior Engineer"
    } else if level >= 10 {
        "Stack Specialist"
    } else if level >= 5 {
        "Tool Explorer"
    } else if level >= 2 {
        "Apprentice Coder"
    } else {
        "Novice Developer"
    }
}

/// Result of applying an XP award to a balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpGain {
    pub new_xp: u64,
    pub new_level: u32,
    pub leveled_up: bool,
}

/// Apply an award to an XP balance
///
/// `amount` must be positive; zero is a caller error (and negative amounts
/// are unrepresentable). The balance only ever grows through this path.
pub fn apply_xp(xp: u64, amount: u64) -> Result<XpGain> {
    if amount == 0 {
        return Err(Error::ZeroXpAward);
    }
    let new_xp = xp + amount;
    let new_level = level_for_xp(new_xp);
    Ok(XpGain {
        new_xp,
        new_level,
        leveled_up: new_level > level_for_xp(xp),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_formula() {
        assert_eq!(level_for_xp(0), 1);
        assert_eq!(level_for_xp(999), 1);
        assert_eq!(level_for_xp(1000), 2);
        assert_eq!(level_for_xp(12_345), 13);
    }

    #[test]
    fn test_apply_xp_levels_up() {
        let gain = apply_xp(950, 100).unwrap();
        assert_eq!(gain.new_xp, 1050);
        assert_eq!(gain.new_level, 2);
        assert!(gain.leveled_up);

        let gain = apply_xp(1050, 100).unwrap();
        assert_eq!(gain.new_level, 2);
        assert!(!gain.leveled_up);
    }

    #[test]
    fn test_level_invariant_holds_after_any_award() {
        let mut xp = 0;
        for amount in [25, 100, 999, 1, 2500, 25] {
            let gain = apply_xp(xp, amount).unwrap();
            assert_eq!(gain.new_level, level_for_xp(gain.new_xp));
            xp = gain.new_xp;
        }
    }

    #[test]
    fn test_zero_award_rejected() {
        assert!(matches!(apply_xp(100, 0), Err(Error::ZeroXpAward)));
    }

    #[test]
    fn test_titles() {
        assert_eq!(title_for_level(1), "Novice Developer");
        assert_eq!(title_for_level(2), "Apprentice Coder");
        assert_eq!(title_for_level(7), "Tool Explorer");
        assert_eq!(title_for_level(10), "Stack Specialist");
        assert_eq!(title_for_level(49), "Master Developer");
        assert_eq!(title_for_level(50), "Legendary Architect");
    }
}
