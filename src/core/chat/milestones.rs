//! Milestone fractions reported by the chat assistant.

use std::fmt;
use std::str::FromStr;

/// Progress shown before the assistant reports its first milestone.
pub const INITIAL_PROGRESS: u8 = 33;

/// A `"completed/total"` milestone report such as `"2/4"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Milestones {
    pub completed: u32,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MilestoneParseError {
    #[error("Missing '/' in milestone fraction: {0}")]
    MissingSeparator(String),

    #[error("Invalid milestone count '{0}'")]
    InvalidNumber(String),

    #[error("Milestone total is zero")]
    ZeroTotal,
}

impl Milestones {
    /// Percentage rounded half up, clamped to 100.
    pub fn percent(self) -> u8 {
        let n = u64::from(self.completed);
        let m = u64::from(self.total);
        if m == 0 {
            return 0;
        }
        let rounded = (200 * n + m) / (2 * m);
        rounded.min(100) as u8
    }
}

impl FromStr for Milestones {
    type Err = MilestoneParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (left, right) = s
            .trim()
            .split_once('/')
            .ok_or_else(|| MilestoneParseError::MissingSeparator(s.to_string()))?;

        let parse = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| MilestoneParseError::InvalidNumber(part.trim().to_string()))
        };
        let completed = parse(left)?;
        let total = parse(right)?;
        if total == 0 {
            return Err(MilestoneParseError::ZeroTotal);
        }
        Ok(Self { completed, total })
    }
}

impl fmt::Display for Milestones {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.completed, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2/4", 50)]
    #[case("0/3", 0)]
    #[case("3/3", 100)]
    #[case("1/3", 33)]
    #[case("2/3", 67)]
    #[case("1/8", 13)]
    #[case(" 1 / 2 ", 50)]
    #[case("5/4", 100)]
    fn test_percent(#[case] input: &str, #[case] expected: u8) {
        let m: Milestones = input.parse().unwrap();
        assert_eq!(m.percent(), expected);
    }

    #[rstest]
    #[case("", MilestoneParseError::MissingSeparator(String::new()))]
    #[case("3", MilestoneParseError::MissingSeparator("3".to_string()))]
    #[case("a/3", MilestoneParseError::InvalidNumber("a".to_string()))]
    #[case("1/-2", MilestoneParseError::InvalidNumber("-2".to_string()))]
    #[case("1/0", MilestoneParseError::ZeroTotal)]
    fn test_parse_errors(#[case] input: &str, #[case] expected: MilestoneParseError) {
        assert_eq!(input.parse::<Milestones>().unwrap_err(), expected);
    }

    #[test]
    fn test_display_round_trips() {
        let m: Milestones = "2/5".parse().unwrap();
        assert_eq!(m.to_string(), "2/5");
    }
}
