use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::WorldError;

/// Survival and birth neighbor-count sets.
///
/// No validation is applied: an empty set simply never matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rules {
    /// Counts under which a live cell survives.
    pub environment: BTreeSet<usize>,
    /// Counts under which a dead cell is born.
    pub fertility: BTreeSet<usize>,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            environment: BTreeSet::from([2, 3]),
            fertility: BTreeSet::from([2]),
        }
    }
}

impl Rules {
    pub fn new(
        environment: impl IntoIterator<Item = usize>,
        fertility: impl IntoIterator<Item = usize>,
    ) -> Self {
        Self {
            environment: environment.into_iter().collect(),
            fertility: fertility.into_iter().collect(),
        }
    }

    #[inline]
    pub fn survives(&self, count: usize) -> bool {
        self.environment.contains(&count)
    }

    #[inline]
    pub fn is_born(&self, count: usize) -> bool {
        self.fertility.contains(&count)
    }

    /// Add `count` to the environment rule, or remove it if present.
    pub fn toggle_environment(&mut self, count: usize) {
        toggle(&mut self.environment, count);
    }

    /// Add `count` to the fertility rule, or remove it if present.
    pub fn toggle_fertility(&mut self, count: usize) {
        toggle(&mut self.fertility, count);
    }

    /// Some count needs more than one digit.
    fn is_wide(&self) -> bool {
        self.environment.iter().chain(&self.fertility).any(|&n| n > 9)
    }
}

fn toggle(set: &mut BTreeSet<usize>, count: usize) {
    if !set.remove(&count) {
        set.insert(count);
    }
}

/// One digit per count, e.g. `"23"`.
fn parse_digits(s: &str) -> Option<BTreeSet<usize>> {
    s.chars()
        .map(|c| c.to_digit(10).map(|d| d as usize))
        .collect()
}

/// Comma-separated counts, e.g. `"2,10"`; empty pieces are skipped.
fn parse_list(s: &str) -> Option<BTreeSet<usize>> {
    s.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(|piece| piece.parse().ok())
        .collect()
}

fn write_list(f: &mut fmt::Formatter<'_>, counts: &BTreeSet<usize>) -> fmt::Result {
    for (k, n) in counts.iter().enumerate() {
        if k > 0 {
            f.write_str(",")?;
        }
        write!(f, "{n}")?;
    }
    Ok(())
}

impl FromStr for Rules {
    type Err = WorldError;

    /// Parse `"<environment>/<fertility>"`.
    ///
    /// Without a comma anywhere, each side is one digit per count (`"23/2"`).
    /// With a comma, each side is a comma-separated list (`"2,10/12,"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || WorldError::InvalidRuleNotation(s.to_string());
        let s = s.trim();
        let (environment, fertility) = s.split_once('/').ok_or_else(invalid)?;
        let parse = if s.contains(',') { parse_list } else { parse_digits };
        Ok(Self {
            environment: parse(environment).ok_or_else(invalid)?,
            fertility: parse(fertility).ok_or_else(invalid)?,
        })
    }
}

impl fmt::Display for Rules {
    /// Compact digits while every count is below 10, comma lists otherwise.
    /// A comma list always holds at least one comma; a trailing one is added
    /// when both sides have a single count.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_wide() {
            for n in &self.environment {
                write!(f, "{n}")?;
            }
            f.write_str("/")?;
            for n in &self.fertility {
                write!(f, "{n}")?;
            }
            return Ok(());
        }
        write_list(f, &self.environment)?;
        f.write_str("/")?;
        write_list(f, &self.fertility)?;
        if self.environment.len() < 2 && self.fertility.len() < 2 {
            f.write_str(",")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = Rules::default();
        assert!(rules.survives(2) && rules.survives(3));
        assert!(!rules.survives(0) && !rules.survives(4));
        assert!(rules.is_born(2));
        assert!(!rules.is_born(3));
    }

    #[test]
    fn test_toggle() {
        let mut rules = Rules::default();
        rules.toggle_environment(3);
        assert_eq!(rules.environment, BTreeSet::from([2]));
        rules.toggle_environment(3);
        assert_eq!(rules.environment, BTreeSet::from([2, 3]));
        rules.toggle_fertility(5);
        assert_eq!(rules.fertility, BTreeSet::from([2, 5]));
    }

    #[test]
    fn test_parse() {
        let rules: Rules = "345/34".parse().unwrap();
        assert_eq!(rules, Rules::new([3, 4, 5], [3, 4]));
        let empty: Rules = "/".parse().unwrap();
        assert!(empty.environment.is_empty() && empty.fertility.is_empty());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!("23".parse::<Rules>(), Err(WorldError::InvalidRuleNotation(_))));
        assert!("2a/3".parse::<Rules>().is_err());
        assert!("23/2/1".parse::<Rules>().is_err());
    }

    #[test]
    fn test_parse_comma_lists() {
        let rules: Rules = "2,10/12,".parse().unwrap();
        assert_eq!(rules, Rules::new([2, 10], [12]));
        let rules: Rules = " 3 , 4/ ".parse().unwrap();
        assert_eq!(rules, Rules::new([3, 4], []));
        assert!("1x,2/3".parse::<Rules>().is_err());
    }

    #[test]
    fn test_multi_digit_counts_round_trip() {
        for rules in [
            Rules::new([10], [12]),
            Rules::new([2, 3, 10], [2]),
            Rules::new([], [11, 12]),
            Rules::new([10], []),
        ] {
            let text = rules.to_string();
            assert_eq!(text.parse::<Rules>().unwrap(), rules, "via {text}");
        }
        assert_eq!(Rules::new([10], [12]).to_string(), "10/12,");
        assert_eq!(Rules::new([2, 10], [2]).to_string(), "2,10/2");
    }

    #[test]
    fn test_display_matches_parse() {
        let rules = Rules::new([3, 2], [2]);
        assert_eq!(rules.to_string(), "23/2");
        assert_eq!(rules.to_string().parse::<Rules>().unwrap(), rules);
    }
}
