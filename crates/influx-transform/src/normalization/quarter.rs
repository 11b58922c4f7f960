//! Quarter label canonicalization.

use influx_model::Quarter;

/// Rewrites a free-form quarter label to its canonical spelling.
///
/// The value is upper-cased, the word "QUARTER" becomes "Q" and whitespace
/// is removed. Ordinals ("1", "1ST", "FIRST") map to "Q1".."Q4". Anything
/// else, including "Q<digits>" labels, passes through for the caller to
/// filter.
pub fn canonicalize_quarter(raw: &str) -> String {
    let upper = raw.to_uppercase().replace("QUARTER", "Q");
    let compact: String = upper.chars().filter(|ch| !ch.is_whitespace()).collect();
    let canonical = match compact.as_str() {
        "1" | "1ST" | "FIRST" => "Q1",
        "2" | "2ND" | "SECOND" => "Q2",
        "3" | "3RD" | "THIRD" => "Q3",
        "4" | "4TH" | "FOURTH" => "Q4",
        _ => return compact,
    };
    canonical.to_string()
}

/// Canonicalizes and keeps only Q1..Q4.
pub fn parse_quarter(raw: &str) -> Option<Quarter> {
    canonicalize_quarter(raw).parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn maps_ordinals() {
        assert_eq!(canonicalize_quarter("first"), "Q1");
        assert_eq!(canonicalize_quarter("2nd"), "Q2");
        assert_eq!(canonicalize_quarter(" 3 "), "Q3");
        assert_eq!(canonicalize_quarter("Fourth"), "Q4");
    }

    #[test]
    fn quarter_word_becomes_q() {
        assert_eq!(canonicalize_quarter("Quarter 2"), "Q2");
        assert_eq!(canonicalize_quarter("quarter3"), "Q3");
        assert_eq!(canonicalize_quarter("q 4"), "Q4");
    }

    #[test]
    fn canonical_values_are_stable() {
        for quarter in Quarter::ALL {
            assert_eq!(canonicalize_quarter(quarter.as_str()), quarter.as_str());
        }
    }

    #[test]
    fn other_values_pass_through() {
        assert_eq!(canonicalize_quarter("Q5"), "Q5");
        assert_eq!(canonicalize_quarter("Q01"), "Q01");
        assert_eq!(canonicalize_quarter("H1"), "H1");
        assert_eq!(parse_quarter("Q5"), None);
        assert_eq!(parse_quarter(""), None);
        assert_eq!(parse_quarter("1st quarter"), None);
    }

    const SPELLINGS: [[&str; 5]; 4] = [
        ["1", "1st", "first", "q1", "Quarter 1"],
        ["2", "2nd", "second", "q2", "Quarter 2"],
        ["3", "3rd", "third", "q3", "Quarter 3"],
        ["4", "4th", "fourth", "q4", "Quarter 4"],
    ];

    proptest! {
        #[test]
        fn known_spellings_canonicalize_idempotently(
            quarter in 0usize..4,
            spelling in 0usize..5,
            upper in any::<bool>(),
            pad in " {0,2}",
        ) {
            let base = SPELLINGS[quarter][spelling];
            let cased = if upper { base.to_uppercase() } else { base.to_string() };
            let raw = format!("{pad}{cased}{pad}");
            let once = canonicalize_quarter(&raw);
            prop_assert_eq!(once.as_str(), Quarter::ALL[quarter].as_str());
            prop_assert_eq!(canonicalize_quarter(&once), once.clone());
        }
    }
}
