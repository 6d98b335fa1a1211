//! Fixed rule table: one entry per vector slot, in slot order.
//!
//! Counting is literal substring search (case-sensitive, non-overlapping,
//! left-to-right). There is no tokenization of the target language; trained
//! weights depend on exactly this behavior.

use super::FEATURE_COUNT;

/// How a slot is measured from the decoded content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    /// Number of Unicode scalar values in the content
    CharCount,
    /// Sum of the occurrence counts of each listed substring
    SubstringSum(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy)]
pub struct FeatureRule {
    pub slot: usize,
    pub name: &'static str,
    pub display_name: &'static str,
    pub measure: Measure,
}

const DANGEROUS_CALLS: &[&str] = &["eval(", "system(", "exec(", "shell_exec(", "passthru("];
const BASE64_MARKERS: &[&str] = &["base64_decode"];
const SUPERGLOBALS: &[&str] = &["$_POST", "$_GET", "$_REQUEST", "$_SERVER"];
const FILE_OPERATIONS: &[&str] = &["chmod(", "chown(", "fopen(", "file_put_contents("];

pub static FEATURE_RULES: [FeatureRule; FEATURE_COUNT] = [
    FeatureRule {
        slot: 0,
        name: "file_size",
        display_name: "File Size",
        measure: Measure::CharCount,
    },
    FeatureRule {
        slot: 1,
        name: "dangerous_calls",
        display_name: "Dangerous Functions",
        measure: Measure::SubstringSum(DANGEROUS_CALLS),
    },
    FeatureRule {
        slot: 2,
        name: "base64_decode",
        display_name: "Base64 Usage",
        measure: Measure::SubstringSum(BASE64_MARKERS),
    },
    FeatureRule {
        slot: 3,
        name: "superglobals",
        display_name: "Superglobals",
        measure: Measure::SubstringSum(SUPERGLOBALS),
    },
    FeatureRule {
        slot: 4,
        name: "file_operations",
        display_name: "File Operations",
        measure: Measure::SubstringSum(FILE_OPERATIONS),
    },
];

/// Non-overlapping, left-to-right occurrence count of `needle` in `haystack`.
pub fn count_occurrences(haystack: &str, needle: &str) -> u64 {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count() as u64
}

impl Measure {
    pub fn apply(&self, content: &str) -> u64 {
        match self {
            Measure::CharCount => content.chars().count() as u64,
            Measure::SubstringSum(needles) => needles
                .iter()
                .map(|n| count_occurrences(content, n))
                .sum(),
        }
    }
}

impl FeatureRule {
    pub fn measure(&self, content: &str) -> u64 {
        self.measure.apply(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_slots_are_in_order() {
        for (i, rule) in FEATURE_RULES.iter().enumerate() {
            assert_eq!(rule.slot, i, "rule {} out of place", rule.name);
        }
    }

    #[test]
    fn counts_are_non_overlapping() {
        assert_eq!(count_occurrences("aaaa", "aa"), 2);
        assert_eq!(count_occurrences("eval(eval(", "eval("), 2);
        assert_eq!(count_occurrences("", "eval("), 0);
        assert_eq!(count_occurrences("abc", ""), 0);
    }

    #[test]
    fn counts_are_case_sensitive() {
        assert_eq!(count_occurrences("EVAL( Eval( eval(", "eval("), 1);
    }

    #[test]
    fn overlapping_needles_are_counted_independently() {
        // `shell_exec(` also contains `exec(`
        let rule = &FEATURE_RULES[1];
        assert_eq!(rule.measure("shell_exec($c);"), 2);
    }

    #[test]
    fn char_count_counts_scalars_not_bytes() {
        assert_eq!(Measure::CharCount.apply("héllo"), 5);
        assert_eq!(Measure::CharCount.apply(""), 0);
    }
}
