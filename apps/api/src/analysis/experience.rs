//! Experience Parser: best-effort mining of duration mentions from resume text.
//!
//! Every pattern runs over the whole text and every match is summed, so the
//! same span can be counted by more than one pattern ("6 months internship"
//! counts as both a month mention and an internship). Callers treat the result
//! as an estimate.

use std::sync::LazyLock;

use regex::Regex;

const NOT_SPECIFIED: &str = "Not specified";
const DEFAULT_INTERNSHIP_MONTHS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Measure {
    Years,
    Months,
    Internship,
    YearRange,
}

struct DurationPattern {
    regex: Regex,
    measure: Measure,
}

static PATTERNS: LazyLock<Vec<DurationPattern>> = LazyLock::new(|| {
    [
        (r"(?i)(\d+)\+?\s*(?:years?|yrs?)(?:\s*(?:of\s*)?(?:experience|work))?", Measure::Years),
        (r"(?i)(\d+)\s*(?:months?|mos?)(?:\s*(?:of\s*)?(?:experience|work))?", Measure::Months),
        (r"(?i)(\d+)\s*(?:months?|mos?)\s*(?:of\s*)?internship", Measure::Internship),
        (r"(?i)internship\s*(?:for\s*)?(\d+)\s*(?:months?|mos?)", Measure::Internship),
        (r"(?i)summer\s*internship", Measure::Internship),
        (r"(\d{4})\s*-\s*(\d{4})", Measure::YearRange),
        (r"(\d+)\s*-\s*(\d+)\s*(?:years?|months?)", Measure::Years),
    ]
    .into_iter()
    .map(|(pattern, measure)| DurationPattern {
        regex: Regex::new(pattern).expect("experience pattern is valid"),
        measure,
    })
    .collect()
});

#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceSummary {
    pub total_months: u32,
    pub has_internship: bool,
    pub label: String,
}

pub fn parse_experience(text: &str) -> ExperienceSummary {
    let mut total_months: u32 = 0;
    let mut has_internship = false;

    for pattern in PATTERNS.iter() {
        for caps in pattern.regex.captures_iter(text) {
            let number = |i: usize| {
                caps.get(i)
                    .and_then(|m| m.as_str().parse::<u32>().ok())
                    .unwrap_or(0)
            };

            let months = match pattern.measure {
                Measure::Years => number(1).saturating_mul(12),
                Measure::Months => number(1),
                Measure::Internship => {
                    has_internship = true;
                    match number(1) {
                        0 => DEFAULT_INTERNSHIP_MONTHS,
                        n => n,
                    }
                }
                Measure::YearRange => number(2).saturating_sub(number(1)).saturating_mul(12),
            };

            total_months = total_months.saturating_add(months);
        }
    }

    ExperienceSummary {
        total_months,
        has_internship,
        label: format_duration(total_months, has_internship),
    }
}

fn format_duration(total_months: u32, has_internship: bool) -> String {
    if total_months == 0 {
        return NOT_SPECIFIED.to_string();
    }

    let years = total_months / 12;
    let months = total_months % 12;
    let mut label = match (years, months) {
        (0, m) => format!("{m} months"),
        (y, 0) => format!("{y} years"),
        (y, m) => format!("{y} years {m} months"),
    };

    if has_internship {
        label.push_str(" (including internship)");
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_years_of_experience() {
        assert_eq!(parse_experience("3 years of experience").label, "3 years");
    }

    #[test]
    fn test_plus_years_counted_once() {
        assert_eq!(parse_experience("5+ yrs of work").label, "5 years");
    }

    #[test]
    fn test_no_duration_is_not_specified() {
        let summary = parse_experience("Curious engineer who likes Rust");
        assert_eq!(summary.label, "Not specified");
        assert_eq!(summary.total_months, 0);
        assert!(!summary.has_internship);
    }

    #[test]
    fn test_months_only() {
        assert_eq!(parse_experience("8 months of work").label, "8 months");
    }

    #[test]
    fn test_years_and_months_combined() {
        assert_eq!(parse_experience("2 years and 5 months").label, "2 years 5 months");
    }

    #[test]
    fn test_year_range() {
        let summary = parse_experience("Acme Corp 2018 - 2021");
        assert_eq!(summary.total_months, 36);
        assert_eq!(summary.label, "3 years");
    }

    #[test]
    fn test_inverted_year_range_floors_at_zero() {
        assert_eq!(parse_experience("2021-2018").label, "Not specified");
    }

    #[test]
    fn test_summer_internship_defaults_to_three_months() {
        let summary = parse_experience("Summer Internship at Initech");
        assert!(summary.has_internship);
        assert_eq!(summary.total_months, 3);
        assert_eq!(summary.label, "3 months (including internship)");
    }

    #[test]
    fn test_overlapping_matches_are_summed() {
        // month pattern (6) + "N months internship" pattern (6)
        let summary = parse_experience("6 months internship");
        assert_eq!(summary.total_months, 12);
        assert_eq!(summary.label, "1 years (including internship)");
    }

    #[test]
    fn test_range_of_years_uses_lower_bound_and_upper_mention() {
        // "2-3 years": range pattern counts 2*12, year pattern counts "3 years"
        let summary = parse_experience("2-3 years");
        assert_eq!(summary.total_months, 60);
    }

    #[test]
    fn test_range_pattern_is_case_sensitive() {
        // Only the case-insensitive year pattern fires on "3 YEARS"
        assert_eq!(parse_experience("2-3 YEARS").total_months, 36);
    }
}
