//! Partial-date decomposition
//!
//! Deposit schemas want a date as separate numeric children while the model
//! stores an ISO-like string that may stop at the year or the month.

/// The decomposed parts of a partial date. Any combination of fields can be
/// absent; an unusable input yields no parts at all.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DateParts {
    pub year: Option<String>,
    pub month: Option<String>,
    pub day: Option<String>,
}

impl DateParts {
    /// Split `text` on `-`: one segment is a year, two are year and month,
    /// three add the day. Anything else (including empty input) produces no
    /// parts.
    pub fn from_iso(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }
        let segments: Vec<&str> = text.split('-').collect();
        match segments.as_slice() {
            [year] => Self {
                year: Some(year.to_string()),
                ..Self::default()
            },
            [year, month] => Self {
                year: Some(year.to_string()),
                month: Some(month.to_string()),
                day: None,
            },
            [year, month, day] => Self {
                year: Some(year.to_string()),
                month: Some(month.to_string()),
                day: Some(day.to_string()),
            },
            _ => Self::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.year.is_none() && self.month.is_none() && self.day.is_none()
    }

    /// (element name, value) pairs in the fixed month, day, year emission
    /// order. Downstream consumers assume this order; do not reorder.
    pub fn emission_order(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("month", self.month.as_deref()),
            ("day", self.day.as_deref()),
            ("year", self.year.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|value| (name, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2023", Some("2023"), None, None)]
    #[case("2023-06", Some("2023"), Some("06"), None)]
    #[case("2023-06-15", Some("2023"), Some("06"), Some("15"))]
    #[case("2023-06-15-99", None, None, None)]
    #[case("", None, None, None)]
    fn test_from_iso(
        #[case] input: &str,
        #[case] year: Option<&str>,
        #[case] month: Option<&str>,
        #[case] day: Option<&str>,
    ) {
        let parts = DateParts::from_iso(input);
        assert_eq!(parts.year.as_deref(), year);
        assert_eq!(parts.month.as_deref(), month);
        assert_eq!(parts.day.as_deref(), day);
    }

    #[test]
    fn test_emission_order_is_month_day_year() {
        let parts = DateParts::from_iso("2023-06-15");
        let names: Vec<&str> = parts.emission_order().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["month", "day", "year"]);
    }

    #[test]
    fn test_emission_order_skips_missing_parts() {
        let parts = DateParts::from_iso("2023-06");
        let names: Vec<&str> = parts.emission_order().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["month", "year"]);
    }
}
