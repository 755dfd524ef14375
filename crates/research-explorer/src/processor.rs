//! Year filtering, sorting, and pagination over a normalized record set.
//!
//! All operations leave the input untouched and return a new ordered view.

use crate::error::{ExplorerError, ExplorerResult};
use crate::models::{PaperRecord, SortKey};

/// A closed year interval; either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YearRange {
    /// Lower bound (inclusive).
    pub from: Option<i32>,
    /// Upper bound (inclusive).
    pub to: Option<i32>,
}

impl YearRange {
    /// Create a range, rejecting reversed bounds.
    pub fn new(from: Option<i32>, to: Option<i32>) -> ExplorerResult<Self> {
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(ExplorerError::InvalidRange { from, to });
            }
        }
        Ok(Self { from, to })
    }

    /// Returns true if any bound is set.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }

    /// Returns true if `record` falls inside the range. Records without a year never do.
    #[must_use]
    pub fn contains(&self, record: &PaperRecord) -> bool {
        record.year.is_some_and(|year| {
            self.from.is_none_or(|from| year >= from) && self.to.is_none_or(|to| year <= to)
        })
    }
}

/// Filter by year (when bounds are given) and sort.
///
/// Records without a year are dropped only when a bound is active. Sorting is
/// stable, so ties keep upstream relevance order.
///
/// # Errors
///
/// Returns [`ExplorerError::InvalidRange`] if `year_from > year_to`; nothing is filtered.
pub fn process(
    records: &[PaperRecord],
    year_from: Option<i32>,
    year_to: Option<i32>,
    sort_key: SortKey,
) -> ExplorerResult<Vec<PaperRecord>> {
    let range = YearRange::new(year_from, year_to)?;
    let mut view = filter_by_year(records, range);
    sort_records(&mut view, sort_key);
    Ok(view)
}

/// Keep records inside `range`; an inactive range keeps everything.
#[must_use]
pub fn filter_by_year(records: &[PaperRecord], range: YearRange) -> Vec<PaperRecord> {
    if !range.is_active() {
        return records.to_vec();
    }
    records.iter().filter(|r| range.contains(r)).cloned().collect()
}

/// Stable sort by the chosen key, descending.
pub fn sort_records(records: &mut [PaperRecord], sort_key: SortKey) {
    match sort_key {
        // `None` sorts below every year, so undated records go last.
        SortKey::Newest => records.sort_by(|a, b| b.year.cmp(&a.year)),
        SortKey::MostCitations => records.sort_by(|a, b| b.citation_count.cmp(&a.citation_count)),
    }
}

/// One page of a sorted view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a> {
    /// Records on this page.
    pub records: &'a [PaperRecord],
    /// 1-based page number after clamping.
    pub number: usize,
    /// Total number of pages.
    pub page_count: usize,
    /// Index of this page's first record in the full view.
    pub offset: usize,
}

/// Number of pages needed for `len` records.
#[must_use]
pub fn page_count(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1))
}

/// Slice out a 1-based page, clamping out-of-range requests to the first or last page.
#[must_use]
pub fn paginate(records: &[PaperRecord], page: usize, page_size: usize) -> Page<'_> {
    let page_size = page_size.max(1);
    let page_count = page_count(records.len(), page_size);
    let number = page.clamp(1, page_count.max(1));
    let offset = ((number - 1) * page_size).min(records.len());
    let end = (offset + page_size).min(records.len());

    Page { records: &records[offset..end], number, page_count, offset }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, year: Option<i32>, citations: u32) -> PaperRecord {
        PaperRecord {
            title: title.to_string(),
            year,
            citation_count: citations,
            ..Default::default()
        }
    }

    fn titles(records: &[PaperRecord]) -> Vec<&str> {
        records.iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn test_scenario_filter_then_most_citations() {
        let records = vec![
            record("a", Some(2019), 5),
            record("b", Some(2021), 1),
            record("c", Some(2021), 9),
        ];
        let view = process(&records, Some(2020), Some(2022), SortKey::MostCitations).unwrap();
        assert_eq!(titles(&view), vec!["c", "b"]);
    }

    #[test]
    fn test_invalid_range() {
        let records = vec![record("a", Some(2019), 5)];
        let err = process(&records, Some(2030), Some(2010), SortKey::Newest).unwrap_err();
        assert!(matches!(err, ExplorerError::InvalidRange { from: 2030, to: 2010 }));
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_missing_year_only_dropped_when_filtering() {
        let records = vec![record("dated", Some(2020), 0), record("undated", None, 0)];
        let all = process(&records, None, None, SortKey::Newest).unwrap();
        assert_eq!(titles(&all), vec!["dated", "undated"]);

        let filtered = process(&records, Some(1900), None, SortKey::Newest).unwrap();
        assert_eq!(titles(&filtered), vec!["dated"]);
    }

    #[test]
    fn test_newest_is_stable() {
        let records = vec![
            record("first", Some(2020), 0),
            record("newer", Some(2022), 0),
            record("second", Some(2020), 0),
        ];
        let view = process(&records, None, None, SortKey::Newest).unwrap();
        assert_eq!(titles(&view), vec!["newer", "first", "second"]);
    }

    #[test]
    fn test_open_ended_range() {
        let records = vec![record("old", Some(2001), 0), record("new", Some(2024), 0)];
        let view = process(&records, None, Some(2010), SortKey::Newest).unwrap();
        assert_eq!(titles(&view), vec!["old"]);
    }

    #[test]
    fn test_paginate_clamps() {
        let records: Vec<_> = (0..23).map(|i| record(&i.to_string(), None, 0)).collect();
        assert_eq!(page_count(records.len(), 10), 3);

        let last = paginate(&records, 3, 10);
        assert_eq!(last.records.len(), 3);
        assert_eq!(last.offset, 20);

        let beyond = paginate(&records, 8, 10);
        assert_eq!(beyond, last);

        let zero = paginate(&records, 0, 10);
        assert_eq!(zero.number, 1);
        assert_eq!(zero.records.len(), 10);
    }

    #[test]
    fn test_paginate_empty() {
        let page = paginate(&[], 4, 10);
        assert!(page.records.is_empty());
        assert_eq!(page.page_count, 0);
        assert_eq!(page.number, 1);
    }
}
