/// Age bucketing
///
/// Photos are grouped by age-in-years relative to a fixed birthday anchor.
/// Bucket `n` spans from the n-th anniversary of the anchor up to the day
/// before the (n+1)-th. Photos without a usable `age_year` fall into the
/// unknown bucket, which always sorts last.

use chrono::{Days, NaiveDate};
use std::collections::BTreeMap;

use crate::manifest::PhotoItem;

/// Sentinel age for photos whose capture age is unknown
pub const UNKNOWN_AGE: i32 = -1;

/// Range label for the unknown bucket (no date range exists for it)
pub const UNKNOWN_RANGE_LABEL: &str = "時期不明";

/// Short label for the unknown bucket's chip
pub const UNKNOWN_SHORT_LABEL: &str = "不明";

/// The fixed civil date all bucket boundaries derive from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthdayAnchor {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl BirthdayAnchor {
    /// `month` and `day` are 1-based calendar values; a zero day would
    /// underflow the milestone arithmetic.
    pub const fn new(year: i32, month: u32, day: u32) -> Self {
        debug_assert!(month >= 1 && month <= 12);
        debug_assert!(day >= 1 && day <= 31);
        Self { year, month, day }
    }

    /// The n-th anniversary of the anchor date.
    ///
    /// Computed as "first of the anchor month plus (day - 1) days", so an
    /// anchor day that doesn't exist in the target year rolls over into the
    /// next month: a Feb 29 anchor lands on Mar 1 in non-leap years. Bucket
    /// boundaries depend on this exact rollover; don't replace it with a
    /// clamped computation.
    pub fn milestone(&self, years: i32) -> NaiveDate {
        let first = NaiveDate::from_ymd_opt(self.year + years, self.month, 1)
            .expect("anchor month is a valid calendar month");
        first + Days::new(u64::from(self.day - 1))
    }
}

/// One bucket of photos sharing the same age year, manifest order preserved
#[derive(Debug, Clone, PartialEq)]
pub struct AgeGroup {
    pub age_year: i32,
    pub items: Vec<PhotoItem>,
}

/// Partition items into age groups.
///
/// Groups come back ascending by age year with the unknown group forced to
/// the end; relative manifest order is preserved within each group. Groups
/// are only materialized for ages actually present, so none is ever empty.
pub fn bucket_items(items: &[PhotoItem]) -> Vec<AgeGroup> {
    let mut buckets: BTreeMap<i32, Vec<PhotoItem>> = BTreeMap::new();

    for item in items {
        // Parse normalization already maps bad values to the sentinel;
        // treat any stray negative the same way
        let age = if item.age_year < 0 { UNKNOWN_AGE } else { item.age_year };
        buckets.entry(age).or_default().push(item.clone());
    }

    let mut groups: Vec<AgeGroup> = buckets
        .into_iter()
        .map(|(age_year, items)| AgeGroup { age_year, items })
        .collect();

    // BTreeMap iteration put the sentinel first; the unknown group belongs last
    if groups.first().map_or(false, |g| g.age_year == UNKNOWN_AGE) {
        let unknown = groups.remove(0);
        groups.push(unknown);
    }

    groups
}

/// Short label for chips: "0歳", "1歳", ... or "不明"
pub fn age_label(age_year: i32) -> String {
    if age_year == UNKNOWN_AGE {
        UNKNOWN_SHORT_LABEL.to_string()
    } else {
        format!("{}歳", age_year)
    }
}

/// Full label for section headings: the age plus its date range.
///
/// The range runs from the n-th milestone through the day before the
/// (n+1)-th milestone. The end date is literally "next milestone minus one
/// day". Near leap-year boundaries this mirrors the milestone rollover
/// rather than computing an independent leap-safe end.
pub fn age_range_label(anchor: &BirthdayAnchor, age_year: i32) -> String {
    if age_year == UNKNOWN_AGE {
        return UNKNOWN_RANGE_LABEL.to_string();
    }

    let start = anchor.milestone(age_year);
    let end = anchor
        .milestone(age_year + 1)
        .pred_opt()
        .expect("milestone has a preceding day");

    format!(
        "{}歳 {}〜{}",
        age_year,
        start.format("%Y/%m/%d"),
        end.format("%Y/%m/%d")
    )
}
