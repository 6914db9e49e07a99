use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One long-format observation: a single cell of the original wide sheet,
/// keyed by metric, week and campaign. Serialized field names match the
/// column names the charts encode against.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Record {
    #[serde(rename = "Metric")]
    pub metric: String,
    #[serde(rename = "Week")]
    pub week: String,
    #[serde(rename = "Value")]
    pub value: Option<f64>,
    #[serde(rename = "Campaign")]
    pub campaign: String,
}

impl Record {
    pub fn new(
        metric: impl Into<String>,
        week: impl Into<String>,
        value: Option<f64>,
        campaign: impl Into<String>,
    ) -> Self {
        Record {
            metric: metric.into(),
            week: week.into(),
            value,
            campaign: campaign.into(),
        }
    }
}

/// The combined long-format table. Row order is load order: campaign 1 rows
/// first, then 2, then 3; within a campaign, metric-major and week-minor in
/// original spreadsheet column order. Charts rely on that order for their
/// x-axis, so nothing here ever sorts.
#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct Table {
    pub records: Vec<Record>,
}

impl Table {
    pub fn new(records: Vec<Record>) -> Self {
        Table { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct metric names in first-seen order.
    pub fn metrics(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.metric.as_str()))
    }

    /// Distinct campaign labels in first-seen order.
    pub fn campaigns(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.campaign.as_str()))
    }

    /// Distinct week labels in first-seen order.
    pub fn weeks(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.week.as_str()))
    }

    /// Rows whose metric is in `metrics` and campaign is in `campaigns`.
    /// An empty selection on either axis matches nothing. Missing values
    /// stay in the result; they are skipped at plot and range time.
    pub fn filter(&self, metrics: &[String], campaigns: &[String]) -> Table {
        let records = self
            .records
            .iter()
            .filter(|r| {
                metrics.iter().any(|m| m == &r.metric)
                    && campaigns.iter().any(|c| c == &r.campaign)
            })
            .cloned()
            .collect();
        Table { records }
    }

    /// Single-metric convenience over [`Table::filter`].
    pub fn filter_metric(&self, metric: &str, campaigns: &[String]) -> Table {
        self.filter(std::slice::from_ref(&metric.to_string()), campaigns)
    }

    /// Rows for one campaign, all metrics.
    pub fn campaign(&self, campaign: &str) -> Table {
        let records = self
            .records
            .iter()
            .filter(|r| r.campaign == campaign)
            .cloned()
            .collect();
        Table { records }
    }

    /// True if any row carries this metric.
    pub fn has_metric(&self, metric: &str) -> bool {
        self.records.iter().any(|r| r.metric == metric)
    }

    /// Y-axis range with display headroom: `[min * 0.95, max * 1.05]` over
    /// the present values. `None` when no numeric value survives, so an
    /// empty filter renders an empty chart instead of faulting on min/max.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut present = self.records.iter().filter_map(|r| r.value);
        let first = present.next()?;
        let (min, max) = present.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Some((min * 0.95, max * 1.05))
    }

    /// Pivot back to wide cells keyed by (campaign, metric, week). Used to
    /// check that the melt was 1:1 with the source cells.
    pub fn pivot_wide(&self) -> BTreeMap<(String, String, String), Option<f64>> {
        self.records
            .iter()
            .map(|r| {
                (
                    (r.campaign.clone(), r.metric.clone(), r.week.clone()),
                    r.value,
                )
            })
            .collect()
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for v in values {
        if !seen.iter().any(|s| s == v) {
            seen.push(v.to_string());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(vec![
            Record::new("Activations", "W1", Some(100.0), "Campaign 1"),
            Record::new("Activations", "W2", Some(200.0), "Campaign 1"),
            Record::new("Activations", "W3", Some(300.0), "Campaign 1"),
            Record::new("Activations", "W1", Some(50.0), "Campaign 2"),
            Record::new("TV Spend", "W1", None, "Campaign 1"),
        ])
    }

    #[test]
    fn derived_range_has_headroom() {
        let filtered = sample().filter_metric("Activations", &["Campaign 1".to_string()]);
        assert_eq!(filtered.value_range(), Some((95.0, 315.0)));
    }

    #[test]
    fn missing_values_are_excluded_from_range() {
        let filtered = sample().filter_metric("TV Spend", &["Campaign 1".to_string()]);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.value_range(), None);
    }

    #[test]
    fn absent_metric_filters_to_zero_rows() {
        let filtered = sample().filter_metric("Churn", &sample().campaigns());
        assert!(filtered.is_empty());
        assert_eq!(filtered.value_range(), None);
    }

    #[test]
    fn empty_campaign_selection_matches_nothing() {
        let filtered = sample().filter_metric("Activations", &[]);
        assert!(filtered.is_empty());
    }

    #[test]
    fn distinct_lists_preserve_first_seen_order() {
        let table = sample();
        assert_eq!(table.metrics(), vec!["Activations", "TV Spend"]);
        assert_eq!(table.campaigns(), vec!["Campaign 1", "Campaign 2"]);
        assert_eq!(table.weeks(), vec!["W1", "W2", "W3"]);
    }
}
