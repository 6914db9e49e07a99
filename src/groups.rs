use lazy_static::lazy_static;
use std::collections::HashMap;

/// How a tabbed section renders its selected metrics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SectionLayout {
    /// One multi-series chart over the whole selection, colored by metric.
    Combined,
    /// One small chart per selected metric, each with its own fixed range.
    PerMetric,
}

/// A named family of metrics with its display convention. Group membership
/// and axis ranges are domain display conventions, kept as data so the view
/// logic stays free of metric-name conditionals.
#[derive(Clone, Copy, Debug)]
pub struct MetricGroup {
    pub name: &'static str,
    pub metrics: &'static [&'static str],
    /// Fixed y-range for the combined chart of this group.
    pub range: (f64, f64),
    pub layout: SectionLayout,
}

/// The three tabbed-view sections, in display order. Metrics outside these
/// lists are invisible to the tabbed view but still selectable in compare
/// mode.
pub const GROUPS: &[MetricGroup] = &[
    MetricGroup {
        name: "Performance",
        metrics: &[
            "Net MAU intake",
            "Gross MAU Intake",
            "Activations",
            "Reactivations",
            "Registrations",
        ],
        range: (0.0, 600_000.0),
        layout: SectionLayout::Combined,
    },
    MetricGroup {
        name: "Platform",
        metrics: &["Retention D60", "Content Hours/MAU"],
        range: PLATFORM_DEFAULT_RANGE,
        layout: SectionLayout::PerMetric,
    },
    MetricGroup {
        name: "Spend",
        metrics: &[
            "TV Spend",
            "Digital Spend",
            "AMP Spend",
            "Other media spend (OOH, Metro & Buses)",
        ],
        range: (0.0, 100_000.0),
        layout: SectionLayout::Combined,
    },
];

/// Range for per-metric charts whose metric has no explicit entry below.
pub const PLATFORM_DEFAULT_RANGE: (f64, f64) = (7.0, 11.0);

lazy_static! {
    /// Fixed display ranges for individually-charted metrics.
    static ref METRIC_RANGES: HashMap<&'static str, (f64, f64)> = {
        let mut m = HashMap::new();
        m.insert("Retention D60", (0.3, 0.6));
        m.insert("Content Hours/MAU", PLATFORM_DEFAULT_RANGE);
        m
    };
}

/// Fixed y-range for a single metric's own chart.
pub fn metric_range(metric: &str) -> (f64, f64) {
    METRIC_RANGES
        .get(metric)
        .copied()
        .unwrap_or(PLATFORM_DEFAULT_RANGE)
}

/// The group a metric belongs to, if any.
pub fn group_of(metric: &str) -> Option<&'static MetricGroup> {
    GROUPS.iter().find(|g| g.metrics.contains(&metric))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retention_has_its_own_range() {
        assert_eq!(metric_range("Retention D60"), (0.3, 0.6));
        assert_eq!(metric_range("Content Hours/MAU"), (7.0, 11.0));
    }

    #[test]
    fn group_lookup_covers_all_configured_metrics() {
        for group in GROUPS {
            for metric in group.metrics {
                let found = group_of(metric).expect("configured metric has a group");
                assert_eq!(found.name, group.name);
            }
        }
        assert!(group_of("Unknown Metric").is_none());
    }

    #[test]
    fn section_order_is_performance_platform_spend() {
        let names: Vec<_> = GROUPS.iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["Performance", "Platform", "Spend"]);
    }
}
