use crate::chart::{self, ChartOptions, ChartType};
use crate::groups::{GROUPS, SectionLayout, metric_range};
use crate::table::Table;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Height of compare-mode and combined section charts.
pub const SECTION_CHART_HEIGHT: u32 = 400;
/// Height of the small per-metric charts in the Platform section.
pub const PER_METRIC_CHART_HEIGHT: u32 = 250;

/// Everything the page can select. One request carries the whole selection
/// state; the server holds nothing between requests.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Selections {
    /// Compare-mode toggle; off means the tabbed per-campaign view.
    pub compare: bool,
    /// Compare-mode metric; absent means the first available metric, an
    /// unrecognized name matches nothing.
    pub metric: Option<String>,
    /// Compare-mode campaign selection; absent means all.
    pub campaigns: Option<Vec<String>>,
    /// Compare-mode chart type.
    pub chart_type: ChartType,
    /// Tabbed-view selections: campaign -> group name -> selected metrics.
    /// A missing entry means the group's default (all members present).
    pub tabs: HashMap<String, HashMap<String, Vec<String>>>,
}

/// A rendered dashboard response. The two modes are mutually exclusive by
/// construction: a compare response carries no tab content at all.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum View {
    Compare(CompareView),
    Tabbed(TabbedView),
}

#[derive(Clone, Debug, Serialize)]
pub struct CompareView {
    pub metric: Option<String>,
    pub campaigns: Vec<String>,
    pub chart_type: ChartType,
    pub chart: Value,
}

#[derive(Clone, Debug, Serialize)]
pub struct TabbedView {
    pub tabs: Vec<TabView>,
}

#[derive(Clone, Debug, Serialize)]
pub struct TabView {
    pub campaign: String,
    pub sections: Vec<SectionView>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SectionView {
    pub group: String,
    /// Selectable metrics: the group members present in this campaign's data.
    pub options: Vec<String>,
    /// The effective selection after intersecting with `options`.
    pub selected: Vec<String>,
    pub charts: Vec<Value>,
}

/// Render the dashboard for one set of selections. Pure: same table and
/// selections always produce the same view, which is what every selection
/// change on the page re-requests.
pub fn render(table: &Table, selections: &Selections) -> View {
    if selections.compare {
        View::Compare(render_compare(table, selections))
    } else {
        View::Tabbed(render_tabbed(table, selections))
    }
}

fn render_compare(table: &Table, selections: &Selections) -> CompareView {
    let available_metrics = table.metrics();
    let available_campaigns = table.campaigns();

    // an unrecognized metric intersects to nothing; only an absent
    // selection falls back to the first available metric
    let metric = match &selections.metric {
        Some(m) if available_metrics.contains(m) => Some(m.clone()),
        Some(_) => None,
        None => available_metrics.first().cloned(),
    };

    let campaigns: Vec<String> = match &selections.campaigns {
        Some(chosen) => available_campaigns
            .iter()
            .filter(|c| chosen.contains(*c))
            .cloned()
            .collect(),
        None => available_campaigns,
    };

    let filtered = match &metric {
        Some(m) => table.filter_metric(m, &campaigns),
        None => Table::default(),
    };

    let title = match &metric {
        Some(m) => format!("{} Comparison", m),
        None => "Comparison".to_string(),
    };
    let chart = chart::spec(
        &filtered,
        &ChartOptions {
            title,
            y_range: filtered.value_range(),
            height: SECTION_CHART_HEIGHT,
            color_by: "Campaign",
            chart_type: selections.chart_type,
        },
    );

    CompareView {
        metric,
        campaigns,
        chart_type: selections.chart_type,
        chart,
    }
}

fn render_tabbed(table: &Table, selections: &Selections) -> TabbedView {
    let tabs = table
        .campaigns()
        .into_iter()
        .map(|campaign| {
            let data = table.campaign(&campaign);
            let sections = GROUPS
                .iter()
                .map(|group| {
                    let options: Vec<String> = group
                        .metrics
                        .iter()
                        .filter(|m| data.has_metric(m))
                        .map(|m| m.to_string())
                        .collect();

                    let selected: Vec<String> = match selections
                        .tabs
                        .get(&campaign)
                        .and_then(|groups| groups.get(group.name))
                    {
                        Some(chosen) => options
                            .iter()
                            .filter(|m| chosen.contains(*m))
                            .cloned()
                            .collect(),
                        None => options.clone(),
                    };

                    let charts = match group.layout {
                        SectionLayout::Combined => {
                            let filtered =
                                data.filter(&selected, std::slice::from_ref(&campaign));
                            vec![chart::spec(
                                &filtered,
                                &ChartOptions {
                                    title: format!("{} Metrics", group.name),
                                    y_range: Some(group.range),
                                    height: SECTION_CHART_HEIGHT,
                                    color_by: "Metric",
                                    chart_type: ChartType::Line,
                                },
                            )]
                        }
                        SectionLayout::PerMetric => selected
                            .iter()
                            .map(|metric| {
                                let filtered =
                                    data.filter_metric(metric, std::slice::from_ref(&campaign));
                                chart::spec(
                                    &filtered,
                                    &ChartOptions {
                                        title: metric.clone(),
                                        y_range: Some(metric_range(metric)),
                                        height: PER_METRIC_CHART_HEIGHT,
                                        color_by: "Metric",
                                        chart_type: ChartType::Line,
                                    },
                                )
                            })
                            .collect(),
                    };

                    SectionView {
                        group: group.name.to_string(),
                        options,
                        selected,
                        charts,
                    }
                })
                .collect();

            TabView { campaign, sections }
        })
        .collect();

    TabbedView { tabs }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Record;
    use serde_json::json;

    fn sample() -> Table {
        let mut records = Vec::new();
        for campaign in ["Campaign 1", "Campaign 2", "Campaign 3"] {
            for week in ["W1", "W2"] {
                records.push(Record::new("Activations", week, Some(1000.0), campaign));
                records.push(Record::new("TV Spend", week, Some(40_000.0), campaign));
                records.push(Record::new("Retention D60", week, Some(0.45), campaign));
                records.push(Record::new("Unlisted KPI", week, Some(5.0), campaign));
            }
        }
        Table::new(records)
    }

    #[test]
    fn compare_mode_suppresses_tab_content() {
        let selections = Selections {
            compare: true,
            ..Default::default()
        };
        let view = render(&sample(), &selections);
        assert!(matches!(view, View::Compare(_)));

        let body = serde_json::to_value(&view).unwrap();
        assert_eq!(body["mode"], "compare");
        assert!(body.get("tabs").is_none());
    }

    #[test]
    fn compare_bar_over_two_campaigns_yields_two_color_groups() {
        let selections = Selections {
            compare: true,
            metric: Some("TV Spend".to_string()),
            campaigns: Some(vec!["Campaign 1".to_string(), "Campaign 3".to_string()]),
            chart_type: ChartType::Bar,
            ..Default::default()
        };
        let View::Compare(view) = render(&sample(), &selections) else {
            panic!("expected compare view");
        };

        assert_eq!(view.chart["mark"]["type"], "bar");
        let mut campaigns: Vec<String> = view.chart["data"]["values"]
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["Campaign"].as_str().unwrap().to_string())
            .collect();
        campaigns.dedup();
        assert_eq!(campaigns, vec!["Campaign 1", "Campaign 3"]);
    }

    #[test]
    fn compare_defaults_to_first_metric_and_all_campaigns() {
        let selections = Selections {
            compare: true,
            ..Default::default()
        };
        let View::Compare(view) = render(&sample(), &selections) else {
            panic!("expected compare view");
        };
        assert_eq!(view.metric.as_deref(), Some("Activations"));
        assert_eq!(
            view.campaigns,
            vec!["Campaign 1", "Campaign 2", "Campaign 3"]
        );
        // derived range with headroom over the constant 1000.0 series
        assert_eq!(
            view.chart["encoding"]["y"]["scale"]["domain"],
            json!([950.0, 1050.0])
        );
    }

    #[test]
    fn compare_with_unknown_metric_renders_the_empty_filter() {
        let selections = Selections {
            compare: true,
            metric: Some("Nonexistent".to_string()),
            ..Default::default()
        };
        let View::Compare(view) = render(&sample(), &selections) else {
            panic!("expected compare view");
        };
        assert_eq!(view.metric, None);
        assert_eq!(view.chart["data"]["values"], json!([]));
        assert!(view.chart["encoding"]["y"]["scale"].is_null());
    }

    #[test]
    fn compare_with_empty_selection_renders_an_empty_chart() {
        let selections = Selections {
            compare: true,
            campaigns: Some(Vec::new()),
            ..Default::default()
        };
        let View::Compare(view) = render(&sample(), &selections) else {
            panic!("expected compare view");
        };
        assert_eq!(view.chart["data"]["values"], json!([]));
        assert!(view.chart["encoding"]["y"]["scale"].is_null());
    }

    #[test]
    fn tabbed_view_has_one_tab_per_campaign_with_three_sections() {
        let View::Tabbed(view) = render(&sample(), &Selections::default()) else {
            panic!("expected tabbed view");
        };
        assert_eq!(view.tabs.len(), 3);
        for tab in &view.tabs {
            let names: Vec<_> = tab.sections.iter().map(|s| s.group.as_str()).collect();
            assert_eq!(names, vec!["Performance", "Platform", "Spend"]);
        }
    }

    #[test]
    fn tabbed_defaults_select_all_group_members_present() {
        let View::Tabbed(view) = render(&sample(), &Selections::default()) else {
            panic!("expected tabbed view");
        };
        let performance = &view.tabs[0].sections[0];
        // only Activations is present out of the five Performance metrics
        assert_eq!(performance.options, vec!["Activations"]);
        assert_eq!(performance.selected, vec!["Activations"]);
        assert_eq!(performance.charts.len(), 1);
        assert_eq!(
            performance.charts[0]["encoding"]["y"]["scale"]["domain"],
            json!([0.0, 600000.0])
        );
    }

    #[test]
    fn platform_section_draws_one_small_chart_per_metric() {
        let View::Tabbed(view) = render(&sample(), &Selections::default()) else {
            panic!("expected tabbed view");
        };
        let platform = &view.tabs[0].sections[1];
        assert_eq!(platform.selected, vec!["Retention D60"]);
        assert_eq!(platform.charts.len(), 1);
        assert_eq!(platform.charts[0]["height"], 250);
        assert_eq!(
            platform.charts[0]["encoding"]["y"]["scale"]["domain"],
            json!([0.3, 0.6])
        );
    }

    #[test]
    fn unlisted_metrics_never_reach_the_tabbed_view() {
        let View::Tabbed(view) = render(&sample(), &Selections::default()) else {
            panic!("expected tabbed view");
        };
        for tab in &view.tabs {
            for section in &tab.sections {
                assert!(!section.options.iter().any(|m| m.as_str() == "Unlisted KPI"));
            }
        }
        // but compare mode still lists it
        assert!(sample().metrics().contains(&"Unlisted KPI".to_string()));
    }

    #[test]
    fn empty_tab_selection_keeps_sections_renderable() {
        let mut tabs = HashMap::new();
        let mut groups = HashMap::new();
        groups.insert("Spend".to_string(), Vec::new());
        groups.insert("Platform".to_string(), Vec::new());
        tabs.insert("Campaign 1".to_string(), groups);
        let selections = Selections {
            tabs,
            ..Default::default()
        };

        let View::Tabbed(view) = render(&sample(), &selections) else {
            panic!("expected tabbed view");
        };
        let spend = &view.tabs[0].sections[2];
        assert!(spend.selected.is_empty());
        // combined section still emits its (empty) chart
        assert_eq!(spend.charts.len(), 1);
        assert_eq!(spend.charts[0]["data"]["values"], json!([]));

        let platform = &view.tabs[0].sections[1];
        assert!(platform.charts.is_empty());
    }
}
