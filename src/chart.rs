use crate::table::Table;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Available chart types for a rendered view
///
/// Compare mode lets the user pick either; the tabbed view always draws
/// lines.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Default)]
pub enum ChartType {
    /// Line chart - one point+line series per color group, for trends
    /// across the week axis
    #[default]
    Line,

    /// Bar chart - grouped bars per color group within each week
    Bar,
}

/// Configuration options for chart generation
///
/// Covers everything a view varies between charts: the caption, the y-axis
/// window, the pixel height and the column that splits the data into colored
/// series.
#[derive(Clone, Debug)]
pub struct ChartOptions {
    /// Title displayed at the top of the chart
    pub title: String,

    /// Explicit y-axis window; `None` leaves the domain to the data
    pub y_range: Option<(f64, f64)>,

    /// Height of the chart in pixels
    pub height: u32,

    /// Column whose distinct values become the colored series
    /// ("Campaign" in compare mode, "Metric" in the tabbed view)
    pub color_by: &'static str,

    /// Type of chart to generate
    pub chart_type: ChartType,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            title: "Chart".to_string(),
            y_range: None,
            height: 400,
            color_by: "Metric",
            chart_type: ChartType::Line,
        }
    }
}

/// Build a Vega-Lite spec for a filtered long-format table
///
/// The week axis is nominal with `sort: null`, so the x-axis keeps the
/// data's own order - the original spreadsheet column order - instead of a
/// lexical sort. Values outside an explicit y-range are clamped by the
/// scale, not dropped, and missing values simply plot no point. An empty
/// table produces a spec with an empty data array, which embeds as an empty
/// chart rather than an error.
///
/// # Arguments
/// * `data` - The filtered table backing the chart
/// * `options` - Chart styling and type options
///
/// # Returns
/// * `serde_json::Value` - A Vega-Lite v5 spec ready for embedding
///
/// # Examples
/// ```
/// use campaignboard::chart::{ChartOptions, spec};
/// use campaignboard::table::{Record, Table};
///
/// let table = Table::new(vec![
///     Record::new("Activations", "W1", Some(10.0), "Campaign 1"),
/// ]);
/// let chart = spec(&table, &ChartOptions::default());
/// assert_eq!(chart["mark"]["type"], "line");
/// ```
pub fn spec(data: &Table, options: &ChartOptions) -> Value {
    let mark = match options.chart_type {
        ChartType::Line => json!({"type": "line", "point": true}),
        ChartType::Bar => json!({"type": "bar"}),
    };

    let mut y = json!({"field": "Value", "type": "quantitative", "title": "Value"});
    if let Some((lo, hi)) = options.y_range {
        y["scale"] = json!({"domain": [lo, hi], "clamp": true});
    }

    let mut encoding = json!({
        "x": {"field": "Week", "type": "nominal", "title": "Week", "sort": null},
        "y": y,
        "color": {"field": options.color_by, "type": "nominal", "title": options.color_by},
        "tooltip": [
            {"field": "Week", "type": "nominal"},
            {"field": options.color_by, "type": "nominal"},
            {"field": "Value", "type": "quantitative"},
        ],
    });
    if options.chart_type == ChartType::Bar {
        // side-by-side bars per color group instead of vega's default stack
        encoding["xOffset"] = json!({"field": options.color_by});
    }

    json!({
        "$schema": "https://vega.github.io/schema/vega-lite/v5.json",
        "title": options.title,
        "width": "container",
        "height": options.height,
        "data": {"values": data.records},
        "mark": mark,
        "encoding": encoding,
    })
}
