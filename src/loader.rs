use crate::table::{Record, Table};
use calamine::{Data, Reader, Xlsx, open_workbook};
use std::error::Error;
use std::path::Path;
use std::sync::OnceLock;

/// The three campaign sheets every workbook must carry, in load order.
pub const CAMPAIGN_SHEETS: [&str; 3] = ["Campaign 1", "Campaign 2", "Campaign 3"];

/// Load the combined long-format table from an Excel workbook
///
/// Reads the three fixed campaign sheets, renames each sheet's first column
/// to "Metric", melts the remaining columns into (week, value) rows, tags the
/// rows with the sheet's campaign label and concatenates everything in sheet
/// order. A missing file, a missing sheet or a sheet without a header row is
/// fatal: the dashboard has nothing sensible to render without all three
/// campaigns.
///
/// # Arguments
/// * `filepath` - Path to the XLSX workbook to load
///
/// # Returns
/// * `Result<Table, Box<dyn Error>>` - The combined table or an error
///
/// # Examples
/// ```no_run
/// use campaignboard::loader::load_workbook;
///
/// match load_workbook("Template _ Campaigns Comparison.xlsx") {
///     Ok(table) => println!("Loaded {} rows", table.len()),
///     Err(e) => eprintln!("Error loading workbook: {}", e),
/// }
/// ```
pub fn load_workbook(filepath: impl AsRef<Path>) -> Result<Table, Box<dyn Error>> {
    let mut workbook: Xlsx<_> = open_workbook(filepath)?;

    let mut records = Vec::new();
    for sheet_name in CAMPAIGN_SHEETS {
        let range = workbook
            .worksheet_range(sheet_name)
            .map_err(|e| format!("sheet '{}': {}", sheet_name, e))?;
        let melted = melt(range.rows(), sheet_name)?;
        log::info!("{}: {} long rows", sheet_name, melted.len());
        records.extend(melted);
    }

    Ok(Table::new(records))
}

/// Melt one wide sheet into long records
///
/// The first row is the header row; its first cell is discarded (the column
/// is always treated as "Metric") and every other cell is a week label. Each
/// remaining (row, week column) pair becomes exactly one record, so an R×C
/// sheet yields R×(C−1) records. Cells that are not numeric become the
/// missing marker, never an error.
///
/// # Arguments
/// * `rows` - The sheet's rows, header first, as yielded by calamine
/// * `campaign` - Campaign label to tag every record with
///
/// # Returns
/// * `Result<Vec<Record>, Box<dyn Error>>` - The melted rows or an error
pub fn melt<'a, I>(mut rows: I, campaign: &str) -> Result<Vec<Record>, Box<dyn Error>>
where
    I: Iterator<Item = &'a [Data]>,
{
    let header = rows
        .next()
        .ok_or_else(|| format!("sheet '{}' has no header row", campaign))?;
    if header.is_empty() {
        return Err(format!("sheet '{}' has no metric column", campaign).into());
    }

    let weeks: Vec<String> = header[1..].iter().map(cell_text).collect();

    let mut records = Vec::new();
    for row in rows {
        let metric = row.first().map(cell_text).unwrap_or_default();
        for (i, week) in weeks.iter().enumerate() {
            let value = row.get(i + 1).and_then(coerce);
            records.push(Record::new(metric.as_str(), week.as_str(), value, campaign));
        }
    }

    Ok(records)
}

/// Numeric coercion for value cells. Numbers pass through, numeric text is
/// parsed, everything else (blank, text, bool, error cells) is missing.
pub fn coerce(cell: &Data) -> Option<f64> {
    match cell {
        Data::Int(i) => Some(*i as f64),
        Data::Float(f) => Some(*f),
        Data::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Text form of a header or metric cell. Integral floats lose the trailing
/// `.0` calamine gives them, so a numeric week header reads "3", not "3.0".
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

static COMBINED: OnceLock<Table> = OnceLock::new();

/// The process-wide combined table, loaded on first use
///
/// Every call after the first returns the same immutable table; there is no
/// invalidation, so a changed workbook needs a process restart to show up.
pub fn shared(filepath: impl AsRef<Path>) -> Result<&'static Table, Box<dyn Error>> {
    if let Some(table) = COMBINED.get() {
        return Ok(table);
    }
    let table = load_workbook(filepath)?;
    Ok(COMBINED.get_or_init(|| table))
}
