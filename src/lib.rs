/*!
# Campaign Dashboard

A browser-based dashboard over marketing-campaign performance data, built in Rust.

## Overview

The application loads a fixed three-sheet Excel workbook (one sheet per
campaign), reshapes every sheet from wide format (one column per week) into
one long-format table (one row per Metric × Week × Campaign), and serves an
interactive page whose charts are recomputed from the user's selections on
every interaction.

## Architecture

The application follows a client-server architecture:

### Frontend Layer
- **Technologies**: HTML, CSS, JavaScript, Vega-Lite embedding
- **Key Components**:
  - Compare toggle - Switches between the two dashboard modes
  - Selection controls - Metric dropdown, campaign multi-select, chart-type radio
  - Campaign tabs - Per-campaign detail pages with collapsible metric sections
  - View renderer - Posts the current selections and embeds the returned chart specs

### Backend Layer
- **Technologies**: Rust, axum
- **Core Components**:
  - Workbook Loader - Melts the three campaign sheets into the combined long table
  - Combined Table - Immutable, cached for the process lifetime, filtered per request
  - Metric Groups - Static configuration mapping metrics to sections and display ranges
  - Chart Renderer - Builds Vega-Lite specs (line or bar, fixed or derived y-range)
  - View Controller - Pure `render(table, selections)` choosing compare or tabbed mode

## Key Features

- Wide-to-long reshaping with 1:1 cell fidelity and missing-value coercion
- Cross-campaign compare mode (single metric, line or bar)
- Per-campaign tabbed view with Performance / Platform / Spend sections
- Fixed display ranges per metric group, derived head-room ranges in compare mode
- Empty selections render empty charts, never errors

## Modules

- **table**: Long-format records and the combined table (filtering, ranges, pivot)
- **loader**: Workbook reading, reshaping, campaign tagging, process-wide cache
- **groups**: Static metric-group membership and fixed axis ranges
- **chart**: Vega-Lite spec generation for line and bar charts
- **view**: Compare/tabbed view controller over the combined table
- **app**: Routing and handlers (requires the `web` feature)

## REST API Endpoints

- `GET /` - The dashboard page
- `GET /api/options` - Compare-mode control values (metrics, campaigns, chart types)
- `POST /api/view` - Renders the view for the posted selections
*/

// Re-export all modules so they appear in the documentation
pub mod chart;
pub mod groups;
pub mod loader;
pub mod table;
pub mod view;

#[cfg(feature = "web")]
pub mod app;

/// Re-export everything from these modules to make it easier to use
pub use chart::*;
pub use groups::*;
pub use loader::*;
pub use table::*;
pub use view::*;
