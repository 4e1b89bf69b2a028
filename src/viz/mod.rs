//! Visualization: the line and bubble chart builders and their SVG output.
//!
//! - [`LineChart`]: one indicator for one country over time, with tooltip lookup
//! - [`BubbleChart`]: GDP vs. life expectancy for one year, bubble area = population
//! - Both produce a [`Scene`](crate::surface::Scene) that any
//!   [`DrawingSurface`](crate::surface::DrawingSurface) can replay
//! - Locale-aware tick labels (`30,000` vs `30.000`)

pub mod bubble;
pub mod line;
pub mod svg;
pub mod types;
pub mod util;

pub use bubble::{Bubble, BubbleChart, clamp_axis};
pub use line::{LineChart, PlotPoint, Tooltip};
pub use svg::{PlottersSurface, save_svg, svg_string};
pub use types::{BubbleChartConfig, LineChartConfig};

use crate::selection::Selection;
use crate::store::DatasetStore;
use anyhow::{Context, Result};
use std::path::Path;

/// Line chart for the selected country/indicator, written as SVG.
pub fn plot_line<P: AsRef<Path>>(
    store: &DatasetStore,
    selection: &Selection,
    config: &LineChartConfig,
    out_path: P,
) -> Result<()> {
    let chart = LineChart::from_store(store, selection, config)?;
    save_svg(&chart.scene(), &out_path)
        .with_context(|| format!("write {}", out_path.as_ref().display()))
}

/// Bubble chart for `year`, written as SVG.
pub fn plot_bubbles<P: AsRef<Path>>(
    store: &DatasetStore,
    year: i32,
    config: &BubbleChartConfig,
    out_path: P,
) -> Result<()> {
    let chart = BubbleChart::from_store(store, year, config)?;
    save_svg(&chart.scene(), &out_path)
        .with_context(|| format!("write {}", out_path.as_ref().display()))
}
