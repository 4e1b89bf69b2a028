//! Public configuration types and constants for the chart builders.

use crate::surface::Rgba;

/// Inset reserved for axis labels around the line chart.
pub const LINE_PADDING: f64 = 60.0;
/// Inset reserved for axis labels around the bubble chart.
pub const BUBBLE_PADDING: f64 = 100.0;
/// Radius added to `sqrt(pop / max_pop) * max_bubble_size`.
pub const MAX_BUBBLE_SIZE: f64 = 80.0;
/// Keeps the smallest bubbles visible.
pub const MIN_RADIUS: f64 = 5.0;
/// Number of tick intervals on value axes (ticks at `i / 5 * max`, `i = 0..=5`).
pub const VALUE_TICK_STEPS: u32 = 5;

pub const LINE_COLOR: Rgba = Rgba::rgb(0, 0, 255);
pub const BUBBLE_FILL: Rgba = Rgba::new(30, 144, 255, 0.7);

#[derive(Debug, Clone, PartialEq)]
pub struct LineChartConfig {
    pub width: u32,
    pub height: u32,
    pub padding: f64,
    /// Locale tag for tick labels, see [`super::util::map_locale`].
    pub locale: String,
}

impl Default for LineChartConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            padding: LINE_PADDING,
            locale: "en".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BubbleChartConfig {
    pub width: u32,
    pub height: u32,
    pub padding: f64,
    pub max_bubble_size: f64,
    pub min_radius: f64,
    pub locale: String,
}

impl Default for BubbleChartConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            padding: BUBBLE_PADDING,
            max_bubble_size: MAX_BUBBLE_SIZE,
            min_radius: MIN_RADIUS,
            locale: "en".into(),
        }
    }
}
