//! Single-indicator line chart over time, with nearest-year tooltip lookup.

use crate::error::{Error, Result};
use crate::selection::Selection;
use crate::store::DatasetStore;
use crate::surface::{BLACK, Point, Scene, TextAnchor};

use super::types::{LINE_COLOR, LineChartConfig};
use super::util::{format_decimal, format_integer, max_or_one, value_ticks};

/// One observation mapped to surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotPoint {
    pub year: i32,
    pub value: f64,
    pub x: f64,
    pub y: f64,
}

/// Floating label shown next to the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    /// Top-left corner of the label (pointer + 10px on both axes).
    pub at: Point,
    pub year: i32,
    pub value: f64,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct LineChart {
    config: LineChartConfig,
    label: String,
    min_year: i32,
    max_year: i32,
    max_value: f64,
    points: Vec<PlotPoint>,
}

impl LineChart {
    /// Build from parallel `years`/`values`; points are drawn in ascending year order.
    pub fn new(
        years: &[i32],
        values: &[f64],
        label: &str,
        config: &LineChartConfig,
    ) -> Result<Self> {
        if years.len() != values.len() {
            return Err(Error::SeriesLength {
                years: years.len(),
                values: values.len(),
            });
        }
        if years.is_empty() {
            return Err(Error::EmptyResult(label.to_string()));
        }

        let mut pairs: Vec<(i32, f64)> =
            years.iter().copied().zip(values.iter().copied()).collect();
        pairs.sort_by_key(|(y, _)| *y);

        let mut chart = Self {
            config: config.clone(),
            label: label.to_string(),
            min_year: pairs[0].0,
            max_year: pairs[pairs.len() - 1].0,
            max_value: max_or_one(pairs.iter().map(|(_, v)| *v)),
            points: Vec::with_capacity(pairs.len()),
        };
        chart.points = pairs
            .into_iter()
            .map(|(year, value)| PlotPoint {
                year,
                value,
                x: chart.x_of(year),
                y: chart.y_of(value),
            })
            .collect();
        Ok(chart)
    }

    /// Series for the selected country and indicator.
    pub fn from_store(
        store: &DatasetStore,
        selection: &Selection,
        config: &LineChartConfig,
    ) -> Result<Self> {
        let (country, indicator) = selection.line_target()?;
        let (years, values) = store.series(country, indicator);
        if years.is_empty() {
            return Err(Error::EmptyResult(format!("{country} / {indicator}")));
        }
        Self::new(&years, &values, indicator.code(), config)
    }

    fn width(&self) -> f64 {
        self.config.width as f64
    }

    fn height(&self) -> f64 {
        self.config.height as f64
    }

    /// Linear in year over `[padding, width - padding]`; a single-year series sits at the midpoint.
    pub fn x_of(&self, year: i32) -> f64 {
        let p = self.config.padding;
        let w = self.width();
        if self.max_year == self.min_year {
            return w / 2.0;
        }
        let t = (year - self.min_year) as f64 / (self.max_year - self.min_year) as f64;
        t * (w - 2.0 * p) + p
    }

    /// Linear in value from `0` (bottom inset) to the series maximum (top inset).
    pub fn y_of(&self, value: f64) -> f64 {
        let p = self.config.padding;
        let h = self.height();
        h - (value / self.max_value) * (h - 2.0 * p) - p
    }

    pub fn points(&self) -> &[PlotPoint] {
        &self.points
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    pub fn scene(&self) -> Scene {
        let p = self.config.padding;
        let h = self.height();
        let locale = self.config.locale.as_str();
        let mut scene = Scene::new(self.config.width, self.config.height);

        // x axis: one tick per year
        for pt in &self.points {
            scene.line(Point::new(pt.x, h - p), Point::new(pt.x, h - p + 5.0), BLACK, 1.0);
            scene.text(
                Point::new(pt.x, h - p + 20.0),
                pt.year.to_string(),
                10.0,
                TextAnchor::Middle,
            );
        }

        // y axis: six ticks from 0 to max
        for value in value_ticks(self.max_value) {
            let y = self.y_of(value);
            scene.line(Point::new(p, y), Point::new(p - 5.0, y), BLACK, 1.0);
            scene.text(
                Point::new(p - 10.0, y),
                format_integer(value, locale),
                10.0,
                TextAnchor::End,
            );
        }

        for pair in self.points.windows(2) {
            scene.line(
                Point::new(pair[0].x, pair[0].y),
                Point::new(pair[1].x, pair[1].y),
                LINE_COLOR,
                2.0,
            );
        }
        scene
    }

    /// Point horizontally closest to `pointer_x`; the earlier year wins a tie.
    pub fn nearest_point(&self, pointer_x: f64) -> &PlotPoint {
        let mut best = &self.points[0];
        for pt in &self.points[1..] {
            if (pt.x - pointer_x).abs() < (best.x - pointer_x).abs() {
                best = pt;
            }
        }
        best
    }

    /// Tooltip for a pointer position in surface coordinates; `None` hides it
    /// (no pointer, or pointer outside the surface).
    pub fn tooltip_at(&self, pointer: Option<Point>) -> Option<Tooltip> {
        let pointer = pointer?;
        let inside = (0.0..=self.width()).contains(&pointer.x)
            && (0.0..=self.height()).contains(&pointer.y);
        if !inside {
            return None;
        }
        let pt = self.nearest_point(pointer.x);
        Some(Tooltip {
            at: Point::new(pointer.x + 10.0, pointer.y + 10.0),
            year: pt.year,
            value: pt.value,
            text: format!(
                "Year: {}\n{}: {}",
                pt.year,
                self.label,
                format_decimal(pt.value, 2, &self.config.locale)
            ),
        })
    }
}
