//! Bubble chart for one year: GDP per capita on X, life expectancy on Y,
//! bubble area proportional to population.
//!
//! Each axis is normalised by its own maximum within the selected year.
//! Bubble centres are clamped so the whole circle stays inside the padded area.

use crate::error::{Error, Result};
use crate::models::{Indicator, Record};
use crate::store::DatasetStore;
use crate::surface::{BLACK, Point, Scene, TextAnchor};

use super::types::{BUBBLE_FILL, BubbleChartConfig};
use super::util::{format_decimal, format_integer, max_or_one, value_ticks};

#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    pub country: String,
    pub gdp: f64,
    pub life_expectancy: f64,
    pub population: f64,
    /// Clamped centre.
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

#[derive(Debug, Clone)]
pub struct BubbleChart {
    config: BubbleChartConfig,
    year: i32,
    max_gdp: f64,
    max_life_expectancy: f64,
    max_population: f64,
    bubbles: Vec<Bubble>,
}

/// Clamp a centre coordinate into `[padding + radius, extent - padding - radius]`.
/// When the range is empty the lower bound wins.
pub fn clamp_axis(value: f64, radius: f64, padding: f64, extent: f64) -> f64 {
    let lo = padding + radius;
    let hi = extent - padding - radius;
    lo.max(value.min(hi))
}

#[derive(Default)]
struct Triple {
    gdp: Option<f64>,
    life_expectancy: Option<f64>,
    population: Option<f64>,
}

impl BubbleChart {
    /// Build from the records of `year`; records of other years are ignored.
    ///
    /// Countries lacking any of the three indicators are skipped. Fails with
    /// [`Error::EmptyResult`] when no country is complete.
    pub fn new(year: i32, records: &[Record], config: &BubbleChartConfig) -> Result<Self> {
        let year_records: Vec<&Record> = records.iter().filter(|r| r.year == year).collect();

        let max_of = |ind: Indicator| {
            max_or_one(
                year_records
                    .iter()
                    .filter(|r| r.indicator == ind)
                    .map(|r| r.value),
            )
        };
        let mut chart = Self {
            config: config.clone(),
            year,
            max_gdp: max_of(Indicator::Pib),
            max_life_expectancy: max_of(Indicator::Sv),
            max_population: max_of(Indicator::Pop),
            bubbles: Vec::new(),
        };

        // group by country, first-seen order
        let mut groups: Vec<(&str, Triple)> = Vec::new();
        for r in &year_records {
            let idx = match groups.iter().position(|(c, _)| *c == r.country) {
                Some(i) => i,
                None => {
                    groups.push((r.country.as_str(), Triple::default()));
                    groups.len() - 1
                }
            };
            let slot = &mut groups[idx].1;
            match r.indicator {
                Indicator::Pib => slot.gdp = Some(r.value),
                Indicator::Sv => slot.life_expectancy = Some(r.value),
                Indicator::Pop => slot.population = Some(r.value),
            }
        }

        for (country, t) in groups {
            let (Some(gdp), Some(life_expectancy), Some(population)) =
                (t.gdp, t.life_expectancy, t.population)
            else {
                continue;
            };
            let radius = chart.radius(population);
            let (x, y) = chart.clamp(chart.x_of(gdp), chart.y_of(life_expectancy), radius);
            chart.bubbles.push(Bubble {
                country: country.to_string(),
                gdp,
                life_expectancy,
                population,
                x,
                y,
                radius,
            });
        }

        if chart.bubbles.is_empty() {
            return Err(Error::EmptyResult(format!(
                "year {year} (no country has all of SV, POP and PIB)"
            )));
        }
        Ok(chart)
    }

    pub fn from_store(store: &DatasetStore, year: i32, config: &BubbleChartConfig) -> Result<Self> {
        let records = store.year_records(year);
        if records.is_empty() {
            return Err(Error::EmptyResult(format!("year {year}")));
        }
        Self::new(year, &records, config)
    }

    fn width(&self) -> f64 {
        self.config.width as f64
    }

    fn height(&self) -> f64 {
        self.config.height as f64
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    /// `(max GDP, max life expectancy, max population)` of the year.
    pub fn maxima(&self) -> (f64, f64, f64) {
        (self.max_gdp, self.max_life_expectancy, self.max_population)
    }

    pub fn x_of(&self, gdp: f64) -> f64 {
        let p = self.config.padding;
        (gdp / self.max_gdp) * (self.width() - 2.0 * p) + p
    }

    pub fn y_of(&self, life_expectancy: f64) -> f64 {
        let p = self.config.padding;
        let h = self.height();
        h - ((life_expectancy / self.max_life_expectancy) * (h - 2.0 * p) + p)
    }

    /// Square-root scaling so bubble area, not radius, tracks population.
    pub fn radius(&self, population: f64) -> f64 {
        let ratio = (population / self.max_population).max(0.0);
        ratio.sqrt() * self.config.max_bubble_size + self.config.min_radius
    }

    pub fn clamp(&self, x: f64, y: f64, radius: f64) -> (f64, f64) {
        let p = self.config.padding;
        (
            clamp_axis(x, radius, p, self.width()),
            clamp_axis(y, radius, p, self.height()),
        )
    }

    pub fn scene(&self) -> Scene {
        let p = self.config.padding;
        let w = self.width();
        let h = self.height();
        let locale = self.config.locale.as_str();
        let mut scene = Scene::new(self.config.width, self.config.height);

        for b in &self.bubbles {
            let center = Point::new(b.x, b.y);
            scene.circle(center, b.radius, BUBBLE_FILL, BLACK);
            scene.text(
                Point::new(b.x - b.radius / 2.0, b.y - b.radius - 5.0),
                b.country.clone(),
                12.0,
                TextAnchor::Start,
            );
        }

        // axes: an L at the padded origin
        let origin = Point::new(p, h - p);
        scene.line(origin, Point::new(w - p, h - p), BLACK, 1.0);
        scene.text(Point::new(w - 40.0, h - p + 20.0), "PIB", 12.0, TextAnchor::Start);
        scene.line(origin, Point::new(p, p), BLACK, 1.0);
        scene.text(Point::new(p - 30.0, p - 10.0), "SV", 12.0, TextAnchor::Start);

        for value in value_ticks(self.max_gdp) {
            let x = self.x_of(value);
            scene.text(
                Point::new(x, h - p + 15.0),
                format_integer(value, locale),
                12.0,
                TextAnchor::Start,
            );
            scene.line(Point::new(x, h - p - 5.0), Point::new(x, h - p + 5.0), BLACK, 1.0);
        }

        for value in value_ticks(self.max_life_expectancy) {
            let y = self.y_of(value);
            scene.text(
                Point::new(p - 40.0, y + 5.0),
                format_decimal(value, 1, locale),
                12.0,
                TextAnchor::Start,
            );
            scene.line(Point::new(p - 5.0, y), Point::new(p + 5.0, y), BLACK, 1.0);
        }
        scene
    }
}
