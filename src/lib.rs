//! eustat_viz
//!
//! A small Rust library for fetching Eurostat life expectancy (SV), population (POP)
//! and GDP per capita (PIB) series for the EU member states, reshaping the
//! JSON-stat responses into flat records, and charting them. Pairs with the
//! `eustat` CLI and the `eustat-gui` desktop app.
//!
//! ### Features
//! - Fetch all three indicators for the last 15 years in one all-or-nothing cycle
//! - Decode sparse JSON-stat value tables into `(Country, Year, Indicator, Value)` rows
//! - Line chart per country/indicator with nearest-year tooltip lookup
//! - Bubble chart per year (GDP vs. life expectancy, area = population) and a
//!   frame-by-frame animation driver
//! - Save as CSV or JSON; quick summary statistics
//!
//! ### Example
//! ```no_run
//! use eustat_viz::{DatasetStore, EurostatClient, Indicator, Selection};
//! use eustat_viz::viz::{self, BubbleChartConfig, LineChartConfig};
//!
//! let mut store = DatasetStore::new();
//! let years = eustat_viz::models::current_year_window();
//! eustat_viz::api::fetch_cycle(&EurostatClient::default(), &mut store, &years)?;
//!
//! let sel = Selection::new().with_country("BE").with_indicator(Indicator::Sv);
//! viz::plot_line(&store, &sel, &LineChartConfig::default(), "be_sv.svg")?;
//! viz::plot_bubbles(&store, 2020, &BubbleChartConfig::default(), "bubbles_2020.svg")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod animation;
pub mod api;
pub mod decode;
pub mod error;
pub mod models;
pub mod selection;
pub mod stats;
pub mod storage;
pub mod store;
pub mod surface;
pub mod viz;

pub use animation::{AnimationDriver, AnimationState, FrameSink};
pub use api::{DataSource, EurostatClient};
pub use error::{DecodeError, Error};
pub use models::{Indicator, Record};
pub use selection::Selection;
pub use store::DatasetStore;
