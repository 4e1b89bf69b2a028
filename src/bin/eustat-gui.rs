/*!
 * GUI application for eustat-viz - Eurostat indicator fetcher and visualizer
 *
 * A desktop window providing:
 * - Fetching life expectancy, population and GDP per capita for the EU member states
 * - A line chart per country/indicator with a hover tooltip
 * - A bubble chart per year, optionally animated year by year
 * - Exporting the dataset as CSV or JSON
 */

use anyhow::Result;
use eframe::egui;
use eustat_viz::models::current_year_window;
use eustat_viz::surface::{DrawCommand, DrawingSurface, Point, Rgba, TextAnchor};
use eustat_viz::viz::{BubbleChart, BubbleChartConfig, LineChart, LineChartConfig};
use eustat_viz::{AnimationDriver, DatasetStore, EurostatClient, FrameSink, Indicator, Selection};
use eustat_viz::{api, storage};
use std::convert::Infallible;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 1100.0])
            .with_min_inner_size([860.0, 600.0])
            .with_title("Eurostat Indicators - eustat-viz"),
        ..Default::default()
    };

    eframe::run_native(
        "Eurostat Indicators",
        options,
        Box::new(|_cc| Ok(Box::new(EustatApp::new()))),
    )
}

/// Paints draw commands with an egui painter, offset to the allocated rect.
struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    rect: egui::Rect,
}

fn color32(c: Rgba) -> egui::Color32 {
    let a = (c.a.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, a)
}

impl PainterSurface<'_> {
    fn pos(&self, p: Point) -> egui::Pos2 {
        self.rect.min + egui::vec2(p.x as f32, p.y as f32)
    }
}

impl DrawingSurface for PainterSurface<'_> {
    type Error = Infallible;

    fn size(&self) -> (u32, u32) {
        (self.rect.width() as u32, self.rect.height() as u32)
    }

    fn clear(&mut self) -> Result<(), Infallible> {
        self.painter
            .rect_filled(self.rect, 0.0, egui::Color32::WHITE);
        Ok(())
    }

    fn draw(&mut self, command: &DrawCommand) -> Result<(), Infallible> {
        match command {
            DrawCommand::Line {
                from,
                to,
                color,
                width,
            } => {
                self.painter.line_segment(
                    [self.pos(*from), self.pos(*to)],
                    egui::Stroke::new(*width as f32, color32(*color)),
                );
            }
            DrawCommand::Text {
                at,
                text,
                size,
                anchor,
                color,
            } => {
                let align = match anchor {
                    TextAnchor::Start => egui::Align2::LEFT_BOTTOM,
                    TextAnchor::Middle => egui::Align2::CENTER_BOTTOM,
                    TextAnchor::End => egui::Align2::RIGHT_BOTTOM,
                };
                self.painter.text(
                    self.pos(*at),
                    align,
                    text,
                    egui::FontId::proportional(*size as f32),
                    color32(*color),
                );
            }
            DrawCommand::Circle {
                center,
                radius,
                fill,
                stroke,
            } => {
                self.painter.circle(
                    self.pos(*center),
                    *radius as f32,
                    color32(*fill),
                    egui::Stroke::new(1.0, color32(*stroke)),
                );
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
enum FetchOutcome {
    Loaded(DatasetStore),
    Failed(String),
}

/// Main application state
struct EustatApp {
    store: DatasetStore,
    selection: Selection,
    line_config: LineChartConfig,
    bubble_config: BubbleChartConfig,
    locale: String,

    line_chart: Option<LineChart>,
    bubble_chart: Option<BubbleChart>,
    animation: AnimationDriver,

    // UI state
    is_loading: bool,
    status_message: String,
    error_message: String,

    // Background fetch
    fetch_receiver: Option<mpsc::Receiver<FetchOutcome>>,
}

/// Animation frames land here: update the year selector, then rebuild the bubble chart.
struct BubbleFrames<'a> {
    store: &'a DatasetStore,
    config: &'a BubbleChartConfig,
    selection: &'a mut Selection,
    chart: &'a mut Option<BubbleChart>,
    error_message: &'a mut String,
}

impl FrameSink for BubbleFrames<'_> {
    fn select_year(&mut self, year: i32) {
        self.selection.year = Some(year);
    }

    fn render_year(&mut self, year: i32) {
        match BubbleChart::from_store(self.store, year, self.config) {
            Ok(chart) => {
                *self.chart = Some(chart);
                self.error_message.clear();
            }
            Err(err) => *self.error_message = err.to_string(),
        }
    }
}

impl EustatApp {
    fn new() -> Self {
        Self {
            store: DatasetStore::new(),
            selection: Selection::new().with_indicator(Indicator::Sv),
            line_config: LineChartConfig::default(),
            bubble_config: BubbleChartConfig::default(),
            locale: "en".to_string(),
            line_chart: None,
            bubble_chart: None,
            animation: AnimationDriver::default(),
            is_loading: false,
            status_message: String::new(),
            error_message: String::new(),
            fetch_receiver: None,
        }
    }

    fn start_fetch(&mut self) {
        self.is_loading = true;
        self.error_message.clear();
        self.status_message = "Fetching data from Eurostat...".to_string();

        let (sender, receiver) = mpsc::channel();
        self.fetch_receiver = Some(receiver);

        thread::spawn(move || {
            let mut store = DatasetStore::new();
            let years = current_year_window();
            let outcome = match api::fetch_cycle(&EurostatClient::default(), &mut store, &years) {
                Ok(_) => FetchOutcome::Loaded(store),
                Err(err) => FetchOutcome::Failed(format!("Failed to fetch data: {}", err)),
            };
            let _ = sender.send(outcome);
        });
    }

    fn check_fetch_result(&mut self) {
        let Some(receiver) = &self.fetch_receiver else {
            return;
        };
        if let Ok(outcome) = receiver.try_recv() {
            self.is_loading = false;
            self.fetch_receiver = None;

            match outcome {
                FetchOutcome::Loaded(store) => {
                    self.status_message = format!("Loaded {} data points.", store.len());
                    self.error_message.clear();
                    self.store = store;
                    self.line_chart = None;
                    self.bubble_chart = None;
                    self.animation.stop();
                    if let Some(first) = self.store.distinct_countries().into_iter().next() {
                        self.selection.country.get_or_insert(first);
                    }
                }
                // The previous dataset stays on screen.
                FetchOutcome::Failed(error) => {
                    self.error_message = error;
                    self.status_message.clear();
                }
            }
        }
    }

    fn year_options(&self) -> Vec<i32> {
        let years = self.store.distinct_years();
        if years.is_empty() {
            current_year_window()
        } else {
            years
        }
    }

    fn show_line_chart(&mut self) {
        self.line_config.locale = self.locale.clone();
        match LineChart::from_store(&self.store, &self.selection, &self.line_config) {
            Ok(chart) => {
                self.line_chart = Some(chart);
                self.error_message.clear();
            }
            Err(err) => self.error_message = err.to_string(),
        }
    }

    fn show_bubble_chart(&mut self) {
        self.bubble_config.locale = self.locale.clone();
        let year = match self.selection.bubble_year() {
            Ok(year) => year,
            Err(err) => {
                self.error_message = err.to_string();
                return;
            }
        };
        let mut frames = self.frames();
        frames.render_year(year);
    }

    fn frames(&mut self) -> BubbleFrames<'_> {
        BubbleFrames {
            store: &self.store,
            config: &self.bubble_config,
            selection: &mut self.selection,
            chart: &mut self.bubble_chart,
            error_message: &mut self.error_message,
        }
    }

    fn export(&mut self, json: bool) {
        let (name, ext) = if json {
            ("eustat_data.json", "json")
        } else {
            ("eustat_data.csv", "csv")
        };
        let start_dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let Some(path) = rfd::FileDialog::new()
            .set_directory(start_dir)
            .set_file_name(name)
            .add_filter(ext, &[ext])
            .save_file()
        else {
            return;
        };
        let result = if json {
            storage::save_json(self.store.records(), &path)
        } else {
            storage::save_csv(self.store.records(), &path)
        };
        match result {
            Ok(()) => self.status_message = format!("Saved {}", path.display()),
            Err(err) => self.error_message = format!("Failed to save: {}", err),
        }
    }

    fn selectors(&mut self, ui: &mut egui::Ui) {
        let countries = self.store.distinct_countries();
        let years = self.year_options();

        ui.horizontal(|ui| {
            let current = self.selection.country.clone().unwrap_or_default();
            egui::ComboBox::from_label("Country")
                .selected_text(self.store.country_label(&current).to_string())
                .show_ui(ui, |ui| {
                    for c in &countries {
                        let label = format!("{} ({})", self.store.country_label(c), c);
                        ui.selectable_value(&mut self.selection.country, Some(c.clone()), label);
                    }
                });

            let current = self
                .selection
                .indicator
                .map(|i| i.label())
                .unwrap_or_default();
            egui::ComboBox::from_label("Indicator")
                .selected_text(current)
                .show_ui(ui, |ui| {
                    for ind in Indicator::ALL {
                        ui.selectable_value(&mut self.selection.indicator, Some(ind), ind.label());
                    }
                });

            let current = self
                .selection
                .year
                .map(|y| y.to_string())
                .unwrap_or_default();
            egui::ComboBox::from_label("Year")
                .selected_text(current)
                .show_ui(ui, |ui| {
                    for y in &years {
                        ui.selectable_value(&mut self.selection.year, Some(*y), y.to_string());
                    }
                });

            egui::ComboBox::from_label("Locale")
                .selected_text(self.locale.clone())
                .show_ui(ui, |ui| {
                    for tag in ["en", "de", "fr", "ro"] {
                        ui.selectable_value(&mut self.locale, tag.to_string(), tag);
                    }
                });
        });
    }

    fn paint_line_chart(&self, ui: &mut egui::Ui) {
        let Some(chart) = &self.line_chart else {
            return;
        };
        let size = egui::vec2(self.line_config.width as f32, self.line_config.height as f32);
        let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
        let mut surface = PainterSurface {
            painter: &painter,
            rect: response.rect,
        };
        let _ = chart.scene().render(&mut surface);

        // Pointer relative to the chart; leaving the rect hides the tooltip.
        let pointer = response.hover_pos().map(|p| {
            let rel = p - response.rect.min;
            Point::new(rel.x as f64, rel.y as f64)
        });
        if let Some(tooltip) = chart.tooltip_at(pointer) {
            let at = response.rect.min + egui::vec2(tooltip.at.x as f32, tooltip.at.y as f32);
            egui::Area::new(egui::Id::new("line_chart_tooltip"))
                .fixed_pos(at)
                .interactable(false)
                .order(egui::Order::Tooltip)
                .show(ui.ctx(), |ui| {
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.label(egui::RichText::new(tooltip.text).size(12.0));
                    });
                });
        }
    }

    fn paint_bubble_chart(&self, ui: &mut egui::Ui) {
        let Some(chart) = &self.bubble_chart else {
            return;
        };
        let size = egui::vec2(
            self.bubble_config.width as f32,
            self.bubble_config.height as f32,
        );
        let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
        let mut surface = PainterSurface {
            painter: &painter,
            rect: response.rect,
        };
        let _ = chart.scene().render(&mut surface);
    }
}

impl eframe::App for EustatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_fetch_result();

        let now = Instant::now();
        let mut driver = std::mem::take(&mut self.animation);
        driver.poll_with(now, &mut self.frames());
        self.animation = driver;
        if let Some(wait) = self.animation.time_until_next(now) {
            ctx.request_repaint_after(wait);
        }

        // Request repaint if loading (for spinner animation)
        if self.is_loading {
            ctx.request_repaint();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Eurostat Indicators");
                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(!self.is_loading, egui::Button::new("Fetch Data"))
                        .clicked()
                    {
                        self.start_fetch();
                    }
                    if self.is_loading {
                        ui.spinner();
                        ui.label("Loading...");
                    }
                    let has_data = !self.store.is_empty();
                    if ui.add_enabled(has_data, egui::Button::new("Export CSV")).clicked() {
                        self.export(false);
                    }
                    if ui.add_enabled(has_data, egui::Button::new("Export JSON")).clicked() {
                        self.export(true);
                    }
                });

                ui.add_space(10.0);
                ui.group(|ui| {
                    ui.label("Selection");
                    ui.add_space(5.0);
                    self.selectors(ui);
                });

                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    if ui.button("Show Graph").clicked() {
                        self.show_line_chart();
                    }
                    if ui.button("Show Bubble Chart").clicked() {
                        self.show_bubble_chart();
                    }
                    if ui
                        .add_enabled(!self.animation.is_running(), egui::Button::new("Animate"))
                        .clicked()
                    {
                        self.animation.start(self.store.distinct_years(), Instant::now());
                        ctx.request_repaint();
                    }
                    if ui
                        .add_enabled(self.animation.is_running(), egui::Button::new("Stop"))
                        .clicked()
                    {
                        self.animation.stop();
                    }
                });

                ui.add_space(10.0);

                // Status messages
                if !self.status_message.is_empty() {
                    ui.colored_label(egui::Color32::DARK_GREEN, &self.status_message);
                }

                if !self.error_message.is_empty() {
                    ui.colored_label(egui::Color32::RED, &self.error_message);
                }

                ui.add_space(10.0);
                self.paint_line_chart(ui);
                ui.add_space(10.0);
                self.paint_bubble_chart(ui);
            });
        });
    }
}
