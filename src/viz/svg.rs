//! Drawing surface backed by a plotters drawing area, plus SVG file/string helpers.

use anyhow::{Result, anyhow};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_svg::SVGBackend;
use std::path::Path;

use crate::surface::{DrawCommand, DrawingSurface, Point, Rgba, Scene, TextAnchor};

pub fn rgba_color(c: Rgba) -> RGBAColor {
    RGBAColor(c.r, c.g, c.b, c.a)
}

/// plotters emits text at `size / 1.24`; scale up so the output matches the scene.
const FONT_SCALE: f64 = 1.24;

fn px(p: Point) -> (i32, i32) {
    (p.x.round() as i32, p.y.round() as i32)
}

/// Adapter from [`DrawCommand`]s to any plotters backend (pixel coordinates).
pub struct PlottersSurface<DB: DrawingBackend> {
    area: DrawingArea<DB, Shift>,
}

impl<DB: DrawingBackend> PlottersSurface<DB> {
    pub fn new(area: DrawingArea<DB, Shift>) -> Self {
        Self { area }
    }

    pub fn present(&self) -> Result<()> {
        self.area.present().map_err(|e| anyhow!("{:?}", e))
    }
}

impl<DB: DrawingBackend> DrawingSurface for PlottersSurface<DB> {
    type Error = anyhow::Error;

    fn size(&self) -> (u32, u32) {
        self.area.dim_in_pixel()
    }

    fn clear(&mut self) -> Result<()> {
        self.area.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))
    }

    fn draw(&mut self, command: &DrawCommand) -> Result<()> {
        match command {
            DrawCommand::Line {
                from,
                to,
                color,
                width,
            } => {
                let style = rgba_color(*color).stroke_width(width.round().max(1.0) as u32);
                self.area
                    .draw(&PathElement::new(vec![px(*from), px(*to)], style))
                    .map_err(|e| anyhow!("{:?}", e))
            }
            DrawCommand::Text {
                at,
                text,
                size,
                anchor,
                color,
            } => {
                let h_pos = match anchor {
                    TextAnchor::Start => HPos::Left,
                    TextAnchor::Middle => HPos::Center,
                    TextAnchor::End => HPos::Right,
                };
                // Anchor on the baseline.
                let style = ("sans-serif", *size * FONT_SCALE)
                    .into_font()
                    .color(&rgba_color(*color))
                    .pos(Pos::new(h_pos, VPos::Bottom));
                self.area
                    .draw(&Text::new(text.clone(), px(*at), style))
                    .map_err(|e| anyhow!("{:?}", e))
            }
            DrawCommand::Circle {
                center,
                radius,
                fill,
                stroke,
            } => {
                let r = radius.round().max(0.0) as i32;
                self.area
                    .draw(&Circle::new(px(*center), r, rgba_color(*fill).filled()))
                    .map_err(|e| anyhow!("{:?}", e))?;
                self.area
                    .draw(&Circle::new(
                        px(*center),
                        r,
                        rgba_color(*stroke).stroke_width(1),
                    ))
                    .map_err(|e| anyhow!("{:?}", e))
            }
        }
    }
}

/// Render `scene` into an SVG file at `out_path`.
pub fn save_svg<P: AsRef<Path>>(scene: &Scene, out_path: P) -> Result<()> {
    let out_path = out_path.as_ref();
    let root = SVGBackend::new(out_path, (scene.width, scene.height)).into_drawing_area();
    let mut surface = PlottersSurface::new(root);
    scene.render(&mut surface)?;
    surface.present()?;
    Ok(())
}

/// Render `scene` into an SVG document string.
pub fn svg_string(scene: &Scene) -> Result<String> {
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, (scene.width, scene.height)).into_drawing_area();
        let mut surface = PlottersSurface::new(root);
        scene.render(&mut surface)?;
        surface.present()?;
    }
    Ok(buf)
}
