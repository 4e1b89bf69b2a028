//! Drawing commands and the surface abstraction both charts render onto.
//!
//! A chart builds a [`Scene`]: an ordered list of [`DrawCommand`]s for a fixed
//! logical size. [`Scene::render`] clears the target surface once and then
//! replays the commands, so every render is a full redraw.

use std::convert::Infallible;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// RGBA color; alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }
}

pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);

/// Horizontal alignment of a text run relative to its anchor point (baseline).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        from: Point,
        to: Point,
        color: Rgba,
        width: f64,
    },
    Text {
        at: Point,
        text: String,
        size: f64,
        anchor: TextAnchor,
        color: Rgba,
    },
    /// Filled circle with a 1px outline.
    Circle {
        center: Point,
        radius: f64,
        fill: Rgba,
        stroke: Rgba,
    },
}

/// Target that can be cleared and drawn on.
pub trait DrawingSurface {
    type Error;

    /// Logical `(width, height)`.
    fn size(&self) -> (u32, u32);
    fn clear(&mut self) -> Result<(), Self::Error>;
    fn draw(&mut self, command: &DrawCommand) -> Result<(), Self::Error>;
}

/// A complete frame for a surface of `width` x `height`.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn line(&mut self, from: Point, to: Point, color: Rgba, width: f64) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    pub fn text(&mut self, at: Point, text: impl Into<String>, size: f64, anchor: TextAnchor) {
        self.commands.push(DrawCommand::Text {
            at,
            text: text.into(),
            size,
            anchor,
            color: BLACK,
        });
    }

    pub fn circle(&mut self, center: Point, radius: f64, fill: Rgba, stroke: Rgba) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            fill,
            stroke,
        });
    }

    /// Clear `surface`, then draw every command in order.
    pub fn render<S: DrawingSurface + ?Sized>(&self, surface: &mut S) -> Result<(), S::Error> {
        surface.clear()?;
        for command in &self.commands {
            surface.draw(command)?;
        }
        Ok(())
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = (Point, f64)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Circle { center, radius, .. } => Some((*center, *radius)),
            _ => None,
        })
    }

    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }
}

/// In-memory surface that keeps what was drawn since the last clear.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub width: u32,
    pub height: u32,
    pub commands: Vec<DrawCommand>,
    pub clears: usize,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }
}

impl DrawingSurface for RecordingSurface {
    type Error = Infallible;

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self) -> Result<(), Infallible> {
        self.commands.clear();
        self.clears += 1;
        Ok(())
    }

    fn draw(&mut self, command: &DrawCommand) -> Result<(), Infallible> {
        self.commands.push(command.clone());
        Ok(())
    }
}
