//! Page output: the drawing-command sink and the fixed page mapping.

use serde::{Deserialize, Serialize};

use crate::types::Point2D;

/// Width and height of the drawable page area, in millimeters.
pub const PAGE_SIZE: f64 = 54.0;

/// Millimeters per projection-plane unit.
const PAGE_SCALE: f64 = PAGE_SIZE / 2.0;

/// Map a projected point to page coordinates.
///
/// Points in `[-1, 1] x [0, 2]` land in `[0, 54] x [0, 54]`, measured
/// right and down from the top-left corner.
pub fn to_page_coords(p: Point2D) -> Point2D {
    Point2D::new((p.x + 1.0) * PAGE_SCALE, (2.0 - p.y) * PAGE_SCALE)
}

/// Stroke settings for drawn lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    /// Stroke width in millimeters.
    pub width: f64,
    /// Stroke color as 8-bit RGB.
    pub color: [u8; 3],
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            width: 0.1,
            color: [25, 25, 25],
        }
    }
}

/// Receiver of the drawing commands for a walk-through, page by page.
pub trait PageSink {
    /// Start a new page; subsequent lines belong to it.
    fn new_page(&mut self);

    /// Set the stroke for subsequent lines on the current page.
    fn set_line_style(&mut self, style: &LineStyle);

    /// Draw a line in page coordinates.
    fn draw_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64);
}

/// One recorded drawing command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DrawCommand {
    /// A page break.
    NewPage,
    /// A stroke change.
    LineStyle(LineStyle),
    /// A line segment in page coordinates.
    Line {
        /// Start point.
        start: Point2D,
        /// End point.
        end: Point2D,
    },
}

/// A sink that records every command in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSink {
    /// Commands in the order they were issued.
    pub commands: Vec<DrawCommand>,
}

impl RecordingSink {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pages started.
    pub fn num_pages(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::NewPage))
            .count()
    }

    /// All recorded lines as `(start, end)` pairs.
    pub fn lines(&self) -> impl Iterator<Item = (Point2D, Point2D)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line { start, end } => Some((*start, *end)),
            _ => None,
        })
    }
}

impl PageSink for RecordingSink {
    fn new_page(&mut self) {
        self.commands.push(DrawCommand::NewPage);
    }

    fn set_line_style(&mut self, style: &LineStyle) {
        self.commands.push(DrawCommand::LineStyle(*style));
    }

    fn draw_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) {
        self.commands.push(DrawCommand::Line {
            start: Point2D::new(x0, y0),
            end: Point2D::new(x1, y1),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_mapping_corners() {
        assert_eq!(to_page_coords(Point2D::new(-1.0, 2.0)), Point2D::new(0.0, 0.0));
        assert_eq!(to_page_coords(Point2D::new(1.0, 0.0)), Point2D::new(54.0, 54.0));
        assert_eq!(to_page_coords(Point2D::new(0.0, 1.0)), Point2D::new(27.0, 27.0));
    }

    #[test]
    fn test_recording_sink() {
        let mut sink = RecordingSink::new();
        sink.new_page();
        sink.set_line_style(&LineStyle::default());
        sink.draw_line(1.0, 2.0, 3.0, 4.0);
        sink.new_page();

        assert_eq!(sink.num_pages(), 2);
        let lines: Vec<_> = sink.lines().collect();
        assert_eq!(lines, vec![(Point2D::new(1.0, 2.0), Point2D::new(3.0, 4.0))]);
        assert_eq!(sink.commands[1], DrawCommand::LineStyle(LineStyle::default()));
    }
}
