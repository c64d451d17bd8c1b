//! Page collection and export.
//!
//! [`DrawingDocument`] is a [`PageSink`] that keeps every page's lines so
//! they can be written out afterwards as SVG, DXF, or a JSON command log.

use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};
use walkthru_hlr::{DrawCommand, LineStyle, PageSink, Point2D};

use crate::Result;

pub mod dxf;
pub mod svg;

/// One rendered page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawingPage {
    /// Stroke for every line on the page.
    pub style: LineStyle,
    /// Line segments in page coordinates.
    pub lines: Vec<(Point2D, Point2D)>,
}

/// Every page of a rendered walk-through.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawingDocument {
    pages: Vec<DrawingPage>,
}

impl DrawingDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pages in order.
    pub fn pages(&self) -> &[DrawingPage] {
        &self.pages
    }

    /// Number of pages.
    pub fn num_pages(&self) -> usize {
        self.pages.len()
    }

    /// Number of lines across all pages.
    pub fn num_lines(&self) -> usize {
        self.pages.iter().map(|p| p.lines.len()).sum()
    }

    fn current_page(&mut self) -> &mut DrawingPage {
        if self.pages.is_empty() {
            self.pages.push(DrawingPage::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// The document replayed as the command stream that produced it.
    pub fn to_commands(&self) -> Vec<DrawCommand> {
        let mut commands = Vec::with_capacity(self.num_lines() + 2 * self.pages.len());
        for page in &self.pages {
            commands.push(DrawCommand::NewPage);
            commands.push(DrawCommand::LineStyle(page.style));
            commands.extend(
                page.lines
                    .iter()
                    .map(|&(start, end)| DrawCommand::Line { start, end }),
            );
        }
        commands
    }

    /// Serialize the command stream to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_commands())?)
    }

    /// Write the JSON command log to `path`.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Write one SVG file per page into `dir`, returning the paths written.
    pub fn write_svg_pages(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        self.write_pages(dir.as_ref(), "svg", svg::write_page)
    }

    /// Write one DXF R12 file per page into `dir`, returning the paths written.
    pub fn write_dxf_pages(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        self.write_pages(dir.as_ref(), "dxf", dxf::write_page)
    }

    fn write_pages(
        &self,
        dir: &Path,
        extension: &str,
        write: fn(&DrawingPage, &Path) -> std::io::Result<()>,
    ) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)?;
        let mut written = Vec::with_capacity(self.pages.len());
        for (index, page) in self.pages.iter().enumerate() {
            let path = dir.join(page_file_name(index, extension));
            write(page, &path)?;
            written.push(path);
        }
        info!("wrote {} {extension} pages to {}", written.len(), dir.display());
        Ok(written)
    }
}

/// File name for the zero-based page `index`: `page-001.svg`, ...
pub fn page_file_name(index: usize, extension: &str) -> String {
    format!("page-{:03}.{extension}", index + 1)
}

impl PageSink for DrawingDocument {
    fn new_page(&mut self) {
        self.pages.push(DrawingPage::default());
    }

    fn set_line_style(&mut self, style: &LineStyle) {
        self.current_page().style = *style;
    }

    fn draw_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) {
        self.current_page()
            .lines
            .push((Point2D::new(x0, y0), Point2D::new(x1, y1)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use walkthru_hlr::RecordingSink;

    fn sample(sink: &mut dyn PageSink) {
        let style = LineStyle {
            width: 0.3,
            color: [0, 0, 255],
        };
        sink.new_page();
        sink.set_line_style(&style);
        sink.draw_line(0.0, 0.0, 54.0, 54.0);
        sink.draw_line(10.0, 20.0, 30.0, 40.0);
        sink.new_page();
        sink.set_line_style(&style);
    }

    #[test]
    fn test_groups_lines_by_page() {
        let mut doc = DrawingDocument::new();
        sample(&mut doc);
        assert_eq!(doc.num_pages(), 2);
        assert_eq!(doc.num_lines(), 2);
        assert_eq!(doc.pages()[0].style.color, [0, 0, 255]);
        assert!(doc.pages()[1].lines.is_empty());
    }

    #[test]
    fn test_commands_match_recording() {
        let mut doc = DrawingDocument::new();
        let mut recorder = RecordingSink::new();
        sample(&mut doc);
        sample(&mut recorder);
        assert_eq!(doc.to_commands(), recorder.commands);
    }

    #[test]
    fn test_json_command_log() {
        let mut doc = DrawingDocument::new();
        sample(&mut doc);
        let json = doc.to_json().unwrap();
        let commands: Vec<DrawCommand> = serde_json::from_str(&json).unwrap();
        assert_eq!(commands.len(), 6);
        assert!(json.contains("\"type\": \"NewPage\""));
    }

    #[test]
    fn test_line_before_page_opens_one() {
        let mut doc = DrawingDocument::new();
        doc.draw_line(1.0, 1.0, 2.0, 2.0);
        assert_eq!(doc.num_pages(), 1);
        assert_eq!(doc.num_lines(), 1);
    }

    #[test]
    fn test_page_file_names() {
        assert_eq!(page_file_name(0, "svg"), "page-001.svg");
        assert_eq!(page_file_name(11, "dxf"), "page-012.dxf");
    }
}
