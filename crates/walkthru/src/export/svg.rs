//! SVG export: one 54 x 54 mm document per page.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use walkthru_hlr::PAGE_SIZE;

use super::DrawingPage;

/// Render a page as an SVG document string.
pub fn page_to_svg(page: &DrawingPage) -> String {
    let [r, g, b] = page.style.color;
    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{PAGE_SIZE}mm\" height=\"{PAGE_SIZE}mm\" viewBox=\"0 0 {PAGE_SIZE} {PAGE_SIZE}\">\n\
         <g stroke=\"rgb({r},{g},{b})\" stroke-width=\"{}\" stroke-linecap=\"round\" fill=\"none\">\n",
        page.style.width
    );
    for (start, end) in &page.lines {
        svg.push_str(&format!(
            "<line x1=\"{:.4}\" y1=\"{:.4}\" x2=\"{:.4}\" y2=\"{:.4}\"/>\n",
            start.x, start.y, end.x, end.y
        ));
    }
    svg.push_str("</g>\n</svg>\n");
    svg
}

/// Write a page to an SVG file.
pub fn write_page(page: &DrawingPage, path: &Path) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(page_to_svg(page).as_bytes())?;
    writer.flush()
}
