//! DXF R12 export: one drawing per page, lines on layer `0`.
//!
//! Page coordinates grow downward while DXF grows upward, so y is flipped
//! about the page height.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use walkthru_hlr::{Point2D, PAGE_SIZE};

use super::DrawingPage;

/// Write a page as DXF R12 to any writer.
pub fn write_dxf(page: &DrawingPage, writer: &mut impl Write) -> std::io::Result<()> {
    // Header
    writeln!(writer, "0")?;
    writeln!(writer, "SECTION")?;
    writeln!(writer, "2")?;
    writeln!(writer, "HEADER")?;
    writeln!(writer, "9")?;
    writeln!(writer, "$ACADVER")?;
    writeln!(writer, "1")?;
    writeln!(writer, "AC1009")?; // DXF R12
    writeln!(writer, "9")?;
    writeln!(writer, "$INSUNITS")?;
    writeln!(writer, "70")?;
    writeln!(writer, "4")?; // Millimeters
    writeln!(writer, "0")?;
    writeln!(writer, "ENDSEC")?;

    writeln!(writer, "0")?;
    writeln!(writer, "SECTION")?;
    writeln!(writer, "2")?;
    writeln!(writer, "TABLES")?;
    writeln!(writer, "0")?;
    writeln!(writer, "ENDSEC")?;

    writeln!(writer, "0")?;
    writeln!(writer, "SECTION")?;
    writeln!(writer, "2")?;
    writeln!(writer, "ENTITIES")?;
    for (start, end) in &page.lines {
        write_line(writer, &flip(start), &flip(end))?;
    }
    writeln!(writer, "0")?;
    writeln!(writer, "ENDSEC")?;

    writeln!(writer, "0")?;
    writeln!(writer, "EOF")?;
    Ok(())
}

/// Write a page to a DXF file.
pub fn write_page(page: &DrawingPage, path: &Path) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_dxf(page, &mut writer)?;
    writer.flush()
}

fn flip(p: &Point2D) -> Point2D {
    Point2D::new(p.x, PAGE_SIZE - p.y)
}

fn write_line(writer: &mut impl Write, start: &Point2D, end: &Point2D) -> std::io::Result<()> {
    writeln!(writer, "0")?;
    writeln!(writer, "LINE")?;
    writeln!(writer, "8")?;
    writeln!(writer, "0")?; // Layer name
    writeln!(writer, "10")?;
    writeln!(writer, "{:.6}", start.x)?;
    writeln!(writer, "20")?;
    writeln!(writer, "{:.6}", start.y)?;
    writeln!(writer, "11")?;
    writeln!(writer, "{:.6}", end.x)?;
    writeln!(writer, "21")?;
    writeln!(writer, "{:.6}", end.y)?;
    Ok(())
}
