//! walkthru CLI - render hidden-line walk-throughs from scene files

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use std::path::{Path, PathBuf};
use walkthru::{
    DrawingDocument, ObjectLibrary, PrototypeLibrary, SceneFile, SceneGeometry,
};

mod logging;

use logging::{init_logging, LoggingConfig};

#[derive(Parser)]
#[command(name = "walkthru")]
#[command(about = "Render perspective walk-throughs with hidden lines removed", long_about = None)]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every shot of a scene, one page per shot
    Render {
        /// Scene file (.toml or .json)
        scene: PathBuf,
        /// Output directory
        #[arg(short, long, default_value = "out")]
        out: PathBuf,
        /// Page format
        #[arg(short, long, value_enum, default_value_t = Format::Svg)]
        format: Format,
    },
    /// Display information about a scene file
    Info {
        /// Scene file (.toml or .json)
        scene: PathBuf,
    },
    /// List the built-in prototypes
    Prototypes,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// One SVG file per page
    Svg,
    /// One DXF R12 file per page
    Dxf,
    /// A single JSON log of drawing commands
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(LoggingConfig::from_verbosity(cli.verbose));

    match cli.command {
        Commands::Render { scene, out, format } => render(&scene, &out, format)?,
        Commands::Info { scene } => show_info(&scene)?,
        Commands::Prototypes => list_prototypes(),
    }

    Ok(())
}

fn render(scene_path: &Path, out: &Path, format: Format) -> Result<()> {
    let scene = SceneFile::load(scene_path)
        .with_context(|| format!("failed to load {}", scene_path.display()))?;

    let mut doc = DrawingDocument::new();
    let report = scene.render(&mut doc);

    let written = match format {
        Format::Svg => doc.write_svg_pages(out)?,
        Format::Dxf => doc.write_dxf_pages(out)?,
        Format::Json => {
            std::fs::create_dir_all(out)?;
            let path = out.join("pages.json");
            doc.write_json(&path)?;
            vec![path]
        }
    };

    for path in &written {
        info!("wrote {}", path.display());
    }
    println!(
        "Rendered {} pages ({} lines, {} hidden segments) to {}",
        report.pages,
        report.lines_drawn,
        report.segments_hidden,
        out.display()
    );
    if !report.is_clean() {
        println!("{} items skipped:", report.diagnostics.len());
        for diagnostic in &report.diagnostics {
            println!("  {diagnostic}");
        }
    }

    Ok(())
}

fn show_info(scene_path: &Path) -> Result<()> {
    let scene = SceneFile::load(scene_path)
        .with_context(|| format!("failed to load {}", scene_path.display()))?;
    let library = scene.library()?;
    let walk = scene.walk_thru();

    println!("walkthru scene: {}", scene_path.display());
    println!("  Shots: {}", walk.shots.len());
    println!("  Placements: {}", walk.placements.len());
    println!("  Custom prototypes: {}", scene.prototypes.len());

    println!("\nShots:");
    for (i, shot) in walk.shots.iter().enumerate() {
        println!(
            "  {}: at {:?} facing {:?}",
            i + 1,
            shot.position,
            shot.direction
        );
    }

    if !walk.placements.is_empty() {
        println!("\nPlacements:");
        for (i, placement) in walk.placements.iter().enumerate() {
            let status = match library.get(&placement.name) {
                Some(proto) => format!(
                    "{} vertices, {} edges, {} faces",
                    proto.vertices().len(),
                    proto.edges().len(),
                    proto.faces().len()
                ),
                None => "unknown prototype".to_string(),
            };
            println!(
                "  {}: {} at {:?} scale {} rotated {} deg ({status})",
                i + 1,
                placement.name,
                placement.position,
                placement.scale,
                placement.orientation
            );
        }
    }

    Ok(())
}

fn list_prototypes() {
    let library = PrototypeLibrary::with_builtins();
    for name in library.names() {
        if let Some(proto) = library.get(name) {
            println!(
                "{name}: {} vertices, {} edges, {} faces",
                proto.vertices().len(),
                proto.edges().len(),
                proto.faces().len()
            );
        }
    }
}
