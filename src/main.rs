use clap::{Parser, Subcommand};
use pixedit::format::registry;
use pixedit::session::{EditOp, EditorSession, format_for_extension};
use pixedit::transform::{CropRect, Direction, Padding, Rgb, VignetteParams};
use pixedit::Quality;
use std::path::{Path, PathBuf};

/// Shared flags for commands that export an image.
#[derive(clap::Args, Clone)]
struct ExportArgs {
    /// Output format: a media type (image/png) or extension (png, jpg, webp,
    /// avif, bmp, ico). Defaults to the input file's own format.
    #[arg(long)]
    format: Option<String>,

    /// Encoding quality 0-100 (ignored by formats without quality support)
    #[arg(long, default_value_t = 92)]
    quality: u32,

    /// Directory to write into (defaults to the input's directory)
    #[arg(long)]
    out: Option<PathBuf>,
}

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "pixedit")]
#[command(about = "Edit an image and export it in any supported format")]
#[command(long_about = "\
Edit an image and export it in any supported format

Each command loads the input, applies one transform, and writes
<input-name>-edited.<ext> in the chosen format. The export format is
independent of the edit: any transform can be saved as PNG, JPEG, WebP,
AVIF, BMP, or ICO.

Examples:

  pixedit resize photo.jpg --width 800 --height 600
  pixedit vignette photo.jpg --intensity 80 --spread 60 --format webp
  pixedit expand logo.png --all 32 --color '#ffffff' --format bmp
  pixedit convert photo.jpg --format ico
  pixedit formats --json")]
#[command(version = version_string())]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resample to exact dimensions (Lanczos3)
    Resize {
        input: PathBuf,
        #[arg(long)]
        width: u32,
        #[arg(long)]
        height: u32,
        #[command(flatten)]
        export: ExportArgs,
    },
    /// Extract a rectangle
    Crop {
        input: PathBuf,
        #[arg(long, default_value_t = 0)]
        x: u32,
        #[arg(long, default_value_t = 0)]
        y: u32,
        #[arg(long)]
        width: u32,
        #[arg(long)]
        height: u32,
        #[command(flatten)]
        export: ExportArgs,
    },
    /// Grow the canvas with a colored border
    Expand {
        input: PathBuf,
        /// Padding for all four edges (overridden per edge below)
        #[arg(long)]
        all: Option<u32>,
        #[arg(long)]
        top: Option<u32>,
        #[arg(long)]
        right: Option<u32>,
        #[arg(long)]
        bottom: Option<u32>,
        #[arg(long)]
        left: Option<u32>,
        /// Border fill color
        #[arg(long, default_value = "#ffffff")]
        color: Rgb,
        #[command(flatten)]
        export: ExportArgs,
    },
    /// Darken or tint toward an edge or the corners
    Vignette {
        input: PathBuf,
        /// radial, left, right, top or bottom
        #[arg(long, default_value = "radial")]
        direction: Direction,
        #[arg(long, default_value = "#000000")]
        color: Rgb,
        /// Strength 0-100; values above 100 deepen the effect further
        #[arg(long, default_value_t = 60)]
        intensity: u32,
        /// Gradient reach 0-100
        #[arg(long, default_value_t = 50)]
        spread: u32,
        #[command(flatten)]
        export: ExportArgs,
    },
    /// Re-encode without editing
    Convert {
        input: PathBuf,
        #[command(flatten)]
        export: ExportArgs,
    },
    /// List supported output formats
    Formats {
        /// Emit the list as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Resize { input, width, height, export } => {
            run_edit(&input, &[EditOp::Resize { width, height }], &export)
        }
        Command::Crop { input, x, y, width, height, export } => {
            run_edit(&input, &[EditOp::Crop(CropRect { x, y, width, height })], &export)
        }
        Command::Expand { input, all, top, right, bottom, left, color, export } => {
            let base = all.unwrap_or(0);
            let padding = Padding {
                top: top.unwrap_or(base),
                right: right.unwrap_or(base),
                bottom: bottom.unwrap_or(base),
                left: left.unwrap_or(base),
            };
            run_edit(&input, &[EditOp::Expand { padding, fill: color }], &export)
        }
        Command::Vignette { input, direction, color, intensity, spread, export } => {
            let params = VignetteParams { direction, color, intensity, spread };
            run_edit(&input, &[EditOp::Vignette(params)], &export)
        }
        Command::Convert { input, export } => run_edit(&input, &[], &export),
        Command::Formats { json } => print_formats(json),
    }
}

/// Load, apply the op chain, and export with the shared flags.
fn run_edit(
    input: &Path,
    ops: &[EditOp],
    export: &ExportArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = EditorSession::load(input)?;
    session.apply_all(ops)?;

    let media_type = resolve_format(input, export.format.as_deref());
    let out_dir = match &export.out {
        Some(dir) => dir.clone(),
        None => input.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(".")),
    };

    let result =
        session.export(registry::builtin(), &media_type, Quality::new(export.quality), &out_dir)?;

    if let Some(warning) = result.warning {
        println!("Warning: {warning}");
    }
    let (w, h) = session.buffer().dimensions();
    println!("{} ({}x{}, {} bytes)", result.path.display(), w, h, result.bytes);
    Ok(())
}

/// `--format` accepts a media type or a bare extension; with no flag the
/// input keeps its own format.
fn resolve_format(input: &Path, flag: Option<&str>) -> String {
    match flag {
        Some(f) if f.contains('/') => f.to_string(),
        Some(ext) => format_for_extension(ext).to_string(),
        None => {
            let ext = input.extension().and_then(|e| e.to_str()).unwrap_or("");
            format_for_extension(ext).to_string()
        }
    }
}

fn print_formats(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let descriptors = registry::builtin().descriptors();
    if json {
        println!("{}", serde_json::to_string_pretty(&descriptors)?);
        return Ok(());
    }
    for d in descriptors {
        let kind = if d.capabilities.native { "native" } else { "custom" };
        let quality = if d.capabilities.supports_quality { ", quality" } else { "" };
        let cap = match d.capabilities.max_dimensions {
            Some((w, h)) => format!(", max {w}x{h}"),
            None => String::new(),
        };
        println!("{:<5} {:<13} .{:<5} ({kind}{quality}{cap})", d.label, d.media_type, d.extension);
    }
    Ok(())
}
