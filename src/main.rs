use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};

use geojson_shapes::config::FileConfig;
use geojson_shapes::geometry::{Bounds, total_area};
use geojson_shapes::layers::is_supported_path;
use geojson_shapes::{LayerData, LayerStyle, ReadSummary, read_polygons_with_summary};

/// Read GeoJSON polygons and emit shape-layer data for an image viewer
///
/// Examples:
///   # Print layer data for one file as JSON
///   geojson-shapes cells.geojson
///
///   # Two files, pretty JSON written to a file
///   geojson-shapes a.geojson b.geojson --pretty -o layers.json
///
///   # Only show what was found
///   geojson-shapes annotations.json --summary
///
///   # Override styling
///   geojson-shapes cells.geojson --edge-color yellow --opacity 0.5
#[derive(Parser, Debug)]
#[command(name = "geojson-shapes")]
#[command(version, about, long_about = None)]
struct Args {
    /// GeoJSON files to read, one layer per file
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Path to config file (optional, auto-searches geojson-shapes.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write layer JSON here instead of stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Print a human-readable summary instead of JSON
    #[arg(long)]
    summary: bool,

    /// Edge width applied to every shape
    #[arg(long)]
    edge_width: Option<f64>,

    /// Edge color applied to every shape
    #[arg(long)]
    edge_color: Option<String>,

    /// Face color applied to every shape
    #[arg(long)]
    face_color: Option<String>,

    /// Layer opacity, 0.0 to 1.0
    #[arg(long)]
    opacity: Option<f64>,

    /// Layer blending mode
    #[arg(long)]
    blending: Option<String>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let (file_config, config_source, skipped_configs) = if let Some(ref config_path) = args.config
    {
        if !config_path.exists() {
            bail!("Config file not found: {:?}", config_path);
        }
        let config = FileConfig::from_path(config_path)?;
        (config, Some(config_path.clone()), Vec::new())
    } else {
        let search = FileConfig::load();
        (
            search.config.unwrap_or_default(),
            search.source,
            search.skipped,
        )
    };

    init_logging(args.verbose || file_config.verbose);

    for (path, reason) in &skipped_configs {
        warn!(path = %path.display(), %reason, "ignoring config file");
    }
    if let Some(ref path) = config_source {
        debug!(path = %path.display(), "loaded config");
    }

    if let Some(opacity) = args.opacity
        && !(0.0..=1.0).contains(&opacity)
    {
        bail!("--opacity must be between 0.0 and 1.0, got {}", opacity);
    }

    let style = merge_style(file_config.style, &args);
    let pretty = args.pretty || file_config.pretty;
    debug!(?style, pretty, "resolved settings");

    let mut layers: Vec<LayerData> = Vec::with_capacity(args.files.len());
    let mut summaries: Vec<ReadSummary> = Vec::with_capacity(args.files.len());

    for path in &args.files {
        if !is_supported_path(path) {
            warn!(path = %path.display(), "unexpected extension, reading as GeoJSON anyway");
        }

        let spinner = create_spinner(&format!("Reading {}...", path.display()));
        let start = Instant::now();
        let (records, summary) = read_polygons_with_summary(path.as_path())
            .with_context(|| format!("Failed to read {}", path.display()))?;
        spinner.finish_with_message(format!(
            "{}: {} [{:.1}s]",
            path.display(),
            summary,
            start.elapsed().as_secs_f32()
        ));

        layers.push(LayerData::from_records(records, &style));
        summaries.push(summary);
    }

    if args.summary {
        print_summary(&args.files, &layers, &summaries);
        return Ok(());
    }

    match args.output {
        Some(ref output_path) => {
            let file = File::create(output_path)
                .with_context(|| format!("Failed to create {}", output_path.display()))?;
            let mut writer = BufWriter::new(file);
            write_layers(&mut writer, &layers, pretty)?;
            writer.flush().context("Failed to flush output")?;
            info!(path = %output_path.display(), layers = layers.len(), "wrote layer data");
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            write_layers(&mut writer, &layers, pretty)?;
            writeln!(writer).context("Failed to write output")?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "geojson_shapes=debug"
    } else {
        "geojson_shapes=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
        .ok();
}

/// CLI flags win over the config file, which wins over built-in defaults
fn merge_style(base: LayerStyle, args: &Args) -> LayerStyle {
    LayerStyle {
        edge_width: args.edge_width.unwrap_or(base.edge_width),
        edge_color: args.edge_color.clone().unwrap_or(base.edge_color),
        face_color: args.face_color.clone().unwrap_or(base.face_color),
        opacity: args.opacity.unwrap_or(base.opacity),
        blending: args.blending.clone().unwrap_or(base.blending),
    }
}

fn write_layers<W: Write>(writer: &mut W, layers: &[LayerData], pretty: bool) -> Result<()> {
    let written = if pretty {
        serde_json::to_writer_pretty(writer, layers)
    } else {
        serde_json::to_writer(writer, layers)
    };
    written.context("Failed to serialize layer data")
}

fn print_summary(files: &[PathBuf], layers: &[LayerData], summaries: &[ReadSummary]) {
    let mut total = ReadSummary::default();

    println!("geojson-shapes - Layer Summary");
    println!("==============================");
    println!();

    for ((path, layer), summary) in files.iter().zip(layers).zip(summaries) {
        println!("{}", path.display());
        println!("  Polygons: {}", summary.polygons);
        println!("  Features: {}", summary.features);
        for (name, count) in &summary.skipped {
            println!("  Skipped {}: {}", name, count);
        }
        if summary.unlocated > 0 {
            println!("  Without geometry: {}", summary.unlocated);
        }
        if summary.holes_dropped > 0 {
            println!("  Holes dropped: {}", summary.holes_dropped);
        }

        let vertices: usize = layer.data.iter().map(|r| r.len()).sum();
        println!("  Vertices: {}", vertices);

        match Bounds::from_records(&layer.data) {
            Some(bounds) => println!(
                "  Bounds: x {:.3}..{:.3}, y {:.3}..{:.3} ({:.3} x {:.3})",
                bounds.min_x,
                bounds.max_x,
                bounds.min_y,
                bounds.max_y,
                bounds.width(),
                bounds.height()
            ),
            None => println!("  Bounds: (empty)"),
        }
        println!("  Area: {:.3}", total_area(&layer.data));
        println!();

        total.merge(summary);
    }

    if files.len() > 1 {
        println!("Total: {}", total);
    }
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
