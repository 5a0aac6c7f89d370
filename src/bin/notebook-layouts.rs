use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use notebook_layouts::{
    Category, InMemoryCatalog, LayoutEngine, LineSpacing, MediaType, OverlayAlgorithm,
    OverlaySpec, PaperLineType, Placement, Query, Rgba8,
};

const CATALOG_ENV: &str = "NOTEBOOK_LAYOUTS_CATALOG";

#[derive(Parser, Debug)]
#[command(name = "notebook-layouts", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank catalog patterns against a free-text query and print the result as JSON.
    Rank(RankArgs),
    /// Draw notebook guides over an image.
    Overlay(OverlayArgs),
    /// Rasterize a pattern's artwork as a PNG thumbnail.
    Preview(PreviewArgs),
}

#[derive(Parser, Debug)]
struct RankArgs {
    /// Query text.
    #[arg(long)]
    text: String,

    /// Category hint (productivity, study, creative, business, fitness, personal, planning).
    #[arg(long)]
    category: Option<String>,

    /// Style hint, echoed into layout metadata.
    #[arg(long)]
    style: Option<String>,

    /// Omit editable elements from the results.
    #[arg(long, default_value_t = false)]
    no_editable: bool,

    /// Catalog JSON (overrides $NOTEBOOK_LAYOUTS_CATALOG).
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum AlgorithmArg {
    Ruled,
    Grid,
    Calendar,
    SmartMargins,
}

impl From<AlgorithmArg> for OverlayAlgorithm {
    fn from(v: AlgorithmArg) -> Self {
        match v {
            AlgorithmArg::Ruled => OverlayAlgorithm::Ruled,
            AlgorithmArg::Grid => OverlayAlgorithm::Grid,
            AlgorithmArg::Calendar => OverlayAlgorithm::Calendar,
            AlgorithmArg::SmartMargins => OverlayAlgorithm::SmartMargins,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum SpacingArg {
    Narrow,
    Normal,
    Wide,
}

impl From<SpacingArg> for LineSpacing {
    fn from(v: SpacingArg) -> Self {
        match v {
            SpacingArg::Narrow => LineSpacing::Narrow,
            SpacingArg::Normal => LineSpacing::Normal,
            SpacingArg::Wide => LineSpacing::Wide,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum PaperArg {
    Ruled,
    Grid,
    Dots,
    Blank,
}

impl From<PaperArg> for PaperLineType {
    fn from(v: PaperArg) -> Self {
        match v {
            PaperArg::Ruled => PaperLineType::Ruled,
            PaperArg::Grid => PaperLineType::Grid,
            PaperArg::Dots => PaperLineType::Dots,
            PaperArg::Blank => PaperLineType::Blank,
        }
    }
}

#[derive(Parser, Debug)]
struct OverlayArgs {
    /// Input image (png, jpg, webp, gif, bmp).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output image; written in the input's format.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, value_enum)]
    algorithm: AlgorithmArg,

    #[arg(long, value_enum, default_value_t = SpacingArg::Normal)]
    spacing: SpacingArg,

    /// Draw the red margin line (ruled only).
    #[arg(long, default_value_t = false)]
    margin_line: bool,

    /// Guide colour as #rgb, #rrggbb or #rrggbbaa.
    #[arg(long)]
    line_color: Option<Rgba8>,

    /// Guide opacity in [0, 1].
    #[arg(long)]
    opacity: Option<f64>,

    #[arg(long, value_enum, default_value_t = PaperArg::Ruled)]
    paper: PaperArg,

    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    offset_x: f64,

    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    offset_y: f64,

    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Source rotation in degrees about the canvas centre.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    rotation: f64,

    /// Print the compiled overlay plan as JSON to stdout.
    #[arg(long, default_value_t = false)]
    dump_plan: bool,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Pattern id.
    #[arg(long)]
    pattern: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Longest edge in pixels.
    #[arg(long, default_value_t = 256)]
    size: u32,

    /// Catalog JSON (overrides $NOTEBOOK_LAYOUTS_CATALOG).
    #[arg(long)]
    catalog: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Rank(args) => cmd_rank(args),
        Command::Overlay(args) => cmd_overlay(args),
        Command::Preview(args) => cmd_preview(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn load_catalog(flag: Option<&Path>) -> anyhow::Result<InMemoryCatalog> {
    let env_path = std::env::var_os(CATALOG_ENV).map(PathBuf::from);
    let catalog = match flag.map(Path::to_path_buf).or(env_path) {
        Some(path) => InMemoryCatalog::from_path(&path)?,
        None => InMemoryCatalog::builtin()?,
    };
    Ok(catalog)
}

fn cmd_rank(args: RankArgs) -> anyhow::Result<()> {
    let catalog = load_catalog(args.catalog.as_deref())?;

    let mut query = Query::new(args.text).with_editable_requested(!args.no_editable);
    if let Some(category) = args.category.as_deref() {
        query = query.with_category(category.parse::<Category>()?);
    }
    if let Some(style) = args.style {
        query = query.with_style(style);
    }

    let engine = LayoutEngine::new(catalog);
    let response = engine.generate(&query)?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn cmd_overlay(args: OverlayArgs) -> anyhow::Result<()> {
    let media_type = media_type_for(&args.in_path)?;
    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read image '{}'", args.in_path.display()))?;

    let mut spec = OverlaySpec {
        line_spacing: args.spacing.into(),
        margin_line: args.margin_line,
        paper: args.paper.into(),
        placement: Placement {
            offset_x: args.offset_x,
            offset_y: args.offset_y,
            scale: args.scale,
            rotation_degrees: args.rotation,
        },
        ..OverlaySpec::new(args.algorithm.into())
    };
    if let Some(color) = args.line_color {
        spec.line_color = color;
    }
    if let Some(opacity) = args.opacity {
        spec.overlay_opacity = opacity;
    }

    if args.dump_plan {
        let source = notebook_layouts::decode_raster(&bytes, media_type)?;
        let plan = notebook_layouts::compile_overlay(
            source.canvas(),
            &spec,
            &notebook_layouts::FixedContentAreas::default(),
        );
        println!("{}", serde_json::to_string_pretty(&plan)?);
    }

    let out_type = media_type_for(&args.out)?;
    if out_type != media_type {
        anyhow::bail!(
            "output '{}' must use the input format ({media_type})",
            args.out.display()
        );
    }
    let encoded = notebook_layouts::render_overlay_bytes(&bytes, media_type.mime(), &spec)?;

    write_output(&args.out, &encoded.bytes)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    let pattern = catalog
        .get(&args.pattern)
        .with_context(|| format!("unknown pattern '{}'", args.pattern))?;

    let frame = notebook_layouts::render_artwork_preview(&pattern.artwork, args.size)?;
    let encoded = notebook_layouts::encode_raster(&frame, MediaType::Png)?;

    write_output(&args.out, &encoded.bytes)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn media_type_for(path: &Path) -> anyhow::Result<MediaType> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .with_context(|| format!("'{}' has no image extension", path.display()))?;
    Ok(MediaType::from_extension(ext)?)
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write image '{}'", path.display()))
}
