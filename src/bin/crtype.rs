use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

const DEFAULT_TEXT: &str = "Hello from RetroBot! \nMade by cyber";

#[derive(Parser, Debug)]
#[command(name = "crtype", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a typing animation as a looping GIF.
    Render(RenderArgs),
    /// Render a single timeline step as a PNG.
    Frame(FrameArgs),
    /// List the available themes.
    Themes,
}

#[derive(Args, Debug)]
struct BuildArgs {
    /// Text to type out. Blank text falls back to a demo message.
    #[arg(long, default_value = "")]
    text: String,

    /// Theme key; unknown keys use the default theme.
    #[arg(long)]
    theme: Option<String>,

    /// JSON file overriding any subset of the render configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the noise overlay, for reproducible output.
    #[arg(long, conflicts_with = "no_noise")]
    seed: Option<u64>,

    /// Disable the noise overlay entirely.
    #[arg(long)]
    no_noise: bool,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    build: BuildArgs,

    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    build: BuildArgs,

    /// Timeline step index (0-based).
    #[arg(long)]
    index: usize,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Themes => cmd_themes(),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn request_and_options(
    args: &BuildArgs,
) -> anyhow::Result<(crtype::AnimationRequest, crtype::BuildOptions)> {
    let text = if args.text.trim().is_empty() {
        DEFAULT_TEXT.to_owned()
    } else {
        args.text.clone()
    };
    let mut request = crtype::AnimationRequest::new(text);
    request.theme_key = args.theme.clone();

    let config = match &args.config {
        Some(path) => crtype::RenderConfig::from_json_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => crtype::RenderConfig::default(),
    };
    let noise = match (args.no_noise, args.seed) {
        (true, _) => crtype::NoiseMode::Disabled,
        (false, Some(seed)) => crtype::NoiseMode::Seeded(seed),
        (false, None) => crtype::NoiseMode::Entropy,
    };
    Ok((request, crtype::BuildOptions { config, noise }))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (request, opts) = request_and_options(&args.build)?;
    let stats = crtype::build_animation_to_path(&request, &opts, &args.out)
        .with_context(|| format!("render gif '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} frames, {} ms, theme {})",
        args.out.display(),
        stats.frames,
        stats.duration_ms,
        stats.theme
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (request, opts) = request_and_options(&args.build)?;
    let frame = crtype::render_step(&request, &opts, args.index)?;
    write_png(&args.out, &frame.pixels)?;

    eprintln!(
        "wrote {} (step {}, {} ms)",
        args.out.display(),
        args.index,
        frame.delay_ms
    );
    Ok(())
}

fn write_png(out: &Path, pixels: &crtype::PixelBuffer) -> anyhow::Result<()> {
    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    // Frames are opaque, so premultiplied and straight alpha coincide.
    image::save_buffer_with_format(
        out,
        &pixels.data,
        pixels.width,
        pixels.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", out.display()))
}

fn cmd_themes() -> anyhow::Result<()> {
    for theme in crtype::themes() {
        let marker = if theme.key == crtype::DEFAULT_THEME_KEY {
            " (default)"
        } else {
            ""
        };
        println!(
            "{:<6} {:<10} bg {} text {}{marker}",
            theme.key,
            theme.label,
            theme.background.to_hex(),
            theme.text.to_hex()
        );
    }
    Ok(())
}
