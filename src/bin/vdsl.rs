use std::{
    io::Read as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "vdsl", version, about = "Inspect and render $v visualization logs")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the parsed modes as JSON.
    Json(JsonArgs),
    /// Print frame and error counts per mode.
    Summary(InputArgs),
    /// Re-emit the parsed log as canonical `$v` text.
    Fmt(InputArgs),
    /// Write one frame as an SVG document.
    Svg(FrameArgs),
    /// Render one frame as a PNG.
    Frame(PngArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Input log; `-` reads stdin.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Args, Debug)]
struct JsonArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Pretty-print the output.
    #[arg(long)]
    pretty: bool,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Mode to take the frame from.
    #[arg(long, default_value = vdsl::DEFAULT_MODE)]
    mode: String,

    /// Frame index (0-based).
    #[arg(long)]
    frame: usize,

    /// Output path.
    #[arg(long)]
    out: PathBuf,

    /// Canvas background color.
    #[arg(long)]
    background: Option<String>,

    /// Grid wall stroke width in pixels.
    #[arg(long)]
    wall_width: Option<f64>,
}

#[derive(Args, Debug)]
struct PngArgs {
    #[command(flatten)]
    target: FrameArgs,

    /// Output scale relative to the canvas size.
    #[arg(long, default_value_t = 1.0)]
    scale: f32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Json(args) => cmd_json(args),
        Command::Summary(args) => cmd_summary(args),
        Command::Fmt(args) => cmd_fmt(args),
        Command::Svg(args) => cmd_svg(args),
        Command::Frame(args) => cmd_frame(args),
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
        .init();
}

fn read_log(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("read log from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("read log '{}'", path.display()))
}

fn cmd_json(args: JsonArgs) -> anyhow::Result<()> {
    let parsed = vdsl::parse(&read_log(&args.input.in_path)?);
    println!("{}", parsed.to_json(args.pretty)?);
    Ok(())
}

fn cmd_summary(args: InputArgs) -> anyhow::Result<()> {
    let parsed = vdsl::parse(&read_log(&args.in_path)?);
    for (mode, frames) in parsed.iter() {
        let errors: usize = frames.iter().map(|f| f.errors.len()).sum();
        println!("{mode}: {} frames, {errors} errors", frames.len());
    }
    Ok(())
}

fn cmd_fmt(args: InputArgs) -> anyhow::Result<()> {
    let parsed = vdsl::parse(&read_log(&args.in_path)?);
    print!("{}", vdsl::emit_modes(&parsed).context("emit $v text")?);
    Ok(())
}

fn render_opts(args: &FrameArgs) -> vdsl::RenderOpts {
    let mut opts = vdsl::RenderOpts::default();
    if let Some(bg) = &args.background {
        opts.background = bg.clone();
    }
    if let Some(w) = args.wall_width {
        opts.wall_width = w;
    }
    opts
}

fn load_frame(args: &FrameArgs) -> anyhow::Result<vdsl::Frame> {
    let parsed = vdsl::parse(&read_log(&args.input.in_path)?);
    let frame = parsed
        .frame(&args.mode, args.frame)
        .with_context(|| format!("select frame {} of mode '{}'", args.frame, args.mode))?;
    for err in &frame.errors {
        eprintln!("{err}");
    }
    Ok(frame.clone())
}

fn ensure_parent(out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_svg(args: FrameArgs) -> anyhow::Result<()> {
    let frame = load_frame(&args)?;
    let svg = vdsl::frame_to_svg(&frame, &render_opts(&args))?;
    ensure_parent(&args.out)?;
    std::fs::write(&args.out, svg)
        .with_context(|| format!("write svg '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frame(args: PngArgs) -> anyhow::Result<()> {
    let frame = load_frame(&args.target)?;
    let img = vdsl::rasterize_frame(
        &frame,
        &render_opts(&args.target),
        vdsl::system_fontdb(),
        args.scale,
    )?;
    ensure_parent(&args.target.out)?;
    image::save_buffer_with_format(
        &args.target.out,
        &img.data,
        img.width,
        img.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.target.out.display()))?;
    eprintln!("wrote {}", args.target.out.display());
    Ok(())
}
