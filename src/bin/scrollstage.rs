use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

use scrollstage::{
    CpuCanvas, FrameRGBA, Interactive, InteractiveConfig, PageSnapshot, RenderSettings,
    SmoothScroll, SmoothScrollConfig, StageLabel,
};

#[derive(Parser, Debug)]
#[command(name = "scrollstage", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame at a scroll offset as a PNG.
    Frame(FrameArgs),
    /// Simulate a smooth scroll from top to bottom and write numbered PNGs.
    Frames(FramesArgs),
    /// Print the master timeline's root labels and duration as JSON.
    Labels(LabelsArgs),
    /// Print every animated property at a scroll offset as JSON.
    State(StateArgs),
}

#[derive(Args, Debug)]
struct SetupArgs {
    /// Page snapshot JSON.
    #[arg(long)]
    page: PathBuf,

    /// Optional config overrides (JSON, camelCase keys).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the shape choreography.
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Lay the page out for this window width first.
    #[arg(long, requires = "height")]
    width: Option<f64>,

    /// Lay the page out for this window height first.
    #[arg(long, requires = "width")]
    height: Option<f64>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    setup: SetupArgs,

    /// Scroll offset in pixels.
    #[arg(long)]
    scroll: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    setup: SetupArgs,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,

    /// Number of frames.
    #[arg(long, default_value_t = 60)]
    count: u32,

    /// Seconds between frames.
    #[arg(long, default_value_t = 1.0 / 30.0)]
    dt: f64,
}

#[derive(Args, Debug)]
struct LabelsArgs {
    #[command(flatten)]
    setup: SetupArgs,
}

#[derive(Args, Debug)]
struct StateArgs {
    #[command(flatten)]
    setup: SetupArgs,

    /// Scroll offset in pixels.
    #[arg(long)]
    scroll: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Labels(args) => cmd_labels(args),
        Command::State(args) => cmd_state(args),
    }
}

fn read_page(path: &Path) -> anyhow::Result<PageSnapshot> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read page snapshot '{}'", path.display()))?;
    let page = PageSnapshot::from_json_str(&s)
        .with_context(|| format!("parse page snapshot '{}'", path.display()))?;
    Ok(page)
}

fn read_config(path: Option<&Path>) -> anyhow::Result<InteractiveConfig> {
    let Some(path) = path else {
        return Ok(InteractiveConfig::default());
    };
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    let config = InteractiveConfig::from_json_str(&s)
        .with_context(|| format!("parse config '{}'", path.display()))?;
    Ok(config)
}

fn setup(args: &SetupArgs) -> anyhow::Result<(Interactive, CpuCanvas)> {
    let mut page = read_page(&args.page)?;
    if let (Some(w), Some(h)) = (args.width, args.height) {
        page = page.resized(w, h)?;
    }
    let config = read_config(args.config.as_deref())?;

    let settings = RenderSettings {
        clear_rgba: Some([18, 20, 28, 255]),
    };
    let mut canvas = CpuCanvas::new(settings);

    let base_dir = args.page.parent().unwrap_or_else(|| Path::new("."));
    let interactive =
        scrollstage::init(&page, config, args.seed, Some(base_dir), &mut canvas)?
            .with_context(|| format!("page '{}' has no interactive element", args.page.display()))?;
    Ok((interactive, canvas))
}

fn write_png(path: &Path, frame: &FrameRGBA) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (mut interactive, mut canvas) = setup(&args.setup)?;
    interactive.seek(args.scroll, &mut canvas)?;

    write_png(&args.out, &canvas.frame())?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.count > 0, "--count must be at least 1");
    anyhow::ensure!(
        args.dt.is_finite() && args.dt > 0.0,
        "--dt must be a positive number of seconds"
    );

    let (mut interactive, mut canvas) = setup(&args.setup)?;
    let mut smooth = SmoothScroll::new(&SmoothScrollConfig::default());
    let start = interactive.link().start();
    let end = interactive.link().end();
    smooth.jump_to(start);

    for k in 0..args.count {
        let p = f64::from(k + 1) / f64::from(args.count);
        smooth.scroll_to(start + (end - start) * p);
        let scroll_y = smooth.update(args.dt);
        let frame = interactive.tick(scroll_y, args.dt, &mut canvas)?;
        if let Some(snap) = frame.snap_scroll {
            smooth.jump_to(snap);
        }

        let out = args.out_dir.join(format!("frame_{k:04}.png"));
        write_png(&out, &canvas.frame())?;
    }

    eprintln!("wrote {} frames to {}", args.count, args.out_dir.display());
    Ok(())
}

fn cmd_labels(args: LabelsArgs) -> anyhow::Result<()> {
    let (interactive, _canvas) = setup(&args.setup)?;
    let labels: Vec<serde_json::Value> = interactive
        .labels()?
        .into_iter()
        .map(|(name, time)| match StageLabel::parse(&name) {
            Some((stage, kind)) => serde_json::json!({
                "name": name,
                "time": time,
                "stage": stage,
                "kind": kind.suffix(),
            }),
            None => serde_json::json!({ "name": name, "time": time }),
        })
        .collect();
    let out = serde_json::json!({
        "duration": interactive.duration(),
        "labels": labels,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_state(args: StateArgs) -> anyhow::Result<()> {
    let (mut interactive, mut canvas) = setup(&args.setup)?;
    let time = interactive.seek(args.scroll, &mut canvas)?;
    let drawables: serde_json::Map<String, serde_json::Value> = interactive
        .applied_drawables()
        .into_iter()
        .map(|(id, state)| {
            let value = serde_json::json!({
                "appliedScale": state.applied_scale,
                "strokeWidth": state.stroke_width,
            });
            (id.to_string(), value)
        })
        .collect();
    let out = serde_json::json!({
        "scroll": args.scroll,
        "time": time,
        "viewportUnit": interactive.viewport_unit(),
        "properties": interactive.described_properties(),
        "drawables": drawables,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
