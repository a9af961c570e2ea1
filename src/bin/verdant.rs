use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

use verdant::{
    AnimationTable, BackendKind, Document, Host, PageDef, PropertyMap, Stage, StageConfig,
    StageReport, Viewport,
};

#[derive(Parser, Debug)]
#[command(name = "verdant", version)]
struct Cli {
    /// Log debug events to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the scroll animation table as JSON.
    Table(TableArgs),
    /// Mount a stage, scroll through the page and print what happened as JSON.
    Simulate(SimulateArgs),
    /// Render the globe after some frames and write it as a PNG.
    Frame(FrameArgs),
}

#[derive(Parser, Debug)]
struct TableArgs {
    /// Stage config JSON; its `animations` replace the landing-page table.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Page definition JSON. Defaults to the built-in landing page.
    #[arg(long)]
    page: Option<PathBuf>,

    /// Stage config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value = "1200x800")]
    viewport: Viewport,

    /// Answer to `prefers-reduced-motion`; the bare flag means `on`.
    #[arg(
        long,
        value_enum,
        default_value_t = MotionChoice::Off,
        num_args = 0..=1,
        default_missing_value = "on"
    )]
    reduced_motion: MotionChoice,

    /// Frames to run after each scroll step.
    #[arg(long, default_value_t = 30)]
    frames: usize,

    /// Pixels scrolled per step.
    #[arg(long, default_value_t = 400.0)]
    scroll_step: f64,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Stage config JSON. The backend is always the CPU one.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value = "1200x800")]
    viewport: Viewport,

    /// Frames to run before capturing.
    #[arg(long, default_value_t = 60)]
    frames: usize,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MotionChoice {
    On,
    Off,
    /// The host cannot answer the query.
    Unknown,
}

impl MotionChoice {
    fn signal(self) -> Option<bool> {
        match self {
            Self::On => Some(true),
            Self::Off => Some(false),
            Self::Unknown => None,
        }
    }
}

#[derive(serde::Serialize)]
struct Step {
    scroll_y: f64,
    active_tweens: usize,
    frames_rendered: Option<u64>,
}

#[derive(serde::Serialize)]
struct Simulation {
    mounted: StageReport,
    timeline: Vec<Step>,
    /// Animated values of every target after the last step, by descriptor.
    elements: BTreeMap<String, Vec<PropertyMap>>,
    unmounted: StageReport,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Table(args) => cmd_table(args),
        Command::Simulate(args) => cmd_simulate(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn read_config(path: Option<&Path>) -> anyhow::Result<StageConfig> {
    let Some(path) = path else {
        return Ok(StageConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    StageConfig::from_json(&json).with_context(|| format!("parse config '{}'", path.display()))
}

fn read_page(path: Option<&Path>) -> anyhow::Result<Document> {
    let Some(path) = path else {
        return Ok(verdant::homepage_document()?);
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read page '{}'", path.display()))?;
    let page =
        PageDef::from_json(&json).with_context(|| format!("parse page '{}'", path.display()))?;
    Ok(page.build()?)
}

/// Bottom edge of the lowest top-level element.
fn page_bottom(doc: &Document) -> f64 {
    doc.element(doc.root())
        .map(|root| {
            root.children()
                .iter()
                .filter_map(|&c| doc.layout(c))
                .fold(0.0_f64, |acc, r| acc.max(r.y1))
        })
        .unwrap_or(0.0)
}

fn element_states(doc: &Document, table: &AnimationTable) -> BTreeMap<String, Vec<PropertyMap>> {
    table
        .iter()
        .map(|d| {
            let props: Vec<_> = d.terminal_state().into_keys().collect();
            let states = doc
                .query_selector_all(&d.targets)
                .into_iter()
                .map(|node| {
                    props
                        .iter()
                        .filter_map(|&p| doc.style(node, p).map(|v| (p, v)))
                        .collect()
                })
                .collect();
            (d.name.clone(), states)
        })
        .collect()
}

fn cmd_table(args: TableArgs) -> anyhow::Result<()> {
    let config = read_config(args.config.as_deref())?;
    let table = config.animation_table()?;
    println!("{}", table.to_json_pretty()?);
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.scroll_step > 0.0,
        "--scroll-step must be positive, got {}",
        args.scroll_step
    );
    let config = read_config(args.config.as_deref())?;
    let table = config.animation_table()?;
    let doc = read_page(args.page.as_deref())?;
    let bottom = page_bottom(&doc);
    let container = verdant::globe_container(&doc);

    let mut host = Host::new(doc, args.viewport).with_reduced_motion(args.reduced_motion.signal());
    let mut stage = Stage::mount(&mut host, container, &config);
    let mounted = stage.report();

    let mut timeline = Vec::new();
    let mut y = 0.0;
    loop {
        host.scroll_to(y);
        host.run_frames(args.frames);
        timeline.push(Step {
            scroll_y: host.scroll_y(),
            active_tweens: stage.active_tweens(),
            frames_rendered: stage.render_stats().map(|s| s.frames_rendered),
        });
        if y >= bottom {
            break;
        }
        y = (y + args.scroll_step).min(bottom);
    }

    let elements = element_states(host.document(), &table);
    stage.unmount(&mut host);
    let out = Simulation {
        mounted,
        timeline,
        elements,
        unmounted: stage.report(),
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut config = read_config(args.config.as_deref())?;
    config.backend = BackendKind::Cpu;
    if config.render.clear_rgba.is_none() {
        config.render.clear_rgba = Some([255, 255, 255, 255]);
    }

    let doc = verdant::homepage_document()?;
    let container = verdant::globe_container(&doc);
    let mut host = Host::new(doc, args.viewport);
    let mut stage = Stage::mount(&mut host, container, &config);
    host.run_frames(args.frames);

    let frame = stage
        .scene()
        .and_then(|scene| scene.borrow().snapshot())
        .context("no frame rendered");
    stage.unmount(&mut host);
    let mut frame = frame?;
    frame.unpremultiply();

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
