use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use rayframe::scene::RenderDef;
use rayframe::{
    FrameHost, FrameSink, PngSink, PpmSink, RaytracerModule, RenderMode, RenderSettings,
    RenderThreading, SceneDef,
};

#[derive(Parser, Debug)]
#[command(name = "rayframe", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame through the frame host.
    Frame(FrameArgs),
    /// Write one PNG per host frame while progressive sampling refines the image.
    Progressive(ProgressiveArgs),
    /// Present progressive frames in a window until Escape is pressed; arrow keys move the
    /// camera and Shift speeds them up.
    #[cfg(feature = "window")]
    Window(WindowArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Scene description JSON. Defaults to the built-in demo scene.
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Generate a Poisson-disk sphere layout from this seed instead of loading a scene.
    #[arg(long, value_name = "SEED", conflicts_with = "scene")]
    generate: Option<u64>,

    /// Output width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Output height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Samples per pixel.
    #[arg(long)]
    spp: Option<u32>,

    /// Maximum path depth.
    #[arg(long)]
    max_depth: Option<u32>,

    /// Sampling seed.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output image path.
    #[arg(long)]
    out: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Png)]
    format: OutputFormat,

    /// Render rows in parallel.
    #[arg(long)]
    parallel: bool,

    /// Worker thread count for parallel rendering.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct ProgressiveArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output directory for `frame_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Number of host frames to draw.
    #[arg(long, default_value_t = 8)]
    frames: u64,

    /// Pixels sampled per frame.
    #[arg(long, default_value_t = 4096)]
    budget: usize,
}

#[cfg(feature = "window")]
#[derive(Parser, Debug)]
struct WindowArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Pixels sampled per frame.
    #[arg(long, default_value_t = 4096)]
    budget: usize,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Png,
    Ppm,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Progressive(args) => cmd_progressive(args),
        #[cfg(feature = "window")]
        Command::Window(args) => cmd_window(args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

impl SceneArgs {
    fn overrides(&self) -> RenderDef {
        RenderDef {
            width: self.width,
            height: self.height,
            samples_per_pixel: self.spp,
            max_depth: self.max_depth,
            seed: self.seed,
        }
    }

    fn build_module(&self, mode: RenderMode) -> anyhow::Result<RaytracerModule> {
        let overrides = self.overrides();
        if let Some(seed) = self.generate {
            let settings = overrides.apply(RenderSettings::default());
            return RaytracerModule::generated(seed, settings, mode)
                .with_context(|| format!("generate scene from seed {seed}"));
        }
        let module = match &self.scene {
            Some(path) => {
                let mut def = SceneDef::from_path(path)?;
                def.render = RenderDef {
                    width: overrides.width.or(def.render.width),
                    height: overrides.height.or(def.render.height),
                    samples_per_pixel: overrides.samples_per_pixel.or(def.render.samples_per_pixel),
                    max_depth: overrides.max_depth.or(def.render.max_depth),
                    seed: overrides.seed.or(def.render.seed),
                };
                let assets_root = path.parent().unwrap_or_else(|| Path::new("."));
                RaytracerModule::from_scene_def(&def, assets_root, mode)
                    .with_context(|| format!("build scene '{}'", path.display()))?
            }
            None => {
                let settings = overrides.apply(RenderSettings::default());
                RaytracerModule::demo_with_settings(settings, mode)
                    .with_context(|| "build demo scene")?
            }
        };
        Ok(module)
    }
}

fn run_one<S: FrameSink>(module: RaytracerModule, sink: S) -> anyhow::Result<()> {
    let mut host = FrameHost::load(module, sink)?;
    host.run(1)?;
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mode = RenderMode::Full {
        threading: RenderThreading {
            parallel: args.parallel,
            threads: args.threads,
        },
    };
    let module = args.scene.build_module(mode)?;

    match args.format {
        OutputFormat::Png => run_one(module, PngSink::single(&args.out)),
        OutputFormat::Ppm => run_one(module, PpmSink::new(&args.out)),
    }
    .with_context(|| format!("render frame to '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_progressive(args: ProgressiveArgs) -> anyhow::Result<()> {
    let module = args.scene.build_module(RenderMode::Progressive {
        budget: args.budget,
    })?;

    let mut host = FrameHost::load(module, PngSink::dir(&args.out_dir))?;
    host.run(args.frames)
        .with_context(|| format!("render progressive frames to '{}'", args.out_dir.display()))?;

    eprintln!(
        "wrote {} frames to {}",
        host.sink().written().len(),
        args.out_dir.display()
    );
    Ok(())
}

#[cfg(feature = "window")]
fn cmd_window(args: WindowArgs) -> anyhow::Result<()> {
    let module = args.scene.build_module(RenderMode::Progressive {
        budget: args.budget,
    })?;

    let mut host = FrameHost::load(module, rayframe::WindowSink::new("rayframe"))?;
    let mut last = std::time::Instant::now();
    while host.sink().is_open() {
        let now = std::time::Instant::now();
        let dt = now.duration_since(last).as_secs_f64();
        last = now;

        let keys = host.sink().keys();
        for step in keys.navigation() {
            host.module_mut().navigate(step, keys.shift, dt)?;
        }

        if let Err(e) = host.draw_frame() {
            if !host.sink().is_open() {
                break;
            }
            return Err(e.into());
        }
    }
    host.finish()?;
    Ok(())
}
