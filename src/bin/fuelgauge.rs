use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use fuelgauge::DrawSurface as _;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "fuelgauge", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the face for a fixed time as a PNG.
    Frame(FrameArgs),
    /// Print the needle angle and digit wheels for a time.
    Inspect(InspectArgs),
    /// Re-render a PNG from the local clock on every second boundary.
    Live(LiveArgs),
}

#[derive(Parser, Debug)]
struct FaceArgs {
    /// Face manifest JSON; asset paths are relative to its directory.
    #[arg(long)]
    manifest: PathBuf,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 320)]
    width: u32,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 320)]
    height: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    face: FaceArgs,

    /// Wall-clock time as HH:MM (24-hour).
    #[arg(long)]
    time: String,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Wall-clock time as HH:MM (24-hour).
    #[arg(long)]
    time: String,
}

#[derive(Parser, Debug)]
struct LiveArgs {
    #[command(flatten)]
    face: FaceArgs,

    /// Stop after this many ticks (runs until interrupted when omitted).
    #[arg(long)]
    ticks: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Inspect(args) => cmd_inspect(args),
        Command::Live(args) => cmd_live(args),
    }
}

fn load_face(path: &Path) -> anyhow::Result<fuelgauge::FuelGaugeFace> {
    let manifest = fuelgauge::FaceManifest::from_json_file(path)
        .with_context(|| format!("load manifest '{}'", path.display()))?;
    let root = path.parent().unwrap_or_else(|| Path::new("."));
    let assets = fuelgauge::FaceAssets::load(&manifest, root)?;
    Ok(fuelgauge::FuelGaugeFace::new(assets, manifest.layout)?)
}

fn write_png(surface: fuelgauge::CpuSurface, out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let frame = surface.into_frame().into_straight();
    image::save_buffer_with_format(
        out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", out.display()))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let time = fuelgauge::TimeSample::parse(&args.time)?;
    let mut face = load_face(&args.face.manifest)?;

    let viewport = fuelgauge::Viewport::new(args.face.width, args.face.height)?;
    let mut surface = fuelgauge::CpuSurface::new(viewport.width(), viewport.height())?;
    face.render(&mut surface, viewport, time)?;

    write_png(surface, &args.face.out)?;
    eprintln!("wrote {}", args.face.out.display());
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let time = fuelgauge::TimeSample::parse(&args.time)?;
    let (hours, minutes) = fuelgauge::time_digits(time);
    println!("time:    {time}");
    println!("angle:   {:.2}", fuelgauge::needle_angle(time));
    println!("hours:   {}{}", hours.first(), hours.second());
    println!("minutes: {}{}", minutes.first(), minutes.second());
    Ok(())
}

fn cmd_live(args: LiveArgs) -> anyhow::Result<()> {
    let face = load_face(&args.face.manifest)?;
    let mut host = fuelgauge::FaceHost::new(face, fuelgauge::LocalClock);
    host.on_visibility_changed(true);

    let mut drawn = 0u64;
    loop {
        let mut surface = fuelgauge::CpuSurface::new(args.face.width, args.face.height)?;
        let time = host.redraw(&mut surface)?;
        tracing::debug!(%time, width = surface.width(), "tick");
        write_png(surface, &args.face.out)?;
        drawn += 1;

        if args.ticks.is_some_and(|n| drawn >= n) {
            break;
        }
        let Some(delay) = host.next_tick_delay_from_now() else {
            break;
        };
        std::thread::sleep(delay);
    }

    eprintln!("wrote {} ({drawn} frames)", args.face.out.display());
    Ok(())
}
