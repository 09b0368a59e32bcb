use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "spritekit", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the cell size of a sprite sheet PNG as `WxH`.
    Detect(DetectArgs),
    /// Split loose artwork into one PNG per connected part.
    Segment(SegmentArgs),
    /// Lay out sprite sheet metadata from a sheet spec JSON.
    Build(BuildArgs),
    /// Recompute sheet metadata for a new cell size.
    Rebuild(RebuildArgs),
    /// Lay out a one-row looping background sheet from a PNG.
    Background(BackgroundArgs),
    /// Cut one animation's row out of a sheet PNG.
    Strip(StripArgs),
    /// Simulate playback of one animation and print every tick.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct DetectArgs {
    /// Input sheet PNG.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Alpha values at or below this count as transparent.
    #[arg(long, default_value_t = 0)]
    alpha_threshold: u8,
}

#[derive(Parser, Debug)]
struct SegmentArgs {
    /// Input PNG.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Directory receiving `part_<n>.png` files.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct BuildArgs {
    /// Sheet spec JSON (cell size or resolution label plus animation rows).
    #[arg(long)]
    spec: PathBuf,

    /// Infer the cell size from this sheet PNG instead of the spec.
    #[arg(long)]
    detect: Option<PathBuf>,

    /// Append the stock Attack/Hurt/Die rows when missing.
    #[arg(long)]
    common: bool,

    /// Output metadata JSON; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RebuildArgs {
    /// Existing metadata JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// New frame width in pixels.
    #[arg(long)]
    width: u32,

    /// New frame height in pixels.
    #[arg(long)]
    height: u32,

    /// Output metadata JSON; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct BackgroundArgs {
    /// Input background PNG with frames laid side by side.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Number of frames in the strip.
    #[arg(long)]
    frames: u32,

    /// Animation name.
    #[arg(long, default_value = "Background")]
    name: String,

    /// Output metadata JSON; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct StripArgs {
    /// Input sheet PNG.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Metadata JSON describing the sheet.
    #[arg(long)]
    meta: PathBuf,

    /// Animation to cut out.
    #[arg(long)]
    animation: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Metadata JSON.
    #[arg(long)]
    meta: PathBuf,

    /// Animation to start with.
    #[arg(long)]
    animation: String,

    /// Playback rate.
    #[arg(long, default_value_t = 12.0)]
    fps: f64,

    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 24)]
    ticks: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Detect(args) => cmd_detect(args),
        Command::Segment(args) => cmd_segment(args),
        Command::Build(args) => cmd_build(args),
        Command::Rebuild(args) => cmd_rebuild(args),
        Command::Background(args) => cmd_background(args),
        Command::Strip(args) => cmd_strip(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn read_png(path: &Path) -> anyhow::Result<spritekit::PixelBuffer> {
    let img = image::open(path)
        .with_context(|| format!("open png '{}'", path.display()))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    Ok(spritekit::PixelBuffer::from_rgba8(
        width,
        height,
        img.into_raw(),
    )?)
}

fn write_png(path: &Path, pixels: &spritekit::PixelBuffer) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        path,
        pixels.as_rgba8(),
        pixels.width(),
        pixels.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn emit_sheet(sheet: &spritekit::SpriteSheet, out: Option<&Path>) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            sheet.write_path(path)?;
            eprintln!("wrote {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            sheet.to_writer_pretty(&mut lock)?;
            writeln!(lock)?;
        }
    }
    Ok(())
}

fn cmd_detect(args: DetectArgs) -> anyhow::Result<()> {
    let raster = read_png(&args.in_path)?;
    let opts = spritekit::DetectOpts {
        alpha_threshold: args.alpha_threshold,
    };
    let cell = spritekit::detect_grid_with(&raster, opts)
        .with_context(|| format!("detect grid in '{}'", args.in_path.display()))?;
    println!("{cell}");
    Ok(())
}

fn cmd_segment(args: SegmentArgs) -> anyhow::Result<()> {
    let raster = read_png(&args.in_path)?;
    let parts = spritekit::segment_parts(&raster)?;
    if parts.is_empty() {
        eprintln!("no opaque parts in {}", args.in_path.display());
        return Ok(());
    }
    for (n, part) in parts.iter().enumerate() {
        let path = args.out_dir.join(format!("part_{}.png", n + 1));
        write_png(&path, &part.pixels)?;
        eprintln!(
            "wrote {} ({}x{} at {},{})",
            path.display(),
            part.bounds.width,
            part.bounds.height,
            part.bounds.x,
            part.bounds.y
        );
    }
    Ok(())
}

fn cmd_build(args: BuildArgs) -> anyhow::Result<()> {
    let mut spec = spritekit::SheetSpec::from_path(&args.spec)?;
    if args.common {
        spec.animations = spritekit::with_common_animations(spec.animations);
    }
    let sheet = match &args.detect {
        Some(png) => {
            let cell = spritekit::detect_grid(&read_png(png)?)
                .with_context(|| format!("detect grid in '{}'", png.display()))?;
            eprintln!("detected cell size {cell}");
            spec.build_with_cell(cell)?
        }
        None => spec.build()?,
    };
    emit_sheet(&sheet, args.out.as_deref())
}

fn cmd_rebuild(args: RebuildArgs) -> anyhow::Result<()> {
    let existing = spritekit::SpriteSheet::from_path(&args.in_path)?;
    let rebuilt = spritekit::rebuild_metadata(existing.animations(), args.width, args.height)?;
    emit_sheet(&spritekit::SpriteSheet::new(rebuilt)?, args.out.as_deref())
}

fn cmd_background(args: BackgroundArgs) -> anyhow::Result<()> {
    let raster = read_png(&args.in_path)?;
    let strip = spritekit::build_strip(args.name, args.frames, raster.width(), raster.height())?;
    emit_sheet(&spritekit::SpriteSheet::new(vec![strip])?, args.out.as_deref())
}

fn cmd_strip(args: StripArgs) -> anyhow::Result<()> {
    let raster = read_png(&args.in_path)?;
    let sheet = spritekit::SpriteSheet::from_path(&args.meta)?;
    let anim = sheet
        .get(&args.animation)
        .with_context(|| format!("animation '{}' not in '{}'", args.animation, args.meta.display()))?;
    let strip = spritekit::crop_animation_strip(&raster, anim)?;
    write_png(&args.out, &strip)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let sheet = spritekit::SpriteSheet::from_path(&args.meta)?;
    let fps = spritekit::Fps::new(args.fps)?;
    let mut stage = spritekit::Stage::new(sheet, fps);
    stage.add_slot("main", &args.animation)?;

    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    for tick in 1..=args.ticks {
        for slot in stage.advance(fps.period_ms()) {
            if let Some(event) = &slot.advance.transition {
                match &slot.switched_to {
                    Some(target) => writeln!(lock, "{tick}\t-> {target}")?,
                    None => writeln!(lock, "{tick}\t-> {} (not in sheet)", event.target)?,
                }
            }
            // A followed transition has already rebound the slot.
            let name = stage
                .player(&slot.slot)
                .map(|p| p.state().animation().name.clone())
                .unwrap_or_default();
            match slot.advance.frame {
                Some(f) => writeln!(
                    lock,
                    "{tick}\t{name}\t{}\t{},{} {}x{}",
                    slot.advance.frame_index, f.x, f.y, f.width, f.height
                )?,
                None => writeln!(lock, "{tick}\t{name}\t-")?,
            }
        }
    }
    Ok(())
}
