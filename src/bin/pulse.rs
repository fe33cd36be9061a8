use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

use pulse_poster::{
    ArchiveStore, AuroraLoop, AuroraShader, DatasetSource, FrameClock, GradientSpec,
    PngSequenceSink, PosterConfig, PosterDataset, PosterRenderer, RenderTarget, ThumbnailSource,
    render_gallery, render_gradient_fallback, today_utc, write_png,
};

#[derive(Parser, Debug)]
#[command(name = "pulse", version, about = "Render daily news posters")]
struct Cli {
    /// Engine configuration JSON (every field optional).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one poster as a PNG.
    Poster(PosterArgs),
    /// Render gallery thumbnails for every entry of an archive index.
    Thumbnails(ThumbnailArgs),
    /// Render frames of the animated aurora as a PNG sequence.
    Aurora(AuroraArgs),
    /// Print the date's CSS gradient, optionally rasterized to a PNG.
    Gradient(GradientArgs),
    /// Copy a dataset into the archive and update its index.
    ArchiveRecord(ArchiveRecordArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TargetChoice {
    Desktop,
    Mobile,
}

#[derive(Parser, Debug)]
struct PosterArgs {
    /// Dataset JSON. Takes precedence over `--archive`.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Archive root holding `latest.json` and `archive/`.
    #[arg(long)]
    archive: Option<PathBuf>,

    /// Archived date to load (`YYYY-MM-DD`); latest when omitted.
    #[arg(long)]
    date: Option<String>,

    /// Current date for the sidebar label; defaults to today (UTC).
    #[arg(long)]
    today: Option<String>,

    #[arg(long, value_enum)]
    target: Option<TargetChoice>,

    /// Viewport width for the mobile target.
    #[arg(long, default_value_t = 390.0)]
    viewport_width: f64,

    /// Viewport height for the mobile target.
    #[arg(long, default_value_t = 844.0)]
    viewport_height: f64,

    /// Font file for text measurement and drawing.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Grain strength override.
    #[arg(long)]
    grain: Option<f64>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ThumbnailArgs {
    /// Archive root holding `archive/index.json`.
    #[arg(long)]
    archive: PathBuf,

    /// Output directory; one `<date>.png` per entry.
    #[arg(long)]
    out_dir: PathBuf,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,
}

#[derive(Parser, Debug)]
struct AuroraArgs {
    /// Poster date whose gradient colors drive the aurora.
    #[arg(long)]
    date: String,

    #[arg(long, default_value_t = 60)]
    frames: u64,

    #[arg(long, default_value_t = 30)]
    fps: u32,

    #[arg(long, default_value_t = 300)]
    width: u32,

    #[arg(long, default_value_t = 400)]
    height: u32,

    /// Output directory for `frame-00000.png`, ...
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct GradientArgs {
    #[arg(long)]
    date: String,

    /// Also rasterize the gradient to this PNG.
    #[arg(long)]
    out: Option<PathBuf>,

    #[arg(long, default_value_t = 300)]
    width: u32,

    #[arg(long, default_value_t = 400)]
    height: u32,

    #[arg(long, default_value_t = 1.0)]
    opacity: f64,
}

#[derive(Parser, Debug)]
struct ArchiveRecordArgs {
    /// Archive root.
    #[arg(long)]
    archive: PathBuf,

    /// Dataset JSON to record.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Also publish the dataset as `latest.json`.
    #[arg(long)]
    latest: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    match cli.cmd {
        Command::Poster(args) => cmd_poster(args, config),
        Command::Thumbnails(args) => cmd_thumbnails(args, config),
        Command::Aurora(args) => cmd_aurora(args, config),
        Command::Gradient(args) => cmd_gradient(args),
        Command::ArchiveRecord(args) => cmd_archive_record(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<PosterConfig> {
    match path {
        Some(p) => PosterConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(PosterConfig::default()),
    }
}

fn cmd_poster(args: PosterArgs, mut config: PosterConfig) -> anyhow::Result<()> {
    match args.target {
        Some(TargetChoice::Desktop) => config.target = RenderTarget::Desktop,
        Some(TargetChoice::Mobile) => {
            config.target = RenderTarget::Mobile {
                width: args.viewport_width,
                height: args.viewport_height,
            }
        }
        None => {}
    }
    if args.font.is_some() {
        config.font = args.font;
    }
    if args.grain.is_some() {
        config.grain = args.grain;
    }

    let ds = match (&args.in_path, &args.archive) {
        (Some(path), _) => PosterDataset::from_path(path)
            .with_context(|| format!("load dataset '{}'", path.display()))?,
        (None, Some(root)) => {
            let (ds, source) = ArchiveStore::new(root).load(args.date.as_deref());
            if source == DatasetSource::Empty {
                tracing::warn!("no dataset found, rendering an empty poster");
            }
            ds
        }
        (None, None) => anyhow::bail!("either --in or --archive is required"),
    };

    let today = args.today.unwrap_or_else(today_utc);
    let mut renderer = PosterRenderer::new(config)?;
    let poster = renderer
        .render(&ds, &today)
        .with_context(|| format!("render poster for '{}'", ds.date))?;

    write_png(&poster.frame, &args.out)
        .with_context(|| format!("write png '{}'", args.out.display()))?;
    eprintln!(
        "wrote {} ({}x{}, {} markers)",
        args.out.display(),
        poster.frame.width,
        poster.frame.height,
        poster.layout.markers.len()
    );
    Ok(())
}

fn cmd_thumbnails(args: ThumbnailArgs, mut config: PosterConfig) -> anyhow::Result<()> {
    if let Some(w) = args.width {
        config.thumbnail.width = w;
    }
    if let Some(h) = args.height {
        config.thumbnail.height = h;
    }
    let store = ArchiveStore::new(&args.archive);
    let index = store
        .read_index()
        .with_context(|| format!("read archive index '{}'", store.index_path().display()))?;

    let mut batch = render_gallery(index.entries(), &config, FrameClock::system());
    if let Some(featured) = batch.featured.as_mut()
        && let Some(anim) = featured.animation.as_mut()
    {
        anim.stop();
    }

    let mut written = 0usize;
    for thumb in batch.all() {
        let Some(frame) = &thumb.frame else {
            continue;
        };
        let path = args.out_dir.join(format!("{}.png", thumb.date));
        write_png(frame, &path).with_context(|| format!("write png '{}'", path.display()))?;
        written += 1;
        let kind = match thumb.source {
            ThumbnailSource::Aurora => "aurora",
            ThumbnailSource::StaticShader => "static",
            ThumbnailSource::GradientFallback => "gradient",
        };
        eprintln!("wrote {} ({kind})", path.display());
    }
    eprintln!("{written} thumbnails");
    Ok(())
}

fn cmd_aurora(args: AuroraArgs, config: PosterConfig) -> anyhow::Result<()> {
    let spec = GradientSpec::from_date(&args.date);
    let shader = AuroraShader::from_gradient(&spec, config.aurora);
    let Some(mut anim) = AuroraLoop::start(
        shader,
        args.width,
        args.height,
        FrameClock::fixed_step(args.fps),
        config.parallel,
    ) else {
        anyhow::bail!("aurora shader unavailable for {}x{}", args.width, args.height);
    };

    let mut sink = PngSequenceSink::new(&args.out_dir);
    let n = anim.run(&mut sink, Some(args.frames))?;
    anim.stop();
    eprintln!("wrote {n} frames to {}", args.out_dir.display());
    Ok(())
}

fn cmd_gradient(args: GradientArgs) -> anyhow::Result<()> {
    let spec = GradientSpec::from_date(&args.date);
    println!("{}", spec.to_css());
    if let Some(out) = &args.out {
        let frame = render_gradient_fallback(&spec, args.width, args.height, args.opacity)?;
        write_png(&frame, out).with_context(|| format!("write png '{}'", out.display()))?;
        eprintln!("wrote {}", out.display());
    }
    Ok(())
}

fn cmd_archive_record(args: ArchiveRecordArgs) -> anyhow::Result<()> {
    let ds = PosterDataset::from_path(&args.in_path)
        .with_context(|| format!("load dataset '{}'", args.in_path.display()))?;
    let store = ArchiveStore::new(&args.archive);
    let added = store
        .record(&ds)
        .with_context(|| format!("record '{}' in '{}'", ds.date, args.archive.display()))?;
    if args.latest {
        store.publish_latest(&ds)?;
    }
    eprintln!(
        "{} {}",
        if added { "recorded" } else { "updated" },
        store.dataset_path(&ds.date).display()
    );
    Ok(())
}
