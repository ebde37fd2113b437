use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use snapstrip::Clock;

#[derive(Parser, Debug)]
#[command(name = "snapstrip", version)]
struct Cli {
    /// Config file (defaults to $XDG_CONFIG_HOME/snapstrip/config.json).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Font file used for every text role the config leaves unset.
    #[arg(long, global = true)]
    font: Option<PathBuf>,

    /// Log filter, overriding the config (e.g. "debug", "snapstrip=trace").
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the built-in templates.
    Templates,
    /// List the built-in emoji stickers and text colors.
    Stickers,
    /// Compose up to three photos into a base strip PNG.
    Compose(ComposeArgs),
    /// Burn stickers and text from an overlay JSON document into a strip.
    Resolve(ResolveArgs),
    /// Run a full session: countdown, capture from a frame directory, compose, overlay, export.
    Booth(BoothArgs),
}

#[derive(Parser, Debug)]
struct StripArgs {
    /// Event title (defaults to the config's).
    #[arg(long)]
    event: Option<String>,

    /// Built-in template id (defaults to the config's).
    #[arg(long)]
    template: Option<String>,

    /// PNG/JPEG used as a custom template background.
    #[arg(long, conflicts_with = "template")]
    background: Option<PathBuf>,

    /// Footer date text (defaults to today's long date).
    #[arg(long)]
    date: Option<String>,
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Photo files in slot order; extras past the third are ignored.
    #[arg(long = "photo")]
    photos: Vec<PathBuf>,

    #[command(flatten)]
    strip: StripArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ResolveArgs {
    /// Base strip PNG.
    #[arg(long)]
    base: PathBuf,

    /// Overlay document JSON; sticker paths are relative to it.
    #[arg(long)]
    overlays: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct BoothArgs {
    /// Directory of frames played back as the camera.
    #[arg(long)]
    frames: PathBuf,

    #[command(flatten)]
    strip: StripArgs,

    /// Countdown seconds per photo (5 or 10).
    #[arg(long)]
    countdown: Option<u32>,

    /// Overlay document applied before export.
    #[arg(long)]
    overlays: Option<PathBuf>,

    /// Send the strip to the configured print command instead of saving it.
    #[arg(long)]
    print: bool,

    /// Output directory (defaults to the config's).
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Skip the real-time waits between ticks.
    #[arg(long)]
    no_wait: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => snapstrip::BoothConfig::load(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => snapstrip::BoothConfig::load_or_default(),
    };
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    snapstrip::logging::init_logging(&config.logging);

    config.fonts = config
        .fonts
        .or_fallback(cli.font.clone())
        .with_env_fallback();

    match cli.cmd {
        Command::Templates => cmd_templates(),
        Command::Stickers => cmd_stickers(),
        Command::Compose(args) => cmd_compose(&config, args),
        Command::Resolve(args) => cmd_resolve(&config, args),
        Command::Booth(args) => cmd_booth(config, args),
    }
}

fn typesetter(config: &snapstrip::BoothConfig) -> anyhow::Result<snapstrip::Typesetter> {
    let ts = snapstrip::Typesetter::from_config(&config.fonts).context("load fonts")?;
    if !ts.has_fonts() {
        eprintln!(
            "note: no font configured (set fonts in the config, --font, or {}); text is skipped",
            snapstrip::config::FONT_ENV
        );
    }
    Ok(ts)
}

fn pick_template(
    config: &snapstrip::BoothConfig,
    args: &StripArgs,
) -> anyhow::Result<snapstrip::Template> {
    if let Some(path) = &args.background {
        let image = snapstrip::import_image_file(path)
            .with_context(|| format!("import background '{}'", path.display()))?;
        return Ok(snapstrip::Template::custom(&image));
    }
    let id = args.template.as_deref().unwrap_or(&config.template);
    snapstrip::find_template(id).with_context(|| {
        let known: Vec<String> = snapstrip::builtin_templates()
            .into_iter()
            .map(|t| t.id)
            .collect();
        format!("unknown template '{id}' (known: {})", known.join(", "))
    })
}

fn write_png(path: &Path, png: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, png).with_context(|| format!("write png '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn print_report(stage: &str, report: &snapstrip::RenderReport) {
    for skipped in &report.skipped {
        eprintln!("{stage}: skipped {}: {}", skipped.layer, skipped.reason);
    }
}

fn cmd_templates() -> anyhow::Result<()> {
    for t in snapstrip::builtin_templates() {
        let background = match &t.backdrop {
            snapstrip::Backdrop::Solid(c) => c.to_string(),
            snapstrip::Backdrop::Image(_) => "image".to_string(),
        };
        println!(
            "{:<10} {:<10} background={} text={} accent={} border={}",
            t.id,
            t.name,
            background,
            t.text_color,
            t.accent_color,
            t.border()
        );
    }
    Ok(())
}

fn cmd_stickers() -> anyhow::Result<()> {
    for (i, emoji) in snapstrip::DEFAULT_STICKERS.iter().enumerate() {
        let codepoints: Vec<String> = emoji.chars().map(|c| format!("U+{:04X}", c as u32)).collect();
        println!("{i:<2} {emoji}  {}", codepoints.join(" "));
    }
    let colors: Vec<String> = snapstrip::TEXT_COLORS.iter().map(|c| c.to_string()).collect();
    println!("text colors: {}", colors.join(" "));
    Ok(())
}

fn cmd_compose(config: &snapstrip::BoothConfig, args: ComposeArgs) -> anyhow::Result<()> {
    let template = pick_template(config, &args.strip)?;
    let mut ts = typesetter(config)?;

    let photos = args
        .photos
        .iter()
        .enumerate()
        .map(|(i, path)| {
            let bytes =
                std::fs::read(path).with_context(|| format!("read photo '{}'", path.display()))?;
            Ok(snapstrip::Capture::new(i as u64 + 1, bytes))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let event = args.strip.event.as_deref().unwrap_or(&config.event_name);
    let date = args
        .strip
        .date
        .clone()
        .unwrap_or_else(|| snapstrip::today(config.date_locale));

    let strip = snapstrip::compose(&photos, event, &date, &template, &mut ts, &config.geometry)?;
    print_report("compose", &strip.report);
    write_png(&args.out, &strip.png)
}

fn cmd_resolve(config: &snapstrip::BoothConfig, args: ResolveArgs) -> anyhow::Result<()> {
    let base = std::fs::read(&args.base)
        .with_context(|| format!("read base strip '{}'", args.base.display()))?;
    let doc = snapstrip::OverlayDocument::load(&args.overlays)?;
    let reference = doc.reference_width;
    let doc_dir = args.overlays.parent().unwrap_or_else(|| Path::new("."));
    let arena = doc.into_arena(doc_dir)?;

    let stickers: Vec<_> = arena.stickers().cloned().collect();
    let texts: Vec<_> = arena.texts().cloned().collect();
    let mut ts = typesetter(config)?;
    let out = snapstrip::resolve(&base, reference, &stickers, &texts, &mut ts)?;
    print_report("resolve", &out.report);
    write_png(&args.out, &out.png)
}

/// Prints the countdown to stderr.
struct ConsoleObserver;

impl snapstrip::SequenceObserver for ConsoleObserver {
    fn on_phase(&mut self, phase: snapstrip::Phase) {
        match phase {
            snapstrip::Phase::Counting { photo, remaining } => {
                eprintln!("photo {}/{}: {remaining}", photo + 1, snapstrip::SLOT_COUNT);
            }
            snapstrip::Phase::Capturing { photo } => eprintln!("photo {}: click!", photo + 1),
            snapstrip::Phase::Done => eprintln!("all photos taken"),
            snapstrip::Phase::Preparing => {}
        }
    }
}

/// System time without the waiting.
struct NoWaitClock;

impl Clock for NoWaitClock {
    fn now_millis(&self) -> u64 {
        snapstrip::SystemClock.now_millis()
    }

    fn sleep(&self, _d: Duration) {}
}

fn cmd_booth(mut config: snapstrip::BoothConfig, args: BoothArgs) -> anyhow::Result<()> {
    if let Some(secs) = args.countdown {
        config.countdown = snapstrip::Interval::try_from(secs)?;
    }
    if let Some(event) = &args.strip.event {
        config.event_name = event.clone();
    }
    let template = pick_template(&config, &args.strip)?;

    let mut idle = snapstrip::Booth::new(&config, typesetter(&config)?)?;
    idle.set_template(template);
    if let Some(date) = &args.strip.date {
        idle = idle.with_date(date.clone());
    }

    let mut camera = snapstrip::DirectoryCamera::new(&args.frames);
    let capturing = idle.start();
    let result = if args.no_wait {
        capturing.run(
            &mut snapstrip::CaptureSequencer::new(NoWaitClock),
            &mut camera,
            &mut ConsoleObserver,
        )
    } else {
        capturing.run(
            &mut snapstrip::CaptureSequencer::default(),
            &mut camera,
            &mut ConsoleObserver,
        )
    };
    let mut editing = result.map_err(|aborted| anyhow::Error::new(aborted.error))?;
    print_report("compose", &editing.strip().report);

    if let Some(path) = &args.overlays {
        let doc = snapstrip::OverlayDocument::load(path)?;
        editing.set_reference(doc.reference_width);
        let doc_dir = path.parent().unwrap_or_else(|| Path::new("."));
        *editing.arena_mut() = doc.into_arena(doc_dir)?;
    }

    let finished = editing
        .finish()
        .map_err(|rejected| anyhow::Error::new(rejected.error))?;
    print_report("resolve", &finished.image().report);

    let receipt = if args.print {
        let mut sink = snapstrip::PrintSink::from_command(&config.export.print_command)?;
        finished.export(&mut sink)?
    } else {
        let dir = args.out_dir.unwrap_or(config.export.output_dir);
        finished.export(&mut snapstrip::DownloadSink::new(dir))?
    };
    match receipt {
        snapstrip::ExportReceipt::Saved(path) => eprintln!("wrote {}", path.display()),
        snapstrip::ExportReceipt::Printed { program } => eprintln!("sent to {program}"),
        snapstrip::ExportReceipt::Stored { .. } => {}
    }
    Ok(())
}
