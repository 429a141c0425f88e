use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use thumbkit::{EditScript, Editor, EditorConfig, ImageSource, LoadOutcome, ThumbnailGrid};

#[derive(Parser, Debug)]
#[command(name = "thumbkit", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Annotate a base image with a recorded edit script and export a PNG.
    Compose(ComposeArgs),
    /// Print the thumbnail candidate URLs for a video link.
    Thumbnails(ThumbnailsArgs),
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Base image (png, jpg, jpeg, gif, webp, bmp).
    #[arg(long)]
    image: PathBuf,

    /// Edit script JSON.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Output PNG path. Defaults to the configured export file name.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Font used to rasterize labels (TrueType/OpenType). Overrides the config.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Editor config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print a `data:` URL to stdout instead of writing a file.
    #[arg(long)]
    data_url: bool,
}

#[derive(Parser, Debug)]
struct ThumbnailsArgs {
    /// Watch, share, embed or shorts link.
    #[arg(long)]
    url: String,
}

fn main() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Thumbnails(args) => cmd_thumbnails(args),
    }
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => EditorConfig::from_json_file(path)?,
        None => EditorConfig::default(),
    };
    if args.font.is_some() {
        config.font_path = args.font.clone();
    }
    let mut editor = Editor::new(config)?;

    let name = args
        .image
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("image path '{}' has no file name", args.image.display()))?
        .to_string();
    let ticket = editor.begin_load(ImageSource::File { name })?;
    let bytes = std::fs::read(&args.image)
        .with_context(|| format!("read image '{}'", args.image.display()))?;
    match editor.complete_load(&ticket, &bytes)? {
        LoadOutcome::Installed => {}
        LoadOutcome::Discarded => anyhow::bail!("image load was superseded"),
    }

    if let Some(path) = &args.script {
        EditScript::from_path(path)?
            .apply(&mut editor)
            .with_context(|| format!("apply edit script '{}'", path.display()))?;
    }
    editor.render()?;

    if args.data_url {
        println!("{}", editor.export_data_url()?);
        return Ok(());
    }

    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(editor.export_file_name()));
    write_png(&out, &editor.export_png()?)?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn write_png(out: &Path, png: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(out, png).with_context(|| format!("write png '{}'", out.display()))
}

fn cmd_thumbnails(args: ThumbnailsArgs) -> anyhow::Result<()> {
    let grid = ThumbnailGrid::from_url(&args.url)?;
    for candidate in grid.candidates() {
        println!("{:?}\t{}", candidate.variant, candidate.url);
    }
    Ok(())
}
