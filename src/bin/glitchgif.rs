use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;

/// Render the glitch banner GIF.
#[derive(Parser, Debug)]
#[command(name = "glitchgif", version)]
struct Cli {
    /// Assets root; logo, fonts and output paths are resolved against it.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// JSON config overriding the built-in defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Logo image (relative to the root unless absolute).
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Output GIF (relative to the root unless absolute).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Text label.
    #[arg(long)]
    text: Option<String>,

    /// Skip the system font search and use only fonts found under the root.
    #[arg(long, default_value_t = false)]
    no_system_fonts: bool,

    /// Log debug events to stderr.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .init();

    let mut cfg = match &cli.config {
        Some(path) => glitchgif::BannerConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => glitchgif::BannerConfig::default(),
    };
    if let Some(logo) = cli.logo {
        cfg.logo_path = logo;
    }
    if let Some(out) = cli.out {
        cfg.out_path = out;
    }
    if let Some(text) = cli.text {
        cfg.text = text;
    }

    let search = glitchgif::FontSearch {
        system_fonts: !cli.no_system_fonts,
    };
    let summary = glitchgif::render_to_gif(&cfg, &cli.root, search)?;

    println!(
        "Wrote {} ({} frames)",
        summary.out_path.display(),
        summary.frames
    );
    Ok(())
}
