// src/main.rs

//! CLI for rendering a piece from a seed string to a PPM image.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use log::info;
use sha2::{Digest as _, Sha256};

use hashart::config::Config;
use hashart::{pieces, AuxProps, Canvas, Digest, EnabledPieces};

#[derive(Parser, Debug)]
#[command(name = "hashart", about = "Deterministic generative art from SHA-256 digests")]
struct Args {
    /// Which piece to render (see --list).
    piece: Option<String>,

    /// Seed string to hash.
    #[arg(short, long, default_value = "hashart")]
    seed: String,

    /// Canvas width in pixels (defaults from config).
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels (defaults from config).
    #[arg(long)]
    height: Option<u32>,

    /// Output file (binary PPM).
    #[arg(short, long, default_value = "out.ppm")]
    out: PathBuf,

    /// Optional config file (JSON).
    #[arg(long, default_value = "hashart.json")]
    config: PathBuf,

    /// Print the digest segment table as JSON instead of rendering.
    #[arg(long)]
    explain: bool,

    /// Print the piece's description instead of rendering.
    #[arg(long)]
    describe: bool,

    /// List the enabled pieces and exit.
    #[arg(long)]
    list: bool,
}

fn digest_of(seed: &str) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(seed.as_bytes());
    hasher.finalize().into()
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = Config::load(&args.config).context("loading config")?;

    let registry = match &config.pieces.enabled {
        Some(names) => EnabledPieces::from_names(names.iter().cloned())
            .context("config enabled an empty piece list")?,
        None => EnabledPieces::all(),
    };

    if args.list {
        for name in registry.snapshot() {
            println!("{name}");
        }
        return Ok(());
    }

    let name = match args.piece {
        Some(ref name) => name.as_str(),
        None => bail!("no piece given; try --list"),
    };
    let piece = match pieces::lookup(name) {
        Some(piece) => piece,
        None => bail!(
            "unknown piece {name:?}; available: {}",
            pieces::names().join(", ")
        ),
    };
    if !registry.is_enabled(name) {
        bail!("piece {name:?} is disabled by config");
    }

    let digest = digest_of(&args.seed);

    if args.explain {
        let segments = hashart::explain(piece.as_ref(), &digest);
        println!("{}", serde_json::to_string_pretty(&segments)?);
        return Ok(());
    }

    if args.describe {
        match hashart::describe(piece.as_ref(), &digest) {
            Some(text) => println!("{text}"),
            None => println!("(no description)"),
        }
        return Ok(());
    }

    let width = args.width.unwrap_or(config.canvas.width);
    let height = args.height.unwrap_or(config.canvas.height);
    let mut canvas = Canvas::new(width, height);

    hashart::render(piece.as_ref(), &mut canvas, &digest, &AuxProps::new())
        .with_context(|| format!("rendering {name:?} for seed {:?}", args.seed))?;

    let file = File::create(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;
    canvas
        .to_ppm(BufWriter::new(file))
        .context("writing PPM output")?;

    info!(
        "rendered {name:?} for seed {:?} to {} ({width}x{height})",
        args.seed,
        args.out.display()
    );
    Ok(())
}
