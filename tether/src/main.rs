use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{Context, anyhow};
use clap::Parser;
use log::LevelFilter;

use tether::config::{Config, RowPitchMode};
use tether::font::discovery;
use tether::logging::FileLogger;
use tether::{EditorContext, SwashRasterizer, dump, spawn_atlas_build};

/// Build a glyph atlas from a font and lay text out against it.
#[derive(Debug, Parser)]
#[command(name = "tether", version, about)]
struct Cli {
    /// Text file to lay out. Reads stdin when omitted.
    file: Option<PathBuf>,

    /// Config file to use instead of the default location.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Font file to rasterize.
    #[arg(long, value_name = "PATH")]
    font: Option<PathBuf>,

    /// Font size in pixels per em.
    #[arg(long, value_name = "PX")]
    size: Option<f32>,

    /// Viewport height in pixels; the first line hangs from its top.
    #[arg(long, value_name = "PX")]
    viewport_height: Option<f32>,

    /// Write the packed atlas to a PNG file.
    #[arg(long, value_name = "PATH")]
    dump_atlas: Option<PathBuf>,

    /// Write the packed vertex bytes to a file.
    #[arg(long, value_name = "PATH")]
    vertices: Option<PathBuf>,

    /// Size each atlas row by its own tallest glyph.
    #[arg(long)]
    per_row: bool,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,

    /// Print the default configuration and exit.
    #[arg(long)]
    print_config: bool,
}

impl Cli {
    fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::try_load_from(path).map_err(|e| anyhow!("config: {e}"))?,
            None => Config::load(),
        };
        if let Some(font) = &self.font {
            config.font.path = Some(font.clone());
        }
        if let Some(size) = self.size {
            config.font.size = size;
        }
        if let Some(height) = self.viewport_height {
            config.layout.viewport_height = height;
        }
        if let Some(path) = &self.dump_atlas {
            config.atlas.dump_path = Some(path.clone());
        }
        if self.per_row {
            config.atlas.row_pitch = RowPitchMode::PerRow;
        }
        Ok(config)
    }

    fn read_text(&self) -> anyhow::Result<Vec<u8>> {
        match &self.file {
            Some(path) => {
                std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
            }
            None => {
                let mut text = Vec::new();
                std::io::stdin()
                    .read_to_end(&mut text)
                    .context("failed to read stdin")?;
                Ok(text)
            }
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let verbose = cli.verbose.then_some(LevelFilter::Debug);
    if FileLogger::new(LevelFilter::Trace)
        .init(verbose.unwrap_or(LevelFilter::Info))
        .is_err()
    {
        eprintln!("tether: logger already installed");
    }
    let config = cli.load_config()?;
    log::set_max_level(verbose.unwrap_or_else(|| config.log.level_filter()));

    let font_path = discovery::resolve(&config.font)?;
    let size = config.font.effective_size();
    log::info!("font: {} at {size}px", font_path.display());
    let build = spawn_atlas_build(
        move || Ok(SwashRasterizer::load(&font_path, size)?),
        config.font.range(),
        config.atlas.packer_config(),
    )
    .context("failed to start atlas build")?;

    let text = cli.read_text()?;
    let (atlas, table) = build
        .join()
        .map_err(|_| anyhow!("atlas build thread panicked"))??;

    if let Some(path) = &config.atlas.dump_path {
        dump::save_png(&atlas, path)?;
    }

    let mut ctx = EditorContext::new(atlas, table, config.layout.options());
    ctx.set_text(&text);
    let vertices = ctx.frame(config.layout.viewport_height);
    if let Some(path) = &cli.vertices {
        std::fs::write(path, vertices)
            .with_context(|| format!("failed to write vertices to {}", path.display()))?;
    }

    let (width, height) = ctx.atlas().size();
    println!(
        "atlas {width}x{height}, {} glyphs, {} quads",
        ctx.glyphs().len(),
        ctx.quad_count()
    );
    log::logger().flush();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        let config = toml::to_string_pretty(&Config::default())?;
        std::io::stdout().write_all(config.as_bytes())?;
        return Ok(());
    }

    run(&cli)
}
