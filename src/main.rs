use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use shardmap_rs::layout::Rect;
use shardmap_rs::render::colors::{ColorSettings, DEFAULT_SEED};
use shardmap_rs::report::{self, RunConfig};

/// Render disk usage and segment memory treemaps from a cluster diagnostics dump.
#[derive(Debug, Parser)]
#[command(name = "shardmap", version, about)]
struct Cli {
    /// Path to an unpacked diagnostics dump (holds nodes_stats.json and indices_stats.json)
    #[arg(value_name = "DIR")]
    diagnostics_dir: PathBuf,

    /// Directory the SVG files are written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Seed for index colors
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Canvas width
    #[arg(long, default_value_t = 1000.0)]
    width: f64,

    /// Canvas height
    #[arg(long, default_value_t = 800.0)]
    height: f64,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("shardmap_rs=info".parse()?)
                .add_directive("shardmap=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    tracing::info!("shardmap starting, diagnostics dir: {:?}", cli.diagnostics_dir);

    let config = RunConfig {
        diagnostics_dir: cli.diagnostics_dir,
        out_dir: cli.out_dir,
        colors: ColorSettings {
            seed: cli.seed,
            ..ColorSettings::default()
        },
        canvas: Rect::new(0.0, 0.0, cli.width, cli.height),
    };

    let summary = report::run(&config)?;
    for map in &summary.maps {
        tracing::info!("{:?}: {} rects → {}", map.kind, map.rect_count, map.path.display());
    }
    tracing::info!("{} index families colored", summary.color_count);

    Ok(())
}
