use anyhow::Result;
use clap::Parser;
use hinterland_lib::app::App;
use hinterland_lib::model::config::AppConfig;
use hinterland_lib::model::metrics::init_logging;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// How simulated time advances
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Stop after this many ticks
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Override the world seed
    #[arg(long)]
    seed: Option<u64>,

    /// Run the ticks back to back instead of at the configured rate
    #[arg(long, requires = "ticks")]
    fast: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum Mode {
    /// Time only passes while the player acts
    Step,
    /// Time passes with the wall clock
    Realtime,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let mut config = AppConfig::load(&args.config)?;
    if let Some(mode) = args.mode {
        config.scheduler.realtime = matches!(mode, Mode::Realtime);
    }
    if args.seed.is_some() {
        config.world.seed = args.seed;
    }

    let mut app = App::new(config)?;
    app.tick_limit = args.ticks;

    if args.fast {
        let summary = app.run_fast();
        tracing::info!(?summary, "Run finished");
        return Ok(());
    }

    let frame = app.scheduler.tick_duration();
    let mut last = Instant::now();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    while app.running {
        tokio::select! {
            _ = &mut ctrl_c => {
                tracing::info!("Interrupted");
                app.running = false;
            }
            _ = tokio::time::sleep(frame) => {
                let now = Instant::now();
                app.frame(now - last);
                last = now;
            }
        }
    }

    tracing::info!(summary = ?app.summary(), "Run finished");
    Ok(())
}
