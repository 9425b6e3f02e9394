use std::fs::{self, File};
use std::path::PathBuf;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use hn_front::config::{self, Config};

#[derive(Parser)]
#[command(
    name = "hn-front",
    version,
    about = "hn-front - Browse the Hacker News front page from the terminal."
)]
struct Args {
    /// Number of top stories to show (at most 500)
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Read configuration from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let cfg = match load_config(&args) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("error: {err:?}");
            std::process::exit(1);
        }
    };
    init_logging(&cfg);
    log::info!("hn-front {} starting", hn_front::VERSION);

    if let Err(err) = hn_front::run(cfg) {
        log::error!("{err:#}");
        eprintln!("error: {err:?}");
        std::process::exit(1);
    }
}

fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut cfg = config::load(config::LoadOptions {
        config_file: args.config.clone(),
        env_prefix: None,
    })?;
    if let Some(count) = args.count {
        cfg.feed.count = count;
    }
    Ok(cfg)
}

// The terminal belongs to the UI, so log lines only ever go to a file.
fn init_logging(cfg: &Config) {
    let Some(path) = cfg.log.file.as_ref() else {
        return;
    };
    let level = cfg
        .log
        .level
        .parse::<LevelFilter>()
        .unwrap_or(LevelFilter::Info);
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    if let Ok(log_file) = File::create(path) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }
}
