mod console;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufRead, BufReader};
use tracing::{info, warn};

use castdeck_core::{
    logging,
    models::{BroadcastType, Product, SessionConfig},
    service::{BroadcastEventSink, FixedPicker, SessionRegistry},
    Config,
};

use console::Console;

#[derive(Parser, Debug)]
#[command(name = "castdeck")]
#[command(about = "Live session control console", long_about = None)]
struct Args {
    /// Configuration file (YAML or TOML)
    #[arg(long, env = "CASTDECK_CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Broadcast type: general, commerce or vod
    #[arg(long, default_value = "general")]
    broadcast_type: BroadcastType,

    /// Session title
    #[arg(long, default_value = "")]
    title: String,

    /// Target platform, may be repeated
    #[arg(long = "platform")]
    platforms: Vec<String>,

    /// JSON file holding the product catalog
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Operator command script, one JSON command per line (stdin if omitted)
    #[arg(long)]
    script: Option<PathBuf>,

    /// Always draw the entrant at this index instead of a random one
    #[arg(long)]
    winner_index: Option<usize>,
}

/// Config path: `--config` / `CASTDECK_CONFIG_PATH`, then `./castdeck.yaml`
fn load_config(explicit: Option<&PathBuf>) -> Result<Config> {
    let path = explicit.cloned().or_else(|| {
        let cwd = PathBuf::from("castdeck.yaml");
        cwd.exists().then_some(cwd)
    });

    let config = match path {
        Some(path) => {
            let path = path.to_string_lossy().into_owned();
            eprintln!("Loading config from {path}");
            Config::from_file(&path)?
        }
        None => Config::from_env()?,
    };

    if let Err(errors) = config.validate() {
        for e in &errors {
            eprintln!("Config validation error: {e}");
        }
        return Err(anyhow::anyhow!(
            "Configuration validation failed with {} error(s)",
            errors.len()
        ));
    }
    Ok(config)
}

async fn load_catalog(path: Option<&PathBuf>) -> Result<Vec<Product>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let raw = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&raw)?)
}

async fn open_script(path: Option<&PathBuf>) -> Result<Box<dyn AsyncBufRead + Unpin + Send>> {
    Ok(match path {
        Some(path) => Box::new(BufReader::new(tokio::fs::File::open(path).await?)),
        None => Box::new(BufReader::new(tokio::io::stdin())),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Configuration and logging
    let config = load_config(args.config.as_ref())?;
    logging::init_logging(&config.logging)?;
    info!("Castdeck console starting...");

    // 2. Event fan-out
    let events = Arc::new(BroadcastEventSink::new(config.session.event_channel_capacity));
    let event_logger = console::spawn_event_logger(events.subscribe());

    // 3. Session
    let mut registry = SessionRegistry::new(config.session.clone()).with_events(events.clone());
    if let Some(index) = args.winner_index {
        registry = registry.with_picker(Arc::new(FixedPicker(index)));
    }

    let session_config = SessionConfig {
        title: args.title.clone(),
        platforms: args.platforms.clone(),
        catalog: load_catalog(args.catalog.as_ref()).await?,
    };
    let session = registry.create_session(args.broadcast_type, session_config);
    info!(
        session_id = %session.id,
        broadcast_type = %session.broadcast_type,
        "Session open, reading operator commands"
    );

    // 4. Replay operator commands
    let input = open_script(args.script.as_ref()).await?;
    let console = Console::new(registry.clone(), session.id.clone(), config.console.pretty_output);
    let summary = console.run(input).await?;
    info!(
        applied = summary.applied,
        rejected = summary.rejected,
        "Operator input finished"
    );

    // 5. Hand the final state off
    console.finish().await?;

    drop(console);
    drop(registry);
    drop(events);
    if tokio::time::timeout(Duration::from_secs(1), event_logger)
        .await
        .is_err()
    {
        warn!("Event logger did not drain in time");
    }

    info!("Castdeck console stopped");
    Ok(())
}
