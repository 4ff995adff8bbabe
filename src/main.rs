//! errback demo — Main Entry Point
//!
//! Runs the lookup scenario end to end with real adapters.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  ThreadTimer    StdEnv    StdProcess    EventEmitter→LogSink   │
//! │  (TimerPort)    (EnvPort) (ProcessPort) (EventSink)            │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │          AppService (catalogs · promisify)              │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  edge-executor LocalExecutor drives lookups in bounded batches │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `errback-demo [ID | TRAIL]...`.  Set `ERRBACK_CONFIG` to a JSON
//! file to override [`AppConfig`], `APP_ENV=development` for dev mode and
//! `RUST_LOG` for log verbosity.
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use log::info;

use errback::adapters::env::StdEnv;
use errback::adapters::log_sink::LogEventSink;
use errback::adapters::process::StdProcess;
use errback::adapters::timer::ThreadTimer;
use errback::app::commands::AppCommand;
use errback::app::events::AppEvent;
use errback::app::ports::{EnvPort, EventSink};
use errback::app::service::AppService;
use errback::config::AppConfig;
use errback::emitter::EventEmitter;

const CONFIG_ENV: &str = "ERRBACK_CONFIG";

fn load_config(env: &impl EnvPort) -> Result<AppConfig> {
    let Some(path) = env.var(CONFIG_ENV) else {
        return Ok(AppConfig::default());
    };
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("reading config file {path}"))?;
    let config = AppConfig::from_json(&json).with_context(|| format!("loading {path}"))?;
    info!("Loaded config from {}", path);
    Ok(config)
}

/// Every event goes to the log; user arrivals also get a greeting.
fn build_sink() -> EventEmitter<AppEvent> {
    let mut emitter = EventEmitter::new();
    for name in AppEvent::NAMES {
        let mut log_sink = LogEventSink::new();
        emitter.on(name, move |event: &AppEvent| log_sink.emit(event));
    }
    emitter.on("user-found", |event: &AppEvent| {
        if let AppEvent::UserFound { user, .. } = event {
            info!("We have a new user: {}.", user.nickname);
        }
    });
    emitter
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("errback demo v{}", env!("CARGO_PKG_VERSION"));

    let env = StdEnv::new();
    let config = load_config(&env)?;
    let service = AppService::new(&config, &env, ThreadTimer::new());
    let mut sink = build_sink();
    let mut process = StdProcess::new();

    service.announce(&mut sink);

    let commands = AppCommand::from_args(&env.args(), &config);
    info!("Running {} lookup(s)", commands.len());

    let outcomes = service.run_all(commands);

    // A failed lookup exits the process from inside `report`.
    for outcome in outcomes {
        service.report(outcome, &mut sink, &mut process);
    }

    info!("All lookups succeeded");
    Ok(())
}
