use anyhow::Context;
use applog::{config::Config, global, LogContext, LogLevel};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "applog", about = "In-process log store: demo and level control")]
struct Cli {
    /// Write debug logs to /tmp/applog-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a scripted session through the module loggers and summarise it.
    Demo {
        /// Extra debug lines to emit after the session.
        #[arg(long, default_value_t = 0)]
        filler: usize,
    },
    /// Print the persisted log level.
    GetLevel,
    /// Persist a new log level (debug, info, warn, error).
    SetLevel { level: LogLevel },
    /// Print the config file path.
    ConfigPath,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/applog-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("applog debug log started, tail -f /tmp/applog-debug.log");
    }

    let config = Config::load().context("loading config")?;

    match cli.command {
        Command::ConfigPath => {
            println!("{}", applog::config::config_path().display());
        }
        Command::GetLevel => {
            let ctx = LogContext::from_config(&config);
            println!("{}", ctx.current_level().as_str());
        }
        Command::SetLevel { level } => {
            let ctx = global::install(LogContext::from_config(&config))?;
            ctx.set_level(level);
        }
        Command::Demo { filler } => {
            let ctx = global::install(LogContext::from_config(&config))?;
            if config.console.banner {
                ctx.announce();
            }
            let summary = applog::demo::run(ctx, filler);
            println!(
                "retained {} of {} entries (capacity {}), {} notifications",
                summary.retained,
                summary.last_id,
                ctx.store().capacity(),
                summary.notifications,
            );
            println!(
                "debug={} info={} warn={} error={}",
                summary.counts.debug, summary.counts.info, summary.counts.warn, summary.counts.error,
            );
            println!("modules: {}", summary.modules.join(", "));
        }
    }

    Ok(())
}
