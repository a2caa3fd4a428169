//! Library Console - terminal front end for the library backend

use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use library_console::{config::LoggingConfig, shell::HELP, ApiClient, AppConfig, Console, Outcome};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    // Stdout belongs to the console; keep the guard alive until exit
    let _guard = init_tracing(&config.logging);

    tracing::info!("Starting Library Console v{}", env!("CARGO_PKG_VERSION"));

    let client = ApiClient::new(&config.api)?;
    tracing::info!("Using backend at {}", client.base_url());

    let mut console = Console::new(Arc::new(client));

    println!("Library Console v{} ({})", env!("CARGO_PKG_VERSION"), config.api.base_url);
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match console.handle_line(&line).await {
            Outcome::Continue(text) if text.is_empty() => {}
            Outcome::Continue(text) => println!("{}", text),
            Outcome::Quit => break,
        }
    }

    tracing::info!("Library Console stopped");
    Ok(())
}

/// Initialize tracing to stderr, or to a daily file when a directory is configured
fn init_tracing(logging: &LoggingConfig) -> WorkerGuard {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("library_console={}", logging.level).into());

    let (writer, guard) = match &logging.directory {
        Some(directory) => {
            tracing_appender::non_blocking(tracing_appender::rolling::daily(directory, "library-console.log"))
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(fmt::layer().json().with_writer(writer))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(writer).with_ansi(logging.directory.is_none()))
            .init();
    }

    guard
}
