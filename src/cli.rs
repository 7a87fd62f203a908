//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::dataset::Dataset;
use crate::domain::engine::Engine;
use crate::domain::error::FundbotError;
use crate::domain::metrics;
use crate::ports::config_port::ConfigPort;

const DEFAULT_HOLDINGS: &str = "holdings.csv";
const DEFAULT_TRADES: &str = "trades.csv";
const EXIT_WORDS: &[&str] = &["quit", "exit", "bye", "q"];

#[derive(Parser, Debug)]
#[command(name = "fundbot", about = "Question answering over holdings and trades data")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive chat loop over the loaded tables
    Chat {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        holdings: Option<PathBuf>,
        #[arg(long)]
        trades: Option<PathBuf>,
    },
    /// Answer a single question and exit
    Ask {
        question: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        holdings: Option<PathBuf>,
        #[arg(long)]
        trades: Option<PathBuf>,
    },
    /// Show a summary of the loaded tables
    Info {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        holdings: Option<PathBuf>,
        #[arg(long)]
        trades: Option<PathBuf>,
    },
    /// Start the web server
    Serve {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Chat {
            config,
            holdings,
            trades,
        } => run_chat(config.as_ref(), holdings.as_ref(), trades.as_ref()),
        Command::Ask {
            question,
            config,
            holdings,
            trades,
        } => run_ask(&question, config.as_ref(), holdings.as_ref(), trades.as_ref()),
        Command::Info {
            config,
            holdings,
            trades,
        } => run_info(config.as_ref(), holdings.as_ref(), trades.as_ref()),
        Command::Serve { config } => run_serve(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = FundbotError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Flags override `[data]` config keys, which override the default file
/// names in the working directory.
pub fn resolve_data_paths(
    holdings: Option<&PathBuf>,
    trades: Option<&PathBuf>,
    config: Option<&dyn ConfigPort>,
) -> (PathBuf, PathBuf) {
    let holdings = holdings
        .cloned()
        .or_else(|| {
            config
                .and_then(|c| c.get_string("data", "holdings"))
                .map(PathBuf::from)
        })
        .unwrap_or_else(|| PathBuf::from(DEFAULT_HOLDINGS));
    let trades = trades
        .cloned()
        .or_else(|| {
            config
                .and_then(|c| c.get_string("data", "trades"))
                .map(PathBuf::from)
        })
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TRADES));
    (holdings, trades)
}

/// Load both tables and build the answering engine. Fail-fast: a load
/// error here means no queries are served at all.
pub fn build_engine(
    holdings: &PathBuf,
    trades: &PathBuf,
    config: Option<&dyn ConfigPort>,
) -> Result<Engine, FundbotError> {
    let adapter = CsvAdapter::new(holdings, trades);
    let dataset = Dataset::load(&adapter)?;
    let top_n = config
        .map(|c| c.get_int("answers", "top_n", 10))
        .unwrap_or(10)
        .max(1) as usize;
    Ok(Engine::new(dataset).with_top_n(top_n))
}

fn load_engine(
    config_path: Option<&PathBuf>,
    holdings: Option<&PathBuf>,
    trades: Option<&PathBuf>,
) -> Result<Engine, ExitCode> {
    let config = match config_path {
        Some(path) => Some(load_config(path)?),
        None => None,
    };
    let config_port = config.as_ref().map(|c| c as &dyn ConfigPort);

    let (holdings, trades) = resolve_data_paths(holdings, trades, config_port);
    eprintln!("Loading holdings from {}", holdings.display());
    eprintln!("Loading trades from {}", trades.display());

    let engine = build_engine(&holdings, &trades, config_port).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })?;

    let dataset = engine.dataset();
    eprintln!(
        "Data loaded: {} holdings, {} trades, {} funds",
        dataset.holdings().len(),
        dataset.trades().len(),
        dataset.funds().len(),
    );
    Ok(engine)
}

fn run_chat(
    config_path: Option<&PathBuf>,
    holdings: Option<&PathBuf>,
    trades: Option<&PathBuf>,
) -> ExitCode {
    let engine = match load_engine(config_path, holdings, trades) {
        Ok(e) => e,
        Err(code) => return code,
    };

    println!("{}", "=".repeat(60));
    println!("Holdings & Trades Chatbot");
    println!("{}", "=".repeat(60));
    println!("\nType 'help' for example questions, or 'quit' to exit.\n");

    let stdin = io::stdin();
    loop {
        print!("You: ");
        io::stdout().flush().ok();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }

        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if EXIT_WORDS.contains(&question.to_lowercase().as_str()) {
            break;
        }

        let today = chrono::Local::now().date_naive();
        println!("\nBot: {}\n", engine.answer(question, today));
    }

    println!("\nThank you for using the chatbot. Goodbye!");
    ExitCode::SUCCESS
}

fn run_ask(
    question: &str,
    config_path: Option<&PathBuf>,
    holdings: Option<&PathBuf>,
    trades: Option<&PathBuf>,
) -> ExitCode {
    let engine = match load_engine(config_path, holdings, trades) {
        Ok(e) => e,
        Err(code) => return code,
    };

    let today = chrono::Local::now().date_naive();
    println!("{}", engine.answer(question, today));
    ExitCode::SUCCESS
}

fn run_info(
    config_path: Option<&PathBuf>,
    holdings: Option<&PathBuf>,
    trades: Option<&PathBuf>,
) -> ExitCode {
    let engine = match load_engine(config_path, holdings, trades) {
        Ok(e) => e,
        Err(code) => return code,
    };
    let dataset = engine.dataset();

    println!("Holdings: {} rows", dataset.holdings().len());
    match trade_date_range(dataset) {
        Some((first, last)) => {
            println!("Trades: {} rows, {} to {}", dataset.trades().len(), first, last)
        }
        None => println!("Trades: 0 rows"),
    }
    println!("Funds: {}", dataset.funds().join(", "));
    println!("Custodians: {}", metrics::list_custodians(dataset).join(", "));
    println!(
        "Security types: {}",
        metrics::list_security_types(dataset).join(", ")
    );
    ExitCode::SUCCESS
}

fn trade_date_range(dataset: &Dataset) -> Option<(chrono::NaiveDate, chrono::NaiveDate)> {
    let first = dataset.trades().iter().map(|t| t.trade_date).min()?;
    let last = dataset.trades().iter().map(|t| t.trade_date).max()?;
    Some((first, last))
}

fn run_serve(config_path: &PathBuf) -> ExitCode {
    #[cfg(feature = "web")]
    {
        use crate::adapters::web::{AppState, build_router};
        use std::net::SocketAddr;
        use std::sync::Arc;
        use tracing_subscriber::EnvFilter;

        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(code) => return code,
        };

        let (holdings, trades) = resolve_data_paths(None, None, Some(&config));
        eprintln!("Loading holdings from {}", holdings.display());
        eprintln!("Loading trades from {}", trades.display());

        let engine = match build_engine(&holdings, &trades, Some(&config)) {
            Ok(e) => e,
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::from(&e);
            }
        };

        let addr: SocketAddr = config
            .get_string("web", "listen")
            .unwrap_or_else(|| "127.0.0.1:3000".to_string())
            .parse()
            .unwrap_or_else(|_| "127.0.0.1:3000".parse().unwrap());

        eprintln!("Starting web server on {addr}");

        let state = AppState {
            engine: Arc::new(engine),
        };
        let router = build_router(state);

        tokio::runtime::Runtime::new().unwrap().block_on(async {
            let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
            axum::serve(listener, router).await.unwrap();
        });

        ExitCode::SUCCESS
    }

    #[cfg(not(feature = "web"))]
    {
        let _ = config_path;
        eprintln!("error: web feature is required for serve");
        ExitCode::from(1)
    }
}
