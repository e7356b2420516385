use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use moat::cli::alerts::AlertsAction;
use moat::cli::watchlist::WatchlistAction;
use moat::core::log::init_logging;
use moat::core::security::HistoryPeriod;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Search stocks by symbol or name
    Search { query: String },
    /// Show details, scores and price history for a stock
    Show {
        symbol: String,
        /// History period: 1mo, 3mo, 6mo, 1y or 5y
        #[arg(short, long)]
        period: Option<HistoryPeriod>,
    },
    /// List stocks passing the value screen
    Recommend,
    /// Manage your watchlist
    Watchlist {
        #[command(subcommand)]
        command: WatchlistCommands,
    },
    /// Manage price and P/E alerts
    Alerts {
        #[command(subcommand)]
        command: AlertsCommands,
    },
}

#[derive(Subcommand)]
enum WatchlistCommands {
    /// Add a symbol
    Add { symbol: String },
    /// Remove a symbol
    Remove { symbol: String },
    /// Show watched stocks
    List,
    /// Remove every symbol
    Clear,
}

#[derive(Subcommand)]
enum AlertsCommands {
    /// Create an alert, e.g. `alerts add AAPL price below 150`
    Add {
        symbol: String,
        /// price, pe or volume
        kind: String,
        /// above or below
        condition: String,
        value: String,
    },
    /// Remove an alert by id
    Remove { id: u64 },
    /// Show alerts
    List,
    /// Evaluate alerts against current data
    Check,
}

impl From<WatchlistCommands> for WatchlistAction {
    fn from(cmd: WatchlistCommands) -> WatchlistAction {
        match cmd {
            WatchlistCommands::Add { symbol } => WatchlistAction::Add(symbol),
            WatchlistCommands::Remove { symbol } => WatchlistAction::Remove(symbol),
            WatchlistCommands::List => WatchlistAction::List,
            WatchlistCommands::Clear => WatchlistAction::Clear,
        }
    }
}

impl From<AlertsCommands> for AlertsAction {
    fn from(cmd: AlertsCommands) -> AlertsAction {
        match cmd {
            AlertsCommands::Add {
                symbol,
                kind,
                condition,
                value,
            } => AlertsAction::Add {
                symbol,
                kind,
                condition,
                value,
            },
            AlertsCommands::Remove { id } => AlertsAction::Remove(id),
            AlertsCommands::List => AlertsAction::List,
            AlertsCommands::Check => AlertsAction::Check,
        }
    }
}

impl From<Commands> for moat::AppCommand {
    fn from(cmd: Commands) -> moat::AppCommand {
        match cmd {
            Commands::Search { query } => moat::AppCommand::Search(query),
            Commands::Show { symbol, period } => moat::AppCommand::Show { symbol, period },
            Commands::Recommend => moat::AppCommand::Recommend,
            Commands::Watchlist { command } => moat::AppCommand::Watchlist(command.into()),
            Commands::Alerts { command } => moat::AppCommand::Alerts(command.into()),
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let result = match cli.command {
        Some(Commands::Setup) => moat::cli::setup::setup(),
        Some(cmd) => moat::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
