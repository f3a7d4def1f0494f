//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_journal_adapter::CsvJournalAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::static_price_adapter::StaticPriceAdapter;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::config_validation::{validate_analysis_config, validate_engine_config};
use crate::domain::economics::{risk_reward, Engine, EngineConfig, OrderRequest, SwapTable};
use crate::domain::error::PropdeskError;
use crate::domain::performance::{equity_curve, AnalysisConfig, PerformanceSummary};
use crate::domain::score::{composite_score, letter_grade, profit_factor_band, ScoreInputs};
use crate::domain::symbol::format_price;
use crate::domain::trade::Direction;
use crate::ports::config_port::ConfigPort;
use crate::ports::price_port::PricePort;
use crate::ports::report_port::{ReportContext, ReportPort};
use crate::ports::trade_port::TradePort;

#[derive(Parser, Debug)]
#[command(name = "propdesk", about = "Trading math and performance analytics")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a closed-trade journal and write a performance report
    Analyze {
        #[arg(short, long)]
        journal: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Risk-based lot sizing for a planned trade
    PositionSize {
        #[arg(long)]
        balance: f64,
        #[arg(long)]
        risk: f64,
        #[arg(long)]
        entry: f64,
        #[arg(long)]
        stop: f64,
        #[arg(long)]
        symbol: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Profit/loss and margin figures for a position
    Pnl {
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        direction: Direction,
        #[arg(long)]
        open: f64,
        #[arg(long)]
        current: Option<f64>,
        #[arg(long)]
        volume: f64,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Reward-to-risk ratio for a planned setup
    RiskReward {
        #[arg(long)]
        entry: f64,
        #[arg(long)]
        direction: Direction,
        #[arg(long)]
        stop: Option<f64>,
        #[arg(long)]
        target: Option<f64>,
    },
    /// Validate a proposed order against volume and level rules
    CheckOrder {
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        direction: Direction,
        #[arg(long)]
        volume: f64,
        #[arg(long)]
        entry: f64,
        #[arg(long)]
        stop: Option<f64>,
        #[arg(long)]
        target: Option<f64>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Overnight financing cost for holding a position
    Swap {
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        direction: Direction,
        #[arg(long)]
        volume: f64,
        #[arg(long, default_value_t = 1)]
        days: u32,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Analyze {
            journal,
            config,
            output,
        } => run_analyze(&journal, config.as_ref(), output.as_ref()),
        Command::PositionSize {
            balance,
            risk,
            entry,
            stop,
            symbol,
            config,
        } => run_position_size(balance, risk, entry, stop, &symbol, config.as_ref()),
        Command::Pnl {
            symbol,
            direction,
            open,
            current,
            volume,
            config,
        } => run_pnl(&symbol, direction, open, current, volume, config.as_ref()),
        Command::RiskReward {
            entry,
            direction,
            stop,
            target,
        } => run_risk_reward(entry, direction, stop, target),
        Command::CheckOrder {
            symbol,
            direction,
            volume,
            entry,
            stop,
            target,
            config,
        } => run_check_order(&symbol, direction, volume, entry, stop, target, config.as_ref()),
        Command::Swap {
            symbol,
            direction,
            volume,
            days,
            config,
        } => run_swap(&symbol, direction, volume, days, config.as_ref()),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = PropdeskError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

pub fn build_engine_config(config: &dyn ConfigPort) -> EngineConfig {
    let defaults = EngineConfig::default();
    EngineConfig {
        leverage: config.get_double("engine", "leverage", defaults.leverage),
        lot_units: config.get_double("engine", "lot_units", defaults.lot_units),
        max_volume: config.get_double("engine", "max_volume", defaults.max_volume),
        account_currency: config
            .get_string("engine", "account_currency")
            .unwrap_or(defaults.account_currency),
    }
}

pub fn build_analysis_config(config: &dyn ConfigPort) -> AnalysisConfig {
    let defaults = AnalysisConfig::default();
    AnalysisConfig {
        starting_equity: config.get_double("analysis", "starting_equity", defaults.starting_equity),
        annualization: config.get_double("analysis", "annualization", defaults.annualization),
    }
}

/// Engine, swap table, and optional price feed resolved from an optional
/// config file; defaults throughout when no file is given.
fn load_environment(
    config_path: Option<&PathBuf>,
) -> Result<(Engine, SwapTable, Option<StaticPriceAdapter>), ExitCode> {
    match config_path {
        Some(path) => {
            let adapter = load_config(path)?;
            if let Err(e) = validate_engine_config(&adapter) {
                eprintln!("error: {e}");
                return Err(ExitCode::from(&e));
            }
            let engine = Engine::new(build_engine_config(&adapter));
            let swap_table = if adapter.section_keys("swap").is_empty() {
                SwapTable::default()
            } else {
                SwapTable::from_config(&adapter)
            };
            let prices = if adapter.section_keys("prices").is_empty() {
                None
            } else {
                Some(StaticPriceAdapter::from_config(&adapter))
            };
            Ok((engine, swap_table, prices))
        }
        None => Ok((Engine::default(), SwapTable::default(), None)),
    }
}

fn run_analyze(
    journal_path: &PathBuf,
    config_path: Option<&PathBuf>,
    output_path: Option<&PathBuf>,
) -> ExitCode {
    let analysis_config = match config_path {
        Some(path) => {
            eprintln!("Loading config from {}", path.display());
            let adapter = match load_config(path) {
                Ok(a) => a,
                Err(code) => return code,
            };
            if let Err(e) = validate_analysis_config(&adapter) {
                eprintln!("error: {e}");
                return (&e).into();
            }
            build_analysis_config(&adapter)
        }
        None => AnalysisConfig::default(),
    };

    eprintln!("Loading journal from {}", journal_path.display());
    let journal = CsvJournalAdapter::new(journal_path.clone());
    let trades = match journal.fetch_closed_trades() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!("Loaded {} closed trades", trades.len());

    let summary = PerformanceSummary::compute(&trades, &analysis_config);
    let curve = equity_curve(&trades, &analysis_config);
    let score = composite_score(&ScoreInputs::from(&summary));
    let grade = letter_grade(score);

    eprintln!("\n=== Performance Summary ===");
    eprintln!("Trades:           {}", summary.total_trades);
    eprintln!("Win Rate:         {:.2}%", summary.win_rate);
    if summary.profit_factor.is_finite() {
        eprintln!(
            "Profit Factor:    {:.2} ({})",
            summary.profit_factor,
            profit_factor_band(summary.profit_factor)
        );
    } else {
        eprintln!("Profit Factor:    inf (excellent)");
    }
    eprintln!("Expectancy:       {:+.2}", summary.expectancy);
    eprintln!("Max Drawdown:     {:.2}", summary.max_drawdown);
    eprintln!("Sharpe Ratio:     {:.2}", summary.sharpe_ratio);
    eprintln!("Quality Score:    {:.1} ({})", score, grade);

    let output = output_path
        .cloned()
        .unwrap_or_else(|| PathBuf::from("report.txt"));

    let ctx = ReportContext {
        summary: &summary,
        score,
        grade,
        curve: &curve,
    };

    match TextReportAdapter::new().write(&ctx, &output.display().to_string()) {
        Ok(()) => {
            eprintln!("\nReport written to: {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_position_size(
    balance: f64,
    risk: f64,
    entry: f64,
    stop: f64,
    symbol: &str,
    config_path: Option<&PathBuf>,
) -> ExitCode {
    let (engine, _, _) = match load_environment(config_path) {
        Ok(env) => env,
        Err(code) => return code,
    };

    match engine.position_size(balance, risk, entry, stop, symbol) {
        Ok(lots) => {
            println!("{lots:.2}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            let err = PropdeskError::from(e);
            eprintln!("error: {err}");
            (&err).into()
        }
    }
}

fn run_pnl(
    symbol: &str,
    direction: Direction,
    open: f64,
    current: Option<f64>,
    volume: f64,
    config_path: Option<&PathBuf>,
) -> ExitCode {
    let (engine, _, prices) = match load_environment(config_path) {
        Ok(env) => env,
        Err(code) => return code,
    };

    let current_price = match current {
        Some(p) => p,
        None => {
            let feed = match prices {
                Some(f) => f,
                None => {
                    let err = PropdeskError::PriceUnavailable {
                        symbol: symbol.to_uppercase(),
                    };
                    eprintln!("error: {err} (pass --current or configure a [prices] section)");
                    return (&err).into();
                }
            };
            match feed.quote(symbol) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("error: {e}");
                    return (&e).into();
                }
            }
        }
    };

    let figures = engine.profit_loss(symbol, direction, open, current_price, volume);

    println!(
        "{} {} {:.2} lots @ {} -> {}",
        symbol.to_uppercase(),
        direction,
        volume,
        format_price(open, symbol),
        format_price(current_price, symbol),
    );
    println!("pips:            {:.1}", figures.pips);
    println!("profit:          {:+.2} ({:+.2}%)", figures.profit, figures.profit_percent);
    println!("margin required: {:.2}", figures.margin_required);
    ExitCode::SUCCESS
}

fn run_risk_reward(
    entry: f64,
    direction: Direction,
    stop: Option<f64>,
    target: Option<f64>,
) -> ExitCode {
    match risk_reward(entry, stop, target, direction) {
        Some(ratio) => println!("{ratio:.2}"),
        None => println!("unavailable"),
    }
    ExitCode::SUCCESS
}

fn run_check_order(
    symbol: &str,
    direction: Direction,
    volume: f64,
    entry: f64,
    stop: Option<f64>,
    target: Option<f64>,
    config_path: Option<&PathBuf>,
) -> ExitCode {
    let (engine, _, _) = match load_environment(config_path) {
        Ok(env) => env,
        Err(code) => return code,
    };

    let order = OrderRequest {
        symbol: symbol.to_uppercase(),
        direction,
        volume,
        entry_price: entry,
        stop_loss: stop,
        take_profit: target,
    };

    let check = engine.validate_order(&order);
    if check.valid {
        println!("order is valid");
        ExitCode::SUCCESS
    } else {
        for error in &check.errors {
            println!("{error}");
        }
        ExitCode::from(6)
    }
}

fn run_swap(
    symbol: &str,
    direction: Direction,
    volume: f64,
    days: u32,
    config_path: Option<&PathBuf>,
) -> ExitCode {
    let (engine, table, _) = match load_environment(config_path) {
        Ok(env) => env,
        Err(code) => return code,
    };

    let cost = engine.swap(&table, symbol, direction, volume, days);
    println!("{cost:.2}");
    ExitCode::SUCCESS
}
