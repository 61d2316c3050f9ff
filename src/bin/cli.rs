//! Betledger CLI - reports over a JSON bet ledger

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use colored::{ColoredString, Colorize};
use dialoguer::{theme::ColorfulTheme, Input, Select};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use betledger::analytics::{
    compute_bankroll_series, compute_performance_by, compute_roi_at, compute_roi_trend_with,
    compute_streaks_with, compute_summary, filter_timeframe, local_today, max_drawdown, Dimension,
    Granularity, StreakType, Timeframe,
};
use betledger::config::AnalyticsConfig;
use betledger::core::bankroll::{recommended_unit_size, LimitLevel, LimitStatus};
use betledger::core::odds::{american_to_decimal, implied_probability, payout_from_odds};
use betledger::core::settlement::settle_in_ledger;
use betledger::data::{add_bet, load_bets, save_bets};
use betledger::models::{Bet, BetResult};

/// Default ledger file (relative to the working directory)
const DEFAULT_LEDGER: &str = "bets.json";

#[derive(Parser)]
#[command(name = "betledger")]
#[command(author, version, about = "Sports betting ledger analytics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Run in interactive mode
    #[arg(short, long)]
    interactive: bool,

    /// Path to the JSON ledger file
    #[arg(long, default_value = DEFAULT_LEDGER)]
    ledger: PathBuf,

    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Window applied to the ledger: day, week, month, year, all or Nd (e.g. 30d)
    #[arg(short, long, default_value = "all")]
    timeframe: String,

    /// Print JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an American price and compute the payout for a stake
    Odds {
        /// American odds (e.g. 150 or -110)
        #[arg(long, allow_negative_numbers = true)]
        odds: f64,

        /// Stake to price
        #[arg(long, default_value = "100")]
        stake: f64,
    },

    /// ROI for the selected timeframe
    Roi,

    /// Bankroll curve and max drawdown
    Bankroll {
        /// Starting bankroll (overrides config)
        #[arg(long)]
        start: Option<f64>,
    },

    /// Performance breakdown by category
    Performance {
        #[arg(long, value_enum, default_value = "sport")]
        by: DimensionArg,
    },

    /// ROI trend per week or month
    Trend {
        #[arg(long, value_enum, default_value = "auto")]
        granularity: GranularityArg,
    },

    /// Current, longest and recent win/loss streaks
    Streaks,

    /// Dashboard overview
    Summary,

    /// Check wagering against bankroll limits
    Limits,

    /// Log a new bet (creates the ledger file if missing)
    Add {
        /// Date placed, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Amount risked
        #[arg(long)]
        stake: f64,

        /// American odds (e.g. 150 or -110)
        #[arg(long, allow_negative_numbers = true)]
        odds: f64,

        #[arg(long)]
        sport: Option<String>,

        #[arg(long)]
        bet_type: Option<String>,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long)]
        notes: Option<String>,

        /// win, loss or push for a bet that is already decided
        #[arg(long, default_value = "pending")]
        result: BetResult,

        /// Explicit payout (skips the odds calculation)
        #[arg(long)]
        payout: Option<f64>,
    },

    /// Settle an open bet and rewrite the ledger
    Settle {
        /// Bet id
        #[arg(long)]
        id: i64,

        /// win, loss or push
        #[arg(long)]
        result: BetResult,

        /// Explicit payout (skips the odds calculation)
        #[arg(long)]
        payout: Option<f64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DimensionArg {
    Sport,
    BetType,
    OddsRange,
}

impl From<DimensionArg> for Dimension {
    fn from(arg: DimensionArg) -> Self {
        match arg {
            DimensionArg::Sport => Dimension::Sport,
            DimensionArg::BetType => Dimension::BetType,
            DimensionArg::OddsRange => Dimension::OddsRange,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum GranularityArg {
    Auto,
    Weekly,
    Monthly,
}

impl From<GranularityArg> for Granularity {
    fn from(arg: GranularityArg) -> Self {
        match arg {
            GranularityArg::Auto => Granularity::Auto,
            GranularityArg::Weekly => Granularity::Weekly,
            GranularityArg::Monthly => Granularity::Monthly,
        }
    }
}

/// Settings shared by every report
struct App {
    ledger: PathBuf,
    config: AnalyticsConfig,
    timeframe: Timeframe,
    json: bool,
}

impl App {
    /// Ledger bets inside the selected timeframe
    fn windowed_bets(&self) -> Result<Vec<Bet>> {
        let bets = load_ledger(&self.ledger)?;
        let window = filter_timeframe(&bets, self.timeframe, local_today());
        debug!(
            total = bets.len(),
            in_window = window.len(),
            timeframe = %self.timeframe,
            "applied timeframe"
        );
        Ok(window)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so --json output stays parseable
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let config = match cli.config {
        Some(ref path) => AnalyticsConfig::load(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => AnalyticsConfig::default(),
    };

    let ctx = App {
        ledger: cli.ledger.clone(),
        config,
        timeframe: Timeframe::parse(&cli.timeframe),
        json: cli.json,
    };

    if !ctx.json {
        println!("{}", "Betledger CLI v0.1.0".cyan().bold());
        println!();
    }

    if cli.interactive {
        run_interactive(&ctx)?;
    } else if let Some(command) = cli.command {
        match command {
            Commands::Odds { odds, stake } => show_odds(&ctx, odds, stake)?,
            Commands::Roi => show_roi(&ctx)?,
            Commands::Bankroll { start } => show_bankroll(&ctx, start)?,
            Commands::Performance { by } => show_performance(&ctx, by.into())?,
            Commands::Trend { granularity } => show_trend(&ctx, granularity.into())?,
            Commands::Streaks => show_streaks(&ctx)?,
            Commands::Summary => show_summary(&ctx)?,
            Commands::Limits => show_limits(&ctx)?,
            Commands::Add {
                date,
                stake,
                odds,
                sport,
                bet_type,
                description,
                notes,
                result,
                payout,
            } => {
                let mut bet = Bet::new(0, date.unwrap_or_else(local_today), stake, odds);
                bet.sport = sport;
                bet.bet_type = bet_type;
                bet.description = description;
                bet.notes = notes;
                bet.result = result;
                add_new_bet(&ctx, bet, payout)?
            }
            Commands::Settle { id, result, payout } => settle_bet(&ctx, id, result, payout)?,
        }
    } else {
        println!("Use --help for usage information or --interactive for interactive mode.");
    }

    Ok(())
}

fn load_ledger(path: &Path) -> Result<Vec<Bet>> {
    load_bets(path).with_context(|| format!("Failed to load ledger from {:?}", path))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn show_odds(ctx: &App, odds: f64, stake: f64) -> Result<()> {
    let decimal = american_to_decimal(odds)?;
    let implied = implied_probability(odds)?;
    let payout = payout_from_odds(stake, odds)?;

    if ctx.json {
        return print_json(&serde_json::json!({
            "odds": odds,
            "decimal": decimal,
            "impliedProbability": implied,
            "stake": stake,
            "payout": payout,
            "profit": payout - stake,
        }));
    }

    println!("{}", "Odds:".yellow().bold());
    println!("American:            {:+}", odds);
    println!("Decimal:             {:.3}", decimal);
    println!("Implied probability: {:.1}%", implied * 100.0);
    println!("{}", "-".repeat(40));
    println!("Stake:               {:.2}", stake);
    println!("Payout on win:       {:.2}", payout);
    println!("Profit on win:       {}", money(payout - stake));
    Ok(())
}

fn show_roi(ctx: &App) -> Result<()> {
    let bets = load_ledger(&ctx.ledger)?;
    let summary = compute_roi_at(&bets, ctx.timeframe, local_today());

    if ctx.json {
        return print_json(&summary);
    }

    println!("{} ({})", "ROI:".yellow().bold(), summary.timeframe);
    println!("Bets:         {}", summary.count);
    println!("Total risked: {:.2}", summary.total_risked);
    println!("Total won:    {:.2}", summary.total_won);
    println!("ROI:          {}", pct(summary.roi));
    Ok(())
}

fn show_bankroll(ctx: &App, start: Option<f64>) -> Result<()> {
    let bets = ctx.windowed_bets()?;
    let starting = start.unwrap_or(ctx.config.starting_bankroll);
    let series = compute_bankroll_series(&bets, starting);
    let drawdown = max_drawdown(&series);

    if ctx.json {
        return print_json(&serde_json::json!({
            "series": series,
            "maxDrawdown": drawdown,
        }));
    }

    println!("{}", "Bankroll:".yellow().bold());
    if series.is_empty() {
        println!("{}", "No bets in this timeframe.".dimmed());
        return Ok(());
    }

    println!("{:>12} {:>12} {:>12}", "Date", "Bankroll", "Profit");
    println!("{}", "-".repeat(40));
    for point in &series {
        println!(
            "{:>12} {:>12.2} {:>12}",
            point.date,
            point.bankroll,
            money(point.profit)
        );
    }
    println!("{}", "-".repeat(40));
    println!(
        "Max drawdown: {:.2} ({:.1}%)",
        drawdown.amount,
        drawdown.pct * 100.0
    );

    if let Some(last) = series.last() {
        let unit = recommended_unit_size(last.bankroll, ctx.config.risk_tolerance);
        println!(
            "Recommended unit ({:?}): {:.0}",
            ctx.config.risk_tolerance, unit
        );
    }
    Ok(())
}

fn show_performance(ctx: &App, dimension: Dimension) -> Result<()> {
    let bets = ctx.windowed_bets()?;
    let perf = compute_performance_by(&bets, dimension);

    if ctx.json {
        return print_json(&perf);
    }

    println!("{} {}", "Performance by".yellow().bold(), dimension);
    if perf.is_empty() {
        println!(
            "{}",
            format!("No settled bets with a {} label.", dimension)
                .as_str()
                .dimmed()
        );
        return Ok(());
    }

    println!(
        "{:<26} {:>6} {:>10} {:>9} {:>12} {:>10}",
        "Category", "Bets", "W-L-P", "Win %", "Profit", "ROI"
    );
    println!("{}", "-".repeat(78));
    for p in &perf {
        println!(
            "{:<26} {:>6} {:>10} {:>8.1}% {:>12} {:>10}",
            truncate_name(&p.category, 26),
            p.total_bets,
            format!("{}-{}-{}", p.wins, p.losses, p.pushes),
            p.win_rate,
            money(p.profit),
            pct(p.roi)
        );
    }
    Ok(())
}

fn show_trend(ctx: &App, granularity: Granularity) -> Result<()> {
    let bets = ctx.windowed_bets()?;
    let trend = compute_roi_trend_with(&bets, granularity, ctx.config.weekly_trend_max_bets);

    if ctx.json {
        return print_json(&trend);
    }

    println!("{}", "ROI Trend:".yellow().bold());
    if trend.is_empty() {
        println!("{}", "No bets in this timeframe.".dimmed());
        return Ok(());
    }

    println!(
        "{:>12} {:>6} {:>12} {:>12} {:>10} {:>12}",
        "Period", "Bets", "Wagered", "Profit", "ROI", "Cumulative"
    );
    println!("{}", "-".repeat(70));
    for t in &trend {
        println!(
            "{:>12} {:>6} {:>12.2} {:>12} {:>10} {:>12}",
            t.period,
            t.bets_count,
            t.wagered,
            money(t.profit),
            pct(t.roi),
            pct(t.cumulative_roi)
        );
    }
    Ok(())
}

fn show_streaks(ctx: &App) -> Result<()> {
    let bets = ctx.windowed_bets()?;
    let report = compute_streaks_with(&bets, ctx.config.streak_history_len);

    if ctx.json {
        return print_json(&report);
    }

    println!("{}", "Streaks:".yellow().bold());
    let current = &report.current_streak;
    match current.kind {
        StreakType::None => println!("Current: {}", "none".dimmed()),
        kind => println!(
            "Current: {} x{} ({} .. {})",
            streak_label(kind),
            current.count,
            fmt_date(current.start_date),
            fmt_date(current.end_date)
        ),
    }

    let win = &report.longest_win_streak;
    println!(
        "Longest win:  {} ({} .. {}) profit {}",
        win.count,
        fmt_date(win.start_date),
        fmt_date(win.end_date),
        money(win.profit)
    );
    let loss = &report.longest_loss_streak;
    println!(
        "Longest loss: {} ({} .. {}) lost {:.2}",
        loss.count,
        fmt_date(loss.start_date),
        fmt_date(loss.end_date),
        loss.loss
    );

    if !report.streak_history.is_empty() {
        println!("\n{}", "Recent streaks:".yellow().bold());
        println!(
            "{:>6} {:>6} {:>12} {:>12} {:>12}",
            "Type", "Count", "Start", "End", "Net"
        );
        println!("{}", "-".repeat(52));
        for seg in &report.streak_history {
            println!(
                "{:>6} {:>6} {:>12} {:>12} {:>12}",
                streak_label(seg.kind),
                seg.count,
                seg.start_date,
                seg.end_date,
                money(seg.net_result)
            );
        }
    }
    Ok(())
}

fn show_summary(ctx: &App) -> Result<()> {
    let bets = ctx.windowed_bets()?;
    let summary = compute_summary(&bets);
    let streaks = compute_streaks_with(&bets, ctx.config.streak_history_len);
    let drawdown = max_drawdown(&compute_bankroll_series(
        &bets,
        ctx.config.starting_bankroll,
    ));

    if ctx.json {
        return print_json(&serde_json::json!({
            "summary": summary,
            "currentStreak": streaks.current_streak,
            "maxDrawdown": drawdown,
        }));
    }

    println!("{} ({})", "Summary:".yellow().bold(), ctx.timeframe);
    println!(
        "Bets: {} total, {} settled, {} open",
        summary.total_bets, summary.completed_bets, summary.open_bets
    );
    println!(
        "Record: {}-{}-{} ({:.1}% won)",
        summary.wins, summary.losses, summary.pushes, summary.win_rate
    );
    println!("{}", "-".repeat(40));
    println!("Total wagered:    {:.2}", summary.total_wagered);
    println!("Average bet size: {:.2}", summary.average_bet_size);
    println!("Net profit:       {}", money(summary.net_profit));
    println!("ROI:              {}", pct(summary.roi_percent));
    println!(
        "Current streak:   {} x{}",
        streak_label(streaks.current_streak.kind),
        streaks.current_streak.count
    );
    println!(
        "Max drawdown:     {:.2} ({:.1}%)",
        drawdown.amount,
        drawdown.pct * 100.0
    );
    Ok(())
}

fn show_limits(ctx: &App) -> Result<()> {
    let bets = load_ledger(&ctx.ledger)?;
    let report = ctx.config.limits.check(&bets, local_today());

    if ctx.json {
        return print_json(&report);
    }

    println!("{}", "Bankroll limits:".yellow().bold());
    println!(
        "{:>8} {:>12} {:>12} {:>10}",
        "Window", "Wagered", "Limit", "Status"
    );
    println!("{}", "-".repeat(45));
    for (name, status) in [
        ("day", &report.daily),
        ("week", &report.weekly),
        ("month", &report.monthly),
    ] {
        print_limit(name, status);
    }

    if !report.oversized_bets.is_empty() {
        println!(
            "{} bets over max size {:.2}: {:?}",
            "Warning:".yellow(),
            ctx.config.limits.max_bet_size,
            report.oversized_bets
        );
    }
    println!(
        "Month net profit: {}{}",
        money(report.monthly_net_profit),
        if report.stop_loss_hit {
            format!(" {}", "(stop-loss reached)".red().bold())
        } else {
            String::new()
        }
    );
    Ok(())
}

fn print_limit(name: &str, status: &LimitStatus) {
    let level = match status.level {
        LimitLevel::Safe => "safe".green(),
        LimitLevel::Warning => "warning".yellow(),
        LimitLevel::Danger => "danger".red(),
    };
    println!(
        "{:>8} {:>12.2} {:>12.2} {:>10}",
        name, status.wagered, status.limit, level
    );
}

fn add_new_bet(ctx: &App, bet: Bet, payout: Option<f64>) -> Result<()> {
    let mut bets = if ctx.ledger.exists() {
        load_ledger(&ctx.ledger)?
    } else {
        Vec::new()
    };
    let added = add_bet(&mut bets, bet, payout)?.clone();
    save_bets(&ctx.ledger, &bets)
        .with_context(|| format!("Failed to write ledger to {:?}", ctx.ledger))?;

    if ctx.json {
        return print_json(&added);
    }

    println!(
        "{} bet {} on {}: {:.2} at {:+} ({})",
        "Added".green(),
        added.id,
        added.date,
        added.amount_risked,
        added.odds,
        added.result
    );
    Ok(())
}

fn settle_bet(ctx: &App, id: i64, result: BetResult, payout: Option<f64>) -> Result<()> {
    let mut bets = load_ledger(&ctx.ledger)?;
    let settled = settle_in_ledger(&mut bets, id, result, payout)?.clone();
    save_bets(&ctx.ledger, &bets)
        .with_context(|| format!("Failed to write ledger to {:?}", ctx.ledger))?;

    if ctx.json {
        return print_json(&settled);
    }

    println!(
        "{} bet {} as {} (payout {:.2}, profit {})",
        "Settled".green(),
        settled.id,
        settled.result,
        settled.payout,
        money(settled.profit())
    );
    Ok(())
}

fn run_interactive(ctx: &App) -> Result<()> {
    println!("{}", "Interactive mode".green().bold());
    println!("Select 'Quit' to exit.\n");

    let theme = ColorfulTheme::default();

    loop {
        let options = vec![
            "Summary",
            "ROI",
            "Bankroll",
            "Performance by sport",
            "ROI trend",
            "Streaks",
            "Limits",
            "Odds calculator",
            "Quit",
        ];

        let selection = Select::with_theme(&theme)
            .with_prompt("What would you like to see?")
            .items(&options)
            .default(0)
            .interact()?;

        println!();
        match selection {
            0 => show_summary(ctx)?,
            1 => show_roi(ctx)?,
            2 => show_bankroll(ctx, None)?,
            3 => show_performance(ctx, Dimension::Sport)?,
            4 => show_trend(ctx, Granularity::Auto)?,
            5 => show_streaks(ctx)?,
            6 => show_limits(ctx)?,
            7 => {
                let odds: f64 = Input::with_theme(&theme)
                    .with_prompt("American odds")
                    .interact_text()?;
                let stake: f64 = Input::with_theme(&theme)
                    .with_prompt("Stake")
                    .default(100.0)
                    .interact_text()?;
                println!();
                // Keep the menu alive on a bad price
                if let Err(e) = show_odds(ctx, odds, stake) {
                    println!("{}", e.to_string().as_str().red());
                }
            }
            _ => {
                println!("Goodbye!");
                break;
            }
        }
        println!();
    }

    Ok(())
}

/// Signed amount, green for gains and red for losses
fn money(value: f64) -> ColoredString {
    let text = format!("{:+.2}", value);
    if value >= 0.0 {
        text.as_str().green()
    } else {
        text.as_str().red()
    }
}

fn pct(value: f64) -> ColoredString {
    let text = format!("{:+.1}%", value);
    if value >= 0.0 {
        text.as_str().green()
    } else {
        text.as_str().red()
    }
}

fn streak_label(kind: StreakType) -> ColoredString {
    match kind {
        StreakType::Win => "win".green(),
        StreakType::Loss => "loss".red(),
        StreakType::None => "none".dimmed(),
    }
}

fn fmt_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Truncate name to fit display width
fn truncate_name(name: &str, max_len: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_len {
        name.to_string()
    } else {
        chars[..max_len - 1].iter().collect::<String>() + "…"
    }
}
