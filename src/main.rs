use std::env;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};

use cryptofolio::api::CoinGeckoApi;
use cryptofolio::app::Portfolio;
use cryptofolio::db::{init, store};

#[derive(Parser)]
#[command(name = "cryptofolio")]
#[command(about = "Track a simulated crypto portfolio from the command line")]
struct Cli {
    /// Owner profile to operate on
    #[arg(long, default_value = "default")]
    owner: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Buy units of an asset with simulated cash
    Buy {
        asset_id: String,
        quantity: Decimal,
        usd_spent: Decimal,
    },
    /// Sell units of a held asset at the current market price
    Sell { asset_id: String, quantity: Decimal },
    /// Show portfolio totals and the cash balance
    Summary,
    /// Print the equity curve over the requested window
    Chart {
        #[arg(long, default_value_t = 7)]
        days: u32,
    },
    /// List recorded transactions, newest first
    History {
        #[arg(long, default_value_t = 1)]
        page: i64,
        #[arg(long, default_value_t = 10)]
        limit: i64,
    },
    /// Search coins by name or symbol
    Search { query: String },
}

const STARTING_BALANCE: Decimal = dec!(100000);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| "cryptofolio.db".to_string());
    let db_connect_options = SqliteConnectOptions::new()
        .filename(&database_url)
        .create_if_missing(true);

    let connection = SqlitePool::connect_with(db_connect_options).await?;
    init::init_schema(&connection).await?;
    store::create_user(&connection, &cli.owner, STARTING_BALANCE).await?;

    let api = CoinGeckoApi::from_env();
    let portfolio = Portfolio::new(cli.owner.clone(), connection, api);

    match cli.command {
        Command::Buy {
            asset_id,
            quantity,
            usd_spent,
        } => {
            let position = portfolio.buy(&asset_id, quantity, usd_spent).await?;
            println!(
                "Bought {} {} for ${} (new average cost ${})",
                quantity,
                asset_id,
                usd_spent.round_dp(2),
                position.average_cost_basis().round_dp(2)
            );
            println!("Cash balance: ${}", portfolio.balance().await?.round_dp(2));
        }
        Command::Sell { asset_id, quantity } => {
            let outcome = portfolio.sell(&asset_id, quantity).await?;
            println!(
                "Sold {} {} for ${} (realized gain ${})",
                quantity,
                asset_id,
                outcome.proceeds().round_dp(2),
                outcome.realized_gain().round_dp(2)
            );
            println!("Cash balance: ${}", portfolio.balance().await?.round_dp(2));
        }
        Command::Summary => {
            let positions = portfolio.positions().await?;
            let summary = portfolio.summary().await?;

            println!("Assets held:      {}", positions.len());
            for position in &positions {
                println!(
                    "  {} x {} (avg cost ${})",
                    position.quantity(),
                    position.asset_id(),
                    position.average_cost_basis().round_dp(2)
                );
            }
            println!(
                "Total invested:   ${}",
                summary.total_invested().round_dp(2)
            );
            println!(
                "Current value:    ${}",
                summary.total_current_value().round_dp(2)
            );
            match summary.total_unrealized_gain_percent() {
                Some(percent) => println!(
                    "Unrealized gain:  ${} ({}%)",
                    summary.total_unrealized_gain().round_dp(2),
                    percent.round_dp(2)
                ),
                None => println!(
                    "Unrealized gain:  ${} (n/a)",
                    summary.total_unrealized_gain().round_dp(2)
                ),
            }
            println!(
                "24h change:       ${} ({}%)",
                summary.change_24h_usd().round_dp(2),
                summary.change_24h_percent().round_dp(2)
            );
            println!("Cash balance:     ${}", portfolio.balance().await?.round_dp(2));

            if !summary.missing_prices().is_empty() {
                eprintln!(
                    "Warning: No prices for {}; those assets were valued at zero",
                    summary.missing_prices().join(", ")
                );
            }
        }
        Command::Chart { days } => {
            let series = portfolio.equity_curve(days).await?;
            if series.is_empty() {
                println!("No data available");
            }
            for point in series {
                println!("{}  ${}", point.date(), point.total_value().round_dp(2));
            }
        }
        Command::History { page, limit } => {
            let records = portfolio.transactions(page, limit).await?;
            let total = portfolio.transaction_count().await?;
            for record in records {
                println!(
                    "{}  {:4}  {} {} @ ${} (${})",
                    record.timestamp().format("%Y-%m-%d %H:%M:%S"),
                    record.kind().to_str(),
                    record.quantity(),
                    record.asset_id(),
                    record.unit_price().round_dp(2),
                    record.usd_amount().round_dp(2)
                );
            }
            println!("Page {} of {} transactions", page, total);
        }
        Command::Search { query } => {
            for coin in portfolio.api().search(&query).await? {
                match coin.market_cap_rank() {
                    Some(rank) => {
                        println!("{} ({}) [{}] rank #{}", coin.name(), coin.symbol(), coin.id(), rank)
                    }
                    None => println!("{} ({}) [{}]", coin.name(), coin.symbol(), coin.id()),
                }
            }
        }
    }

    Ok(())
}
