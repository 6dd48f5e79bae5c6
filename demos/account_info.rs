//! Account overview example.
//!
//! Reads credentials from `API_KEY` / `SECRET_KEY` (or `OAUTH_TOKEN`),
//! falling back to a `.env` file, and prints the paper account, its
//! positions and the most recent fills.
//!
//! Run with: cargo run --example account_info

use paca_rs::models::{ActivityType, GetActivitiesRequest};
use paca_rs::{ClientConfig, PaginationType, TradingClient};

#[tokio::main]
async fn main() -> paca_rs::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    println!("Connecting to Alpaca paper trading...");
    let client = TradingClient::from_env(true, ClientConfig::default())?;

    let account = client.account().get().await?;
    println!("Account {} ({:?})", account.account_number, account.status);
    println!("  Equity:       ${:?}", account.equity);
    println!("  Cash:         ${:?}", account.cash);
    println!("  Buying Power: ${:?}", account.buying_power);

    let config = client.account().configurations().await?;
    println!(
        "  Fractional trading: {}, max margin multiplier: {}",
        config.fractional_trading, config.max_margin_multiplier
    );

    let positions = client.positions().list().await?;
    println!("\n{} open position(s):", positions.len());
    for position in &positions {
        println!(
            "  - {} {} @ {} (P/L {:?})",
            position.symbol, position.qty, position.avg_entry_price, position.unrealized_pl
        );
    }

    let query = GetActivitiesRequest {
        activity_types: Some(vec![ActivityType::Fill]),
        ..Default::default()
    };
    let fills = client
        .account()
        .activities(query, Some(PaginationType::Full), Some(10))
        .await?
        .into_items()
        .await?;
    println!("\nLast {} fill(s):", fills.len());
    for fill in &fills {
        println!(
            "  - {:?} {:?} {:?} @ {:?}",
            fill.side,
            fill.qty,
            fill.symbol.as_ref().map(|s| s.as_str()),
            fill.price
        );
    }

    println!("\nDone!");
    Ok(())
}
