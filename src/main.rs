//! One-shot screener: evaluates the symbols given as arguments (or
//! `SCREEN_SYMBOLS`) and prints a table of results.
//!
//! ```text
//! screener AAPL,GOOGL MSFT
//! ```

use dotenvy::dotenv;
use expo_screener::config::ScreenerConfig;
use expo_screener::logging;
use expo_screener::screener::{parse_symbols, render_table, Screener};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = ScreenerConfig::from_env();
    let args: Vec<String> = env::args().skip(1).collect();
    let symbols = if args.is_empty() {
        config.default_symbols.clone()
    } else {
        parse_symbols(&args.join(","))
    };

    if symbols.is_empty() {
        return Err("no symbols given".into());
    }

    let screener = Screener::from_config(&config)?;
    let report = screener.screen(&symbols, config.row_filter()).await;
    print!("{}", render_table(&report, config.fast_span, config.slow_span));

    Ok(())
}
