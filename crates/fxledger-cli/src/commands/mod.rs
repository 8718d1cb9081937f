mod currency;
mod price;

use std::io::{self, Read};

use fxledger_core::{
    Clock, DuckDbLedger, FixedClock, QuoteContract, StoreConfig, SystemClock, Transaction,
    TxContext, WindowConfig,
};
use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Open the ledger, run the command in one transaction and return its output.
pub fn run(cli: &Cli) -> Result<Value, CliError> {
    let config = match &cli.db {
        Some(path) => StoreConfig::with_db_path(path.clone()),
        None => StoreConfig::default(),
    };
    let ledger = DuckDbLedger::open(config)?;
    let contract = QuoteContract::new(WindowConfig::new(
        cli.latest_window_secs,
        cli.history_window_secs,
    )?);

    let clock: Box<dyn Clock> = match cli.at {
        Some(timestamp) => Box::new(FixedClock(timestamp)),
        None => Box::new(SystemClock),
    };
    let tx = Transaction::begin(clock.as_ref());
    tracing::info!(
        tx_id = %tx.tx_id,
        timestamp = tx.timestamp,
        db = %ledger.db_path().display(),
        "transaction started"
    );

    execute(&cli.command, &contract, &tx.context(&ledger))
}

/// Dispatch one command against an open transaction.
pub fn execute(
    command: &Command,
    contract: &QuoteContract,
    ctx: &TxContext<'_>,
) -> Result<Value, CliError> {
    match command {
        Command::PutCurrency(args) => currency::put(contract, ctx, &read_payload(&args.payload)?),
        Command::GetCurrency(args) => currency::get(contract, ctx, &args.symbol),
        Command::PutPrice(args) => price::put(contract, ctx, &read_payload(&args.payload)?),
        Command::GetPrice(args) => price::latest(contract, ctx, &args.symbol),
        Command::History(args) => price::history(contract, ctx, &args.symbol),
        Command::Prices(args) => price::batch(contract, ctx, &read_payload(&args.payload)?),
    }
}

/// Acknowledgement printed after a write.
fn written(ctx: &TxContext<'_>) -> Value {
    serde_json::json!({
        "status": "ok",
        "tx_id": ctx.tx_id(),
        "timestamp": ctx.timestamp(),
    })
}

fn read_payload(argument: &str) -> Result<String, CliError> {
    if argument != "-" {
        return Ok(argument.to_owned());
    }
    let mut payload = String::new();
    io::stdin().read_to_string(&mut payload)?;
    Ok(payload)
}
