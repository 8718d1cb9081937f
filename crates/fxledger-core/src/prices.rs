//! Price time series: quotations stored under `symbol.time` keys.

use fxledger_store::KeyValue;
use tracing::debug;

use crate::{codec, keys, LedgerError, PriceQuotation, Symbol, TimeWindow, TxContext, WindowConfig};

/// Writes quotations and answers windowed queries over them.
///
/// "Latest" means the newest point inside the trailing latest window, not the
/// newest point ever written; writers are expected to publish more often than
/// the window width.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceLedger {
    windows: WindowConfig,
}

impl PriceLedger {
    pub fn new(windows: WindowConfig) -> Self {
        Self { windows }
    }

    /// Append one point to the series of `quotation.symbol`.
    ///
    /// A point already stored for the same symbol and time is overwritten.
    pub fn put_quotation(
        &self,
        ctx: &TxContext<'_>,
        quotation: &PriceQuotation,
    ) -> Result<(), LedgerError> {
        let key = keys::encode_quotation_key(quotation.symbol.as_str(), quotation.time)?;
        ctx.store()
            .put_state(&key, &codec::encode_quotation(quotation))
            .map_err(|source| LedgerError::store("put quotation to state", source))?;
        debug!(
            tx_id = ctx.tx_id(),
            symbol = %quotation.symbol,
            time = quotation.time,
            "quotation stored"
        );
        Ok(())
    }

    /// Newest quotation for `symbol` in `[now - latest_window, now)`.
    ///
    /// Fails with `NotFound` when the window holds no points.
    pub fn latest(&self, ctx: &TxContext<'_>, symbol: &str) -> Result<PriceQuotation, LedgerError> {
        let symbol = parse_symbol(symbol)?;
        let window = TimeWindow::trailing(ctx.timestamp(), self.windows.latest_window_secs);

        let mut last = None;
        scan_window(ctx, &symbol, window, |entry| {
            last = Some(entry);
            Ok(())
        })?;

        let entry = last.ok_or_else(|| LedgerError::NotFound {
            what: format!("quotations for {symbol} in {window}"),
        })?;
        decode_entry(&symbol, &entry)
    }

    /// Every quotation for `symbol` in `[now - history_window, now)`, oldest first.
    ///
    /// An empty window is an empty history, not an error.
    pub fn history(
        &self,
        ctx: &TxContext<'_>,
        symbol: &str,
    ) -> Result<Vec<PriceQuotation>, LedgerError> {
        let symbol = parse_symbol(symbol)?;
        let window = TimeWindow::trailing(ctx.timestamp(), self.windows.history_window_secs);

        let mut points = Vec::new();
        scan_window(ctx, &symbol, window, |entry| {
            points.push(decode_entry(&symbol, &entry)?);
            Ok(())
        })?;
        Ok(points)
    }
}

fn parse_symbol(symbol: &str) -> Result<Symbol, LedgerError> {
    Symbol::parse(symbol).map_err(|error| LedgerError::invalid_symbol(symbol, &error))
}

/// Feed every entry of the window scan to `visit`, in key order.
///
/// The scan is released before returning on every path.
fn scan_window<F>(
    ctx: &TxContext<'_>,
    symbol: &Symbol,
    window: TimeWindow,
    mut visit: F,
) -> Result<usize, LedgerError>
where
    F: FnMut(KeyValue) -> Result<(), LedgerError>,
{
    let range = keys::range_for(symbol.as_str(), window)?;
    let mut scan = ctx
        .store()
        .scan_range(&range.start, &range.end)
        .map_err(|source| LedgerError::store("open quotation scan", source))?;

    let mut visited = 0;
    for entry in &mut scan {
        let entry = entry.map_err(|source| LedgerError::store("read quotation scan", source))?;
        visit(entry)?;
        visited += 1;
    }
    scan.close()
        .map_err(|source| LedgerError::store("release quotation scan", source))?;

    debug!(
        tx_id = ctx.tx_id(),
        symbol = %symbol,
        %window,
        visited,
        "quotation window scanned"
    );
    Ok(visited)
}

/// Decode a scanned entry, checking its key against the payload.
fn decode_entry(symbol: &Symbol, entry: &KeyValue) -> Result<PriceQuotation, LedgerError> {
    let (key_symbol, key_time) = keys::decode_quotation_key(&entry.key)?;
    if key_symbol != symbol.as_str() {
        return Err(LedgerError::decode(
            "quotation key",
            format!("key '{}' does not belong to {symbol}", entry.key),
        ));
    }

    let quotation = codec::decode_quotation(symbol.clone(), &entry.value)?;
    if quotation.time != key_time {
        return Err(LedgerError::decode(
            "stored quotation",
            format!(
                "payload time {} does not match key time {key_time}",
                quotation.time
            ),
        ));
    }
    Ok(quotation)
}

#[cfg(test)]
mod tests {
    use fxledger_store::{FaultPlan, LedgerStore, MemoryLedger};

    use super::*;
    use crate::{ErrorKind, Transaction};

    const NOW: i64 = 1_700_000_000;

    fn quotation(symbol: &str, buy: i64, time: i64) -> PriceQuotation {
        PriceQuotation::new(Symbol::parse(symbol).expect("symbol"), buy, buy + 1, time)
    }

    fn seed(ledger: &MemoryLedger, points: &[PriceQuotation]) {
        let tx = Transaction::with_id("seed", NOW);
        let ctx = tx.context(ledger);
        for point in points {
            PriceLedger::default().put_quotation(&ctx, point).expect("put");
        }
    }

    #[test]
    fn latest_picks_the_newest_point_in_window() {
        let ledger = MemoryLedger::new();
        seed(
            &ledger,
            &[quotation("USD", 2, NOW - 10), quotation("USD", 1, NOW - 100)],
        );

        let tx = Transaction::with_id("read", NOW);
        let latest = PriceLedger::default()
            .latest(&tx.context(&ledger), "USD")
            .expect("latest");
        assert_eq!(latest, quotation("USD", 2, NOW - 10));
        assert_eq!(ledger.open_scans(), 0);
    }

    #[test]
    fn window_start_is_inclusive_and_now_is_exclusive() {
        let ledger = MemoryLedger::new();
        seed(&ledger, &[quotation("USD", 1, NOW - 3_000)]);
        let tx = Transaction::with_id("read", NOW);
        let ctx = tx.context(&ledger);

        let latest = PriceLedger::default().latest(&ctx, "USD").expect("latest");
        assert_eq!(latest.time, NOW - 3_000);

        seed(&ledger, &[quotation("EUR", 1, NOW)]);
        let err = PriceLedger::default().latest(&ctx, "EUR").expect_err("excluded");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn empty_window_fails_latest_but_not_history() {
        let ledger = MemoryLedger::new();
        seed(&ledger, &[quotation("USD", 1, NOW - 4_000)]);
        let tx = Transaction::with_id("read", NOW);
        let ctx = tx.context(&ledger);
        let prices = PriceLedger::default();

        let err = prices.latest(&ctx, "USD").expect_err("nothing recent");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(prices.history(&ctx, "USD").expect("history").is_empty());
    }

    #[test]
    fn history_is_chronological_regardless_of_write_order() {
        let ledger = MemoryLedger::new();
        seed(
            &ledger,
            &[
                quotation("USD", 3, NOW - 5),
                quotation("USD", 1, NOW - 3_500),
                quotation("USD", 2, NOW - 60),
            ],
        );

        let tx = Transaction::with_id("read", NOW);
        let times: Vec<i64> = PriceLedger::default()
            .history(&tx.context(&ledger), "USD")
            .expect("history")
            .into_iter()
            .map(|point| point.time)
            .collect();
        assert_eq!(times, vec![NOW - 3_500, NOW - 60, NOW - 5]);
    }

    #[test]
    fn scan_is_released_when_decoding_fails_midway() {
        let ledger = MemoryLedger::new();
        seed(&ledger, &[quotation("USD", 1, NOW - 20)]);
        let bad_key = keys::encode_quotation_key("USD", NOW - 10).expect("key");
        ledger.put_state(&bad_key, &[0xff, 0xff, 0xff]).expect("raw put");
        seed(&ledger, &[quotation("USD", 3, NOW - 5)]);

        let tx = Transaction::with_id("read", NOW);
        let err = PriceLedger::default()
            .history(&tx.context(&ledger), "USD")
            .expect_err("corrupt point");
        assert_eq!(err.kind(), ErrorKind::DecodeError);
        assert_eq!(ledger.open_scans(), 0);
    }

    #[test]
    fn scan_is_released_when_the_store_fails_midway() {
        let ledger = MemoryLedger::new();
        seed(
            &ledger,
            &[quotation("USD", 1, NOW - 20), quotation("USD", 2, NOW - 10)],
        );
        ledger.set_faults(FaultPlan {
            fail_scan_after: Some(1),
            ..FaultPlan::default()
        });

        let tx = Transaction::with_id("read", NOW);
        let err = PriceLedger::default()
            .latest(&tx.context(&ledger), "USD")
            .expect_err("cursor failure");
        assert_eq!(err.kind(), ErrorKind::StoreError);
        assert_eq!(ledger.open_scans(), 0);
    }

    #[test]
    fn payload_time_must_match_key_time() {
        let ledger = MemoryLedger::new();
        let key = keys::encode_quotation_key("USD", NOW - 10).expect("key");
        let payload = codec::encode_quotation(&quotation("USD", 1, NOW - 11));
        ledger.put_state(&key, &payload).expect("raw put");

        let tx = Transaction::with_id("read", NOW);
        let err = PriceLedger::default()
            .latest(&tx.context(&ledger), "USD")
            .expect_err("mismatch");
        assert_eq!(err.kind(), ErrorKind::DecodeError);
    }

    #[test]
    fn custom_windows_are_honoured() {
        let ledger = MemoryLedger::new();
        seed(&ledger, &[quotation("USD", 1, NOW - 90)]);
        let tx = Transaction::with_id("read", NOW);
        let ctx = tx.context(&ledger);

        let narrow = PriceLedger::new(WindowConfig::new(60, 60).expect("windows"));
        assert!(narrow.latest(&ctx, "USD").is_err());
        assert!(narrow.history(&ctx, "USD").expect("history").is_empty());
    }

    #[test]
    fn failed_write_surfaces_as_store_error() {
        let ledger = MemoryLedger::new();
        ledger.set_faults(FaultPlan {
            fail_puts: true,
            ..FaultPlan::default()
        });
        let tx = Transaction::with_id("write", NOW);

        let err = PriceLedger::default()
            .put_quotation(&tx.context(&ledger), &quotation("USD", 1, NOW - 10))
            .expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::StoreError);
        assert!(err.to_string().starts_with("put quotation to state"));
        assert!(ledger.is_empty());
    }
}
