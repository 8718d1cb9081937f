//! Behavior-driven tests for the quote contract
//!
//! These tests drive the caller surface with JSON payloads against the
//! in-memory ledger and check what a client observes.

use fxledger_tests::*;

// =============================================================================
// Currency registry
// =============================================================================

#[test]
fn when_client_registers_a_currency_it_reads_back_the_same_record() {
    // Given: An empty ledger
    let ledger = MemoryLedger::new();
    let tx = Transaction::with_id("tx-1", NOW);
    let ctx = tx.context(&ledger);
    let contract = QuoteContract::default();

    // When: The client registers USD
    contract
        .put_currency(&ctx, &currency_json("USD", "доллар", "dollar", "840"))
        .expect("put currency");

    // Then: Reading USD returns every field unchanged
    let record = contract.get_currency(&ctx, "USD").expect("get currency");
    assert_eq!(record.symbol.as_str(), "USD");
    assert_eq!(record.local_name, "доллар");
    assert_eq!(record.alternate_name, "dollar");
    assert_eq!(record.code, "840");
}

#[test]
fn when_client_registers_a_currency_twice_the_last_write_wins() {
    // Given: A registered currency
    let ledger = MemoryLedger::new();
    let tx = Transaction::with_id("tx-1", NOW);
    let ctx = tx.context(&ledger);
    let contract = QuoteContract::default();
    contract
        .put_currency(&ctx, &currency_json("EUR", "евро", "euro", "978"))
        .expect("first put");

    // When: The same symbol is written again
    contract
        .put_currency(&ctx, &currency_json("EUR", "евро", "Euro", "978"))
        .expect("second put");

    // Then: Only the newest record remains
    assert_eq!(ledger.len(), 1);
    let record = contract.get_currency(&ctx, "EUR").expect("get currency");
    assert_eq!(record.alternate_name, "Euro");
}

#[test]
fn when_client_uses_legacy_field_names_the_record_is_accepted() {
    // Given: A payload written with the legacy name fields
    let ledger = MemoryLedger::new();
    let tx = Transaction::with_id("tx-1", NOW);
    let ctx = tx.context(&ledger);
    let contract = QuoteContract::default();
    let payload = r#"{"symbol":"GBP","ru_name":"фунт","en_name":"pound","code":"826"}"#;

    // When: The client registers it
    contract.put_currency(&ctx, payload).expect("put currency");

    // Then: The names land in the current fields
    let record = contract.get_currency(&ctx, "GBP").expect("get currency");
    assert_eq!(record.local_name, "фунт");
    assert_eq!(record.alternate_name, "pound");
}

#[test]
fn when_client_reads_an_unknown_currency_it_gets_not_found() {
    let ledger = MemoryLedger::new();
    let tx = Transaction::with_id("tx-1", NOW);
    let ctx = tx.context(&ledger);

    let err = QuoteContract::default()
        .get_currency(&ctx, "JPY")
        .expect_err("unknown currency");

    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn when_client_passes_a_bad_symbol_nothing_is_read() {
    let ledger = MemoryLedger::new();
    let tx = Transaction::with_id("tx-1", NOW);
    let ctx = tx.context(&ledger);
    let contract = QuoteContract::default();

    let empty = contract.get_currency(&ctx, "").expect_err("empty symbol");
    assert_eq!(empty.kind(), ErrorKind::EmptyInput);

    let dotted = contract
        .get_currency_price(&ctx, "US.D")
        .expect_err("dotted symbol");
    assert_eq!(dotted.kind(), ErrorKind::InvalidSymbol);
}

// =============================================================================
// Price time series
// =============================================================================

#[test]
fn when_two_prices_are_published_latest_and_history_agree() {
    // Given: USD published at now-100 and now-10
    let ledger = MemoryLedger::new();
    publish(&ledger, &[("USD", 123, 123, NOW - 100), ("USD", 123, 123, NOW - 10)]);

    let tx = Transaction::with_id("reader", NOW);
    let ctx = tx.context(&ledger);
    let contract = QuoteContract::default();

    // When: The client asks for the current price
    let latest = contract.get_currency_price(&ctx, "USD").expect("latest");

    // Then: The newer point wins
    assert_eq!(latest.time, NOW - 10);
    assert_eq!((latest.buy, latest.sell), (123, 123));

    // And: History returns both, oldest first
    let history = contract
        .get_currency_price_from_history(&ctx, "USD")
        .expect("history");
    let times: Vec<i64> = history.iter().map(|point| point.time).collect();
    assert_eq!(times, vec![NOW - 100, NOW - 10]);
}

#[test]
fn when_prices_are_published_out_of_order_history_is_still_chronological() {
    let ledger = MemoryLedger::new();
    publish(
        &ledger,
        &[
            ("USD", 3, 3, NOW - 30),
            ("USD", 1, 1, NOW - 3_000),
            ("USD", 4, 4, NOW - 1),
            ("USD", 2, 2, NOW - 600),
        ],
    );

    let tx = Transaction::with_id("reader", NOW);
    let buys: Vec<i64> = QuoteContract::default()
        .get_currency_price_from_history(&tx.context(&ledger), "USD")
        .expect("history")
        .into_iter()
        .map(|point| point.buy)
        .collect();

    assert_eq!(buys, vec![1, 2, 3, 4]);
}

#[test]
fn when_all_prices_are_stale_latest_fails_but_history_is_empty() {
    // Given: One price older than both windows
    let ledger = MemoryLedger::new();
    publish(&ledger, &[("USD", 1, 1, NOW - 7_200)]);
    let tx = Transaction::with_id("reader", NOW);
    let ctx = tx.context(&ledger);
    let contract = QuoteContract::default();

    // Then: Latest reports nothing found
    let err = contract.get_currency_price(&ctx, "USD").expect_err("stale");
    assert_eq!(err.kind(), ErrorKind::NotFound);

    // And: History is simply empty
    let history = contract
        .get_currency_price_from_history(&ctx, "USD")
        .expect("history");
    assert!(history.is_empty());
}

#[test]
fn when_a_price_falls_between_the_two_windows_only_history_sees_it() {
    let ledger = MemoryLedger::new();
    publish(&ledger, &[("USD", 1, 1, NOW - 3_300)]);
    let tx = Transaction::with_id("reader", NOW);
    let ctx = tx.context(&ledger);
    let contract = QuoteContract::default();

    assert!(contract.get_currency_price(&ctx, "USD").is_err());
    assert_eq!(
        contract
            .get_currency_price_from_history(&ctx, "USD")
            .expect("history")
            .len(),
        1
    );
}

#[test]
fn when_a_symbol_is_a_prefix_of_another_their_series_stay_apart() {
    // Given: USD and USDX both published
    let ledger = MemoryLedger::new();
    publish(&ledger, &[("USD", 1, 1, NOW - 20), ("USDX", 9, 9, NOW - 10)]);
    let tx = Transaction::with_id("reader", NOW);
    let ctx = tx.context(&ledger);
    let contract = QuoteContract::default();

    // Then: Each symbol only sees its own points
    let usd = contract
        .get_currency_price_from_history(&ctx, "USD")
        .expect("usd history");
    assert_eq!(usd.len(), 1);
    assert_eq!(usd[0].buy, 1);

    let usdx = contract.get_currency_price(&ctx, "USDX").expect("usdx latest");
    assert_eq!(usdx.buy, 9);
}

#[test]
fn when_prices_predate_the_epoch_they_still_order_correctly() {
    let ledger = MemoryLedger::new();
    let now = 100;
    let tx = Transaction::with_id("writer", now);
    let ctx = tx.context(&ledger);
    let contract = QuoteContract::default();
    for time in [50, -20, 0, -500] {
        contract
            .put_currency_price(&ctx, &quotation_json("XAU", 1, 1, time))
            .expect("put");
    }

    let times: Vec<i64> = contract
        .get_currency_price_from_history(&ctx, "XAU")
        .expect("history")
        .into_iter()
        .map(|point| point.time)
        .collect();
    assert_eq!(times, vec![-500, -20, 0, 50]);
}

// =============================================================================
// Batch lookups
// =============================================================================

#[test]
fn when_every_symbol_has_a_price_the_batch_keeps_request_order() {
    let ledger = MemoryLedger::new();
    publish(&ledger, &[("USD", 1, 2, NOW - 10), ("ASD", 3, 4, NOW - 20)]);
    let tx = Transaction::with_id("reader", NOW);

    let prices = QuoteContract::default()
        .get_all_current_prices(&tx.context(&ledger), r#"["USD","ASD"]"#)
        .expect("batch");

    let symbols: Vec<&str> = prices.iter().map(|point| point.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["USD", "ASD"]);
    assert_eq!(prices[1].sell, 4);
}

#[test]
fn when_one_symbol_has_no_price_the_whole_batch_fails() {
    let ledger = MemoryLedger::new();
    publish(&ledger, &[("USD", 1, 2, NOW - 10)]);
    let tx = Transaction::with_id("reader", NOW);

    let err = QuoteContract::default()
        .get_all_current_prices(&tx.context(&ledger), r#"["USD","ASD"]"#)
        .expect_err("ASD missing");

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.to_string().contains("ASD"));
}

#[test]
fn when_the_symbol_list_is_not_json_the_batch_is_a_decode_error() {
    let ledger = MemoryLedger::new();
    let tx = Transaction::with_id("reader", NOW);
    let ctx = tx.context(&ledger);
    let contract = QuoteContract::default();

    for payload in ["", "USD,ASD", r#"{"USD":1}"#] {
        let err = contract
            .get_all_current_prices(&ctx, payload)
            .expect_err("not a list");
        assert_eq!(err.kind(), ErrorKind::DecodeError, "payload {payload:?}");
    }
}

// =============================================================================
// Scan hygiene
// =============================================================================

#[test]
fn every_read_releases_its_scan() {
    let ledger = MemoryLedger::new();
    publish(&ledger, &[("USD", 1, 1, NOW - 10)]);
    let tx = Transaction::with_id("reader", NOW);
    let ctx = tx.context(&ledger);
    let contract = QuoteContract::default();

    let _ = contract.get_currency_price(&ctx, "USD");
    let _ = contract.get_currency_price(&ctx, "EUR");
    let _ = contract.get_currency_price_from_history(&ctx, "USD");
    let _ = contract.get_all_current_prices(&ctx, r#"["USD","EUR"]"#);

    assert_eq!(ledger.open_scans(), 0);
}

#[test]
fn custom_window_widths_change_what_counts_as_current() {
    let ledger = MemoryLedger::new();
    publish(&ledger, &[("USD", 1, 1, NOW - 120)]);
    let tx = Transaction::with_id("reader", NOW);
    let ctx = tx.context(&ledger);

    let narrow = QuoteContract::new(WindowConfig::new(60, 60).expect("windows"));
    assert_eq!(
        narrow
            .get_currency_price(&ctx, "USD")
            .expect_err("outside window")
            .kind(),
        ErrorKind::NotFound
    );

    let wide = QuoteContract::new(WindowConfig::new(600, 600).expect("windows"));
    assert_eq!(wide.get_currency_price(&ctx, "USD").expect("inside").time, NOW - 120);
}
