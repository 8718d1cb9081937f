//! Composite keys for the price time series.
//!
//! A quotation is stored under
//!
//! ```text
//! <symbol> '.' <20 decimal digits>
//! ```
//!
//! The digits are `time XOR i64::MIN` read as `u64` and zero padded, so the
//! byte order of keys for one symbol is the numeric order of their times for
//! every `i64`, negative times and far-future times included. The separator is
//! not a valid symbol character, so every key of a window scan shares the
//! `<symbol>.` prefix and a scan for `USD` never sees `USDX` entries.
//!
//! Currency records use the bare symbol as their key.

use thiserror::Error;

use crate::{Symbol, TimeWindow};

/// Separator between the symbol and the time component.
pub const SEPARATOR: char = '.';

/// Number of decimal digits in the time component.
pub const TIME_WIDTH: usize = 20;

const SIGN_BIT: u64 = 1 << 63;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("symbol cannot be empty")]
    EmptySymbol,

    #[error("symbol '{symbol}' contains the reserved separator '{separator}'")]
    ReservedSeparator { symbol: String, separator: char },

    #[error("malformed quotation key '{key}': {reason}")]
    Malformed { key: String, reason: &'static str },
}

/// Start (inclusive) and end (exclusive) keys of a window scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRange {
    pub start: String,
    pub end: String,
}

/// Key of the registry entry for `symbol`.
pub fn currency_key(symbol: &Symbol) -> &str {
    symbol.as_str()
}

/// Fixed-width time component of a quotation key.
pub fn encode_time(time: i64) -> String {
    let biased = (time as u64) ^ SIGN_BIT;
    format!("{biased:0width$}", width = TIME_WIDTH)
}

fn decode_time(digits: &str) -> Option<i64> {
    if digits.len() != TIME_WIDTH || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let biased: u64 = digits.parse().ok()?;
    Some((biased ^ SIGN_BIT) as i64)
}

fn check_symbol(symbol: &str) -> Result<(), KeyError> {
    if symbol.is_empty() {
        return Err(KeyError::EmptySymbol);
    }
    if symbol.contains(SEPARATOR) {
        return Err(KeyError::ReservedSeparator {
            symbol: symbol.to_owned(),
            separator: SEPARATOR,
        });
    }
    Ok(())
}

/// Storage key of the quotation for `symbol` observed at `time`.
pub fn encode_quotation_key(symbol: &str, time: i64) -> Result<String, KeyError> {
    check_symbol(symbol)?;
    let mut key = String::with_capacity(symbol.len() + 1 + TIME_WIDTH);
    key.push_str(symbol);
    key.push(SEPARATOR);
    key.push_str(&encode_time(time));
    Ok(key)
}

/// Split a quotation key back into its symbol and time.
pub fn decode_quotation_key(key: &str) -> Result<(&str, i64), KeyError> {
    let malformed = |reason: &'static str| KeyError::Malformed {
        key: key.to_owned(),
        reason,
    };

    let (symbol, digits) = key
        .rsplit_once(SEPARATOR)
        .ok_or_else(|| malformed("missing separator"))?;
    if symbol.is_empty() {
        return Err(malformed("empty symbol"));
    }
    if symbol.contains(SEPARATOR) {
        return Err(malformed("symbol contains the separator"));
    }
    let time = decode_time(digits).ok_or_else(|| malformed("time is not a fixed-width number"))?;
    Ok((symbol, time))
}

/// Scan bounds covering `[now - lookback, now)` for `symbol`.
pub fn window_bounds(symbol: &str, now: i64, lookback: u32) -> Result<KeyRange, KeyError> {
    range_for(symbol, TimeWindow::trailing(now, lookback))
}

/// Scan bounds covering `window` for `symbol`.
pub fn range_for(symbol: &str, window: TimeWindow) -> Result<KeyRange, KeyError> {
    Ok(KeyRange {
        start: encode_quotation_key(symbol, window.start)?,
        end: encode_quotation_key(symbol, window.end)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_component_is_fixed_width() {
        for time in [i64::MIN, -1, 0, 1, 999, 1_700_000_000, 99_999_999_999, i64::MAX] {
            assert_eq!(encode_time(time).len(), TIME_WIDTH, "time {time}");
        }
    }

    #[test]
    fn ordering_survives_digit_count_changes() {
        let before = encode_quotation_key("USD", 9_999_999_999).expect("key");
        let after = encode_quotation_key("USD", 10_000_000_000).expect("key");
        assert!(before < after);

        let negative = encode_quotation_key("USD", -5).expect("key");
        let zero = encode_quotation_key("USD", 0).expect("key");
        assert!(negative < zero);
    }

    #[test]
    fn keys_decode_to_their_inputs() {
        let key = encode_quotation_key("EUR", 1_700_000_123).expect("key");
        assert_eq!(decode_quotation_key(&key).expect("decode"), ("EUR", 1_700_000_123));
    }

    #[test]
    fn rejects_separator_in_symbol() {
        let err = encode_quotation_key("US.D", 1).expect_err("must fail");
        assert!(matches!(err, KeyError::ReservedSeparator { .. }));
        assert_eq!(encode_quotation_key("", 1), Err(KeyError::EmptySymbol));
    }

    #[test]
    fn rejects_keys_written_with_variable_width_times() {
        let err = decode_quotation_key("USD.1700000000").expect_err("must fail");
        assert!(matches!(err, KeyError::Malformed { .. }));
        assert!(decode_quotation_key("USD").is_err());
    }

    #[test]
    fn window_bounds_cover_the_lookback() {
        let range = window_bounds("USD", 10_000, 3_000).expect("bounds");
        assert_eq!(range.start, encode_quotation_key("USD", 7_000).expect("key"));
        assert_eq!(range.end, encode_quotation_key("USD", 10_000).expect("key"));
    }

    #[test]
    fn prefix_symbols_do_not_interleave() {
        let range = window_bounds("USD", 10_000, 3_000).expect("bounds");
        let other = encode_quotation_key("USDX", 8_000).expect("key");
        assert!(other >= range.end);
    }
}
