use crate::ValidationError;

/// Width of the window scanned for the latest quotation.
pub const DEFAULT_LATEST_WINDOW_SECS: u32 = 3_000;

/// Width of the window returned as price history.
pub const DEFAULT_HISTORY_WINDOW_SECS: u32 = 3_600;

/// Scan windows used by the price ledger, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowConfig {
    pub latest_window_secs: u32,
    pub history_window_secs: u32,
}

impl WindowConfig {
    pub fn new(latest_window_secs: u32, history_window_secs: u32) -> Result<Self, ValidationError> {
        let config = Self {
            latest_window_secs,
            history_window_secs,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(self) -> Result<(), ValidationError> {
        if self.latest_window_secs == 0 {
            return Err(ValidationError::ZeroWindow {
                name: "latest window",
            });
        }
        if self.history_window_secs == 0 {
            return Err(ValidationError::ZeroWindow {
                name: "history window",
            });
        }
        Ok(())
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            latest_window_secs: DEFAULT_LATEST_WINDOW_SECS,
            history_window_secs: DEFAULT_HISTORY_WINDOW_SECS,
        }
    }
}
