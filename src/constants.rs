//! Application-wide constants

/// Minimum terminal width required to draw the widest layout row
pub const MIN_TERMINAL_WIDTH: u16 = 80;

/// Minimum terminal height required to run the application
pub const MIN_TERMINAL_HEIGHT: u16 = 24;

/// Interval between repeated key actions while a key is held, in milliseconds
pub const DEFAULT_REPEAT_INTERVAL_MS: u64 = 100;

/// Minimum allowed value for the repeat interval
pub const MIN_REPEAT_INTERVAL_MS: u64 = 20;

/// Maximum allowed value for the repeat interval
pub const MAX_REPEAT_INTERVAL_MS: u64 = 2000;

/// Height of a single rendered key, borders included
pub const KEY_HEIGHT: u16 = 3;

/// Height of the input field panel, borders included
pub const INPUT_FIELD_HEIGHT: u16 = 6;

/// Frame duration in milliseconds for the UI render loop (targeting 60 FPS)
pub const FRAME_DURATION_MS: u64 = 16;

/// Name used for the config directory and the log filter
pub const APP_NAME: &str = "vkeys";
