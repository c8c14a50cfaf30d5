//! Command-line interface parsing and validation
//!
//! This module handles CLI argument parsing using clap and validates
//! user inputs for correctness.

use crate::constants::{MAX_REPEAT_INTERVAL_MS, MIN_REPEAT_INTERVAL_MS};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "vkeys")]
#[command(version = "0.0.1")]
#[command(about = "An on-screen keyboard for your terminal", long_about = None)]
pub struct Cli {
    /// Layout to start with (e.g. en, ru, jp)
    #[arg(short = 'L', long, value_name = "CODE")]
    pub layout: Option<String>,

    /// Key repeat interval in milliseconds (20-2000)
    #[arg(short = 'r', long, value_name = "MS")]
    pub repeat_ms: Option<u64>,

    /// Read configuration from this file instead of the default location
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<String>,

    /// Enable logging to specified file
    #[arg(short = 'l', long, value_name = "PATH")]
    pub log_file: Option<String>,
}

impl Cli {
    /// Validate CLI arguments
    /// Returns error if repeat_ms is out of bounds (20-2000)
    pub fn validate(&self) -> Result<(), String> {
        if let Some(ms) = self.repeat_ms {
            if ms < MIN_REPEAT_INTERVAL_MS {
                return Err(format!(
                    "Repeat interval too small (minimum {})",
                    MIN_REPEAT_INTERVAL_MS
                ));
            }
            if ms > MAX_REPEAT_INTERVAL_MS {
                return Err(format!(
                    "Repeat interval too large (maximum {})",
                    MAX_REPEAT_INTERVAL_MS
                ));
            }
        }
        if let Some(layout) = &self.layout
            && layout.trim().is_empty()
        {
            return Err("Layout code cannot be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let cli = Cli::parse_from(["vkeys", "-L", "ru", "--repeat-ms", "150"]);
        assert_eq!(cli.layout.as_deref(), Some("ru"));
        assert_eq!(cli.repeat_ms, Some(150));
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_repeat_bounds() {
        assert!(Cli::parse_from(["vkeys", "-r", "5"]).validate().is_err());
        assert!(Cli::parse_from(["vkeys", "-r", "5000"]).validate().is_err());
        assert!(Cli::parse_from(["vkeys", "-r", "20"]).validate().is_ok());
    }

    #[test]
    fn test_empty_layout_rejected() {
        assert!(Cli::parse_from(["vkeys", "--layout", " "]).validate().is_err());
    }
}
