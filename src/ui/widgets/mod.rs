//! UI widget components
//!
//! This module contains the keyboard panel the virtual keyboard mounts onto
//! and the popup widgets drawn over it.

pub mod keyboard;
pub mod popups;
