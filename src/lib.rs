//! Marketplace dashboard for the terminal
//!
//! Fetches a few listings from a JSON endpoint, filters them as you type and
//! switches between the home, listings and profile sections. Navigation lives
//! in a collapsible menu (dropdown or sidebar) that closes on outside clicks.

pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod logging;
pub mod modules;
pub mod ui;
