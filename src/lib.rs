//! XML Diff Studio library
//!
//! The positional line differ lives in [`differ`]; everything else is the
//! desktop front end around it.

pub mod app;
pub mod config;
pub mod constant;
pub mod differ;
pub mod file;
pub mod loader;
pub mod locale;
pub mod messages;
pub mod report;
pub mod state;
pub mod style;
pub mod ui;
