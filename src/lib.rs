//! Rusty Lens: filter, sort, chart and inspect the output of a dataset
//! cleaning run.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod session;
pub mod state;
pub mod translator;
pub mod ui;
pub mod view;
