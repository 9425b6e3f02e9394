#![allow(clippy::uninlined_format_args)]

pub mod app;
pub mod config;
pub mod data;
pub mod dispatch;
pub mod hackernews;
pub mod launcher;
pub mod model;
#[cfg(test)]
mod test_support;
pub mod ui;
pub mod view;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use app::run;
