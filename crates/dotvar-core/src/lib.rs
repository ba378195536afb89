//! Core logic for the dotvar bot: Gmail dot-variation generation plus the
//! pure reply contract (text, CSV, Drive links) a transport delivers.
//!
//! This crate does no networking and writes no files. A messenger adapter
//! feeds incoming text into [`dispatch::Dispatcher`] and sends whatever
//! [`domain::Outgoing`] values come back.

pub mod config;
pub mod dispatch;
pub mod domain;
pub mod drive;
pub mod errors;
pub mod formatting;
pub mod logging;
pub mod variations;

pub use errors::{Error, Result};
pub use variations::{generate_variations, VariationGenerator, VariationOptions};
