//! CV matcher library: role keyword scoring and PDF report rendering

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{CvMatcherError, Result};
