//! Text processing and keyword matching

pub mod matcher;
pub mod text_processor;
