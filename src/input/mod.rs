//! Input processing module
//! Loads profiles, candidate text and photos for the core.

pub mod file_detector;
pub mod manager;
pub mod text_extractor;
