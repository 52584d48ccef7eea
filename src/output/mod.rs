//! Output module: console/JSON/Markdown match reports and the PDF renderer

pub mod formatter;
pub mod layout;
pub mod photo;
pub mod renderer;
pub mod report;
pub mod style;
