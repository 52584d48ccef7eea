//! File type detection

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FileType {
    Pdf,
    Text,
    Markdown,
    Csv,
    Toml,
    Json,
    Image,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "txt" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            "csv" => FileType::Csv,
            "toml" => FileType::Toml,
            "json" => FileType::Json,
            "png" | "jpg" | "jpeg" | "bmp" | "gif" => FileType::Image,
            _ => FileType::Unknown,
        }
    }

    /// Formats a resume body can be read from.
    pub fn is_document(&self) -> bool {
        matches!(self, FileType::Pdf | FileType::Text | FileType::Markdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(FileType::from_extension("PDF"), FileType::Pdf);
        assert_eq!(FileType::from_extension("markdown"), FileType::Markdown);
        assert_eq!(FileType::from_extension("JPeG"), FileType::Image);
        assert_eq!(FileType::from_extension("xyz"), FileType::Unknown);
        assert!(FileType::Text.is_document());
        assert!(!FileType::Csv.is_document());
    }
}
