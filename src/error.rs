use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document has no title: line {line} has a heading or content before the '# ' title")]
    MissingTitle { line: usize },

    #[error("Duplicate title '{title}' at line {line}: a book has exactly one '# ' heading")]
    DuplicateTitle { title: String, line: usize },

    #[error("Content outside a section at line {line}: text after the title must follow a '## ' heading")]
    ContentOutsideSection { line: usize },

    #[error("Book not found: {path}")]
    FileNotFound { path: String },

    #[error("Template not found: {path}")]
    TemplateNotFound { path: String },

    #[error("Resource not found: {path}")]
    ResourceNotFound { path: String },

    #[error("Markdown rendering failed: {reason}")]
    Markdown { reason: String },

    #[error("Highlighting failed for language '{lang}': {reason}")]
    Highlight { lang: String, reason: String },

    #[error("Highlight theme '{theme}' could not be turned into CSS: {reason}")]
    Theme { theme: String, reason: String },

    #[error("Template rendering failed: {reason}")]
    Template { reason: String },

    #[error("Failed to write {path}: {reason}")]
    Write { path: String, reason: String },

    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

impl BookError {
    /// Process exit code reported by the binary for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            BookError::MissingTitle { .. } => 2,
            BookError::DuplicateTitle { .. } => 3,
            BookError::ContentOutsideSection { .. } => 4,
            BookError::FileNotFound { .. } => 5,
            BookError::TemplateNotFound { .. } => 6,
            BookError::ResourceNotFound { .. } => 7,
            BookError::Markdown { .. } => 8,
            BookError::Highlight { .. } => 9,
            BookError::Template { .. } => 10,
            BookError::Write { .. } => 11,
            BookError::Io(_) => 12,
            BookError::Theme { .. } => 13,
            BookError::Anyhow(_) => 1,
        }
    }

    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            BookError::MissingTitle { .. }
                | BookError::DuplicateTitle { .. }
                | BookError::ContentOutsideSection { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, BookError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_exit_codes_are_distinct() {
        let errors = vec![
            BookError::MissingTitle { line: 1 },
            BookError::DuplicateTitle { title: "x".into(), line: 2 },
            BookError::ContentOutsideSection { line: 3 },
            BookError::FileNotFound { path: "a".into() },
            BookError::TemplateNotFound { path: "b".into() },
            BookError::ResourceNotFound { path: "c".into() },
            BookError::Markdown { reason: "d".into() },
            BookError::Highlight { lang: "e".into(), reason: "f".into() },
            BookError::Template { reason: "g".into() },
            BookError::Theme { theme: "t".into(), reason: "u".into() },
            BookError::Write { path: "h".into(), reason: "i".into() },
            BookError::Io(std::io::Error::new(std::io::ErrorKind::Other, "j")),
            BookError::Anyhow(anyhow::anyhow!("k")),
        ];

        let codes: HashSet<i32> = errors.iter().map(|e| e.exit_code()).collect();
        assert_eq!(codes.len(), errors.len());
        assert!(codes.iter().all(|c| *c > 0));
    }

    #[test]
    fn test_structural_classification() {
        assert!(BookError::MissingTitle { line: 1 }.is_structural());
        assert!(!BookError::FileNotFound { path: "x".into() }.is_structural());
        assert!(!BookError::Theme { theme: "x".into(), reason: "y".into() }.is_structural());
    }

    #[test]
    fn test_theme_error_names_the_theme() {
        let err = BookError::Theme {
            theme: "Solarized".into(),
            reason: "bad scope".into(),
        };
        let message = err.to_string();
        assert!(message.contains("theme 'Solarized'"));
        assert!(!message.contains("language"));
    }
}
