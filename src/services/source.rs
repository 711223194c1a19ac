use crate::error::{BookError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

const BOOK_EXTENSION: &str = "md";
const PARTIAL_PREFIX: char = '_';

pub struct BookSource;

impl BookSource {
    pub fn path_for(books_dir: &Path, name: &str) -> PathBuf {
        books_dir.join(format!("{}.{}", name, BOOK_EXTENSION))
    }

    /// Read a book and strip its HTML comments.
    pub async fn load(books_dir: &Path, name: &str) -> Result<String> {
        let path = Self::path_for(books_dir, name);
        info!("Reading book: {}", path.display());

        if !path.is_file() {
            return Err(BookError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = fs::read_to_string(&path).await?;
        Ok(Self::strip_comments(&content))
    }

    /// Read an optional partial such as `_header.md`.
    pub async fn load_partial(books_dir: &Path, name: &str) -> Result<Option<String>> {
        let path = books_dir.join(format!("{}{}.{}", PARTIAL_PREFIX, name, BOOK_EXTENSION));
        if !path.is_file() {
            debug!("No partial at {}", path.display());
            return Ok(None);
        }

        let content = fs::read_to_string(&path).await?;
        Ok(Some(Self::strip_comments(&content)))
    }

    pub fn strip_comments(content: &str) -> String {
        let comment_pattern = Regex::new(r"(?s)<!--.*?-->").unwrap();
        comment_pattern.replace_all(content, "").into_owned()
    }

    /// Names of every book directly inside `books_dir`, sorted.
    pub fn discover(books_dir: &Path) -> Result<Vec<String>> {
        if !books_dir.is_dir() {
            return Err(BookError::FileNotFound {
                path: books_dir.display().to_string(),
            });
        }

        let mut books = Vec::new();
        for entry in WalkDir::new(books_dir).min_depth(1).max_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry in {}: {}", books_dir.display(), e);
                    continue;
                }
            };

            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(BOOK_EXTENSION)
            {
                continue;
            }

            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if !stem.starts_with(PARTIAL_PREFIX) {
                    books.push(stem.to_string());
                }
            }
        }

        books.sort();
        debug!("Discovered {} books in {}", books.len(), books_dir.display());
        Ok(books)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("bookpage-source-test").join(name);
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_path_for() {
        assert_eq!(
            BookSource::path_for(Path::new("docs/books"), "guide"),
            PathBuf::from("docs/books/guide.md")
        );
    }

    #[test]
    fn test_strip_comments() {
        let stripped = BookSource::strip_comments("a<!-- one -->b\n<!--\n## hidden\n-->c");
        assert_eq!(stripped, "ab\nc");
    }

    #[test]
    fn test_discover_skips_partials_and_other_files() {
        let dir = scratch_dir("discover");
        for file in ["zeta.md", "alpha.md", "_header.md", "notes.txt"] {
            std::fs::write(dir.join(file), "# x\n").unwrap();
        }
        std::fs::create_dir_all(dir.join("nested")).unwrap();
        std::fs::write(dir.join("nested/deep.md"), "# x\n").unwrap();

        assert_eq!(BookSource::discover(&dir).unwrap(), vec!["alpha", "zeta"]);
    }

    #[tokio::test]
    async fn test_load_missing_book() {
        let dir = scratch_dir("missing");
        let err = BookSource::load(&dir, "ghost").await.unwrap_err();
        assert!(matches!(err, BookError::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn test_load_and_partials() {
        let dir = scratch_dir("load");
        std::fs::write(dir.join("book.md"), "# Book<!-- draft -->\n").unwrap();
        std::fs::write(dir.join("_footer.md"), "Footer\n").unwrap();

        assert_eq!(BookSource::load(&dir, "book").await.unwrap(), "# Book\n");
        assert_eq!(
            BookSource::load_partial(&dir, "footer").await.unwrap().as_deref(),
            Some("Footer\n")
        );
        assert_eq!(BookSource::load_partial(&dir, "header").await.unwrap(), None);
    }
}
