use crate::error::{BookError, Result};
use syntect::highlighting::ThemeSet;
use syntect::html::{css_for_theme_with_class_style, ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;
use tracing::debug;

/// Class prefix shared by highlighted markup and the theme stylesheet.
const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "hl-" };

/// Turns code plus a language tag into highlighted HTML.
pub trait Highlighter {
    fn highlight(&self, code: &str, lang: &str) -> Result<String>;
}

pub struct SyntectHighlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl SyntectHighlighter {
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    fn find_syntax(&self, lang: &str) -> &SyntaxReference {
        // Extension tokens are lowercase; names already match case-insensitively
        let lang = lang.to_lowercase();
        self.syntax_set
            .find_syntax_by_token(&lang)
            .unwrap_or_else(|| {
                debug!("No grammar for '{}', using plain text", lang);
                self.syntax_set.find_syntax_plain_text()
            })
    }

    /// Stylesheet for the classes emitted by [`Highlighter::highlight`].
    pub fn theme_css(&self, theme_name: &str) -> Result<String> {
        let theme = self
            .theme_set
            .themes
            .get(theme_name)
            .ok_or_else(|| BookError::ResourceNotFound {
                path: format!("highlight theme '{}'", theme_name),
            })?;

        css_for_theme_with_class_style(theme, CLASS_STYLE).map_err(|e| BookError::Theme {
            theme: theme_name.to_string(),
            reason: e.to_string(),
        })
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, code: &str, lang: &str) -> Result<String> {
        let syntax = self.find_syntax(lang);
        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, CLASS_STYLE);

        for line in LinesWithEndings::from(code) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .map_err(|e| BookError::Highlight {
                    lang: lang.to_string(),
                    reason: e.to_string(),
                })?;
        }

        Ok(generator.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_language_gets_classes() {
        let highlighter = SyntectHighlighter::new();
        let html = highlighter.highlight("fn main() {}\n", "rust").unwrap();
        assert!(html.contains("hl-"));
        assert!(html.contains("main"));
    }

    #[test]
    fn test_language_tag_is_case_insensitive() {
        let highlighter = SyntectHighlighter::new();
        let lower = highlighter.highlight("let x = 1;\n", "rust").unwrap();
        let upper = highlighter.highlight("let x = 1;\n", "RUST").unwrap();
        assert_eq!(lower, upper);

        // by grammar name rather than extension
        let named = highlighter.highlight("let x = 1;\n", "Rust").unwrap();
        assert_eq!(lower, named);
        let python = highlighter.highlight("x = 1\n", "PYTHON").unwrap();
        assert!(python.contains("hl-source hl-python"));
    }

    #[test]
    fn test_unknown_language_is_escaped_text() {
        let highlighter = SyntectHighlighter::new();
        let html = highlighter.highlight("a < b\n", "no-such-lang").unwrap();
        assert!(html.contains("a &lt; b"));
    }

    #[test]
    fn test_theme_css() {
        let highlighter = SyntectHighlighter::new();
        let css = highlighter.theme_css("InspiredGitHub").unwrap();
        assert!(css.contains(".hl-"));

        let missing = highlighter.theme_css("Nope");
        assert!(matches!(missing, Err(BookError::ResourceNotFound { .. })));
    }
}
