use crate::error::{BookError, Result};
use crate::types::{DocumentModel, Heading, PageFragments, Section};
use handlebars::Handlebars;
use regex::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

const TEMPLATE_NAME: &str = "book";
const DEFAULT_TEMPLATE: &str = include_str!("../../templates/book.html.hbs");
const DEFAULT_STYLESHEET: &str = include_str!("../../templates/book.css");

#[derive(Serialize)]
struct PageContext<'a> {
    title: &'a Heading,
    toc: Vec<&'a Heading>,
    sections: &'a [Section],
    header_html: &'a str,
    footer_html: &'a str,
    css: &'a str,
    generator: String,
    built_at: String,
}

/// Binds a [`DocumentModel`] into the page template and writes the result.
pub struct Publisher {
    registry: Handlebars<'static>,
    css: String,
}

impl Publisher {
    /// Load the page template and assemble the page stylesheet.
    ///
    /// `template` and `stylesheet` override or extend the built-in assets;
    /// `theme_css` is the stylesheet for highlighted code.
    pub async fn new(
        template: Option<&Path>,
        stylesheet: Option<&Path>,
        theme_css: &str,
    ) -> Result<Self> {
        let template_source = match template {
            Some(path) => {
                if !path.is_file() {
                    return Err(BookError::TemplateNotFound {
                        path: path.display().to_string(),
                    });
                }
                info!("Using template: {}", path.display());
                fs::read_to_string(path).await?
            }
            None => DEFAULT_TEMPLATE.to_string(),
        };

        let mut css = String::from(DEFAULT_STYLESHEET);
        css.push('\n');
        css.push_str(theme_css);

        if let Some(path) = stylesheet {
            if !path.is_file() {
                return Err(BookError::ResourceNotFound {
                    path: path.display().to_string(),
                });
            }
            debug!("Appending stylesheet: {}", path.display());
            css.push('\n');
            css.push_str(&fs::read_to_string(path).await?);
        }

        let mut registry = Handlebars::new();
        registry
            .register_template_string(TEMPLATE_NAME, template_source)
            .map_err(|e| BookError::Template {
                reason: e.to_string(),
            })?;

        Ok(Self { registry, css })
    }

    pub fn render_page(&self, model: &DocumentModel, fragments: &PageFragments) -> Result<String> {
        let context = PageContext {
            title: &model.main_title,
            toc: model.summary.iter().filter(|h| !h.is_title()).collect(),
            sections: &model.sections,
            header_html: &fragments.header_html,
            footer_html: &fragments.footer_html,
            css: &self.css,
            generator: format!("bookpage {}", crate::VERSION),
            built_at: chrono::Utc::now().format("%Y-%m-%d %H:%M UTC").to_string(),
        };

        self.registry
            .render(TEMPLATE_NAME, &context)
            .map_err(|e| BookError::Template {
                reason: e.to_string(),
            })
    }

    /// Drop indentation and blank lines outside `<pre>` blocks.
    pub fn minify(html: &str) -> String {
        let pre_pattern = Regex::new(r"(?s)<pre\b.*?</pre>").unwrap();
        let mut output = String::with_capacity(html.len());
        let mut last = 0;

        for block in pre_pattern.find_iter(html) {
            Self::compact_into(&mut output, &html[last..block.start()]);
            output.push_str(block.as_str());
            last = block.end();
        }
        Self::compact_into(&mut output, &html[last..]);

        output
    }

    fn compact_into(output: &mut String, text: &str) {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim_start)
            .filter(|line| !line.is_empty())
            .collect();
        output.push_str(&lines.join("\n"));
    }

    pub fn output_path(output_dir: &Path, name: &str) -> PathBuf {
        output_dir.join(format!("{}.book.html", name))
    }

    pub async fn write(output_dir: &Path, name: &str, html: &str) -> Result<PathBuf> {
        if !output_dir.exists() {
            fs::create_dir_all(output_dir)
                .await
                .map_err(|e| BookError::Write {
                    path: output_dir.display().to_string(),
                    reason: format!("Failed to create output directory: {}", e),
                })?;
            info!("Created output directory: {}", output_dir.display());
        }

        let path = Self::output_path(output_dir, name);
        fs::write(&path, html).await.map_err(|e| BookError::Write {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Ok(path)
    }

    /// Launch the built page; failures only warn.
    pub fn open_in_browser(path: &Path) {
        match open::that(path) {
            Ok(()) => info!("Opened {}", path.display()),
            Err(e) => warn!("Could not open {}: {}", path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContentBlock, SectionItem};

    fn heading(depth: usize, text: &str, numbering: &str, section: Option<&str>) -> Heading {
        Heading {
            depth,
            text: text.to_string(),
            rendered_text: format!("<em>{}</em>", text),
            slug: text.to_lowercase(),
            section_slug: section.map(str::to_string),
            numbering: numbering.to_string(),
        }
    }

    fn sample_model() -> DocumentModel {
        let title = heading(1, "Guide", "0.", None);
        let intro = heading(2, "Intro", "1.", Some("intro"));
        let detail = heading(3, "Detail", "1.1.", Some("intro"));
        DocumentModel {
            main_title: title.clone(),
            summary: vec![title, intro.clone(), detail.clone()],
            sections: vec![Section {
                slug: "intro".to_string(),
                items: vec![
                    SectionItem::Heading(intro),
                    SectionItem::Content(ContentBlock {
                        html: "<p>Body &amp; soul</p>".to_string(),
                    }),
                    SectionItem::Heading(detail),
                ],
            }],
        }
    }

    #[tokio::test]
    async fn test_render_default_template() {
        let publisher = Publisher::new(None, None, ".hl-x { color: red; }").await.unwrap();
        let fragments = PageFragments {
            header_html: "<p>HEADER</p>".to_string(),
            footer_html: "<p>FOOTER</p>".to_string(),
        };
        let html = publisher.render_page(&sample_model(), &fragments).unwrap();

        assert!(html.contains("<title>Guide</title>"));
        assert!(html.contains("<h1 id=\"guide\"><em>Guide</em></h1>"));
        assert!(html.contains("<a href=\"#intro\"><span class=\"numbering\">1.</span> <em>Intro</em></a>"));
        assert!(html.contains("<h3 id=\"detail\" data-section=\"intro\"><span class=\"numbering\">1.1.</span>"));
        assert!(html.contains("<p>Body &amp; soul</p>"));
        assert!(html.contains("<section id=\"section-intro\">"));
        assert!(html.contains(".hl-x { color: red; }"));
        assert!(html.contains("HEADER") && html.contains("FOOTER"));
        // title is not repeated in the table of contents
        assert!(!html.contains("href=\"#guide\""));
    }

    #[tokio::test]
    async fn test_missing_template_and_stylesheet() {
        let missing = Path::new("/nonexistent/bookpage/template.hbs");
        let err = Publisher::new(Some(missing), None, "").await.err().unwrap();
        assert!(matches!(err, BookError::TemplateNotFound { .. }));

        let err = Publisher::new(None, Some(missing), "").await.err().unwrap();
        assert!(matches!(err, BookError::ResourceNotFound { .. }));
    }

    #[tokio::test]
    async fn test_broken_template_is_template_error() {
        let dir = std::env::temp_dir().join("bookpage-publisher-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.hbs");
        std::fs::write(&path, "{{#each sections}}{{/if}}").unwrap();

        let err = Publisher::new(Some(&path), None, "").await.err().unwrap();
        assert!(matches!(err, BookError::Template { .. }));
    }

    #[test]
    fn test_minify_preserves_pre() {
        let html = "<div>\n    <p>a</p>\n\n    <pre class=\"code\"><code>  x\n\n    y\n</code></pre>\n  </div>\n";
        assert_eq!(
            Publisher::minify(html),
            "<div>\n<p>a</p><pre class=\"code\"><code>  x\n\n    y\n</code></pre></div>"
        );
    }

    #[test]
    fn test_output_path() {
        assert_eq!(
            Publisher::output_path(Path::new("out"), "guide"),
            PathBuf::from("out/guide.book.html")
        );
    }
}
