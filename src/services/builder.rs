use crate::error::Result;
use crate::services::highlighter::SyntectHighlighter;
use crate::services::publisher::Publisher;
use crate::services::renderer::{BlockRenderer, MarkdownRenderer};
use crate::services::segmenter::BookSegmenter;
use crate::services::source::BookSource;
use crate::types::{BuildConfig, BuildResult, DocumentModel, PageFragments};
use tracing::info;

pub struct BookBuilder {
    config: BuildConfig,
    renderer: MarkdownRenderer<SyntectHighlighter>,
}

impl BookBuilder {
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            renderer: MarkdownRenderer::new(SyntectHighlighter::new()),
        }
    }

    /// Load and segment a book without publishing it.
    pub async fn outline(&self, name: &str) -> Result<DocumentModel> {
        let source = BookSource::load(&self.config.books_dir, name).await?;
        BookSegmenter::segment(&self.renderer, &source)
    }

    pub async fn build(&self, name: &str) -> Result<BuildResult> {
        let publisher = self.publisher().await?;
        let fragments = self.fragments().await?;
        self.build_with(&publisher, &fragments, name).await
    }

    /// Build every discovered book in order, stopping at the first failure.
    pub async fn build_all(&self) -> Result<Vec<BuildResult>> {
        let books = BookSource::discover(&self.config.books_dir)?;
        info!("Building {} books from {}", books.len(), self.config.books_dir.display());

        let publisher = self.publisher().await?;
        let fragments = self.fragments().await?;

        let mut results = Vec::with_capacity(books.len());
        for (idx, name) in books.iter().enumerate() {
            info!("Processing book {}/{}: {}", idx + 1, books.len(), name);
            results.push(self.build_with(&publisher, &fragments, name).await?);
        }

        Ok(results)
    }

    async fn build_with(
        &self,
        publisher: &Publisher,
        fragments: &PageFragments,
        name: &str,
    ) -> Result<BuildResult> {
        let model = self.outline(name).await?;

        let mut html = publisher.render_page(&model, fragments)?;
        if self.config.release {
            html = Publisher::minify(&html);
        }

        let output_file = Publisher::write(&self.config.output_dir, name, &html).await?;
        info!("Wrote {} ({} bytes)", output_file.display(), html.len());

        if self.config.open {
            Publisher::open_in_browser(&output_file);
        }

        Ok(BuildResult {
            book: name.to_string(),
            output_file,
            sections: model.sections.len(),
            headings: model.summary.len(),
            bytes_written: html.len(),
        })
    }

    async fn publisher(&self) -> Result<Publisher> {
        let theme_css = self.renderer.highlighter().theme_css(&self.config.theme)?;
        Publisher::new(
            self.config.template.as_deref(),
            self.config.stylesheet.as_deref(),
            &theme_css,
        )
        .await
    }

    async fn fragments(&self) -> Result<PageFragments> {
        let mut fragments = PageFragments::default();

        if let Some(header) = BookSource::load_partial(&self.config.books_dir, "header").await? {
            fragments.header_html = self.renderer.render_block(&header)?;
        }
        if let Some(footer) = BookSource::load_partial(&self.config.books_dir, "footer").await? {
            fragments.footer_html = self.renderer.render_block(&footer)?;
        }

        Ok(fragments)
    }
}
