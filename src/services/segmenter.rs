use crate::error::{BookError, Result};
use crate::services::classifier::{LineClassifier, LineKind};
use crate::services::numbering::NumberingCounters;
use crate::services::renderer::BlockRenderer;
use crate::services::slug::slugify;
use crate::types::{ContentBlock, DocumentModel, Heading, Section, SectionItem};
use tracing::{debug, info};

/// Folds a book's lines into a [`DocumentModel`].
///
/// Feed every line with [`feed_line`](Self::feed_line), then call
/// [`finish`](Self::finish) to flush the trailing content and section.
pub struct BookSegmenter<'r> {
    renderer: &'r dyn BlockRenderer,
    classifier: LineClassifier,
    counters: NumberingCounters,
    line_number: usize,
    in_code_block: bool,
    content_buffer: Vec<String>,
    current_items: Vec<SectionItem>,
    sections: Vec<Section>,
    summary: Vec<Heading>,
    /// Slug of the open section; `None` until the first `##` heading.
    section_slug: Option<String>,
    main_title: Option<Heading>,
}

impl<'r> BookSegmenter<'r> {
    pub fn new(renderer: &'r dyn BlockRenderer) -> Self {
        Self {
            renderer,
            classifier: LineClassifier::new(),
            counters: NumberingCounters::new(),
            line_number: 0,
            in_code_block: false,
            content_buffer: Vec::new(),
            current_items: Vec::new(),
            sections: Vec::new(),
            summary: Vec::new(),
            section_slug: None,
            main_title: None,
        }
    }

    /// Segment a whole book in one call.
    pub fn segment(renderer: &'r dyn BlockRenderer, source: &str) -> Result<DocumentModel> {
        let mut segmenter = Self::new(renderer);
        for line in source.lines() {
            segmenter.feed_line(line)?;
        }
        segmenter.finish()
    }

    pub fn feed_line(&mut self, line: &str) -> Result<()> {
        self.line_number += 1;

        match self.classifier.classify(line, self.in_code_block) {
            LineKind::Heading { depth, text } => self.push_heading(depth, text),
            LineKind::Fence { opens } => {
                self.in_code_block = opens;
                self.push_content(line)
            }
            LineKind::Content(content) => self.push_content(content),
        }
    }

    pub fn finish(mut self) -> Result<DocumentModel> {
        let main_title = self.main_title.take().ok_or(BookError::MissingTitle {
            line: self.line_number.max(1),
        })?;

        self.flush_content()?;
        self.close_section();

        info!(
            "Segmented '{}': {} sections, {} headings",
            main_title.text,
            self.sections.len(),
            self.summary.len()
        );

        Ok(DocumentModel {
            main_title,
            summary: self.summary,
            sections: self.sections,
        })
    }

    fn push_heading(&mut self, depth: usize, text: &str) -> Result<()> {
        if self.summary.is_empty() && depth != 1 {
            return Err(BookError::MissingTitle {
                line: self.line_number,
            });
        }
        if !self.summary.is_empty() && depth == 1 {
            return Err(BookError::DuplicateTitle {
                title: text.to_string(),
                line: self.line_number,
            });
        }
        if depth > 2 && self.section_slug.is_none() {
            return Err(BookError::ContentOutsideSection {
                line: self.line_number,
            });
        }

        if depth >= 2 {
            self.flush_content()?;
        }

        let slug = slugify(text);
        if depth == 2 {
            self.close_section();
            self.section_slug = Some(slug.clone());
        }

        let heading = Heading {
            depth,
            text: text.to_string(),
            rendered_text: self.renderer.render_inline(text)?,
            slug,
            section_slug: if depth == 1 { None } else { self.section_slug.clone() },
            numbering: self.counters.advance(depth),
        };
        debug!("{} {} (line {})", heading.numbering, heading.text, self.line_number);

        self.summary.push(heading.clone());
        if depth == 1 {
            self.main_title = Some(heading);
        } else {
            self.current_items.push(SectionItem::Heading(heading));
        }

        Ok(())
    }

    fn push_content(&mut self, line: &str) -> Result<()> {
        if self.section_slug.is_none() {
            if line.trim().is_empty() {
                return Ok(());
            }
            return Err(BookError::ContentOutsideSection {
                line: self.line_number,
            });
        }

        self.content_buffer.push(line.to_string());
        Ok(())
    }

    fn flush_content(&mut self) -> Result<()> {
        if self.content_buffer.is_empty() {
            return Ok(());
        }

        let mut markdown = self.content_buffer.join("\n");
        markdown.push('\n');
        self.content_buffer.clear();

        let html = self.renderer.render_block(&markdown)?;
        if !html.trim().is_empty() {
            self.current_items.push(SectionItem::Content(ContentBlock { html }));
        }
        Ok(())
    }

    /// Move the open section, if any, into the finished list.
    fn close_section(&mut self) {
        if let Some(slug) = self.section_slug.take() {
            let items = std::mem::take(&mut self.current_items);
            debug!("Closed section '{}' with {} items", slug, items.len());
            self.sections.push(Section { slug, items });
        }
    }
}
