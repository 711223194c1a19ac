use crate::error::Result;
use crate::services::highlighter::Highlighter;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use tracing::debug;

/// Converts buffered Markdown to HTML for the segmentation engine.
pub trait BlockRenderer {
    /// Render a chunk of block-level Markdown.
    fn render_block(&self, markdown: &str) -> Result<String>;

    /// Render heading text without any block wrapping.
    fn render_inline(&self, text: &str) -> Result<String>;
}

pub struct MarkdownRenderer<H: Highlighter> {
    highlighter: H,
    options: Options,
}

impl<H: Highlighter> MarkdownRenderer<H> {
    pub fn new(highlighter: H) -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_TASKLISTS);

        Self {
            highlighter,
            options,
        }
    }

    pub fn highlighter(&self) -> &H {
        &self.highlighter
    }

    fn highlight_block(&self, lang: &str, code: &str) -> Result<String> {
        debug!("Highlighting {} byte '{}' block", code.len(), lang);
        let highlighted = self.highlighter.highlight(code, lang)?;
        Ok(format!(
            "<pre class=\"code\" data-lang=\"{}\"><code>{}</code></pre>\n",
            escape_attribute(lang),
            highlighted
        ))
    }
}

impl<H: Highlighter> BlockRenderer for MarkdownRenderer<H> {
    fn render_block(&self, markdown: &str) -> Result<String> {
        let mut events: Vec<Event> = Vec::new();
        // (language, collected code) while inside a tagged fence
        let mut fenced: Option<(String, String)> = None;

        for event in Parser::new_ext(markdown, self.options) {
            if let Some((lang, code)) = fenced.as_mut() {
                match event {
                    Event::Text(text) => code.push_str(&text),
                    Event::End(TagEnd::CodeBlock) => {
                        let block = self.highlight_block(lang, code)?;
                        events.push(Event::Html(CowStr::from(block)));
                        fenced = None;
                    }
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                    let lang = info.split_whitespace().next().unwrap_or("").to_string();
                    if lang.is_empty() {
                        events.push(Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))));
                    } else {
                        fenced = Some((lang, String::new()));
                    }
                }
                event => events.push(event),
            }
        }

        let mut output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut output, events.into_iter());
        Ok(output)
    }

    fn render_inline(&self, text: &str) -> Result<String> {
        // Parsed as heading content so "1. Intro" or "> x" never become blocks
        let source = format!("# {}", text);
        let events = Parser::new_ext(&source, self.options).filter(|event| {
            !matches!(
                event,
                Event::Start(Tag::Heading { .. }) | Event::End(TagEnd::Heading(_))
            )
        });

        let mut output = String::with_capacity(text.len());
        html::push_html(&mut output, events);
        Ok(output.trim().to_string())
    }
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
