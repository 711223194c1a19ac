use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A titled structural marker at a given nesting depth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub depth: usize,
    pub text: String,
    pub rendered_text: String,
    pub slug: String,
    /// Slug of the enclosing `##` heading. Unset for the book title.
    pub section_slug: Option<String>,
    pub numbering: String,
}

impl Heading {
    pub fn is_title(&self) -> bool {
        self.depth == 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SectionItem {
    Heading(Heading),
    Content(ContentBlock),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub slug: String,
    pub items: Vec<SectionItem>,
}

impl Section {
    pub fn headings(&self) -> impl Iterator<Item = &Heading> {
        self.items.iter().filter_map(|item| match item {
            SectionItem::Heading(heading) => Some(heading),
            SectionItem::Content(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentModel {
    pub main_title: Heading,
    pub summary: Vec<Heading>,
    pub sections: Vec<Section>,
}

/// Already-rendered HTML fragments placed around the book body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageFragments {
    pub header_html: String,
    pub footer_html: String,
}

#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub books_dir: PathBuf,
    pub output_dir: PathBuf,
    pub template: Option<PathBuf>,
    pub stylesheet: Option<PathBuf>,
    pub theme: String,
    pub release: bool,
    pub open: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            books_dir: PathBuf::from("docs/books"),
            output_dir: PathBuf::from("./build"),
            template: None,
            stylesheet: None,
            theme: "InspiredGitHub".to_string(),
            release: false,
            open: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BuildResult {
    pub book: String,
    pub output_file: PathBuf,
    pub sections: usize,
    pub headings: usize,
    pub bytes_written: usize,
}
