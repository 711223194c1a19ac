pub mod builder;
pub mod classifier;
pub mod highlighter;
pub mod numbering;
pub mod publisher;
pub mod renderer;
pub mod segmenter;
pub mod slug;
pub mod source;

pub use builder::BookBuilder;
pub use classifier::{LineClassifier, LineKind};
pub use highlighter::{Highlighter, SyntectHighlighter};
pub use numbering::NumberingCounters;
pub use publisher::Publisher;
pub use renderer::{BlockRenderer, MarkdownRenderer};
pub use segmenter::BookSegmenter;
pub use slug::slugify;
pub use source::BookSource;
