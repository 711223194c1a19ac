use regex::Regex;

const FENCE_MARKER: &str = "```";

/// Deepest ATX heading Markdown recognises.
pub const MAX_HEADING_DEPTH: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// A code fence marker. `opens` is the fence state after this line.
    Fence { opens: bool },
    Heading { depth: usize, text: &'a str },
    Content(&'a str),
}

pub struct LineClassifier {
    heading_pattern: Regex,
}

impl LineClassifier {
    pub fn new() -> Self {
        Self {
            heading_pattern: Regex::new(r"^(#+)[ \t]+(.*?)[ \t]*$").unwrap(),
        }
    }

    pub fn classify<'a>(&self, line: &'a str, in_code_block: bool) -> LineKind<'a> {
        if line.starts_with(FENCE_MARKER) {
            return LineKind::Fence {
                opens: !in_code_block,
            };
        }

        if in_code_block || !line.starts_with('#') {
            return LineKind::Content(line);
        }

        // Lines like "#hashtag", "#" or "####### x" fall through as content
        match self.heading_pattern.captures(line) {
            Some(captures) => {
                let depth = captures[1].len();
                let text = captures.get(2).map(|m| m.as_str()).unwrap_or("");
                if depth > MAX_HEADING_DEPTH || text.is_empty() {
                    LineKind::Content(line)
                } else {
                    LineKind::Heading { depth, text }
                }
            }
            None => LineKind::Content(line),
        }
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new()
    }
}
