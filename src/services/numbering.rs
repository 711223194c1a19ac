use super::classifier::MAX_HEADING_DEPTH;

/// Label given to the book title.
pub const ROOT_LABEL: &str = "0.";

/// Hierarchical heading numbers ("2.1.") indexed by depth.
#[derive(Debug, Clone, Default)]
pub struct NumberingCounters {
    counters: [usize; MAX_HEADING_DEPTH + 1],
}

impl NumberingCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a heading of `depth` and return its label.
    ///
    /// Depth 1 always yields [`ROOT_LABEL`] and leaves the counters untouched.
    /// Callers must not pass a depth of 0 or one beyond [`MAX_HEADING_DEPTH`].
    pub fn advance(&mut self, depth: usize) -> String {
        debug_assert!((1..=MAX_HEADING_DEPTH).contains(&depth));
        if depth <= 1 {
            return ROOT_LABEL.to_string();
        }

        self.counters[depth] += 1;
        for counter in self.counters.iter_mut().skip(depth + 1) {
            *counter = 0;
        }

        let mut label = String::new();
        for counter in self.counters[..=depth].iter().filter(|c| **c != 0) {
            label.push_str(&counter.to_string());
            label.push('.');
        }
        label
    }
}
