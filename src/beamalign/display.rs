use std::fmt::Display;

use super::{Alignment, StepKind};

impl Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StepKind::Match => "match",
            StepKind::Substitute => "substitute",
            StepKind::Insert => "insert",
            StepKind::Delete => "delete",
        };

        f.pad(name)
    }
}

impl<T> Display for Alignment<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "size={} source_len={} target_len={} cost={}",
            self.len(),
            self.source.len(),
            self.target.len(),
            self.cost
        )
    }
}

impl<T: Display> Alignment<'_, T> {
    /// Renders the alignment as a three-column table below the summary line,
    /// one step per row, with the absent side left blank for insertions and
    /// deletions.
    pub fn pretty(&self) -> String {
        let mut pretty = format!("{self}\n");

        for index in 0..self.len() {
            let kind = self.kind(index).to_string();
            let source = self
                .source_token(index)
                .map(ToString::to_string)
                .unwrap_or_default();
            let target = self
                .target_token(index)
                .map(ToString::to_string)
                .unwrap_or_default();

            pretty.push_str(&format!("{source:<30}{kind:^12}{target:>30}\n"));
        }

        pretty
    }
}
