use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{THINK_CLOSE, THINK_OPEN};

static THINK_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        "(?s){}.*?{}",
        regex::escape(THINK_OPEN),
        regex::escape(THINK_CLOSE)
    ))
    .expect("reasoning pattern is valid")
});

/// Remove every complete reasoning block from a full response and trim it
pub fn strip_reasoning(text: &str) -> String {
    THINK_BLOCK.replace_all(text, "").trim().to_string()
}

/// Streaming counterpart of [`strip_reasoning`]
///
/// Fed one fragment at a time; returns only the text outside reasoning blocks. A fragment ending
/// in the first bytes of a marker is held back until the next fragment decides it.
#[derive(Debug, Default)]
pub struct ReasoningFilter {
    in_reasoning: bool,
    pending: String,
    emitted: bool,
}

impl ReasoningFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_reasoning(&self) -> bool {
        self.in_reasoning
    }

    /// Feed a fragment, get back the part that should be displayed
    pub fn push(&mut self, fragment: &str) -> String {
        self.pending.push_str(fragment);
        let mut visible = String::new();

        loop {
            let marker = self.marker();
            if let Some(idx) = self.pending.find(marker) {
                if !self.in_reasoning {
                    visible.push_str(&self.pending[..idx]);
                }
                self.pending.drain(..idx + marker.len());
                self.in_reasoning = !self.in_reasoning;
                continue;
            }

            let keep = partial_marker_len(&self.pending, marker);
            let cut = self.pending.len() - keep;
            if !self.in_reasoning {
                visible.push_str(&self.pending[..cut]);
            }
            self.pending.drain(..cut);
            break;
        }

        self.emit(visible)
    }

    /// End of stream: release held-back text if it turned out not to be a marker
    pub fn finish(&mut self) -> String {
        let rest = std::mem::take(&mut self.pending);
        if self.in_reasoning {
            return String::new();
        }
        self.emit(rest)
    }

    fn marker(&self) -> &'static str {
        if self.in_reasoning {
            THINK_CLOSE
        } else {
            THINK_OPEN
        }
    }

    // Leading whitespace before the first visible character is dropped
    fn emit(&mut self, visible: String) -> String {
        if self.emitted {
            return visible;
        }
        let trimmed = visible.trim_start();
        if !trimmed.is_empty() {
            self.emitted = true;
        }
        trimmed.to_string()
    }
}

/// Length of the longest suffix of `text` that is a proper prefix of `marker`
fn partial_marker_len(text: &str, marker: &str) -> usize {
    (1..marker.len())
        .rev()
        .find(|&len| text.ends_with(&marker[..len]))
        .unwrap_or(0)
}
