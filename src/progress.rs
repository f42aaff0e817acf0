//! Progress reporting
//!
//! The engine narrates rounds, fights, battles and seasons through a
//! [`ProgressSink`]. Sinks are informational only and never feed back into
//! engine state.

/// Receives human-readable progress text
pub trait ProgressSink {
    fn emit(&mut self, text: &str);
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn emit(&mut self, _text: &str) {}
}

/// Prints each line to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl ProgressSink for ConsoleSink {
    fn emit(&mut self, text: &str) {
        println!("{text}");
    }
}

/// Forwards progress to the `tracing` subscriber at INFO level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ProgressSink for TracingSink {
    fn emit(&mut self, text: &str) {
        for line in text.lines().filter(|line| !line.trim().is_empty()) {
            tracing::info!(target: "battle_pets::progress", "{}", line);
        }
    }
}

/// Keeps every emitted message in order
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub lines: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages containing `needle`
    pub fn matching<'a>(&'a self, needle: &'a str) -> impl Iterator<Item = &'a String> + 'a {
        self.lines.iter().filter(move |line| line.contains(needle))
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.matching(needle).next().is_some()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl ProgressSink for MemorySink {
    fn emit(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }
}
