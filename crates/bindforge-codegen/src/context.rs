use indexmap::IndexSet;

/// Tracks state during emission for one output file: indentation and
/// collected include/using lines.
#[derive(Debug, Clone)]
pub struct EmitContext {
    /// Current indentation level
    indent_level: usize,
    /// Characters per indent (e.g., 4 spaces)
    indent_width: usize,
    /// Whether to use tabs
    use_tabs: bool,
    /// Collected include/using lines (deduped, insertion-ordered)
    includes: IndexSet<String>,
}

/// Indentation style configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentStyle {
    Spaces(usize),
    Tabs,
}

impl EmitContext {
    pub fn new(style: IndentStyle) -> Self {
        let (use_tabs, indent_width) = match style {
            IndentStyle::Spaces(n) => (false, n),
            IndentStyle::Tabs => (true, 1),
        };
        Self {
            indent_level: 0,
            indent_width,
            use_tabs,
            includes: IndexSet::new(),
        }
    }

    /// Get the current indentation string.
    pub fn indent(&self) -> String {
        let unit = if self.use_tabs { "\t" } else { " " };
        unit.repeat(self.indent_level * self.indent_width)
    }

    pub fn push_indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn pop_indent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    /// Add a complete include/using line (deduped).
    pub fn add_include(&mut self, line: impl Into<String>) {
        self.includes.insert(line.into());
    }

    pub fn includes(&self) -> &IndexSet<String> {
        &self.includes
    }

    /// Drain and return all collected include lines.
    pub fn take_includes(&mut self) -> IndexSet<String> {
        std::mem::take(&mut self.includes)
    }
}
