use crossterm::style::Stylize;

/// Column width each inline `label: value` pair is padded to.
pub const ROW_PAD: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Heading,
    Section,
    Technical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLayout {
    /// All rows on one line, each left-aligned in a fixed-width column.
    Inline { pad: usize },
    /// One row per line.
    Lines,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzeRow {
    pub label: String,
    pub value: f64,
}

impl AnalyzeRow {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// One unit of analysis output: a caption followed by labelled values.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzeBlock {
    pub caption: String,
    pub tone: Tone,
    pub rows: Vec<AnalyzeRow>,
    pub layout: RowLayout,
    pub trailing_blank: bool,
}

impl AnalyzeBlock {
    /// A caption-only block, e.g. the per-stock header.
    pub fn heading(caption: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            tone: Tone::Heading,
            rows: Vec::new(),
            layout: RowLayout::Lines,
            trailing_blank: false,
        }
    }

    pub fn section(caption: impl Into<String>, rows: Vec<AnalyzeRow>) -> Self {
        Self {
            caption: caption.into(),
            tone: Tone::Section,
            rows,
            layout: RowLayout::Inline { pad: ROW_PAD },
            trailing_blank: false,
        }
    }

    pub fn technical(caption: impl Into<String>, rows: Vec<AnalyzeRow>) -> Self {
        Self {
            caption: caption.into(),
            tone: Tone::Technical,
            rows,
            layout: RowLayout::Lines,
            trailing_blank: true,
        }
    }

    pub fn with_trailing_blank(mut self) -> Self {
        self.trailing_blank = true;
        self
    }

    pub fn value(&self, label: &str) -> Option<f64> {
        self.rows.iter().find(|r| r.label == label).map(|r| r.value)
    }

    /// Renders the block as text. `styled` adds terminal colours to the caption.
    pub fn render(&self, styled: bool) -> String {
        let mut out = if styled {
            self.styled_caption()
        } else {
            self.caption.clone()
        };

        if !self.rows.is_empty() {
            out.push('\n');
            match self.layout {
                RowLayout::Inline { pad } => {
                    for row in &self.rows {
                        let pair = format!("{}: {}", row.label, row.value);
                        out.push_str(&format!("{pair:<pad$}"));
                    }
                }
                RowLayout::Lines => {
                    let lines: Vec<String> = self
                        .rows
                        .iter()
                        .map(|r| format!("{}: {}", r.label, r.value))
                        .collect();
                    out.push_str(&lines.join("\n"));
                }
            }
        }

        if self.trailing_blank {
            out.push('\n');
        }
        out
    }

    fn styled_caption(&self) -> String {
        let caption = self.caption.as_str();
        match self.tone {
            Tone::Heading => caption.magenta().bold().to_string(),
            Tone::Section => caption.yellow().to_string(),
            Tone::Technical => caption.cyan().to_string(),
        }
    }
}
