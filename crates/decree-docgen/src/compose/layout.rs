//! Plain-text page layout for composed documents.
//!
//! The composer thinks in character columns and lines, not points: a page is
//! a fixed number of wrapped lines, pages are separated by form feeds, and
//! the rendered text is the document's bytes. Everything is deterministic;
//! the same inputs always produce the same pages.

/// Page geometry in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    /// Wrap budget per line.
    pub columns: usize,
    /// Body lines per page, margins already excluded.
    pub lines: usize,
}

impl Default for PageLayout {
    fn default() -> Self {
        // US letter at 10 cpi / 6 lpi with one-inch margins.
        Self {
            columns: 80,
            lines: 54,
        }
    }
}

/// Greedy word wrap: words pack onto a line until the next one would exceed
/// the budget. A single word longer than the budget is hard-split so no
/// emitted line ever exceeds it.
pub fn wrap(text: &str, budget: usize) -> Vec<String> {
    let budget = budget.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > budget {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(budget) {
                if chunk.len() == budget {
                    lines.push(chunk.iter().collect());
                } else {
                    current = chunk.iter().collect();
                    current_len = chunk.len();
                }
            }
            continue;
        }

        let needed = if current.is_empty() {
            word_len
        } else {
            current_len + 1 + word_len
        };
        if needed > budget && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Cursor-tracking page builder.
///
/// The bottom-margin check runs before every single line write, so a long
/// wrapped paragraph spills onto the next page mid-paragraph instead of
/// running off the bottom.
#[derive(Debug)]
pub struct DocumentBuilder {
    layout: PageLayout,
    pages: Vec<Vec<String>>,
    current: Vec<String>,
    article: usize,
}

impl DocumentBuilder {
    pub fn new(layout: PageLayout) -> Self {
        Self {
            layout,
            pages: Vec::new(),
            current: Vec::new(),
            article: 0,
        }
    }

    pub fn layout(&self) -> PageLayout {
        self.layout
    }

    /// Line index the next write lands on, within the current page.
    pub fn cursor(&self) -> usize {
        self.current.len()
    }

    /// Pages completed so far, counting the one in progress.
    pub fn page_count(&self) -> usize {
        self.pages.len() + if self.current.is_empty() { 0 } else { 1 }
    }

    /// Write one pre-wrapped line, breaking the page first if it is full.
    pub fn line(&mut self, text: &str) {
        if self.current.len() >= self.layout.lines {
            self.break_page();
        }
        self.current.push(text.trim_end().to_string());
    }

    /// Vertical gap. Swallowed at the top of a page and when the page is
    /// already full, so breaks never strand blank lines.
    pub fn blank(&mut self) {
        if self.current.is_empty() || self.current.len() >= self.layout.lines {
            return;
        }
        self.current.push(String::new());
    }

    pub fn centered(&mut self, text: &str) {
        let padding = self
            .layout
            .columns
            .saturating_sub(text.chars().count())
            / 2;
        let line = format!("{}{}", " ".repeat(padding), text);
        self.line(&line);
    }

    /// Wrap a paragraph of prose to the column budget and write it.
    pub fn wrapped(&mut self, text: &str) {
        for line in wrap(text, self.layout.columns) {
            self.line(&line);
        }
    }

    /// Auto-numbered article: `3. TITLE`, wrapped body, trailing gap.
    pub fn paragraph(&mut self, title: &str, body: &str) {
        self.article += 1;
        let heading = format!("{}. {}", self.article, title.to_uppercase());
        self.line(&heading);
        self.wrapped(body);
        self.blank();
    }

    /// Additional body under the current article, without a new number.
    pub fn continuation(&mut self, body: &str) {
        self.wrapped(body);
        self.blank();
    }

    pub fn break_page(&mut self) {
        if self.current.is_empty() {
            return;
        }
        self.pages.push(std::mem::take(&mut self.current));
    }

    /// Render all pages, form-feed separated, trailing newline.
    pub fn render(mut self) -> String {
        self.break_page();
        let mut text = self
            .pages
            .iter()
            .map(|page| page.join("\n"))
            .collect::<Vec<_>>()
            .join("\u{0c}\n");
        text.push('\n');
        text
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.render().into_bytes()
    }
}
