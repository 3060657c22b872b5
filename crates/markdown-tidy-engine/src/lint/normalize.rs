use std::sync::OnceLock;

use regex::Regex;

use super::classify::LineKind;

fn blank_run_regex() -> &'static Regex {
    static BLANK_RUN: OnceLock<Regex> = OnceLock::new();
    BLANK_RUN.get_or_init(|| Regex::new(r"\n{3,}").expect("Invalid blank run regex"))
}

/// Classification of the most recent non-blank line written to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meaningful {
    Heading,
    ListItem,
    Other,
}

/// Blank-line normalizer state machine.
///
/// Lines are pushed in document order with one line of lookahead. The output
/// buffer and the last meaningful classification are the whole state; blank
/// lines never update `last`.
///
/// Rules applied per line:
/// - **Heading**: blank line before (unless at start or already blank) and a blank
///   line after whenever the next input line has content.
/// - **List item**: directly after another list item, any blank lines in between
///   are dropped.
/// - **Blank**: collapsed so the buffer never ends in two blanks.
/// - **Other**: separated from a preceding list by one blank line.
#[derive(Debug, Default)]
pub struct Normalizer {
    out: Vec<String>,
    last: Option<Meaningful>,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies the transition for `line`. `next` is the following input line, if any.
    pub fn push(&mut self, line: &str, next: Option<&str>) {
        let line = line.trim_end();
        match LineKind::of(line) {
            LineKind::Heading => {
                if self.ends_with_content() {
                    self.push_blank();
                }
                self.out.push(line.to_string());
                self.last = Some(Meaningful::Heading);
                if next.is_some_and(|n| !LineKind::of(n).is_blank()) {
                    self.push_blank();
                }
            }
            LineKind::ListItem => {
                if self.last == Some(Meaningful::ListItem) {
                    while self.out.last().is_some_and(|l| l.is_empty()) {
                        self.out.pop();
                    }
                }
                self.out.push(line.to_string());
                self.last = Some(Meaningful::ListItem);
            }
            LineKind::Blank => {
                if self.out.is_empty() || self.ends_with_content() {
                    self.push_blank();
                }
            }
            LineKind::Other => {
                if self.last == Some(Meaningful::ListItem) && self.ends_with_content() {
                    self.push_blank();
                }
                self.out.push(line.to_string());
                self.last = Some(Meaningful::Other);
            }
        }
    }

    /// Lines emitted so far.
    pub fn lines(&self) -> &[String] {
        &self.out
    }

    pub fn last_meaningful(&self) -> Option<Meaningful> {
        self.last
    }

    /// Joins the buffer, caps blank runs at one line and trims the ends.
    pub fn finish(self) -> String {
        let joined = self.out.join("\n");
        blank_run_regex()
            .replace_all(&joined, "\n\n")
            .trim()
            .to_string()
    }

    fn ends_with_content(&self) -> bool {
        self.out.last().is_some_and(|l| !l.is_empty())
    }

    fn push_blank(&mut self) {
        self.out.push(String::new());
    }
}

/// Normalizes blank-line spacing around headings and list items.
///
/// Output lines are always joined with `\n` and carry no trailing whitespace.
pub fn normalize_spacing(text: &str) -> String {
    let mut normalizer = Normalizer::new();
    let mut lines = text.lines().peekable();
    while let Some(line) = lines.next() {
        normalizer.push(line, lines.peek().copied());
    }
    normalizer.finish()
}
