use std::sync::OnceLock;

use regex::Regex;

/// Tag text between the marker characters of a sentinel token.
const TAG: &str = "code-";

/// Private-use range searched for a marker character that the body never contains.
const MARKER_RANGE: std::ops::RangeInclusive<u32> = 0xE000..=0xF8FF;

fn frontmatter_regex() -> &'static Regex {
    static FRONTMATTER: OnceLock<Regex> = OnceLock::new();
    FRONTMATTER.get_or_init(|| {
        Regex::new(r"(?s)\A---[ \t]*\r?\n(?:.*?\r?\n)?---[ \t]*(?:\r?\n|\z)")
            .expect("Invalid frontmatter regex")
    })
}

fn code_fence_regex() -> &'static Regex {
    static CODE_FENCE: OnceLock<Regex> = OnceLock::new();
    CODE_FENCE.get_or_init(|| Regex::new(r"(?s)```.*?```").expect("Invalid code fence regex"))
}

/// A document split into its protected regions and the text that may be rewritten.
///
/// Frontmatter is kept as a borrowed prefix of the original document. Fenced code
/// blocks are swapped for sentinel tokens in `body` and remembered in order, so
/// [`Protected::restore`] can put them back byte-for-byte once the body has been
/// transformed.
#[derive(Debug)]
pub struct Protected<'a> {
    frontmatter: &'a str,
    body: String,
    spans: Vec<&'a str>,
    marker: char,
}

impl<'a> Protected<'a> {
    /// Splits `document` into frontmatter, body and fenced code spans.
    ///
    /// Returns `None` only when every private-use code point already occurs in the
    /// body, in which case no sentinel can be guaranteed collision-free.
    pub fn extract(document: &'a str) -> Option<Self> {
        let (frontmatter, rest) = split_frontmatter(document);
        let marker = pick_marker(rest)?;

        let mut body = String::with_capacity(rest.len());
        let mut spans = Vec::new();
        let mut last_end = 0;
        for m in code_fence_regex().find_iter(rest) {
            body.push_str(&rest[last_end..m.start()]);
            body.push_str(&sentinel(marker, spans.len()));
            spans.push(m.as_str());
            last_end = m.end();
        }
        body.push_str(&rest[last_end..]);

        Some(Self {
            frontmatter,
            body,
            spans,
            marker,
        })
    }

    /// The frontmatter block including both `---` lines and its trailing line break.
    /// Empty when the document has none.
    pub fn frontmatter(&self) -> &'a str {
        self.frontmatter
    }

    /// Body text with code blocks replaced by sentinels.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Original fenced code spans, indexed by sentinel number.
    pub fn code_spans(&self) -> &[&'a str] {
        &self.spans
    }

    /// Sentinel token standing in for the code span at `index`.
    pub fn token(&self, index: usize) -> String {
        sentinel(self.marker, index)
    }

    /// Replaces each sentinel in `text` with its original code span.
    ///
    /// Tokens are consumed left to right in index order, which matches their order
    /// in the body since no transformation reorders lines. A token that can no
    /// longer be found is logged and skipped.
    pub fn restore(&self, text: &str) -> String {
        let span_bytes: usize = self.spans.iter().map(|s| s.len()).sum();
        let mut out = String::with_capacity(text.len() + span_bytes);
        let mut rest = text;
        for (index, span) in self.spans.iter().enumerate() {
            let token = self.token(index);
            match rest.find(&token) {
                Some(at) => {
                    out.push_str(&rest[..at]);
                    out.push_str(span);
                    rest = &rest[at + token.len()..];
                }
                None => log::warn!("code block sentinel {index} lost during normalization"),
            }
        }
        out.push_str(rest);
        out
    }

    /// Indexes of code spans whose sentinel does not occur in `text`.
    pub fn missing_tokens(&self, text: &str) -> Vec<usize> {
        (0..self.spans.len())
            .filter(|&index| !text.contains(&self.token(index)))
            .collect()
    }
}

/// Splits a leading frontmatter block off `document`.
pub fn split_frontmatter(document: &str) -> (&str, &str) {
    match frontmatter_regex().find(document) {
        Some(m) => document.split_at(m.end()),
        None => ("", document),
    }
}

fn pick_marker(body: &str) -> Option<char> {
    let first = *MARKER_RANGE.start();
    let mut used = vec![false; MARKER_RANGE.count()];
    for c in body.chars() {
        if MARKER_RANGE.contains(&u32::from(c)) {
            used[(u32::from(c) - first) as usize] = true;
        }
    }
    used.iter()
        .position(|&taken| !taken)
        .and_then(|offset| char::from_u32(first + offset as u32))
}

fn sentinel(marker: char, index: usize) -> String {
    format!("{marker}{TAG}{index}{marker}")
}
