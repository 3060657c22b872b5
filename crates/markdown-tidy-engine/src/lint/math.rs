use std::sync::OnceLock;

use regex::{Captures, Regex};

fn display_regex() -> &'static Regex {
    static DISPLAY: OnceLock<Regex> = OnceLock::new();
    DISPLAY.get_or_init(|| Regex::new(r"(?s)\\\[(.*?)\\\]").expect("Invalid display math regex"))
}

fn inline_regex() -> &'static Regex {
    static INLINE: OnceLock<Regex> = OnceLock::new();
    INLINE.get_or_init(|| Regex::new(r"(?s)\\\((.*?)\\\)").expect("Invalid inline math regex"))
}

/// Rewrites LaTeX math delimiters into dollar syntax.
///
/// `\[ … \]` becomes `$$…$$` and `\( … \)` becomes `$…$`, with whitespace around
/// the content trimmed. Display math is rewritten first so an inline pair can't
/// eat into a display span. Unpaired delimiters are left as they are.
pub fn rewrite_math(text: &str) -> String {
    let display = display_regex().replace_all(text, |caps: &Captures| {
        format!("$${}$$", caps[1].trim())
    });
    inline_regex()
        .replace_all(&display, |caps: &Captures| format!("${}$", caps[1].trim()))
        .into_owned()
}
