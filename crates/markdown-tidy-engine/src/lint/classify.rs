/// Classification of a single physical line.
///
/// Only local facts are considered: the result depends on nothing but the line
/// itself, so the classifier can be called on any line in any order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `#` to `######` followed by whitespace.
    Heading,
    /// `-`, `*`, `+` or `<digits>.` followed by whitespace.
    ListItem,
    /// Nothing but whitespace.
    Blank,
    Other,
}

impl LineKind {
    /// Classifies `line`. Leading whitespace is ignored for every kind.
    pub fn of(line: &str) -> Self {
        let rest = line.trim_start();
        if rest.is_empty() {
            LineKind::Blank
        } else if is_heading(rest) {
            LineKind::Heading
        } else if is_list_item(rest) {
            LineKind::ListItem
        } else {
            LineKind::Other
        }
    }

    pub fn is_blank(self) -> bool {
        self == LineKind::Blank
    }
}

fn is_heading(rest: &str) -> bool {
    let hashes = rest.bytes().take_while(|&b| b == b'#').count();
    (1..=6).contains(&hashes) && rest[hashes..].starts_with(char::is_whitespace)
}

fn is_list_item(rest: &str) -> bool {
    let marker_len = match rest.as_bytes().first() {
        Some(b'-' | b'*' | b'+') => 1,
        Some(b) if b.is_ascii_digit() => {
            let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
            if !rest[digits..].starts_with('.') {
                return false;
            }
            digits + 1
        }
        _ => return false,
    };
    rest[marker_len..].starts_with(char::is_whitespace)
}
