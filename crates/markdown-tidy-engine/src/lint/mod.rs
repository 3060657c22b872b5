//! # Linting
//!
//! Deterministic rewrite of a Markdown document. The pipeline is:
//!
//! 1. **Protection** (`protect`): frontmatter is split off and fenced code blocks
//!    are swapped for sentinel tokens
//! 2. **Math** (`math`): `\[…\]` and `\(…\)` become `$$…$$` and `$…$`
//! 3. **Spacing** (`classify` + `normalize`): each line is classified and fed to the
//!    blank-line state machine
//! 4. **Restoration**: code blocks go back in and the frontmatter is prepended
//!
//! ## Key Invariants
//!
//! - Frontmatter and code blocks come out byte-identical and in their original order
//! - `lint(lint(d)) == lint(d)`
//! - The core never performs I/O and never fails

pub mod classify;
pub mod math;
pub mod normalize;
pub mod protect;

pub use classify::LineKind;
pub use math::rewrite_math;
pub use normalize::{Meaningful, Normalizer, normalize_spacing};
pub use protect::Protected;

/// Which rewrite stages to run. Everything is on by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LintOptions {
    pub rewrite_math: bool,
    pub normalize_spacing: bool,
}

impl Default for LintOptions {
    fn default() -> Self {
        Self {
            rewrite_math: true,
            normalize_spacing: true,
        }
    }
}

/// Result of linting one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintReport {
    pub output: String,
    /// Whether `output` differs from the input, i.e. whether a write-back is needed.
    pub changed: bool,
}

/// Lints `text` with every rule enabled.
pub fn lint(text: &str) -> String {
    lint_with(text, &LintOptions::default()).output
}

/// Lints `text` with the given options and reports whether anything changed.
pub fn lint_with(text: &str, options: &LintOptions) -> LintReport {
    let mut output = rewrite(text, options);
    // Trimming leading blank lines can move a `---` block to offset 0 where it
    // becomes frontmatter; one more pass settles it.
    if protect::split_frontmatter(text).0.is_empty()
        && !protect::split_frontmatter(&output).0.is_empty()
    {
        output = rewrite(&output, options);
    }

    let changed = output != text;
    log::debug!("lint finished, changed: {changed}");
    LintReport { output, changed }
}

fn rewrite(text: &str, options: &LintOptions) -> String {
    let Some(protected) = Protected::extract(text) else {
        log::warn!("no free sentinel marker for code blocks, leaving document untouched");
        return text.to_string();
    };
    log::debug!(
        "protected {} bytes of frontmatter and {} code blocks",
        protected.frontmatter().len(),
        protected.code_spans().len()
    );

    let mut body = protected.body().to_string();
    if options.rewrite_math {
        body = rewrite_math(&body);
    }
    if options.normalize_spacing {
        body = normalize_spacing(&body);
    }

    format!("{}{}", protected.frontmatter(), protected.restore(&body))
}
