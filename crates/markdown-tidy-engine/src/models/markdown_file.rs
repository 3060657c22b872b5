use relative_path::{RelativePath, RelativePathBuf};

/// File extensions treated as Markdown documents.
pub const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// A markdown file identified by its path relative to the notes root
#[derive(Debug, Clone, PartialEq)]
pub struct MarkdownFile {
    relative_path: RelativePathBuf,
}

impl MarkdownFile {
    /// Create a new MarkdownFile from a relative path
    pub fn new(relative_path: RelativePathBuf) -> Self {
        Self { relative_path }
    }

    /// Get the relative path
    pub fn relative_path(&self) -> &RelativePath {
        &self.relative_path
    }
}

/// Case-insensitive check against [`MARKDOWN_EXTENSIONS`].
pub fn is_markdown_extension(ext: &str) -> bool {
    MARKDOWN_EXTENSIONS
        .iter()
        .any(|known| known.eq_ignore_ascii_case(ext))
}
