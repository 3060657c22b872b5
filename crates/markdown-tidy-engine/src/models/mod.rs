pub mod markdown_file;

pub use markdown_file::{MARKDOWN_EXTENSIONS, MarkdownFile, is_markdown_extension};
