use crate::lint::{LintOptions, lint_with};
use crate::models::{MarkdownFile, is_markdown_extension};
use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid notes directory: {0}")]
    InvalidNotesDir(String),
    #[error("Path {0} is not inside the notes directory")]
    OutsideNotesDir(PathBuf),
}

/// Whether linted output is written back or only compared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Write,
    Check,
}

/// Why a file was not linted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Extension is not a markdown extension
    NotMarkdown,
    /// Content is not valid UTF-8 text
    NotText,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NotMarkdown => write!(f, "not a markdown file"),
            SkipReason::NotText => write!(f, "not a text file"),
        }
    }
}

/// What linting a single file amounted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Content changed (and was written back in [`WriteMode::Write`])
    Changed,
    /// Already normalized
    Unchanged,
    Skipped(SkipReason),
}

/// Read a markdown file and return its content
pub fn read_file(relative_path: &RelativePath, notes_root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(notes_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Write content to a markdown file
pub fn write_file(
    relative_path: &RelativePath,
    notes_root: &Path,
    content: &str,
) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(notes_root);

    // Create parent directories if they don't exist
    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(&absolute_path, content).map_err(IoError::Io)
}

/// Lint one file, writing the result back when it changed and `mode` allows it
pub fn lint_file(
    relative_path: &RelativePath,
    notes_root: &Path,
    options: &LintOptions,
    mode: WriteMode,
) -> Result<FileOutcome, IoError> {
    if !relative_path.extension().is_some_and(is_markdown_extension) {
        return Ok(FileOutcome::Skipped(SkipReason::NotMarkdown));
    }

    let content = match read_file(relative_path, notes_root) {
        Ok(content) => content,
        Err(IoError::Io(e)) if e.kind() == std::io::ErrorKind::InvalidData => {
            return Ok(FileOutcome::Skipped(SkipReason::NotText));
        }
        Err(e) => return Err(e),
    };

    let report = lint_with(&content, options);
    if !report.changed {
        log::debug!("{relative_path} already normalized");
        return Ok(FileOutcome::Unchanged);
    }

    if mode == WriteMode::Write {
        write_file(relative_path, notes_root, &report.output)?;
        log::info!("rewrote {relative_path}");
    }
    Ok(FileOutcome::Changed)
}

/// Scan for markdown files in the notes directory
pub fn scan_markdown_files(notes_root: &Path) -> Result<Vec<PathBuf>, IoError> {
    if !notes_root.exists() {
        return Err(IoError::InvalidNotesDir(
            "notes directory not found".to_string(),
        ));
    }

    let mut files = Vec::new();
    scan_directory_recursive(notes_root, &mut files)?;
    files.sort();
    Ok(files)
}

/// Collect markdown files under the notes directory as paths relative to it
pub fn collect_markdown_files(notes_root: &Path) -> Result<Vec<MarkdownFile>, IoError> {
    scan_markdown_files(notes_root)?
        .into_iter()
        .map(|path| relative_to(&path, notes_root).map(MarkdownFile::new))
        .collect()
}

/// Express `path` relative to `notes_root`
pub fn relative_to(path: &Path, notes_root: &Path) -> Result<RelativePathBuf, IoError> {
    path.strip_prefix(notes_root)
        .ok()
        .and_then(|rel| RelativePathBuf::from_path(rel).ok())
        .ok_or_else(|| IoError::OutsideNotesDir(path.to_path_buf()))
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension().and_then(|e| e.to_str())
            && is_markdown_extension(ext)
        {
            files.push(path);
        }
    }

    Ok(())
}

pub fn validate_notes_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidNotesDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{create_test_file, create_test_notes_dir};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scan_and_load_files() {
        // Given a notes directory with markdown files
        let notes_dir = create_test_notes_dir();
        create_test_file(&notes_dir, "test1.md", "- First item\n- Second item");
        create_test_file(&notes_dir, "test2.markdown", "# Heading");

        // When scanning for files
        let files = scan_markdown_files(notes_dir.path()).unwrap();

        // Then we find the expected files
        assert_eq!(files.len(), 2);
        assert!(files.iter().any(|f| f.file_name().unwrap() == "test1.md"));
        assert!(files.iter().any(|f| f.file_name().unwrap() == "test2.markdown"));
    }

    #[test]
    fn test_handle_invalid_notes_directory() {
        let nonexistent_path = PathBuf::from("/this/path/does/not/exist");

        let result = scan_markdown_files(&nonexistent_path);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("notes directory"));
    }

    #[test]
    fn test_collect_nested_relative_paths() {
        let notes_dir = create_test_notes_dir();
        create_test_file(&notes_dir, "root.md", "# Root file");
        create_test_file(&notes_dir, "image.png", "fake image data");

        let sub_dir = notes_dir.path().join("subfolder");
        std::fs::create_dir(&sub_dir).unwrap();
        std::fs::write(sub_dir.join("nested.md"), "# Nested file").unwrap();

        let files = collect_markdown_files(notes_dir.path()).unwrap();

        let paths: Vec<String> = files
            .iter()
            .map(|f| f.relative_path().to_string())
            .collect();
        assert_eq!(paths, vec!["root.md", "subfolder/nested.md"]);
    }

    #[test]
    fn test_relative_to_rejects_outside_path() {
        let notes_dir = create_test_notes_dir();
        let result = relative_to(Path::new("/elsewhere/file.md"), notes_dir.path());
        assert!(matches!(result, Err(IoError::OutsideNotesDir(_))));
    }

    #[test]
    fn test_validate_notes_dir() {
        let notes_dir = create_test_notes_dir();
        assert!(validate_notes_dir(notes_dir.path()).is_ok());
        assert!(matches!(
            validate_notes_dir(Path::new("/nonexistent/path")),
            Err(IoError::InvalidNotesDir(_))
        ));
    }

    #[test]
    fn test_read_file_not_found() {
        let notes_dir = create_test_notes_dir();
        let relative_path = RelativePath::new("nonexistent.md");
        let result = read_file(relative_path, notes_dir.path());
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }

    #[test]
    fn test_write_file_creates_parent_directories() {
        let notes_dir = create_test_notes_dir();
        let relative_path = RelativePath::new("folder/subfolder/new_file.md");
        let content = "# New File in Nested Folder";

        write_file(relative_path, notes_dir.path(), content).unwrap();

        let written_content = read_file(relative_path, notes_dir.path()).unwrap();
        assert_eq!(written_content, content);
    }

    #[test]
    fn test_lint_file_rewrites_changed_file() {
        let notes_dir = create_test_notes_dir();
        create_test_file(&notes_dir, "note.md", "# Title\nBody\n\n\n- a\n\n- b\n");

        let outcome = lint_file(
            RelativePath::new("note.md"),
            notes_dir.path(),
            &LintOptions::default(),
            WriteMode::Write,
        )
        .unwrap();

        assert_eq!(outcome, FileOutcome::Changed);
        let content = read_file(RelativePath::new("note.md"), notes_dir.path()).unwrap();
        assert_eq!(content, "# Title\n\nBody\n\n- a\n- b");
    }

    #[test]
    fn test_lint_file_check_mode_leaves_file() {
        let notes_dir = create_test_notes_dir();
        create_test_file(&notes_dir, "note.md", "# Title\nBody");

        let outcome = lint_file(
            RelativePath::new("note.md"),
            notes_dir.path(),
            &LintOptions::default(),
            WriteMode::Check,
        )
        .unwrap();

        assert_eq!(outcome, FileOutcome::Changed);
        let content = read_file(RelativePath::new("note.md"), notes_dir.path()).unwrap();
        assert_eq!(content, "# Title\nBody");
    }

    #[test]
    fn test_lint_file_unchanged() {
        let notes_dir = create_test_notes_dir();
        create_test_file(&notes_dir, "clean.md", "# Title\n\nBody");

        let outcome = lint_file(
            RelativePath::new("clean.md"),
            notes_dir.path(),
            &LintOptions::default(),
            WriteMode::Write,
        )
        .unwrap();

        assert_eq!(outcome, FileOutcome::Unchanged);
    }

    #[test]
    fn test_lint_file_skips_non_markdown() {
        let notes_dir = create_test_notes_dir();
        create_test_file(&notes_dir, "data.json", "{}");

        let outcome = lint_file(
            RelativePath::new("data.json"),
            notes_dir.path(),
            &LintOptions::default(),
            WriteMode::Write,
        )
        .unwrap();

        assert_eq!(outcome, FileOutcome::Skipped(SkipReason::NotMarkdown));
    }

    #[test]
    fn test_lint_file_skips_binary_content() {
        let notes_dir = create_test_notes_dir();
        std::fs::write(notes_dir.path().join("blob.md"), [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let outcome = lint_file(
            RelativePath::new("blob.md"),
            notes_dir.path(),
            &LintOptions::default(),
            WriteMode::Write,
        )
        .unwrap();

        assert_eq!(outcome, FileOutcome::Skipped(SkipReason::NotText));
    }

    #[test]
    fn test_lint_file_missing() {
        let notes_dir = create_test_notes_dir();
        let result = lint_file(
            RelativePath::new("gone.md"),
            notes_dir.path(),
            &LintOptions::default(),
            WriteMode::Write,
        );
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }
}
