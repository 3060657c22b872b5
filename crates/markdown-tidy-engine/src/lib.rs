pub mod io;
pub mod lint;
pub mod models;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use io::*;
pub use lint::{LintOptions, LintReport, lint, lint_with};
pub use models::*;
