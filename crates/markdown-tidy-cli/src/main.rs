use anyhow::{Context, Result};
use markdown_tidy_config::{Config, Rules};
use markdown_tidy_engine::{FileOutcome, LintOptions, WriteMode, io};
use relative_path::{RelativePath, RelativePathBuf};
use std::{
    env,
    path::{Path, PathBuf},
    process,
};

const USAGE: &str = "Usage: markdown-tidy [--check] [PATH...]";

#[derive(Debug, PartialEq)]
struct Args {
    check: bool,
    paths: Vec<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut check = false;
    let mut paths = Vec::new();

    for arg in args {
        match arg.as_str() {
            "--check" => check = true,
            flag if flag.starts_with("--") => return Err(format!("unknown option '{flag}'")),
            path => paths.push(PathBuf::from(path)),
        }
    }

    Ok(Args { check, paths })
}

fn lint_options(rules: &Rules) -> LintOptions {
    LintOptions {
        rewrite_math: rules.rewrite_math,
        normalize_spacing: rules.normalize_spacing,
    }
}

#[derive(Debug, Default, PartialEq)]
struct Summary {
    changed: usize,
    unchanged: usize,
    skipped: usize,
    failed: usize,
}

impl Summary {
    fn record(&mut self, outcome: FileOutcome, display: &str, mode: WriteMode) {
        match outcome {
            FileOutcome::Changed => {
                self.changed += 1;
                match mode {
                    WriteMode::Write => println!("fixed: {display}"),
                    WriteMode::Check => println!("would fix: {display}"),
                }
            }
            FileOutcome::Unchanged => {
                self.unchanged += 1;
                println!("unchanged: {display}");
            }
            FileOutcome::Skipped(reason) => {
                self.skipped += 1;
                println!("skipped ({reason}): {display}");
            }
        }
    }
}

struct Runner {
    options: LintOptions,
    mode: WriteMode,
    summary: Summary,
}

impl Runner {
    fn lint_path(&mut self, path: &Path) -> Result<()> {
        if path.is_dir() {
            io::validate_notes_dir(path)?;
            let files = io::collect_markdown_files(path)
                .with_context(|| format!("Failed to scan {}", path.display()))?;
            log::info!("linting {} files under {}", files.len(), path.display());
            for file in files {
                let display = path.join(file.relative_path().as_str());
                self.lint_one(path, file.relative_path(), &display.display().to_string());
            }
        } else {
            let root = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            let name = path
                .file_name()
                .with_context(|| format!("Not a file path: {}", path.display()))?;
            let relative = RelativePathBuf::from_path(name)
                .with_context(|| format!("Unsupported file name: {}", path.display()))?;
            self.lint_one(root, &relative, &path.display().to_string());
        }
        Ok(())
    }

    fn lint_one(&mut self, root: &Path, relative: &RelativePath, display: &str) {
        match io::lint_file(relative, root, &self.options, self.mode) {
            Ok(outcome) => self.summary.record(outcome, display, self.mode),
            Err(e) => {
                self.summary.failed += 1;
                log::error!("{display}: {e}");
                eprintln!("error: {display}: {e}");
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let raw_args: Vec<String> = env::args().skip(1).collect();
    let args = match parse_args(&raw_args) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            process::exit(2);
        }
    };

    let config_path = Config::config_path();
    let config = match Config::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };
    log::debug!("rules from {}: {:?}", config_path.display(), config.rules);

    let paths = if !args.paths.is_empty() {
        args.paths
    } else if let Some(notes_path) = config.notes_path {
        log::info!("no path given, using notes_path {}", notes_path.display());
        vec![notes_path]
    } else {
        eprintln!("Error: No path provided and no notes_path configured");
        eprintln!("{USAGE}");
        eprintln!(
            "Or set notes_path in a config file at {}",
            config_path.display()
        );
        process::exit(1);
    };

    let mut runner = Runner {
        options: lint_options(&config.rules),
        mode: if args.check {
            WriteMode::Check
        } else {
            WriteMode::Write
        },
        summary: Summary::default(),
    };

    for path in &paths {
        if let Err(e) = runner.lint_path(path) {
            runner.summary.failed += 1;
            eprintln!("error: {e:#}");
        }
    }

    let summary = &runner.summary;
    println!(
        "{} changed, {} unchanged, {} skipped, {} failed",
        summary.changed, summary.unchanged, summary.skipped, summary.failed
    );

    if summary.failed > 0 || (args.check && summary.changed > 0) {
        process::exit(1);
    }
    Ok(())
}
