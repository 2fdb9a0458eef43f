//! Command implementations.
//!
//! Each command reads its files, runs them through a [`PsiManager`] built
//! from the command-line [`Options`], and prints to stdout. Failures are
//! reported on stderr and end the process.

mod check;
mod members;
mod stubs;
mod tree;

use std::str::FromStr;
use std::sync::Arc;

use jpsi::{JavaFile, LanguageLevel, PsiConfig, PsiError, PsiManager};

pub use check::check_files;
pub use members::print_members;
pub use stubs::print_stubs;
pub use tree::print_tree;

/// Flags and paths following the command name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub level: LanguageLevel,
    pub initializer_limit: Option<usize>,
    pub binary: bool,
    pub expand: bool,
    pub log_tree: bool,
    pub paths: Vec<String>,
}

impl Options {
    pub fn parse(args: &[String]) -> Result<Self, String> {
        let mut options = Options::default();
        for arg in args {
            if let Some(level) = arg.strip_prefix("--level=") {
                options.level = LanguageLevel::from_str(level)?;
            } else if let Some(limit) = arg.strip_prefix("--limit=") {
                let limit = limit
                    .parse()
                    .map_err(|_| format!("invalid initializer limit `{limit}`"))?;
                options.initializer_limit = Some(limit);
            } else if arg == "--bin" {
                options.binary = true;
            } else if arg == "--expand" {
                options.expand = true;
            } else if arg == "--log-tree" {
                options.log_tree = true;
            } else if arg.starts_with("--") {
                return Err(format!("unknown option `{arg}`"));
            } else {
                options.paths.push(arg.clone());
            }
        }
        Ok(options)
    }

    /// The only path given, if exactly one was.
    pub fn single_path(&self) -> Option<&str> {
        match self.paths.as_slice() {
            [path] => Some(path),
            _ => None,
        }
    }

    pub fn config(&self) -> PsiConfig {
        let config = PsiConfig::default().with_language_level(self.level);
        match self.initializer_limit {
            Some(limit) => config.with_initializer_text_limit(limit),
            None => config,
        }
    }
}

/// Read a file, exiting with an error message if it cannot be read.
pub(crate) fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("error: cannot read '{path}': {e}");
            std::process::exit(1);
        }
    }
}

/// Read `path` into a fresh manager. The manager is returned too; it only
/// holds its files weakly.
pub(crate) fn open(path: &str, options: &Options) -> (Arc<PsiManager>, Arc<JavaFile>) {
    let manager = PsiManager::new(options.config());
    let file = manager.add_file(path, &read_file(path));
    (manager, file)
}

pub(crate) fn fail(path: &str, error: &PsiError) -> ! {
    eprintln!("error: {path}: {error}");
    std::process::exit(1);
}

/// One-based line and column of a byte offset.
pub(crate) fn line_col(text: &str, offset: u32) -> (usize, usize) {
    let offset = (offset as usize).min(text.len());
    let before = &text.as_bytes()[..offset];
    let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
    let line_start = before.iter().rposition(|&b| b == b'\n').map_or(0, |i| i + 1);
    (line, offset - line_start + 1)
}
