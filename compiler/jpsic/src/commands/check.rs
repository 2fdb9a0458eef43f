//! The `check` command.

use std::sync::Arc;

use rayon::prelude::*;
use tracing::debug;

use jpsi::{PsiManager, PsiResult};

use super::{line_col, Options};

/// Report the syntax errors of every file, parsing all bodies. Files are
/// checked in parallel against one manager and reported in argument order.
///
/// Returns `false` if any file has errors or could not be read.
pub fn check_files(options: &Options) -> bool {
    let manager = PsiManager::new(options.config());
    let reports: Vec<(String, Result<Vec<String>, String>)> = options
        .paths
        .par_iter()
        .map(|path| {
            let report = match std::fs::read_to_string(path) {
                Ok(text) => check_one(&manager, path, &text).map_err(|e| e.to_string()),
                Err(e) => Err(format!("cannot read: {e}")),
            };
            (path.clone(), report)
        })
        .collect();

    let mut clean = true;
    for (path, report) in reports {
        match report {
            Ok(errors) if errors.is_empty() => {}
            Ok(errors) => {
                clean = false;
                for error in errors {
                    println!("{error}");
                }
            }
            Err(message) => {
                clean = false;
                eprintln!("error: {path}: {message}");
            }
        }
    }
    if clean {
        println!("{} file(s) checked, no errors", options.paths.len());
    }
    clean
}

fn check_one(manager: &Arc<PsiManager>, path: &str, text: &str) -> PsiResult<Vec<String>> {
    let file = manager.add_file(path, text);
    let errors = file.error_elements()?;
    debug!(path, errors = errors.len(), "file checked");
    Ok(errors
        .into_iter()
        .map(|error| {
            let (line, column) = line_col(text, error.range.start);
            format!("{path}:{line}:{column}: {}", error.message)
        })
        .collect())
}
