//! The `tree` command.

use super::{fail, open, Options};

/// Print the syntax tree; with `--expand`, every lazily parsed body is
/// parsed first.
pub fn print_tree(path: &str, options: &Options) {
    let (_manager, file) = open(path, options);
    let dump = file
        .debug_tree(options.expand)
        .unwrap_or_else(|e| fail(path, &e));
    print!("{dump}");
}
