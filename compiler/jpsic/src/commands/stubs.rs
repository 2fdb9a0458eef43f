//! The `stubs` command.

use super::{fail, open, Options};

/// Print the stub tree of a file. With `--bin`, also serialize it, read
/// the bytes back into a second file and compare.
pub fn print_stubs(path: &str, options: &Options) {
    let (manager, file) = open(path, options);
    let stubs = file.stub_tree().unwrap_or_else(|e| fail(path, &e));
    print!("{}", stubs.debug_dump());
    if !options.binary {
        return;
    }

    let bytes = file.serialized_stubs().unwrap_or_else(|e| fail(path, &e));
    let reloaded = manager
        .add_file_with_stubs(format!("{path} (stubs)"), &file.text(), &bytes)
        .unwrap_or_else(|e| fail(path, &e));
    let round_trip = reloaded.stub_tree().unwrap_or_else(|e| fail(path, &e));
    if *round_trip == *stubs {
        println!("{} stubs, {} bytes, round trip ok", stubs.len(), bytes.len());
    } else {
        eprintln!("error: {path}: stub tree changed in a serialization round trip");
        std::process::exit(1);
    }
}
