//! jpsi command-line driver.
//!
//! Parses Java files into stub trees and PSI and prints what the library
//! sees. Set `RUST_LOG` (for example `RUST_LOG=jpsi=debug`) to see the
//! stub-to-tree switch and cache activity.

mod commands;

use commands::{check_files, print_members, print_stubs, print_tree, Options};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let options = match Options::parse(&args[2..]) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("error: {message}");
            std::process::exit(2);
        }
    };
    init_tracing(options.log_tree);

    let command = args[1].as_str();
    match command {
        "stubs" => {
            let Some(path) = options.single_path() else {
                eprintln!("Usage: jpsic stubs <file.java> [--bin]");
                std::process::exit(2);
            };
            print_stubs(path, &options);
        }
        "tree" => {
            let Some(path) = options.single_path() else {
                eprintln!("Usage: jpsic tree <file.java> [--expand]");
                std::process::exit(2);
            };
            print_tree(path, &options);
        }
        "members" => {
            let Some(path) = options.single_path() else {
                eprintln!("Usage: jpsic members <file.java>");
                std::process::exit(2);
            };
            print_members(path, &options);
        }
        "check" => {
            if options.paths.is_empty() {
                eprintln!("Usage: jpsic check <file.java>...");
                std::process::exit(2);
            }
            if !check_files(&options) {
                std::process::exit(1);
            }
        }
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => {
            println!("jpsic {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(2);
        }
    }
}

/// Install a subscriber when `RUST_LOG` is set; `--log-tree` renders spans
/// as an indented tree.
fn init_tracing(as_tree: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_err() {
        return;
    }
    let filter = EnvFilter::from_default_env();
    if as_tree {
        tracing_subscriber::registry()
            .with(
                tracing_tree::HierarchicalLayer::new(2)
                    .with_targets(true)
                    .with_bracketed_fields(true),
            )
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(filter)
            .init();
    }
}

fn print_usage() {
    println!("jpsic - stub trees and PSI for Java sources");
    println!();
    println!("Usage: jpsic <command> [options] <file.java>...");
    println!();
    println!("Commands:");
    println!("  stubs <file>      Print the stub tree");
    println!("  tree <file>       Print the syntax tree");
    println!("  members <file>    Print the merged members of every class");
    println!("  check <files...>  Report syntax errors, including those inside bodies");
    println!("  help              Show this message");
    println!("  version           Show version information");
    println!();
    println!("Options:");
    println!("  --level=<N>       Java language level: 8, 11, 17 or 21 (default: 21)");
    println!("  --limit=<N>       Longest field initializer kept in stubs (default: 1000)");
    println!("  --bin             stubs: serialize, read back and compare");
    println!("  --expand          tree: parse every lazily parsed body first");
    println!("  --log-tree        Render RUST_LOG output as an indented span tree");
}
