//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves the data directory
//! - runs the audit pipeline (one-shot or interactive)
//! - drives the header maintenance utilities
//! - prints reports and writes optional exports

use std::fs;

use clap::Parser;

use crate::cli::{prompt, CheckArgs, Command, HeadersArgs, NormalizeArgs, PurgeArgs};
use crate::error::AppError;
use crate::io::{headers, normalize, scan};

pub mod pipeline;

/// Entry point for the `caudit` binary.
pub fn run() -> Result<(), AppError> {
    // We want bare `caudit` and `caudit -d DIR` to behave like `caudit check ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing. This preserves a clean clap structure while
    // keeping the original tool's "just run it" UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Check(args) => handle_check(args),
        Command::Headers(args) => handle_headers(args),
        Command::Purge(args) => handle_purge(args),
        Command::Normalize(args) => handle_normalize(args),
    }
}

fn handle_check(args: CheckArgs) -> Result<(), AppError> {
    let data_dir = scan::resolve_data_dir(args.data_dir);
    scan::ensure_data_dir(&data_dir)?;

    if args.export.is_some() && args.instrument.is_none() {
        return Err(AppError::usage("--export requires --instrument."));
    }

    if let Some(instrument) = args.instrument {
        let Some(audit) = pipeline::run_audit(&data_dir, &instrument)? else {
            return Err(AppError::no_data(format!(
                "Instrument '{instrument}' not found."
            )));
        };
        println!("{}", crate::report::format_instrument_audit(&audit));
        if let Some(path) = &args.export {
            crate::io::export::write_audit_json(path, &audit)?;
            println!("Exported audit to {}", path.display());
        }
        return Ok(());
    }

    // Interactive loop: one instrument per round, empty input exits.
    println!("=== Interactive Missing Contract Checker ===");
    println!("Press Enter without typing anything to exit.\n");

    while let Some(instrument) = prompt::read_instrument()? {
        match pipeline::run_audit(&data_dir, &instrument)? {
            Some(audit) => {
                println!();
                println!("{}", crate::report::format_instrument_audit(&audit));
            }
            None => println!("\nInstrument '{instrument}' not found.\n"),
        }
    }
    println!("\nExiting.");

    Ok(())
}

fn handle_headers(args: HeadersArgs) -> Result<(), AppError> {
    let data_dir = scan::resolve_data_dir(args.data_dir);
    scan::ensure_data_dir(&data_dir)?;

    let files = scan::find_instrument_files(&data_dir, &args.instrument)?;
    if files.is_empty() {
        println!(
            "No Day_/Hour_ files found for instrument '{}' in {}",
            args.instrument,
            data_dir.display()
        );
        return Ok(());
    }

    let mut modified = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;

    for path in &files {
        let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("?");
        match headers::rewrite_latest_to_close(path) {
            Ok(true) => {
                modified += 1;
                println!("[MODIFIED] {name} (Latest -> Close)");
            }
            Ok(false) => {
                skipped += 1;
                println!("[SKIPPED ] {name} (no 'Latest' column)");
            }
            Err(e) => {
                failed += 1;
                println!("[FAILED  ] {name}: {e}");
            }
        }
    }

    println!();
    println!(
        "{}",
        crate::report::format_headers_summary(
            &args.instrument,
            &data_dir,
            files.len(),
            modified,
            skipped,
            failed,
        )
    );

    if failed > 0 {
        return Err(AppError::processing(format!("{failed} file(s) failed.")));
    }
    Ok(())
}

fn handle_purge(args: PurgeArgs) -> Result<(), AppError> {
    let data_dir = scan::resolve_data_dir(args.data_dir);
    scan::ensure_data_dir(&data_dir)?;

    let header_scan = headers::find_latest_header_files(&data_dir)?;
    let flagged = &header_scan.flagged;
    let unreadable = &header_scan.unreadable;

    println!("Directory: {}", data_dir.display());
    println!("Scanned Day_/Hour_ CSV files: {}", header_scan.scanned);
    println!("Files with 'Latest' header (to delete): {}", flagged.len());
    println!("Unreadable / skipped: {}", unreadable.len());

    if !unreadable.is_empty() {
        println!("\n--- Unreadable / skipped files ---");
        for (path, err) in unreadable {
            let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("?");
            println!("[SKIP] {name}: {err}");
        }
    }

    if flagged.is_empty() {
        println!("\nNo files found with 'Latest' in the header. Nothing to delete.");
        return Ok(());
    }

    println!("\n--- Files that will be deleted ---");
    for path in flagged {
        let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("?");
        println!("{name}");
    }

    if !args.yes && !prompt::confirm_deletion()? {
        println!("Cancelled. No files deleted.");
        return Ok(());
    }

    let mut deleted = 0usize;
    let mut failed = 0usize;
    for path in flagged {
        let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("?");
        match fs::remove_file(path) {
            Ok(()) => {
                deleted += 1;
                println!("[DELETED] {name}");
            }
            Err(e) => {
                failed += 1;
                println!("[FAILED ] {name}: {e}");
            }
        }
    }

    println!("\n=== Summary ===");
    println!("Deleted: {deleted}");
    println!("Failed : {failed}");

    if failed > 0 {
        return Err(AppError::processing(format!("{failed} file(s) failed to delete.")));
    }
    Ok(())
}

fn handle_normalize(args: NormalizeArgs) -> Result<(), AppError> {
    let outcome = normalize::normalize_file(&args.file, args.output.as_deref())?;

    for (from, to) in &outcome.renamed {
        println!("Renamed: {from} -> {to}");
    }
    println!("Columns: {}", outcome.columns.join(","));
    println!("Rows   : {}", outcome.rows);
    println!("Wrote  : {}", outcome.output.display());
    Ok(())
}

/// Rewrite argv so `caudit` defaults to `caudit check`.
///
/// Rules:
/// - `caudit`                       -> `caudit check`
/// - `caudit -d DIR ...`            -> `caudit check -d DIR ...`
/// - `caudit --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("check".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "check" | "headers" | "purge" | "normalize");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "check flags".
    if arg1.starts_with('-') {
        argv.insert(1, "check".to_string());
        return argv;
    }

    // Otherwise, leave as-is (clap will produce the usage error).
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_check() {
        assert_eq!(rewrite_args(args(&["caudit"])), args(&["caudit", "check"]));
    }

    #[test]
    fn leading_flag_routes_to_check() {
        assert_eq!(
            rewrite_args(args(&["caudit", "-d", "data"])),
            args(&["caudit", "check", "-d", "data"])
        );
    }

    #[test]
    fn explicit_subcommands_pass_through() {
        for sub in ["check", "headers", "purge", "normalize"] {
            assert_eq!(
                rewrite_args(args(&["caudit", sub])),
                args(&["caudit", sub])
            );
        }
    }

    #[test]
    fn help_and_version_pass_through() {
        for flag in ["-h", "--help", "-V", "--version", "help"] {
            assert_eq!(
                rewrite_args(args(&["caudit", flag])),
                args(&["caudit", flag])
            );
        }
    }
}
