//! Inspect a saved sculpt history file.
//!
//! Usage: cargo run --bin history_info -- --file <NAME> [OPTIONS]
//!
//! Options:
//!   --file <NAME>       History file name, resolved like the editor does
//!   --data-dir <DIR>    Directory holding history files (default: from config)
//!   --config <PATH>     Sculptor config JSON (default: built-in defaults)

use std::path::PathBuf;
use std::process::ExitCode;

use rktri_sculpt::core::logging;
use rktri_sculpt::persist;
use rktri_sculpt::SculptConfig;

fn main() -> ExitCode {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    let Some(name) = parse_str_arg(&args, "--file") else {
        eprintln!("Usage: history_info --file <NAME> [--data-dir <DIR>] [--config <PATH>]");
        return ExitCode::FAILURE;
    };

    let mut config = match parse_str_arg(&args, "--config") {
        Some(path) => match SculptConfig::load_sync(&PathBuf::from(path)) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load config: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => SculptConfig::default(),
    };
    if let Some(dir) = parse_str_arg(&args, "--data-dir") {
        config.storage.data_dir = PathBuf::from(dir);
    }

    let path = match persist::history_path(&config.storage, &name) {
        Ok(path) => path,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let history = match persist::load_history(&path) {
        Ok(history) => history,
        Err(e) => {
            log::error!("Failed to read {}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    println!("=== Sculpt History ===");
    println!("File:    {}", path.display());
    println!("States:  {}", history.len());
    println!("Cursor:  {}", history);
    if let Some(current) = history.current() {
        println!("Grid:    {}x{}", current.width(), current.height());
    }
    println!();

    let current = history.current_index();
    for (i, snapshot) in history.iter().enumerate() {
        let (min, max) = snapshot.elevation_range();
        let marker = if Some(i) == current { "*" } else { " " };
        println!(
            "{} {:>4}  min {:>8.3}  max {:>8.3}  mean {:>8.3}",
            marker,
            i,
            min,
            max,
            snapshot.mean_elevation()
        );
    }

    ExitCode::SUCCESS
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
