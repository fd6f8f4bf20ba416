//! Leaderboard maintenance CLI
//!
//! Thin wrapper over the service, printing the same JSON shapes the game's
//! API serves:
//!
//! ```text
//! leaderboard read
//! leaderboard submit <name> <score>
//! ```
//!
//! Configuration comes from `LEADERBOARD_CAP` / `LEADERBOARD_PATH`.

use std::env;
use std::process::ExitCode;

use arcade_leaderboard::{Config, Leaderboard, LeaderboardError};
use serde::Serialize;
use serde_json::json;

fn main() -> ExitCode {
    env_logger::init();
    let config = Config::from_env();
    let board = Leaderboard::open(&config);

    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("read") => match board.read() {
            Ok(snapshot) => print_json(&snapshot),
            Err(err) => {
                log::error!("read failed: {err}");
                print_json(&json!({ "entries": [], "cap": config.cap }));
                ExitCode::FAILURE
            }
        },
        Some("submit") if args.len() == 3 => {
            let Ok(score) = args[2].parse::<f64>() else {
                print_json(&json!({ "message": "Invalid score" }));
                return ExitCode::FAILURE;
            };
            match board.submit(&args[1], score) {
                Ok(submission) => print_json(&submission),
                Err(LeaderboardError::InvalidInput) => {
                    print_json(&json!({ "message": "Invalid score" }));
                    ExitCode::FAILURE
                }
                Err(LeaderboardError::NotQualifying { min, cap }) => {
                    print_json(&json!({
                        "message": "Not a top score",
                        "min": min,
                        "cap": cap,
                    }));
                    ExitCode::FAILURE
                }
                Err(err @ LeaderboardError::StoreUnavailable(_)) => {
                    log::error!("submit failed: {err}");
                    print_json(&json!({ "message": "Unable to save score" }));
                    ExitCode::FAILURE
                }
            }
        }
        _ => {
            eprintln!("usage: leaderboard read | leaderboard submit <name> <score>");
            ExitCode::FAILURE
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(out) => {
            println!("{out}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("failed to encode response: {err}");
            ExitCode::FAILURE
        }
    }
}
