use clap::{Args, Subcommand};
use focusflow_core::timer::format_hours_minutes;
use focusflow_core::{Command, TimerMode};
use serde_json::json;

use super::{describe, load_config, open_dispatcher, print_json, status_line, CliResult};

#[derive(Args)]
pub struct TimerArgs {
    #[command(subcommand)]
    action: TimerAction,
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start or resume the countdown
    Start,
    /// Pause a running countdown
    Pause,
    /// Stop and refill the current mode
    Reset,
    /// Move to the next mode without completing the session
    Skip,
    /// Switch mode (focus, short-break, long-break); the timer stops
    Mode { mode: TimerMode },
    /// Set a mode's duration in minutes
    Duration { mode: TimerMode, minutes: u32 },
    /// Show the current timer state
    Status,
}

pub fn run(args: TimerArgs) -> CliResult {
    let config = load_config();
    let mut dispatcher = open_dispatcher(&config)?;

    let events = match args.action {
        TimerAction::Start => dispatcher.execute(Command::Start),
        TimerAction::Pause => dispatcher.execute(Command::Pause),
        TimerAction::Reset => dispatcher.execute(Command::Reset),
        TimerAction::Skip => dispatcher.execute(Command::Skip),
        TimerAction::Mode { mode } => dispatcher.execute(Command::SetMode { mode }),
        TimerAction::Duration { mode, minutes } => {
            dispatcher.execute(Command::SetDuration { mode, minutes })
        }
        TimerAction::Status => dispatcher.catch_up(),
    };
    let view = dispatcher.view();

    if args.json {
        return print_json(&json!({ "events": events, "timer": view }));
    }
    for line in events.iter().filter_map(describe) {
        println!("{line}");
    }
    println!("{}", status_line(&view));
    println!(
        "Today: {} focus, {} sessions",
        format_hours_minutes(view.today_focus_secs),
        view.today_sessions
    );
    Ok(())
}
