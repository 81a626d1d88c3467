use clap::{Args, Subcommand};
use focusflow_core::stats::chart;
use focusflow_core::timer::format_hours_minutes;
use focusflow_core::{Clock, ReportSummary, ReportWindow, SystemClock};

use super::{load_config, open_dispatcher, print_json, CliResult};

const BAR_WIDTH: u64 = 40;

#[derive(Args)]
pub struct StatsArgs {
    #[command(subcommand)]
    action: StatsAction,
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's focus time and sessions
    Today,
    /// All-time totals
    All,
    /// Daily focus minutes over the last week or month
    Report {
        #[arg(long, default_value = "week")]
        window: ReportWindow,
    },
}

pub fn run(args: StatsArgs) -> CliResult {
    let config = load_config();
    let mut dispatcher = open_dispatcher(&config)?;
    // count a running session up to now
    dispatcher.catch_up();

    let today = SystemClock.today();
    let snapshot = dispatcher.timer().snapshot();
    let summary = ReportSummary::from_snapshot(snapshot, today);

    match args.action {
        StatsAction::Today => {
            if args.json {
                return print_json(&summary.today);
            }
            println!(
                "Today: {} focus, {} sessions",
                format_hours_minutes(summary.today.focus_seconds),
                summary.today.sessions_completed
            );
        }
        StatsAction::All => {
            if args.json {
                return print_json(&summary);
            }
            println!("Total focus time: {}", summary.total_focus_formatted);
            println!("Sessions completed: {}", summary.sessions_completed);
        }
        StatsAction::Report { window } => {
            let points = chart(&snapshot.daily_reports, window, today);
            if args.json {
                return print_json(&points);
            }
            let max = points.iter().map(|p| p.minutes).max().unwrap_or(0).max(1);
            for point in &points {
                let bar = "#".repeat((point.minutes * BAR_WIDTH / max) as usize);
                println!("{:>6}  {:>4}m  {bar}", point.label, point.minutes);
            }
            println!("Total focus time: {}", summary.total_focus_formatted);
        }
    }
    Ok(())
}
