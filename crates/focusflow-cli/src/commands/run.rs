use std::io::Write;

use clap::Args;
use focusflow_core::{ServiceConfig, TimerHandle, TimerService, TimerView};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use super::{describe, load_config, open_dispatcher, status_line, CliResult};

#[derive(Args)]
pub struct RunArgs {
    /// Start the countdown right away
    #[arg(long)]
    start: bool,
    /// Print events as JSON lines instead of a live countdown
    #[arg(long)]
    json: bool,
}

pub fn run(args: RunArgs) -> CliResult {
    let config = load_config();
    let dispatcher = open_dispatcher(&config)?;
    if args.json {
        print_event(&dispatcher.timer().snapshot_event(), true)?;
    }
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let (handle, task) = TimerService::spawn(dispatcher, ServiceConfig::from(&config.runtime));
        let result = drive(&handle, &args).await;
        handle.shutdown().await;
        let dispatcher = task.await?;
        if !args.json {
            println!();
            println!("{}", status_line(&dispatcher.view()));
        }
        result
    })
}

async fn drive(handle: &TimerHandle, args: &RunArgs) -> CliResult {
    let mut views = handle.subscribe_views();
    let mut events = handle.subscribe_events();

    if args.start {
        for event in handle.start().await? {
            print_event(&event, args.json)?;
        }
    }
    if !args.json {
        redraw(&handle.view())?;
    }

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                info!("interrupted, stopping");
                break;
            }
            changed = views.changed() => {
                if changed.is_err() {
                    break;
                }
                if !args.json {
                    let view = views.borrow_and_update().clone();
                    redraw(&view)?;
                }
            }
            event = events.recv() => match event {
                Ok(event) => print_event(&event, args.json)?,
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "event stream lagged"),
                Err(RecvError::Closed) => break,
            },
        }
    }
    Ok(())
}

fn print_event(event: &focusflow_core::Event, json: bool) -> CliResult {
    if json {
        println!("{}", serde_json::to_string(event)?);
    } else if let Some(line) = describe(event) {
        if event.is_completion() {
            println!();
        }
        println!("\r{line:<40}");
    }
    Ok(())
}

fn redraw(view: &TimerView) -> CliResult {
    let mut out = std::io::stdout().lock();
    write!(out, "\r{:<40}", status_line(view))?;
    out.flush()?;
    Ok(())
}
