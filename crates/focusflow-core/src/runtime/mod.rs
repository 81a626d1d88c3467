//! Execution model: a single dispatcher consuming one message queue, and an
//! optional tokio service that feeds it from timers and a command channel.

mod dispatcher;
mod service;

pub use dispatcher::{Command, Dispatcher, Message};
pub use service::{ServiceConfig, TimerHandle, TimerService};
