mod command;
mod report;

pub use command::{build_message, quote, render_command, CommandSpec};
pub use report::{format_plan, format_plan_json};
