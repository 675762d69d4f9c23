mod args;

pub use args::{Cli, Commands, PlanArgs, RequestOptions, RunArgs};
