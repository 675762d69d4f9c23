pub mod plan;
pub mod run;

pub use plan::{build_context, run_plan};
pub use run::{run_run, run_with_executor};
