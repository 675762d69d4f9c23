//! @dose
//! purpose: This is the library crate root for aidex, exposing the context-assembly pipeline
//!     for use as both a CLI tool and a library. It re-exports key types and functions from
//!     all modules for convenient access by consumers.
//!
//! when-editing:
//!     - !All public modules must be declared here with pub mod
//!     - Keep the re-export list organized by module
//!
//! invariants:
//!     - The public API surface is stable - all re-exported items are public contract
//!     - The library never writes to the project; only the run command executes anything

pub mod cli;
pub mod commands;
pub mod config;
pub mod dependency;
pub mod exclusion;
pub mod executor;
pub mod formatter;
pub mod logging;
pub mod parser;
pub mod pipeline;
pub mod types;

// Re-export main types for convenience
pub use cli::{Cli, Commands, PlanArgs, RequestOptions, RunArgs};
pub use config::{BaselineTable, Config};
pub use dependency::{implementation_path_for_test, namespace_to_path, underscore};
pub use executor::{CommandExecutor, ExecError, ExecutionOutput, ShellExecutor};
pub use formatter::{render_command, CommandSpec};
pub use parser::{ElixirExtractor, ExtractError, ExtractorFactory, ReferenceExtractor};
pub use pipeline::{Environment, Pipeline, Stage};
pub use types::{Context, Language, NamespaceReference, ProjectFile, Task, Workflow};
