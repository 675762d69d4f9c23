mod context;

pub use context::{Context, Language, NamespaceReference, ProjectFile, Task, Workflow};
