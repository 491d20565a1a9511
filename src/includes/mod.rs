mod graph_generator;
mod scanner;

pub use graph_generator::{IncludeGraphConfig, IncludeGraphGenerator};
pub use scanner::{Include, IncludeKind, IncludeScanner, SourceFile};
