pub mod coordinator;
pub mod extractor;
pub mod graph;
pub mod language;
pub mod patterns;
pub mod resolver;
pub mod scanner;

pub use coordinator::{ScanCoordinator, ScanOutcome, ScanStats};
pub use extractor::{DependencyExtractor, ImportToken};
pub use graph::DependencyGraph;
pub use language::Language;
pub use patterns::{DeclarationKind, PatternRegistry};
pub use resolver::{AliasTable, PathResolver, ResolvedDependency};
pub use scanner::{ExclusionSet, FileScanner, SourceFile};
