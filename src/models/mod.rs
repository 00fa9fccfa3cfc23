pub mod report;

pub use report::{ArtifactKind, AuditReport, SystemReport};
