//! ErrorScript: checked throws and promise rejections for TypeScript.
//!
//! The pipeline is split across the `esc-*` crates; this crate re-exports
//! them and adds what a host needs on top:
//! - `project` - per-file state with versioned results for editor hosts
//! - `tracing_config` - opt-in `tracing` subscriber setup
//!
//! ```
//! use errorscript::{CheckerOptions, Project};
//!
//! let mut project = Project::new(CheckerOptions::default());
//! project.set_file("a.ts".to_string(), "JSON.parse(\"{\");".to_string());
//! let diagnostics = project.get_diagnostics("a.ts").map(|d| d.value).unwrap_or_default();
//! assert_eq!(diagnostics[0].code, 18063);
//! ```

pub use esc_binder as binder;
pub use esc_checker as checker;
pub use esc_common as common;
pub use esc_parser as parser;
pub use esc_scanner as scanner;
pub use esc_solver as solver;

pub use esc_checker::CheckerOptions;
pub use esc_common::{Diagnostic, DiagnosticCategory, LineMap};

pub mod project;
pub use project::{EffectSummary, Project, ProjectFile, Versioned, check_source};

// Tracing subscriber setup, enabled through ESC_LOG / RUST_LOG
pub mod tracing_config;

#[cfg(test)]
#[path = "tests/project_tests.rs"]
mod project_tests;
