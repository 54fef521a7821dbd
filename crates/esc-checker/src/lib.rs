//! Checked-throws analysis for the ErrorScript compiler.
//!
//! This crate is organized into several modules:
//! - `context` - `CheckerContext` for per-pass state and `CheckerOptions`
//! - `state` - `CheckerState`, the entry point of a pass
//! - `effect_types` / `effect_cache` - effect values and the tri-state memo table
//! - `type_resolution` / `expr_types` - the static types effects are made of
//! - `call_resolution` / `overload_resolution` - what a call invokes
//! - `expr_effects` / `flow_effects` / `function_effects` - effect inference
//! - `control_flow_narrowing` - catch variables narrowed by type guards
//! - `promise_effects` - rejection mapping for promise plumbing
//! - `call_site_enforcer` - unhandled-effect diagnostics
//! - `directives` - `@ts-expect-exception` suppression
//! - `native_throw_map` - effects of built-in library functions
//!
//! A pass is a pure function from one bound file to diagnostics. It owns
//! every cache it builds, so re-running it on an unchanged file gives the
//! same answer and nothing leaks between passes.

mod assignment_checker;
mod call_resolution;
pub mod call_site_enforcer;
pub mod context;
mod control_flow_narrowing;
pub mod directives;
pub mod effect_cache;
pub mod effect_types;
pub mod error_reporter;
mod expr_effects;
mod expr_types;
mod flow_effects;
mod function_effects;
pub mod native_throw_map;
mod overload_resolution;
mod promise_effects;
mod signatures;
pub mod state;
mod type_resolution;

pub use context::{CheckerContext, CheckerOptions};
pub use directives::{DirectiveTable, EXPECT_EXCEPTION_PRAGMA, SuppressionDirective};
pub use effect_cache::{EffectCache, FunctionEffectRecord, VisitState};
pub use effect_types::{DeclaredEffect, ExprEffect, FunctionEffect, ThrownType};
pub use native_throw_map::{NativeEffect, lookup_native_call, lookup_native_construct};
pub use state::CheckerState;

pub mod diagnostics {
    pub use esc_common::diagnostics::{
        Diagnostic, DiagnosticCategory, diagnostic_codes, format_message,
    };
}

#[cfg(test)]
#[path = "../tests/test_utils.rs"]
mod test_utils;

#[cfg(test)]
#[path = "../tests/effect_tests.rs"]
mod effect_tests;

#[cfg(test)]
#[path = "../tests/promise_tests.rs"]
mod promise_tests;

#[cfg(test)]
#[path = "../tests/directive_tests.rs"]
mod directive_tests;

#[cfg(test)]
#[path = "../tests/overload_tests.rs"]
mod overload_tests;

#[cfg(test)]
#[path = "../tests/effect_cache_tests.rs"]
mod effect_cache_tests;

#[cfg(test)]
#[path = "../tests/native_throw_map_tests.rs"]
mod native_throw_map_tests;

#[cfg(test)]
#[path = "../tests/ts2322_tests.rs"]
mod ts2322_tests;

#[cfg(test)]
#[path = "../tests/narrowing_tests.rs"]
mod narrowing_tests;
