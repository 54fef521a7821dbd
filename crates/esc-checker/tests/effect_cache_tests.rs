use crate::context::CheckerOptions;
use crate::effect_cache::{EffectCache, VisitState};
use crate::effect_types::{FunctionEffect, ThrownType};
use crate::test_utils::TestProgram;
use esc_parser::NodeIndex;
use esc_solver::TypeId;

#[test]
fn test_records_move_through_states_once() {
    let mut cache = EffectCache::new();
    let decl = NodeIndex(7);
    assert_eq!(cache.state(decl), VisitState::Unvisited);
    assert!(cache.get_done(decl).is_none());

    cache.mark_in_progress(decl);
    assert_eq!(cache.state(decl), VisitState::InProgress);
    assert!(cache.get_done(decl).is_none());

    let effect = FunctionEffect::throwing(ThrownType(TypeId::STRING));
    cache.mark_done(decl, effect);
    assert_eq!(cache.state(decl), VisitState::Done);
    assert_eq!(cache.get_done(decl), Some(effect));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_mark_done_without_progress_creates_record() {
    let mut cache = EffectCache::new();
    cache.mark_done(NodeIndex(3), FunctionEffect::NONE);
    assert_eq!(cache.state(NodeIndex(3)), VisitState::Done);
    assert_eq!(cache.records().count(), 1);
}

#[test]
fn test_unknown_absorbs_in_union() {
    let program = TestProgram::new("");
    let types = &program.types;
    let error = types.builtin_type("Error").unwrap_or(TypeId::ERROR);
    let joined = ThrownType(error).union(ThrownType::UNKNOWN, types);
    assert!(joined.is_unknown());
    assert_eq!(ThrownType::NONE.union(ThrownType(error), types), ThrownType(error));
}

#[test]
fn test_analysis_fills_cache_for_reachable_functions_only() {
    let program = TestProgram::new(
        "function a() { b(); }\nfunction b() { throw new Error(\"b\"); }\nfunction unused() { }",
    );
    let a = program.function("a");
    let b = program.function("b");
    let unused = program.function("unused");
    let mut checker = program.checker(CheckerOptions::default());
    let _ = checker.get_effect_of_declaration(a);
    assert_eq!(checker.ctx.effect_cache.state(a), VisitState::Done);
    assert_eq!(checker.ctx.effect_cache.state(b), VisitState::Done);
    assert_eq!(checker.ctx.effect_cache.state(unused), VisitState::Unvisited);
}

#[test]
fn test_query_is_stable_across_repeated_calls() {
    let program = TestProgram::new("function a() { throw new RangeError(\"r\"); }");
    let a = program.function("a");
    let mut checker = program.checker(CheckerOptions::default());
    let first = checker.get_effect_of_declaration(a);
    let second = checker.get_effect_of_declaration(a);
    assert_eq!(first, second);
    assert_eq!(checker.ctx.effect_cache.len(), 1);
}
