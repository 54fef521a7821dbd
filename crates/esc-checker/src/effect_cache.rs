//! Per-pass memo table of function effects.
//!
//! Records live in an arena indexed by declaration node. Each record moves
//! `Unvisited -> InProgress -> Done` once; a query that finds a record
//! `InProgress` is a recursive reference and is answered with `unknown`
//! instead of descending again, which is what makes the analysis terminate
//! on cyclic call graphs.

use esc_parser::NodeIndex;
use rustc_hash::FxHashMap;

use crate::effect_types::FunctionEffect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisitState {
    Unvisited,
    InProgress,
    Done,
}

/// Effect bookkeeping for one function-like declaration.
#[derive(Clone, Debug)]
pub struct FunctionEffectRecord {
    pub declaration: NodeIndex,
    pub state: VisitState,
    /// Effect inferred from the body, before declared clauses are applied.
    pub inferred: FunctionEffect,
}

#[derive(Debug, Default)]
pub struct EffectCache {
    records: Vec<FunctionEffectRecord>,
    by_declaration: FxHashMap<NodeIndex, usize>,
}

impl EffectCache {
    pub fn new() -> EffectCache {
        EffectCache::default()
    }

    pub fn state(&self, declaration: NodeIndex) -> VisitState {
        self.record(declaration)
            .map_or(VisitState::Unvisited, |r| r.state)
    }

    pub fn record(&self, declaration: NodeIndex) -> Option<&FunctionEffectRecord> {
        self.by_declaration
            .get(&declaration)
            .and_then(|&i| self.records.get(i))
    }

    /// The inferred effect of a finished declaration.
    pub fn get_done(&self, declaration: NodeIndex) -> Option<FunctionEffect> {
        self.record(declaration)
            .filter(|r| r.state == VisitState::Done)
            .map(|r| r.inferred)
    }

    pub fn mark_in_progress(&mut self, declaration: NodeIndex) {
        match self.by_declaration.get(&declaration) {
            Some(&i) => {
                if let Some(record) = self.records.get_mut(i) {
                    record.state = VisitState::InProgress;
                }
            }
            None => {
                self.by_declaration.insert(declaration, self.records.len());
                self.records.push(FunctionEffectRecord {
                    declaration,
                    state: VisitState::InProgress,
                    inferred: FunctionEffect::NONE,
                });
            }
        }
    }

    pub fn mark_done(&mut self, declaration: NodeIndex, inferred: FunctionEffect) {
        if !self.by_declaration.contains_key(&declaration) {
            self.mark_in_progress(declaration);
        }
        if let Some(record) = self
            .by_declaration
            .get(&declaration)
            .and_then(|&i| self.records.get_mut(i))
        {
            record.state = VisitState::Done;
            record.inferred = inferred;
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &FunctionEffectRecord> {
        self.records.iter()
    }
}
