/*
    This module brings grammars into Chomsky Normal Form
*/

mod binarize;
mod epsilon;
mod prune;
mod unit;

use std::fmt::Display;

use crate::grammar::*;

pub use binarize::{binarize, FreshSymbols};
pub use epsilon::eliminate_epsilon;
pub use prune::{prune_unproductive, prune_unreachable};
pub use unit::eliminate_units;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Epsilon,
    Unit,
    Reachability,
    Productivity,
    Binarization,
}

impl Phase {
    // In the order they run
    pub const ALL: [Phase; 5] = [
        Phase::Epsilon,
        Phase::Unit,
        Phase::Reachability,
        Phase::Productivity,
        Phase::Binarization,
    ];
}

impl Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Epsilon => write!(f, "epsilon-elimination"),
            Phase::Unit => write!(f, "unit-elimination"),
            Phase::Reachability => write!(f, "reachability pruning"),
            Phase::Productivity => write!(f, "productivity pruning"),
            Phase::Binarization => write!(f, "binarization"),
        }
    }
}

type Trace<'a> = Box<dyn FnMut(Phase, &Grammar) + 'a>;

/// Runs the five phases in order, optionally reporting the grammar each
/// one produced.
#[derive(Default)]
pub struct Normalizer<'a> {
    trace: Option<Trace<'a>>,
}

impl<'a> Normalizer<'a> {
    pub fn new() -> Self {
        Normalizer { trace: None }
    }

    /// Calls `trace` with the output of every phase as soon as it is done
    pub fn with_trace(trace: impl FnMut(Phase, &Grammar) + 'a) -> Self {
        Normalizer { trace: Some(Box::new(trace)) }
    }

    pub fn run(&mut self, grammar: Grammar) -> Grammar {
        let grammar = self.step(Phase::Epsilon, eliminate_epsilon(grammar));
        let grammar = self.step(Phase::Unit, eliminate_units(grammar));
        let grammar = self.step(Phase::Reachability, prune_unreachable(grammar));
        let grammar = self.step(Phase::Productivity, prune_unproductive(grammar));

        let fresh = FreshSymbols::for_grammar(&grammar);
        let (grammar, _) = binarize(grammar, fresh);
        self.step(Phase::Binarization, grammar)
    }

    fn step(&mut self, phase: Phase, grammar: Grammar) -> Grammar {
        if let Some(trace) = self.trace.as_mut() {
            trace(phase, &grammar);
        }
        grammar
    }
}

/// Brings `grammar` into Chomsky Normal Form, preserving its language.
pub fn normalize(grammar: Grammar) -> Grammar {
    Normalizer::new().run(grammar)
}

/// Validates a grammar given as plain labels and normalizes it.
///
/// See [`Grammar::new`] for how the labels are interpreted.
pub fn try_normalize<N, T, P, H, B, S>(nonterminals: N, terminals: T, productions: P, start: S) -> Result<Grammar, GrammarError>
where
    N: IntoIterator,
    N::Item: Into<String>,
    T: IntoIterator,
    T::Item: Into<String>,
    P: IntoIterator<Item = (H, Vec<Vec<B>>)>,
    H: Into<String>,
    B: AsRef<str>,
    S: Into<String>,
{
    Grammar::new(nonterminals, terminals, productions, start).map(normalize)
}
