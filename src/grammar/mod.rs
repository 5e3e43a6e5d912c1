/*
    This module is for storing and manipulating grammars
*/

mod analysis;
mod cnf;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;

use itertools::Itertools;

use crate::error_handling::ErrorType;

pub use cnf::CnfViolation;

// Marker accepted in place of a body symbol to spell out the empty body
pub const EPSILON: &str = "ε";

// The base unit in a grammar rule
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash)]
pub enum Symbol {
    Terminal(String),
    Nonterminal(String),
}

impl Symbol {
    pub fn text(&self) -> &str {
        match self {
            Symbol::Terminal(t) | Symbol::Nonterminal(t) => t,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    pub fn as_nonterminal(&self) -> Option<&str> {
        match self {
            Symbol::Nonterminal(n) => Some(n),
            Symbol::Terminal(_) => None,
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text())
    }
}

// The symbols in a single alternative. An empty alternative is ε.
pub type Alternative = Vec<Symbol>;

// The alternatives of a rewrite rule
pub type Rewrite = Vec<Alternative>;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum GrammarError {
    // The start symbol is not one of the non-terminals
    StartNotNonterminal(String),
    // A symbol was declared both as a terminal and as a non-terminal
    SymbolClash(String),
    // The epsilon marker was declared as a symbol
    EpsilonDeclared,
    // Productions were given for something that is not a non-terminal
    UndefinedHead(String),
    // A body uses a symbol that was never declared
    UndefinedSymbol { head: String, symbol: String },
}

impl ErrorType for GrammarError {}

impl std::error::Error for GrammarError {}

impl Display for GrammarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrammarError::StartNotNonterminal(s) => write!(f, "Start symbol `{}` is not a non-terminal", s),
            GrammarError::SymbolClash(s) => write!(f, "`{}` is declared as both a terminal and a non-terminal", s),
            GrammarError::EpsilonDeclared => write!(f, "`{}` is reserved for the empty body and cannot be declared", EPSILON),
            GrammarError::UndefinedHead(s) => write!(f, "Productions given for `{}`, which is not a non-terminal", s),
            GrammarError::UndefinedSymbol { head, symbol } => write!(f, "A production of `{}` uses undeclared symbol `{}`", head, symbol),
        }
    }
}

/// A context-free grammar `(N, T, P, S)`.
///
/// Every value of this type has passed validation: `N` and `T` are
/// disjoint, `S ∈ N`, every key of `P` is in `N` and every body symbol
/// is declared with the matching kind.
/// Collections are ordered, so iteration (and therefore output) is
/// deterministic.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Grammar {
    start_symbol: String,
    nonterminals: BTreeSet<String>,
    terminals: BTreeSet<String>,
    rules: BTreeMap<String, Rewrite>,
}

impl Grammar {
    /// Builds a grammar out of plain string labels.
    ///
    /// Each body symbol is classified by looking it up in `nonterminals`
    /// and `terminals`; [`EPSILON`] stands for "nothing" and may be used to
    /// write an empty body. Several entries for the same head are merged.
    pub fn new<N, T, P, H, B, S>(nonterminals: N, terminals: T, productions: P, start: S) -> Result<Self, GrammarError>
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
        let nonterminals: BTreeSet<String> = nonterminals.into_iter().map(Into::into).collect();
        let terminals: BTreeSet<String> = terminals.into_iter().map(Into::into).collect();

        let mut rules = BTreeMap::<String, Rewrite>::new();
        for (head, bodies) in productions {
            let head = head.into();
            let mut rewrite = Vec::with_capacity(bodies.len());
            for body in bodies {
                rewrite.push(classify_body(&head, &body, &nonterminals, &terminals)?);
            }
            rules.entry(head).or_default().extend(rewrite);
        }

        Self::from_parts(start.into(), nonterminals, terminals, rules)
    }

    /// Builds a grammar whose non-terminals are the keys of `rules` and
    /// whose terminals are exactly those used in the bodies.
    pub fn from_rules(start_symbol: String, rules: BTreeMap<String, Rewrite>) -> Result<Self, GrammarError> {
        let nonterminals = rules.keys().cloned().collect();
        let terminals = rules.values()
            .flatten()
            .flatten()
            .filter(|symbol| symbol.is_terminal())
            .map(|symbol| symbol.text().to_string())
            .collect();

        Self::from_parts(start_symbol, nonterminals, terminals, rules)
    }

    /// Builds a grammar from already classified symbols, checking every
    /// construction invariant.
    pub fn from_parts(
        start_symbol: String,
        nonterminals: BTreeSet<String>,
        terminals: BTreeSet<String>,
        rules: BTreeMap<String, Rewrite>,
    ) -> Result<Self, GrammarError> {
        if nonterminals.contains(EPSILON) || terminals.contains(EPSILON) {
            return Err(GrammarError::EpsilonDeclared);
        }
        if let Some(clash) = nonterminals.intersection(&terminals).next() {
            return Err(GrammarError::SymbolClash(clash.clone()));
        }
        if !nonterminals.contains(&start_symbol) {
            return Err(GrammarError::StartNotNonterminal(start_symbol));
        }

        for (head, rewrite) in &rules {
            if !nonterminals.contains(head) {
                return Err(GrammarError::UndefinedHead(head.clone()));
            }

            let undeclared = rewrite.iter().flatten().find(|symbol| match symbol {
                Symbol::Terminal(t) => !terminals.contains(t),
                Symbol::Nonterminal(n) => !nonterminals.contains(n),
            });
            if let Some(symbol) = undeclared {
                return Err(GrammarError::UndefinedSymbol {
                    head: head.clone(),
                    symbol: symbol.text().to_string()
                });
            }
        }

        Ok(Grammar {
            start_symbol,
            nonterminals,
            terminals,
            rules,
        })
    }

    /// Re-roots the grammar at another non-terminal
    pub fn with_start_symbol(self, start_symbol: String) -> Result<Self, GrammarError> {
        Self::from_parts(start_symbol, self.nonterminals, self.terminals, self.rules)
    }

    /// Returns a snapshot sharing `S` and `T` with `self` but with new
    /// non-terminals and productions. Only the normalization phases use
    /// this, and they keep `rules` keyed by members of `nonterminals`.
    pub(crate) fn rebuild(&self, nonterminals: BTreeSet<String>, rules: BTreeMap<String, Rewrite>) -> Grammar {
        debug_assert!(rules.keys().all(|head| nonterminals.contains(head)));

        Grammar {
            start_symbol: self.start_symbol.clone(),
            nonterminals,
            terminals: self.terminals.clone(),
            rules,
        }
    }

    pub fn start_symbol(&self) -> &str {
        &self.start_symbol
    }

    pub fn nonterminals(&self) -> &BTreeSet<String> {
        &self.nonterminals
    }

    pub fn terminals(&self) -> &BTreeSet<String> {
        &self.terminals
    }

    pub fn rules(&self) -> &BTreeMap<String, Rewrite> {
        &self.rules
    }

    // The bodies of `head`, empty if it has none
    pub fn bodies(&self, head: &str) -> &[Alternative] {
        self.rules.get(head).map(Vec::as_slice).unwrap_or(&[])
    }

    // Every production as a (head, body) pair
    pub fn productions(&self) -> impl Iterator<Item = (&str, &Alternative)> + '_ {
        self.rules.iter()
            .flat_map(|(head, rewrite)| rewrite.iter().map(move |body| (head.as_str(), body)))
    }

    pub fn production_count(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }
}

fn classify_body<B: AsRef<str>>(
    head: &str,
    body: &[B],
    nonterminals: &BTreeSet<String>,
    terminals: &BTreeSet<String>,
) -> Result<Alternative, GrammarError> {
    body.iter()
        .map(AsRef::as_ref)
        .filter(|text| *text != EPSILON)
        .map(|text| {
            if nonterminals.contains(text) {
                Ok(Symbol::Nonterminal(text.to_string()))
            } else if terminals.contains(text) {
                Ok(Symbol::Terminal(text.to_string()))
            } else {
                Err(GrammarError::UndefinedSymbol {
                    head: head.to_string(),
                    symbol: text.to_string()
                })
            }
        })
        .collect()
}

impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Start: {}", self.start_symbol)?;
        writeln!(f, "N: {{{}}}", self.nonterminals.iter().join(", "))?;
        writeln!(f, "T: {{{}}}", self.terminals.iter().join(", "))?;
        write!(f, "P:")?;
        for (head, body) in self.productions() {
            if body.is_empty() {
                write!(f, "\n  {} -> {}", head, EPSILON)?;
            } else {
                write!(f, "\n  {} -> {}", head, body.iter().join(" "))?;
            }
        }
        Ok(())
    }
}
