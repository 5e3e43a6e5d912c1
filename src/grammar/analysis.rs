/*
    Set computations over a grammar: nullability, reachability and
    productivity
*/

use std::collections::BTreeSet;

use super::{Grammar, Symbol};

impl Grammar {
    /// The non-terminals that derive the empty string.
    ///
    /// Fixpoint iteration: the set only grows and is bounded by `|N|`.
    pub fn nullable(&self) -> BTreeSet<String> {
        self.closure(|symbol, nullable| match symbol {
            Symbol::Terminal(_) => false,
            Symbol::Nonterminal(n) => nullable.contains(n),
        })
    }

    /// The non-terminals that derive at least one terminal string.
    pub fn productive(&self) -> BTreeSet<String> {
        self.closure(|symbol, productive| match symbol {
            Symbol::Terminal(_) => true,
            Symbol::Nonterminal(n) => productive.contains(n),
        })
    }

    // Grows a set of non-terminals until no head has a body whose every
    // symbol satisfies `accepts` against the current set
    fn closure(&self, accepts: impl Fn(&Symbol, &BTreeSet<String>) -> bool) -> BTreeSet<String> {
        let mut found = BTreeSet::new();
        let mut changed = true;

        while changed {
            changed = false;
            for (head, rewrite) in &self.rules {
                if found.contains(head) {
                    continue;
                }
                if rewrite.iter().any(|body| body.iter().all(|symbol| accepts(symbol, &found))) {
                    found.insert(head.clone());
                    changed = true;
                }
            }
        }

        found
    }

    /// The non-terminals reachable from the start symbol, the start symbol
    /// included.
    pub fn reachable(&self) -> BTreeSet<String> {
        let mut reachable = BTreeSet::from([self.start_symbol.clone()]);
        let mut stack = vec![self.start_symbol.as_str()];

        while let Some(head) = stack.pop() {
            for next in self.bodies(head).iter().flatten().filter_map(Symbol::as_nonterminal) {
                if reachable.insert(next.to_string()) {
                    stack.push(next);
                }
            }
        }

        reachable
    }

    /// Whether the language of the grammar contains the empty string
    pub fn generates_empty(&self) -> bool {
        self.nullable().contains(&self.start_symbol)
    }
}
