/*
    Epsilon-elimination: removes empty bodies, expanding every body over
    the nullable symbols it contains
*/

use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;

use crate::grammar::*;

/// Removes every empty body except a single `S -> ε` for a nullable start
/// symbol.
///
/// A body with `m` nullable positions expands into up to `2^m` variants.
/// This is inherent to the construction; identical variants are only kept
/// once.
pub fn eliminate_epsilon(grammar: Grammar) -> Grammar {
    let nullable = grammar.nullable();
    let start = grammar.start_symbol();

    let mut rules = BTreeMap::new();
    for (head, rewrite) in grammar.rules() {
        // Empty variants are dropped: every use of `head` inside a body
        // already has a variant without it
        let mut bodies: Rewrite = rewrite.iter()
            .flat_map(|body| variants(body, &nullable))
            .filter(|body| !body.is_empty())
            .unique()
            .collect();

        if head == start && nullable.contains(head) {
            bodies.push(Alternative::new());
        }
        rules.insert(head.clone(), bodies);
    }

    grammar.rebuild(grammar.nonterminals().clone(), rules)
}

// Every body obtained by deleting a subset of the nullable positions of
// `body`, the untouched body first
pub(crate) fn variants(body: &[Symbol], nullable: &BTreeSet<String>) -> Vec<Alternative> {
    body.iter().fold(vec![Alternative::new()], |prefixes, symbol| {
        let droppable = symbol.as_nonterminal().is_some_and(|n| nullable.contains(n));

        prefixes.into_iter()
            .flat_map(|prefix| {
                let mut kept = prefix.clone();
                kept.push(symbol.clone());
                if droppable {
                    vec![kept, prefix]
                } else {
                    vec![kept]
                }
            })
            .collect()
    })
}
