/*
    Unit-elimination: inlines productions of the form `A -> B`
*/

use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;

use crate::grammar::*;

type UnitGraph<'a> = BTreeMap<&'a str, BTreeSet<&'a str>>;

// The non-terminal a unit body consists of
fn unit_target(body: &Alternative) -> Option<&str> {
    match body.as_slice() {
        [Symbol::Nonterminal(n)] => Some(n),
        _ => None,
    }
}

/// Replaces the unit bodies of every head by the non-unit bodies of all
/// the non-terminals it reaches through unit productions.
pub fn eliminate_units(grammar: Grammar) -> Grammar {
    let graph: UnitGraph = grammar.rules().iter()
        .map(|(head, rewrite)| (head.as_str(), rewrite.iter().filter_map(unit_target).collect()))
        .collect();
    let start = grammar.start_symbol();

    let mut rules = BTreeMap::new();
    for head in grammar.rules().keys() {
        let bodies: Rewrite = unit_closure(head, &graph).into_iter()
            .flat_map(|source| grammar.bodies(source))
            .filter(|body| unit_target(body).is_none())
            // Only the start symbol may keep an empty body
            .filter(|body| !body.is_empty() || head == start)
            .unique()
            .cloned()
            .collect();

        rules.insert(head.clone(), bodies);
    }

    grammar.rebuild(grammar.nonterminals().clone(), rules)
}

// `head` followed by everything reachable from it in the unit graph, each
// visited once
fn unit_closure<'a>(head: &'a str, graph: &UnitGraph<'a>) -> Vec<&'a str> {
    let mut visited = BTreeSet::from([head]);
    let mut order = vec![head];
    let mut stack = vec![head];

    while let Some(current) = stack.pop() {
        for &next in graph.get(current).into_iter().flatten() {
            if visited.insert(next) {
                order.push(next);
                stack.push(next);
            }
        }
    }

    order
}
