/*
    Removes useless non-terminals: those the start symbol never reaches and
    those that never derive a terminal string
*/

use std::collections::{BTreeMap, BTreeSet};

use crate::grammar::*;

/// Drops every non-terminal, and its productions, that is not reachable
/// from the start symbol.
pub fn prune_unreachable(grammar: Grammar) -> Grammar {
    let reachable = grammar.reachable();
    retain(&grammar, &reachable)
}

/// Drops every non-terminal that derives no terminal string.
///
/// Bodies mentioning a dropped non-terminal can never finish a derivation,
/// so they are dropped with it. That can cut off non-terminals only those
/// bodies referred to, which are swept afterwards. If the start symbol
/// itself is unproductive the result is the empty-language grammar
/// `N = {S}` without productions.
pub fn prune_unproductive(grammar: Grammar) -> Grammar {
    let productive = grammar.productive();
    let start = grammar.start_symbol();

    if !productive.contains(start) {
        return grammar.rebuild(BTreeSet::from([start.to_string()]), BTreeMap::new());
    }

    let rules = grammar.rules().iter()
        .filter(|(head, _)| productive.contains(*head))
        .map(|(head, rewrite)| {
            let bodies: Rewrite = rewrite.iter()
                .filter(|body| body.iter()
                    .filter_map(Symbol::as_nonterminal)
                    .all(|n| productive.contains(n)))
                .cloned()
                .collect();
            (head.clone(), bodies)
        })
        .collect();
    let nonterminals = grammar.nonterminals().intersection(&productive).cloned().collect();

    let scrubbed = grammar.rebuild(nonterminals, rules);
    let reachable = scrubbed.reachable();
    retain(&scrubbed, &reachable)
}

fn retain(grammar: &Grammar, keep: &BTreeSet<String>) -> Grammar {
    let nonterminals = grammar.nonterminals().intersection(keep).cloned().collect();
    let rules = grammar.rules().iter()
        .filter(|(head, _)| keep.contains(*head))
        .map(|(head, rewrite)| (head.clone(), rewrite.clone()))
        .collect();

    grammar.rebuild(nonterminals, rules)
}
