/*
    Binarization: the final rewrite into `A -> B C` and `A -> a` bodies
*/

use std::collections::{BTreeMap, BTreeSet};

use crate::grammar::*;

/// Supplier of non-terminal names that clash with nothing in the grammar
/// and with nothing handed out before.
///
/// The counter only grows, so names are unique across a whole run as long
/// as the same value is passed along.
#[derive(Debug, Clone)]
pub struct FreshSymbols {
    counter: usize,
    taken: BTreeSet<String>,
}

impl FreshSymbols {
    pub fn for_grammar(grammar: &Grammar) -> Self {
        FreshSymbols {
            counter: 0,
            taken: grammar.nonterminals().iter().chain(grammar.terminals()).cloned().collect(),
        }
    }

    // Number of names handed out so far
    pub fn issued(&self) -> usize {
        self.counter
    }

    fn claim(&mut self, name: String) -> Option<String> {
        if self.taken.insert(name.clone()) {
            self.counter += 1;
            Some(name)
        } else {
            None
        }
    }

    /// `T_t` for terminal `t`, or `T_t_k` if that is taken
    pub fn terminal_wrapper(&mut self, terminal: &str) -> String {
        if let Some(name) = self.claim(format!("T_{}", terminal)) {
            return name;
        }
        let mut suffix = self.counter;
        loop {
            suffix += 1;
            if let Some(name) = self.claim(format!("T_{}_{}", terminal, suffix)) {
                return name;
            }
        }
    }

    /// The next `X<k>` link of a split body
    pub fn chain_link(&mut self) -> String {
        let mut suffix = self.counter;
        loop {
            suffix += 1;
            if let Some(name) = self.claim(format!("X{}", suffix)) {
                return name;
            }
        }
    }
}

/// Rewrites every body into normal form shape.
///
/// Terminals inside bodies longer than one symbol are replaced by helper
/// non-terminals `T_t -> t`, and bodies longer than two symbols are split
/// left to right: `A -> X1 X2 X3` becomes `A -> X1 N1` and `N1 -> X2 X3`.
/// Bodies of at most one symbol are left alone; by this point that means
/// a single terminal, or the empty body of a nullable start symbol.
pub fn binarize(grammar: Grammar, mut fresh: FreshSymbols) -> (Grammar, FreshSymbols) {
    let mut nonterminals = grammar.nonterminals().clone();
    let mut rules = BTreeMap::<String, Rewrite>::new();
    let mut wrappers = BTreeMap::<String, String>::new();

    for (head, body) in grammar.productions() {
        if body.len() <= 1 {
            rules.entry(head.to_string()).or_default().push(body.clone());
            continue;
        }

        let symbols: Alternative = body.iter()
            .map(|symbol| match symbol {
                Symbol::Terminal(t) => Symbol::Nonterminal(wrappers
                    .entry(t.clone())
                    .or_insert_with(|| fresh.terminal_wrapper(t))
                    .clone()),
                nonterminal => nonterminal.clone(),
            })
            .collect();

        let mut left = head.to_string();
        let mut rest = symbols.as_slice();
        while let [first, tail @ ..] = rest {
            if tail.len() < 2 {
                break;
            }
            let link = fresh.chain_link();
            nonterminals.insert(link.clone());
            rules.entry(left).or_default().push(vec![first.clone(), Symbol::Nonterminal(link.clone())]);
            left = link;
            rest = tail;
        }
        rules.entry(left).or_default().push(rest.to_vec());
    }

    for (terminal, wrapper) in wrappers {
        nonterminals.insert(wrapper.clone());
        rules.insert(wrapper, vec![vec![Symbol::Terminal(terminal)]]);
    }

    (grammar.rebuild(nonterminals, rules), fresh)
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    fn s_nonterminal(text: &str) -> Symbol {
        Symbol::Nonterminal(text.to_string())
    }

    fn s_terminal(text: &str) -> Symbol {
        Symbol::Terminal(text.to_string())
    }

    #[test]
    fn split_long_body() {
        let grammar = Grammar::new(
            ["S", "A", "B", "C", "D"],
            ["a"],
            vec![
                ("S", vec![vec!["A", "B", "C", "D"]]),
                ("A", vec![vec!["a"]]),
                ("B", vec![vec!["a"]]),
                ("C", vec![vec!["a"]]),
                ("D", vec![vec!["a"]]),
            ],
            "S"
        ).unwrap();
        let fresh = FreshSymbols::for_grammar(&grammar);

        let (binarized, fresh) = binarize(grammar, fresh);

        assert_eq!(fresh.issued(), 2);
        assert_eq!(binarized.bodies("S"), &[vec![s_nonterminal("A"), s_nonterminal("X1")]]);
        assert_eq!(binarized.bodies("X1"), &[vec![s_nonterminal("B"), s_nonterminal("X2")]]);
        assert_eq!(binarized.bodies("X2"), &[vec![s_nonterminal("C"), s_nonterminal("D")]]);
        assert!(binarized.is_cnf());
    }

    #[test]
    fn wrap_terminals_beside_other_symbols() {
        let grammar = Grammar::new(
            ["S"],
            ["a", "b"],
            vec![("S", vec![vec!["a", "S", "b"], vec!["a", "b"], vec!["b"]])],
            "S"
        ).unwrap();
        let fresh = FreshSymbols::for_grammar(&grammar);

        let (binarized, _) = binarize(grammar, fresh);

        assert_eq!(binarized.bodies("T_a"), &[vec![s_terminal("a")]]);
        assert_eq!(binarized.bodies("T_b"), &[vec![s_terminal("b")]]);
        assert!(binarized.bodies("S").contains(&vec![s_terminal("b")]));
        assert!(binarized.bodies("S").contains(&vec![s_nonterminal("T_a"), s_nonterminal("T_b")]));
        assert!(binarized.is_cnf());
    }

    #[test]
    fn avoid_existing_names() {
        let grammar = Grammar::new(
            ["S", "T_a", "X1"],
            ["a"],
            vec![
                ("S", vec![vec!["a", "T_a", "X1"]]),
                ("T_a", vec![vec!["a"]]),
                ("X1", vec![vec!["a"]]),
            ],
            "S"
        ).unwrap();
        let fresh = FreshSymbols::for_grammar(&grammar);

        let (binarized, fresh) = binarize(grammar, fresh);

        let introduced = binarized.nonterminals().iter()
            .filter(|n| !["S", "T_a", "X1"].contains(&n.as_str()))
            .collect_vec();
        assert_eq!(introduced.len(), 2);
        assert_eq!(fresh.issued(), 2);
        assert_eq!(binarized.bodies("T_a"), &[vec![s_terminal("a")]]);
        assert!(binarized.is_cnf());
    }

    #[test]
    fn fresh_names_never_repeat() {
        let grammar = Grammar::new(["S"], ["a"], vec![("S", vec![vec!["a"]])], "S").unwrap();
        let mut fresh = FreshSymbols::for_grammar(&grammar);

        let mut names = (0..50).map(|_| fresh.chain_link()).collect_vec();
        for terminal in ["a", "a", "b"] {
            names.push(fresh.terminal_wrapper(terminal));
        }

        assert_eq!(names.iter().unique().count(), names.len());
        assert!(names.iter().all(|n| n != "S" && n != "a"));
    }
}
