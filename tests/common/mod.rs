/*
    Membership oracles that do not depend on the normalizer
*/

#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};

use chomsky::{Grammar, Symbol};

pub type Word = Vec<String>;

pub fn word(text: &str) -> Word {
    text.chars().map(|c| c.to_string()).collect()
}

// Words bucketed by length, index `k` holding the words of length `k`
type Layers = Vec<BTreeSet<Word>>;

fn concat(left: &Layers, right: &Layers, max_len: usize) -> Layers {
    let mut out = vec![BTreeSet::new(); max_len + 1];
    for (prefix_len, prefixes) in left.iter().enumerate() {
        for (suffix_len, suffixes) in right.iter().enumerate().take(max_len + 1 - prefix_len) {
            for prefix in prefixes {
                for suffix in suffixes {
                    out[prefix_len + suffix_len].insert([prefix.clone(), suffix.clone()].concat());
                }
            }
        }
    }
    out
}

// Every word of at most `max_len` terminals the grammar generates. Works
// on any grammar, empty and unit bodies included.
pub fn bounded_language(grammar: &Grammar, max_len: usize) -> BTreeSet<Word> {
    let nothing: Layers = vec![BTreeSet::new(); max_len + 1];
    let mut derives: BTreeMap<&str, Layers> = BTreeMap::new();
    let mut changed = true;

    while changed {
        changed = false;
        for (head, body) in grammar.productions() {
            let mut words = nothing.clone();
            words[0].insert(Word::new());

            for symbol in body {
                words = match symbol {
                    Symbol::Terminal(t) => {
                        let mut letter = nothing.clone();
                        if max_len > 0 {
                            letter[1].insert(vec![t.clone()]);
                        }
                        concat(&words, &letter, max_len)
                    }
                    Symbol::Nonterminal(n) => concat(&words, derives.get(n.as_str()).unwrap_or(&nothing), max_len),
                };
            }

            let known = derives.entry(head).or_insert_with(|| nothing.clone());
            for (layer, found) in known.iter_mut().zip(words) {
                for w in found {
                    changed |= layer.insert(w);
                }
            }
        }
    }

    derives.remove(grammar.start_symbol())
        .map(|layers| layers.into_iter().flatten().collect())
        .unwrap_or_default()
}

// CYK membership over a grammar in normal form
pub fn cyk(grammar: &Grammar, word: &[String]) -> bool {
    if word.is_empty() {
        return grammar.bodies(grammar.start_symbol()).iter().any(|body| body.is_empty());
    }

    let n = word.len();
    // table[i][l - 1]: heads deriving word[i..i + l]
    let mut table = vec![vec![BTreeSet::<&str>::new(); n]; n];

    for (i, letter) in word.iter().enumerate() {
        for (head, body) in grammar.productions() {
            if let [Symbol::Terminal(t)] = body.as_slice() {
                if t == letter {
                    table[i][0].insert(head);
                }
            }
        }
    }

    for len in 2..=n {
        for i in 0..=n - len {
            for split in 1..len {
                for (head, body) in grammar.productions() {
                    if let [Symbol::Nonterminal(b), Symbol::Nonterminal(c)] = body.as_slice() {
                        if table[i][split - 1].contains(b.as_str()) && table[i + split][len - split - 1].contains(c.as_str()) {
                            table[i][len - 1].insert(head);
                        }
                    }
                }
            }
        }
    }

    table[0][n - 1].contains(grammar.start_symbol())
}

// Every word over `alphabet` of length 1 up to `max_len`
pub fn all_words(alphabet: &[String], max_len: usize) -> Vec<Word> {
    let mut words = Vec::new();
    let mut frontier = vec![Word::new()];
    for _ in 0..max_len {
        frontier = frontier.iter()
            .flat_map(|prefix| alphabet.iter().map(move |letter| {
                let mut next = prefix.clone();
                next.push(letter.clone());
                next
            }))
            .collect();
        words.extend(frontier.iter().cloned());
    }
    words
}
