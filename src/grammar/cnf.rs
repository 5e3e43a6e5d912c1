/*
    Checks the shape a grammar must have once it is in Chomsky Normal Form
*/

use std::fmt::Display;

use itertools::Itertools;

use super::{Alternative, Grammar, Symbol, EPSILON};

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum CnfViolation {
    // An empty body outside of the single `S -> ε` exception
    EmptyBody(String),
    // A body that is neither one terminal nor two non-terminals
    BadShape { head: String, body: Alternative },
    // A non-terminal the start symbol never leads to
    Unreachable(String),
    // A non-terminal that derives no terminal string
    Unproductive(String),
}

impl Display for CnfViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CnfViolation::EmptyBody(head) => write!(f, "`{} -> {}` is not allowed here", head, EPSILON),
            CnfViolation::BadShape { head, body } => write!(f, "`{} -> {}` is not in normal form", head, body.iter().join(" ")),
            CnfViolation::Unreachable(n) => write!(f, "`{}` is unreachable", n),
            CnfViolation::Unproductive(n) => write!(f, "`{}` derives no terminal string", n),
        }
    }
}

impl Grammar {
    /// Lists every way in which the grammar is not in Chomsky Normal Form.
    ///
    /// The start symbol may have a single empty body when the language
    /// contains the empty string. A grammar whose only non-terminal is an
    /// unproductive start symbol without productions is the normal form of
    /// the empty language and is accepted.
    pub fn cnf_violations(&self) -> Vec<CnfViolation> {
        let mut violations = Vec::new();

        for (head, rewrite) in &self.rules {
            let empties = rewrite.iter().filter(|body| body.is_empty()).count();
            if empties > 0 && (*head != self.start_symbol || empties > 1) {
                violations.push(CnfViolation::EmptyBody(head.clone()));
            }

            violations.extend(rewrite.iter()
                .filter(|body| !body.is_empty() && !is_cnf_body(body))
                .map(|body| CnfViolation::BadShape { head: head.clone(), body: body.clone() }));
        }

        if self.is_empty_language() {
            return violations;
        }

        let reachable = self.reachable();
        let productive = self.productive();
        for n in &self.nonterminals {
            if !reachable.contains(n) {
                violations.push(CnfViolation::Unreachable(n.clone()));
            }
            if !productive.contains(n) {
                violations.push(CnfViolation::Unproductive(n.clone()));
            }
        }

        violations
    }

    pub fn is_cnf(&self) -> bool {
        self.cnf_violations().is_empty()
    }

    // `N = {S}` with no productions at all
    pub fn is_empty_language(&self) -> bool {
        self.nonterminals.len() == 1 && self.production_count() == 0
    }
}

fn is_cnf_body(body: &Alternative) -> bool {
    match body.as_slice() {
        [Symbol::Terminal(_)] => true,
        [Symbol::Nonterminal(_), Symbol::Nonterminal(_)] => true,
        _ => false,
    }
}
