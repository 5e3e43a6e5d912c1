use std::collections::BTreeMap;

use crate::error_handling::Location;
use crate::grammar::Symbol;
use super::CompileErrorType::{TerminalShadowsRule, UndefinedNonterminal};
use super::{Alternative, CompileError, CompileErrors, FileResult, Rewrite};

pub type IntermediateRuleset = BTreeMap<String, (Rewrite, Location)>;

// Nonterminals without a rule and terminals that reuse a rule's name would
// leave the symbol sets overlapping or incomplete
fn get_alternative_errors(alternative: &Alternative, location: &Location, rules: &IntermediateRuleset) -> CompileErrors {
    alternative.iter()
        .filter_map(|symbol| match symbol {
            Symbol::Nonterminal(n) if !rules.contains_key(n) => Some(UndefinedNonterminal(n.clone())),
            Symbol::Terminal(t) if rules.contains_key(t) => Some(TerminalShadowsRule(t.clone())),
            _ => None
        })
        .map(|error| CompileError {
            location: location.to_owned(),
            error
        })
        .collect()
}

fn get_rewrite_errors(rewrite: &Rewrite, location: &Location, rules: &IntermediateRuleset) -> CompileErrors {
    rewrite.iter()
        .flat_map(|alternative| get_alternative_errors(alternative, location, rules))
        .collect()
}

fn get_errors(rules: &IntermediateRuleset) -> CompileErrors {
    let mut errors: CompileErrors = rules.iter()
        .flat_map(|(_, (rewrite, location))| get_rewrite_errors(rewrite, location, rules))
        .collect();
    errors.sort_by_key(|error| error.location.line);
    errors
}

pub fn verify_rules(rules: &IntermediateRuleset) -> FileResult<()> {
    let errors = get_errors(rules);

    if errors.len() > 0 {
        Err(errors)
    } else {
        Ok(())
    }
}
