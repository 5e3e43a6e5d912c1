/*
    This module reads grammars written in BNF files
*/

mod lexer;
mod verifier;

use std::collections::BTreeMap;
use std::fmt::Display;
use std::fs::File;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::grammar::*;
use crate::error_handling::*;
use itertools::Itertools;
use lexer::*;
use verifier::verify_rules;
use verifier::IntermediateRuleset;

#[derive(Debug)]
pub enum CompileErrorType {
    // A line which should contain a rule does not
    MissingEquals,
    // A rule has multiple equals signs
    UnexpectedEquals,
    // The user starts a rule line with something other than a nonterminal
    MissingNonterminal,
    // There is an unclosed quote
    UnmatchedQuote,
    // An undefined token was used
    UndefinedNonterminal(String),
    // Quoted text that is also the name of a rule
    TerminalShadowsRule(String),
    // The file contains no rules at all
    NoRules,
    // The grammar could not be built from the rules
    InvalidGrammar(GrammarError),
    // Somehow a full rewrite was parsed as a base alternative
    // This is a problem with chomsky, not the grammar
    UnsplitRewrite,
    // A blank line got too deep into the parser
    // This is a problem with chomsky, not the grammar
    UnexpectedBlankLine,
    // There was an issue with reading a file
    FileError(std::io::Error),
}

impl ErrorType for CompileErrorType {}

impl PartialEq for CompileErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CompileErrorType::FileError(a), CompileErrorType::FileError(b)) => a.kind() == b.kind(),
            (CompileErrorType::UndefinedNonterminal(a), CompileErrorType::UndefinedNonterminal(b)) => a == b,
            (CompileErrorType::TerminalShadowsRule(a), CompileErrorType::TerminalShadowsRule(b)) => a == b,
            (CompileErrorType::InvalidGrammar(a), CompileErrorType::InvalidGrammar(b)) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl Display for CompileErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileErrorType::MissingEquals => write!(f, "Expected `=` after nonterminal"),
            CompileErrorType::UnexpectedEquals => write!(f, "Unexpected `=` encountered"),
            CompileErrorType::MissingNonterminal => write!(f, "Tried to define something other than a nonterminal"),
            CompileErrorType::UnmatchedQuote => write!(f, "Unmatched quotes"),
            CompileErrorType::UndefinedNonterminal(nonterminal) => write!(f, "Could not find definition for `{}`", nonterminal),
            CompileErrorType::TerminalShadowsRule(terminal) => write!(f, "Terminal \"{}\" has the same name as a rule", terminal),
            CompileErrorType::NoRules => write!(f, "No rules found"),
            CompileErrorType::InvalidGrammar(e) => write!(f, "{}", e),
            CompileErrorType::UnsplitRewrite => write!(f, "Rewrite was not fully split (this is a problem with chomsky, not the grammar)"),
            CompileErrorType::UnexpectedBlankLine => write!(f, "Blank line encountered in rule parser (this is a problem with chomsky, not the grammar)"),
            CompileErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type CompileError = Error<CompileErrorType>;
pub type CompileErrors = Errors<CompileErrorType>;

fn file_error(error: CompileErrorType, file: &Path) -> CompileError {
    CompileError {
        location: Location::file(file.to_path_buf()),
        error
    }
}

pub type Result<T> = std::result::Result<T, CompileErrorType>;
pub type LineResult<T> = std::result::Result<T, CompileError>;
pub type FileResult<T> = std::result::Result<T, CompileErrors>;

#[derive(PartialEq, Debug)]
struct Rule {
    symbol: String,
    rewrite: Rewrite,
    location: Location
}

// ε tokens contribute nothing, so `ε` alone is the empty alternative
fn parse_alternative(tokens: &[Token]) -> Result<Alternative> {
    tokens.iter().filter_map(|t| match t {
        Token::Equals => Some(Err(CompileErrorType::UnexpectedEquals)),
        Token::Or => Some(Err(CompileErrorType::UnsplitRewrite)),
        Token::Epsilon => None,
        Token::Nonterminal(s) => Some(Ok(Symbol::Nonterminal(s.clone()))),
        Token::Terminal(s) => Some(Ok(Symbol::Terminal(s.clone())))
    }).collect()
}

fn parse_rewrite(tokens: &[Token]) -> Result<Rewrite> {
    tokens.split(|t| *t == Token::Or).map(parse_alternative).collect()
}

fn parse_line(tokens: &[Token], location: Location) -> Result<Rule> {
    let symbol = match tokens.get(0) {
        Some(Token::Nonterminal(s)) => Ok(s.clone()),
        Some(_) => Err(CompileErrorType::MissingNonterminal),
        None => Err(CompileErrorType::UnexpectedBlankLine)
    }?;

    if tokens.get(1) != Some(&Token::Equals) {
        return Err(CompileErrorType::MissingEquals)
    }

    let rewrite = parse_rewrite(&tokens[2..])?;

    return Ok(Rule {
        symbol,
        rewrite,
        location
    });
}

fn parse_lex_line(line: &str, location: Location) -> LineResult<Rule> {
    lexer::lex_line(line)
        .and_then(|lexed_line| parse_line(&lexed_line, location.clone()))
        .map_err(|error| CompileError { location: location, error })
}

fn is_rule_line(line: &String) -> bool {
    let trimmed = line.trim_start();
    !trimmed.is_empty() && !trimmed.starts_with(';')
}

// Returns an iterator over the rule lines of a reader, with the io errors
// wrapped in CompileError and numbered from 1
fn line_nums<'a>(reader: impl BufRead + 'a, path: &'a Path) -> impl Iterator<Item = (usize, LineResult<String>)> + 'a {
    reader
        .lines()
        .map(move |line| line.map_err(|e| file_error(CompileErrorType::FileError(e), path)))
        .enumerate()
        .filter(|(_, line)| line.as_ref().is_ok_and(is_rule_line) || line.is_err())
        .map(|(num, line)| (num + 1, line))
}

// Groups the rules by head. Alternatives of a head defined on several
// lines are merged, and the head keeps the location of its first line.
fn ruleset_from_rules(rules: Vec<Rule>) -> FileResult<BTreeMap<String, Rewrite>> {
    let mut test_ruleset = IntermediateRuleset::new();
    for rule in rules {
        test_ruleset.entry(rule.symbol)
            .or_insert_with(|| (Vec::new(), rule.location))
            .0
            .extend(rule.rewrite);
    }

    verify_rules(&test_ruleset)?;

    return Ok(test_ruleset.into_iter()
        .map(|(symbol, (rewrite, _))| (symbol, rewrite))
        .collect());
}

fn grammar_from_rules(rule_list: Vec<Rule>, start: Option<&str>, path: &Path) -> FileResult<Grammar> {
    let start_symbol = match (start, rule_list.first()) {
        (Some(start), _) => start.to_string(),
        (None, Some(first)) => first.symbol.clone(),
        (None, None) => return Err(vec![file_error(CompileErrorType::NoRules, path)]),
    };

    let rules = ruleset_from_rules(rule_list)?;

    Grammar::from_rules(start_symbol, rules)
        .map_err(|e| vec![file_error(CompileErrorType::InvalidGrammar(e), path)])
}

/// Reads a grammar from any buffered source; `path` is only used to
/// locate errors.
///
/// The start symbol is `start` if given, otherwise the head of the first
/// rule. Every malformed line is reported, not just the first.
pub fn parse_reader(reader: impl BufRead, path: &Path, start: Option<&str>) -> FileResult<Grammar> {
    let parsed_lines = line_nums(reader, path).map(|(num, line_res)| {
        line_res.and_then(|line| parse_lex_line(&line, Location {
            file: path.to_path_buf(),
            line: num
        }))
    });

    let (rules, errors): (Vec<_>, Vec<_>) = parsed_lines.partition_result();
    if errors.len() > 0 {
        return Err(errors);
    }

    return grammar_from_rules(rules, start, path);
}

pub fn parse_file(path: &PathBuf, start: Option<&str>) -> FileResult<Grammar> {
    let file = File::open(path).map_err(|e| vec![file_error(CompileErrorType::FileError(e), path)])?;
    parse_reader(std::io::BufReader::new(file), path, start)
}
