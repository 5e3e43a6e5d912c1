use itertools::{Itertools, PeekingNext};

use crate::grammar::EPSILON;
use super::{CompileErrorType, Result};

#[derive(PartialEq, Debug)]
pub enum Token {
    Equals,
    Or,
    Epsilon,
    Nonterminal(String),
    Terminal(String)
}

// Quoted text; `""` is the empty string and so stands for ε
pub fn lex_terminal(line: &mut impl PeekingNext<Item = char>) -> Result<Token> {
    line.next(); // Consume open quote
    let token_text: String = line.peeking_take_while(|&c| c != '\"').collect();

    // Check if there is a close quote and consume it if there is
    if line.next() != Some('\"') {
        return Err(CompileErrorType::UnmatchedQuote);
    }

    if token_text.is_empty() {
        Ok(Token::Epsilon)
    } else {
        Ok(Token::Terminal(token_text))
    }
}

// A bare word; the word `ε` is the empty body rather than a name
pub fn lex_nonterminal(line: &mut impl PeekingNext<Item = char>) -> Result<Token> {
    let word: String = line
        .peeking_take_while(|&c| !c.is_whitespace() && !matches!(c, '=' | '|' | '\"' | ';'))
        .collect();

    if word == EPSILON {
        Ok(Token::Epsilon)
    } else {
        Ok(Token::Nonterminal(word))
    }
}

pub fn lex_line(line: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();

    let mut line_chars = line.chars().peekable();

    while let Some(c) = line_chars.peek() {
        if *c == ';' {
            // The rest of the line is a comment
            break;
        } else if *c == '=' {
            line_chars.next();
            tokens.push(Token::Equals);
        } else if *c == '|' {
            line_chars.next();
            tokens.push(Token::Or);
        } else if *c == '\"' {
            tokens.push(lex_terminal(&mut line_chars)?);
        } else if !c.is_whitespace() {
            tokens.push(lex_nonterminal(&mut line_chars)?);
        } else {
            line_chars.next();
        }
    }

    return Ok(tokens);
}

#[cfg(test)]
mod tests {
    use std::iter::zip;

    use super::*;

    #[test]
    fn lex_normal_terminal() {
        let lines = vec![
            "\"a\" B",
            "\"d\"",
            "\"\"\"x\""
        ];
        // (result from the function, rest of the iterator)
        let answers = vec![
            (Token::Terminal("a".to_string()), " B"),
            (Token::Terminal("d".to_string()), ""),
            (Token::Epsilon, "\"x\"")
        ];

        for (line, (answer_token, answer_rest)) in zip(lines, answers) {
            let mut chars = line.chars().peekable();
            assert_eq!(lex_terminal(&mut chars).unwrap(), answer_token);
            assert_eq!(chars.collect::<String>(), answer_rest);
        }
    }

    #[test]
    fn lex_mismatched_terminal() {
        for line in ["\"a", "\"a B C"] {
            let mut chars = line.chars().peekable();
            assert_eq!(lex_terminal(&mut chars).unwrap_err(), CompileErrorType::UnmatchedQuote);
        }
    }

    #[test]
    fn lex_normal_nonterminal() {
        let lines = vec![
            "A B",
            "S|B",
            "ε \"a\"",
            "expr=term"
        ];
        let answers = vec![
            (Token::Nonterminal("A".to_string()), " B"),
            (Token::Nonterminal("S".to_string()), "|B"),
            (Token::Epsilon, " \"a\""),
            (Token::Nonterminal("expr".to_string()), "=term")
        ];

        for (line, (answer_token, answer_rest)) in zip(lines, answers) {
            let mut chars = line.chars().peekable();
            assert_eq!(lex_nonterminal(&mut chars).unwrap(), answer_token);
            assert_eq!(chars.collect::<String>(), answer_rest);
        }
    }

    #[test]
    fn lex_normal_line() {
        let lines = vec![
            "S = \"d\" B | A",
            "C = ε | \"\" ; both empty",
        ];
        let answers = vec![
            vec![
                Token::Nonterminal("S".to_string()),
                Token::Equals,
                Token::Terminal("d".to_string()),
                Token::Nonterminal("B".to_string()),
                Token::Or,
                Token::Nonterminal("A".to_string())
            ],
            vec![
                Token::Nonterminal("C".to_string()),
                Token::Equals,
                Token::Epsilon,
                Token::Or,
                Token::Epsilon
            ]
        ];

        for (line, answer) in zip(lines, answers) {
            assert_eq!(lex_line(line).unwrap(), answer)
        }
    }
}
