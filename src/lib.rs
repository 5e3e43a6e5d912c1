pub mod error_handling;
pub mod grammar;
pub mod normalize;
pub mod parser;

pub use grammar::{Grammar, GrammarError, Symbol, EPSILON};
pub use normalize::{normalize, try_normalize, Normalizer, Phase};
