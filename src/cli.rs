use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(version, about = "Brings a BNF grammar into Chomsky Normal Form")]
pub struct Cli {
    /// File containing the grammar
    pub file: PathBuf,

    /// Start symbol (default: first in the file)
    #[arg(short, long, value_name = "SYMBOL")]
    pub start: Option<String>,

    /// Print the grammar after every phase to stderr
    #[arg(short, long)]
    pub trace: bool,

    /// Fail if the result is not in normal form
    #[arg(long)]
    pub check: bool
}
