use std::path::PathBuf;

use clap::{ArgGroup, Parser};

#[derive(Parser, Debug)]
#[command(name = "smlc")]
#[command(about = "SML front end: print the token stream or the parse tree")]
#[command(group(ArgGroup::new("mode").required(true).args(["lex", "parse"])))]
pub struct Cli {
    /// Print each token as a (CATEGORY, VALUE) pair
    #[arg(long)]
    pub lex: bool,

    /// Print the parse tree level by level
    #[arg(long)]
    pub parse: bool,

    /// Input file path
    pub file: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Lex,
    Parse,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.lex { Mode::Lex } else { Mode::Parse }
    }
}
