use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};
use target_lexicon::Triple;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build a program.
    Build(BuildArgs),
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// The input file.
    pub input: String,

    /// Whether the given input should be used directly as the source instead
    /// of as the source file path.
    #[arg(long, short, action)]
    pub source: bool,

    /// Where to write the generated assembly.
    #[arg(short, long, default_value = "out.asm")]
    pub output: PathBuf,

    /// Where the assembler should write the object file.
    #[arg(long, default_value = "out.o")]
    pub object: PathBuf,

    /// Only write the assembly, don't run the assembler.
    #[arg(long, action)]
    pub no_assemble: bool,

    /// Print the assembly to stdout instead of writing any files.
    #[arg(long, action, conflicts_with_all = ["output", "object", "no_assemble"])]
    pub print: bool,

    /// The target triple, used to pick the object format. Defaults to the host.
    #[arg(long, value_parser = parse_target)]
    pub target: Option<Triple>,

    /// Run this command instead of nasm.
    #[arg(long)]
    pub assembler: Option<String>,

    /// Extra arguments passed to a custom assembler.
    #[arg(long = "assembler-arg", requires = "assembler", allow_hyphen_values = true)]
    pub assembler_args: Vec<String>,

    /// Make a second `return` statement an error instead of replacing the first.
    #[arg(long, action)]
    pub reject_multiple_returns: bool,

    /// Read the whole input file instead of only its first 1024 bytes.
    #[arg(long, action)]
    pub no_truncate: bool,
}

fn parse_target(s: &str) -> Result<Triple, String> {
    Triple::from_str(s).map_err(|err| err.to_string())
}
