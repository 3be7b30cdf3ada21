use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Combine every README in a workspace into a single text file"
)]
pub struct Cli {
    /// Workspace root to search (defaults to the current directory)
    pub root: Option<PathBuf>,

    /// Glob for files to combine (e.g., '**/README.md')
    #[arg(long, short = 'p')]
    pub pattern: Option<String>,

    /// Glob for files to leave out (e.g., '**/node_modules/**')
    #[arg(long, short = 'x')]
    pub exclude: Option<String>,

    /// Output file name, relative to the workspace root
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// Match the patterns without regard to case (readme.md, Readme.rst, ...)
    #[arg(long, short = 'i')]
    pub ignore_case: bool,

    /// Settings file to use instead of ~/.config/readme_combiner/settings.toml
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// More logging (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
