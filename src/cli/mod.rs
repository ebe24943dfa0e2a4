pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "spacewalk")]
#[command(about = "A terminal reader and static site generator for a headless CMS blog", long_about = None)]
pub struct Cli {
    /// Pin every content query to a preview ref instead of the published ref
    #[arg(long, value_name = "REF", global = true)]
    pub preview_ref: Option<String>,

    /// Path to an alternate config file
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the first page of posts
    List,
    /// Print a single post by its uid
    Show {
        /// The post's uid (the URL segment)
        uid: String,
    },
    /// Generate the static site
    Build {
        /// Output directory (defaults to the configured one)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },
    /// Launch the interactive reader
    Read,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_show() {
        let cli = Cli::try_parse_from(["spacewalk", "show", "first-post"]).unwrap();
        match cli.command {
            Commands::Show { uid } => assert_eq!(uid, "first-post"),
            _ => panic!("expected show"),
        }
    }

    #[test]
    fn test_global_preview_ref() {
        let cli =
            Cli::try_parse_from(["spacewalk", "list", "--preview-ref", "draft-ref"]).unwrap();
        assert_eq!(cli.preview_ref.as_deref(), Some("draft-ref"));
    }

    #[test]
    fn test_build_output_flag() {
        let cli = Cli::try_parse_from(["spacewalk", "build", "-o", "out"]).unwrap();
        match cli.command {
            Commands::Build { output } => assert_eq!(output, Some(PathBuf::from("out"))),
            _ => panic!("expected build"),
        }
    }
}
