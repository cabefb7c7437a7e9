use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::commands::config::ConfigCommands;
use crate::commands::scrape::ScrapeArgs;

#[derive(Parser)]
#[command(
    name = "ytcomments",
    bin_name = "ytcomments",
    version,
    about,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone, PartialEq, Eq, Debug)]
pub enum Commands {
    /// Fetch comment threads for YouTube videos and export them
    Scrape(ScrapeArgs),

    /// Settings file tools
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rstest::rstest;
    use std::path::PathBuf;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_scrape_with_all_options() {
        let cli = Cli::try_parse_from([
            "ytcomments",
            "scrape",
            "https://youtu.be/abc",
            "https://youtu.be/def",
            "-c",
            "my.json",
            "--input",
            "urls.json",
            "-o",
            "out",
            "--max-comments",
            "50",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Commands::Scrape(ScrapeArgs {
                urls: vec![
                    "https://youtu.be/abc".to_string(),
                    "https://youtu.be/def".to_string()
                ],
                config: Some(PathBuf::from("my.json")),
                input: Some(PathBuf::from("urls.json")),
                output_dir: Some(PathBuf::from("out")),
                max_comments: Some(50),
            })
        );
    }

    #[rstest]
    #[case::schema(&["ytcomments", "config", "schema"], Commands::Config(ConfigCommands::Schema))]
    #[case::path(&["ytcomments", "config", "path"], Commands::Config(ConfigCommands::Path))]
    #[case::completions(&["ytcomments", "completions", "zsh"], Commands::Completions { shell: Shell::Zsh })]
    fn parses_subcommands(#[case] argv: &[&str], #[case] expected: Commands) {
        let cli = Cli::try_parse_from(argv).unwrap();
        assert_eq!(cli.command, expected);
    }

    #[test]
    fn rejects_negative_max_comments() {
        assert!(Cli::try_parse_from(["ytcomments", "scrape", "-m", "-1"]).is_err());
    }
}
