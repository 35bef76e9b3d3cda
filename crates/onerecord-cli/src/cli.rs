use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "onerecord",
    about = "ONE Record typed JSON-LD decoding and patch generation",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// TOML ontology tables (overrides the configuration file)
    #[arg(long, global = true)]
    pub ontology: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Decode a JSON-LD document into its most specific type
    Decode(DecodeArgs),
    /// Show the literal projection used for diffing
    Project(ProjectArgs),
    /// Compute the patch request between two versions of an object
    Diff(DiffArgs),
    /// List the registered ontology types
    Types(TypesArgs),
}

#[derive(Args)]
pub struct DecodeArgs {
    pub file: PathBuf,
    /// The file holds an array of documents; unknown or invalid ones are skipped
    #[arg(long)]
    pub many: bool,
}

#[derive(Args)]
pub struct ProjectArgs {
    pub file: PathBuf,
}

#[derive(Args)]
pub struct DiffArgs {
    pub before: PathBuf,
    pub after: PathBuf,
    #[arg(long)]
    pub requestor: Option<String>,
    #[arg(long)]
    pub revision: Option<String>,
    #[arg(short, long)]
    pub description: Option<String>,
    /// Emit the request in the ONE Record API JSON-LD vocabulary
    #[arg(long)]
    pub jsonld: bool,
}

#[derive(Args)]
pub struct TypesArgs {
    /// Include abstract types
    #[arg(short, long)]
    pub all: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_decode() {
        let cli = Cli::try_parse_from(["onerecord", "decode", "piece.json"]).unwrap();
        if let Command::Decode(args) = cli.command {
            assert_eq!(args.file, PathBuf::from("piece.json"));
            assert!(!args.many);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_decode_many() {
        let cli = Cli::try_parse_from(["onerecord", "decode", "--many", "pieces.json"]).unwrap();
        if let Command::Decode(args) = cli.command {
            assert!(args.many);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_project() {
        let cli = Cli::try_parse_from(["onerecord", "project", "piece.json"]).unwrap();
        assert!(matches!(cli.command, Command::Project(_)));
    }

    #[test]
    fn parse_diff() {
        let cli = Cli::try_parse_from([
            "onerecord", "diff", "a.json", "b.json", "--requestor", "cgnbeerbrewery", "--revision", "3", "-d", "fix",
        ])
        .unwrap();
        if let Command::Diff(args) = cli.command {
            assert_eq!(args.before, PathBuf::from("a.json"));
            assert_eq!(args.after, PathBuf::from("b.json"));
            assert_eq!(args.requestor, Some("cgnbeerbrewery".into()));
            assert_eq!(args.revision, Some("3".into()));
            assert_eq!(args.description, Some("fix".into()));
            assert!(!args.jsonld);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_diff_requires_two_files() {
        assert!(Cli::try_parse_from(["onerecord", "diff", "a.json"]).is_err());
    }

    #[test]
    fn parse_types() {
        let cli = Cli::try_parse_from(["onerecord", "types", "--all"]).unwrap();
        if let Command::Types(args) = cli.command {
            assert!(args.all);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_global_options() {
        let cli = Cli::try_parse_from([
            "onerecord", "--verbose", "--format", "json", "--ontology", "extra.toml", "types",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.format, OutputFormat::Json));
        assert_eq!(cli.ontology, Some(PathBuf::from("extra.toml")));
        assert!(cli.config.is_none());
    }
}
