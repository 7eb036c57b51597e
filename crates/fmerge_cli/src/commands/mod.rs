//! CLI command definitions.

use clap::Parser;

pub mod merge;

/// fmerge - fold ConfigMap file entries into target entries
#[derive(Parser)]
#[command(name = "fmerge")]
#[command(version, about = "fmerge - fold ConfigMap file entries into target entries")]
#[command(long_about = r#"
fmerge reads a stream of resources from stdin, merges the data entries of the
ConfigMap named in CONFIG into the given targets and writes the stream to stdout.

TARGETS:
  targetKey[,variableKey[=label]]*

  app.properties                  fold app*.* entries into app.properties
  app.properties,DB_HOST=db.host  also append "db.host=<DB_HOST>"

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Invalid config or resource stream
  4 - Merge failure
"#)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(flatten)]
    pub merge: merge::MergeArgs,
}
