use clap::{ArgGroup, Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "dt-cli")]
#[command(about = "Dialogue tree validator and agent CLI")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Mode,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Mode {
    Validate(ValidateArgs),
    Agent(AgentArgs),
    New(NewArgs),
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("source").required(true).args(["file", "dir"])))]
pub(crate) struct ValidateArgs {
    #[arg(long = "file")]
    pub(crate) file: Option<String>,
    #[arg(long = "dir")]
    pub(crate) dir: Option<String>,
    /// File name glob used with --dir.
    #[arg(long = "pattern")]
    pub(crate) pattern: Option<String>,
    #[arg(long = "schema")]
    pub(crate) schema: Option<String>,
    #[arg(long = "expected-version")]
    pub(crate) expected_version: Option<String>,
    #[arg(long = "fix")]
    pub(crate) fix: bool,
    #[arg(long = "output-dir")]
    pub(crate) output_dir: Option<String>,
    #[arg(long = "verbose", short = 'v', conflicts_with = "quiet")]
    pub(crate) verbose: bool,
    #[arg(long = "quiet", short = 'q')]
    pub(crate) quiet: bool,
}

#[derive(Debug, Args)]
pub(crate) struct AgentArgs {
    #[command(subcommand)]
    pub(crate) command: AgentCommand,
}

#[derive(Debug, Subcommand)]
pub(crate) enum AgentCommand {
    Start(StartArgs),
    Choose(ChooseArgs),
}

#[derive(Debug, Args)]
pub(crate) struct StartArgs {
    #[arg(long = "dialogue")]
    pub(crate) dialogue: String,
    #[arg(long = "state-out")]
    pub(crate) state_out: String,
}

#[derive(Debug, Args)]
pub(crate) struct ChooseArgs {
    #[arg(long = "state-in")]
    pub(crate) state_in: String,
    #[arg(long = "response")]
    pub(crate) response: String,
    #[arg(long = "state-out")]
    pub(crate) state_out: String,
}

#[derive(Debug, Args)]
pub(crate) struct NewArgs {
    #[arg(long = "output")]
    pub(crate) output: String,
    #[arg(long = "title")]
    pub(crate) title: Option<String>,
    #[arg(long = "author")]
    pub(crate) author: Option<String>,
    #[arg(long = "description")]
    pub(crate) description: Option<String>,
    #[arg(long = "date")]
    pub(crate) date: Option<String>,
    #[arg(long = "force")]
    pub(crate) force: bool,
}
