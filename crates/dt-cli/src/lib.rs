use std::ffi::OsString;

use clap::Parser;
use dt_core::DialogueError;

mod agent;
mod boundary_runner;
mod cli_args;
mod error_map;
mod models;
mod new_cmd;
mod session_ops;
mod source_loader;
mod validate_cmd;

pub(crate) use boundary_runner::{emit_boundary, run_to_boundary};
pub(crate) use cli_args::{
    AgentArgs, AgentCommand, ChooseArgs, Cli, Mode, NewArgs, StartArgs, ValidateArgs,
};
pub(crate) use error_map::{emit_error, CliFailure};
pub(crate) use models::{
    BoundaryEvent, BoundaryResult, LoadedDialogue, NodeView, OutputLevel, PlayerState,
    PLAYER_STATE_SCHEMA,
};
pub(crate) use session_ops::{
    create_engine_for_dialogue, emit_boundary_with_saved_state, load_engine_from_state,
    read_player_state,
};
pub(crate) use source_loader::load_dialogue_source;

pub fn run_cli_from_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            return error.exit_code();
        }
    };
    init_logging(log_level(&cli));
    match run(cli) {
        Ok(code) => code,
        Err(error) => emit_error(error),
    }
}

fn log_level(cli: &Cli) -> OutputLevel {
    match &cli.command {
        Mode::Validate(args) => OutputLevel::from_flags(args.verbose, args.quiet),
        Mode::Agent(_) | Mode::New(_) => OutputLevel::Normal,
    }
}

// Logs go to stderr; stdout carries the line protocol.
fn init_logging(level: OutputLevel) {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(level.log_filter()),
    )
    .target(env_logger::Target::Stderr)
    .format_timestamp_millis()
    .try_init();
}

fn run(cli: Cli) -> Result<i32, DialogueError> {
    match cli.command {
        Mode::Validate(args) => validate_cmd::run_validate(args),
        Mode::Agent(args) => agent::run_agent(args),
        Mode::New(args) => new_cmd::run_new(args),
    }
}
