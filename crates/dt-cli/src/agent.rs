use std::path::Path;

use dt_core::DialogueError;

use crate::{
    create_engine_for_dialogue, emit_boundary_with_saved_state, load_dialogue_source,
    load_engine_from_state, run_to_boundary, AgentArgs, AgentCommand, ChooseArgs, StartArgs,
};

pub(super) fn run_agent(args: AgentArgs) -> Result<i32, DialogueError> {
    match args.command {
        AgentCommand::Start(args) => run_start(args),
        AgentCommand::Choose(args) => run_choose(args),
    }
}

pub(super) fn run_start(args: StartArgs) -> Result<i32, DialogueError> {
    let dialogue = load_dialogue_source(&args.dialogue)?;
    let mut engine = create_engine_for_dialogue(&dialogue)?;

    let boundary = run_to_boundary(&mut engine, 0);
    emit_boundary_with_saved_state(&engine, boundary, &args.state_out, &dialogue.path)
}

pub(super) fn run_choose(args: ChooseArgs) -> Result<i32, DialogueError> {
    let (dialogue, mut engine) = load_engine_from_state(Path::new(&args.state_in))?;
    let seen_history = engine.history().len();
    engine.select_response(&args.response)?;

    let boundary = run_to_boundary(&mut engine, seen_history);
    emit_boundary_with_saved_state(&engine, boundary, &args.state_out, &dialogue.path)
}
