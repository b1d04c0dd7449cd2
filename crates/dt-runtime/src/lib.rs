mod engine;

pub use engine::{
    evaluate_condition, execute_command, DialogueEngine, EngineStatus, SNAPSHOT_SCHEMA,
};
