use std::path::PathBuf;

pub const DIALOGUE_FILE: &str = "dialogue.json";

pub fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

pub fn demos_root() -> PathBuf {
    workspace_root().join("demos")
}

pub fn demo_dir(name: &str) -> PathBuf {
    demos_root().join(name)
}

pub fn demo_dialogue_path(name: &str) -> PathBuf {
    demo_dir(name).join(DIALOGUE_FILE)
}

pub fn testcase_path(name: &str) -> PathBuf {
    demo_dir(name).join("testcase.json")
}
