use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use dt_test_example::demo_dialogue_path;

fn temp_state(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time should move forward")
        .as_nanos();
    std::env::temp_dir().join(format!("dt-cli-agent-{}-{}.json", name, nanos))
}

fn run_agent(args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_dt-cli");
    Command::new(bin)
        .arg("agent")
        .args(args)
        .output()
        .expect("agent command should run")
}

fn parse_state_out(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .find_map(|line| line.strip_prefix("STATE_OUT:").map(|v| v.to_string()))
        .filter(|value| value != "NONE")
}

fn response_ids(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter_map(|line| line.strip_prefix("RESPONSE:"))
        .filter_map(|rest| rest.split('|').next())
        .map(str::to_string)
        .collect()
}

fn choose(state_in: &PathBuf, response: &str, state_out: &PathBuf) -> String {
    let output = run_agent(&[
        "choose",
        "--state-in",
        state_in.to_str().expect("path should be utf-8"),
        "--response",
        response,
        "--state-out",
        state_out.to_str().expect("path should be utf-8"),
    ]);
    assert!(output.status.success(), "choose {} failed", response);
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn agent_vault_flow_reaches_end_with_quest_events() {
    let dialogue = demo_dialogue_path("01-vault-quest");
    let states = (1..=4)
        .map(|index| temp_state(&format!("vault-{}", index)))
        .collect::<Vec<_>>();

    let start = run_agent(&[
        "start",
        "--dialogue",
        dialogue.to_str().expect("path should be utf-8"),
        "--state-out",
        states[0].to_str().expect("path should be utf-8"),
    ]);
    assert!(start.status.success(), "start failed");
    let start_stdout = String::from_utf8_lossy(&start.stdout);
    assert!(start_stdout.contains("RESULT:OK"));
    assert!(start_stdout.contains("EVENT:RESPONSES"));
    assert!(start_stdout.contains(r#"NODE_JSON:{"id":"guard_vault_intro""#));
    assert_eq!(response_ids(&start_stdout), vec!["ask_vault", "leave_now"]);
    assert!(parse_state_out(&start_stdout).is_some());

    let lore = choose(&states[0], "ask_vault", &states[1]);
    assert!(lore.contains(r#""kind":"started""#));
    assert!(lore.contains(r#""kind":"stageChanged""#));
    assert!(lore.contains("QUEST_LOG_JSON:"));
    assert_eq!(response_ids(&lore), vec!["offer_help"]);

    let keeper = choose(&states[1], "offer_help", &states[2]);
    assert!(keeper.contains(r#""kind":"completed""#));
    assert_eq!(response_ids(&keeper), vec!["thank_keeper"]);

    let open = choose(&states[2], "thank_keeper", &states[3]);
    assert_eq!(response_ids(&open), vec!["end_visit"]);

    let end = choose(&states[3], "end_visit", &temp_state("vault-end"));
    assert!(end.contains("EVENT:END"));
    assert!(end.contains("STATE_OUT:NONE"));
    assert!(end.contains(r#""text":"> Goodbye.""#));
}

#[test]
fn agent_rejects_unavailable_response() {
    let dialogue = demo_dialogue_path("02-merchant-barter");
    let state_1 = temp_state("merchant-1");
    let state_2 = temp_state("merchant-2");

    let start = run_agent(&[
        "start",
        "--dialogue",
        dialogue.to_str().expect("path should be utf-8"),
        "--state-out",
        state_1.to_str().expect("path should be utf-8"),
    ]);
    assert!(start.status.success(), "start failed");

    let output = run_agent(&[
        "choose",
        "--state-in",
        state_1.to_str().expect("path should be utf-8"),
        "--response",
        "leave_shop",
        "--state-out",
        state_2.to_str().expect("path should be utf-8"),
    ]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("RESULT:ERROR"));
    assert!(stdout.contains("ERROR_CODE:ENGINE_RESPONSE_UNAVAILABLE"));
    assert!(!state_2.exists());
}

#[test]
fn agent_reports_missing_state_file() {
    let missing = temp_state("never-written");
    let output = run_agent(&[
        "choose",
        "--state-in",
        missing.to_str().expect("path should be utf-8"),
        "--response",
        "ask_vault",
        "--state-out",
        temp_state("unused").to_str().expect("path should be utf-8"),
    ]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ERROR_CODE:CLI_STATE_NOT_FOUND"));
}
