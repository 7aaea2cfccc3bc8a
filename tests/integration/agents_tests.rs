//! Integration tests for the agent spawner

use pai_hooks::agents::{agent_info, available_agents, generate_prompt, list_agents, load_agent};
use pai_hooks::HookError;
use tempfile::TempDir;

const DEBUGGER: &str = r#"---
name: Debugger
description: Systematic debugging specialist that reproduces before fixing
model: opus
color: red
voiceId: abc123
permissions:
  - "Bash(*)"
  - "Read(*)"
---
# Debugger

You find root causes.

## Method
Reproduce the bug first.
Then bisect.

## Tools
Use `git bisect` and the test suite.

## Reporting
Summarize the root cause.

## Extras
Never listed.
"#;

const LIBRARIAN: &str = "Catalogues documentation. No frontmatter here.\n";

fn agents_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("debugger.md"), DEBUGGER).unwrap();
    std::fs::write(dir.path().join("librarian.md"), LIBRARIAN).unwrap();
    std::fs::write(dir.path().join("notes.txt"), "not an agent").unwrap();
    dir
}

#[test]
fn test_available_agents_sorted_md_only() {
    let dir = agents_dir();
    assert_eq!(
        available_agents(dir.path()).unwrap(),
        vec!["debugger".to_string(), "librarian".to_string()]
    );
}

#[test]
fn test_list_agents_table() {
    let dir = agents_dir();
    let table = list_agents(dir.path()).unwrap();

    assert!(table.starts_with("Available PAI Agents:"));
    assert!(table.contains("| Debugger | engineer | opus | Systematic debugging specialist that reproduces be... |"));
    assert!(table.contains("| unknown | general-purpose | sonnet | ... |"));
    assert!(table.ends_with("Usage: pai-hooks agents prompt <agent-name> \"<your task>\""));
}

#[test]
fn test_agent_info() {
    let dir = agents_dir();
    let info = agent_info(dir.path(), "debugger").unwrap();

    assert!(info.contains("=== Debugger Agent ==="));
    assert!(info.contains("Model: opus"));
    assert!(info.contains("Voice: abc123"));
    assert!(info.contains("Built-in Type: engineer"));
    assert!(info.contains("  - Bash(*)\n  - Read(*)"));
}

#[test]
fn test_generate_prompt() {
    let dir = agents_dir();
    let out = generate_prompt(dir.path(), "debugger", "find why the login test is flaky on CI").unwrap();

    assert!(out.contains("subagent_type: \"engineer\""));
    assert!(out.contains("model: \"opus\""));
    assert!(out.contains("You are the Debugger agent."));
    assert!(out.contains("## YOUR TASK\nfind why the login test is flaky on CI"));
    assert!(out.contains("Method\nReproduce the bug first."));
    assert!(out.contains("Reporting\nSummarize the root cause."));
    assert!(!out.contains("Never listed."));
    assert!(out.contains("  description: \"debugger: find why the login test is fla...\","));
    // Backticks in the instructions are escaped inside the template literal
    assert!(out.contains("\\`git bisect\\`"));
    assert!(out.ends_with("})"));
}

#[test]
fn test_unknown_agent_lists_available() {
    let dir = agents_dir();
    match load_agent(dir.path(), "wizard") {
        Err(HookError::AgentNotFound { name, available }) => {
            assert_eq!(name, "wizard");
            assert_eq!(available, vec!["debugger", "librarian"]);
        }
        other => panic!("expected AgentNotFound, got {:?}", other),
    }
    assert!(generate_prompt(dir.path(), "wizard", "anything").is_err());
}

#[test]
fn test_missing_agents_dir_is_error() {
    let dir = TempDir::new().unwrap();
    assert!(list_agents(&dir.path().join("missing")).is_err());
}
