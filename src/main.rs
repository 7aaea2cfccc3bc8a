//! pai-hooks - Lifecycle hooks for the PAI coding-assistant runtime
//!
//! # Usage
//!
//! ```bash
//! # PreToolUse: validate a Bash command (JSON on stdout, exit 2 on deny)
//! echo '{"tool_name":"Bash","tool_input":{"command":"rm -rf /"}}' | pai-hooks security-validator
//!
//! # UserPromptSubmit: inject scoping guidance for complex prompts
//! echo '{"prompt":"Rewrite the entire auth layer"}' | pai-hooks analyze-task-scope
//!
//! # Stop: keep working until TASK_COMPLETE
//! pai-hooks persistence < stop-event.json
//!
//! # Agent spawner
//! pai-hooks agents list
//! pai-hooks agents prompt debugger "find the flaky login test"
//! ```

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand};

use pai_hooks::{
    agents,
    config::Config,
    engine::HookEngine,
    error::{HookError, Result},
    stdin::read_stdin_with_timeout,
};

const AFTER_HELP: &str = r#"USAGE AS HOOKS:
    Configure in ~/.claude/settings.json:
    {
      "hooks": {
        "PreToolUse": [{ "matcher": "Bash", "hooks": [{
          "type": "command", "command": "pai-hooks security-validator"
        }]}],
        "UserPromptSubmit": [{ "hooks": [{
          "type": "command", "command": "pai-hooks analyze-task-scope"
        }]}],
        "Stop": [{ "hooks": [{
          "type": "command", "command": "pai-hooks persistence"
        }]}]
      }
    }

ENVIRONMENT:
    PAI_DIR    Base directory for history and state (default: ~/.claude)"#;

#[derive(Parser, Debug)]
#[command(name = "pai-hooks", version, about, after_help = AFTER_HELP)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// PAI base directory (overrides config and $PAI_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    pai_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// PreToolUse hook: block, confirm or warn on Bash commands
    SecurityValidator,

    /// UserPromptSubmit hook: score prompt complexity and add scoping guidance
    AnalyzeTaskScope,

    /// Stop hook: continue until the task reports completion
    Persistence,

    /// Inspect agent definitions and build Task tool prompts
    Agents {
        #[command(subcommand)]
        action: AgentsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum AgentsCommand {
    /// List every agent definition
    List,

    /// Show one agent's configuration
    Info { agent: String },

    /// Print a Task tool call for running a task as an agent
    Prompt {
        agent: String,

        #[arg(required = true, trailing_var_arg = true)]
        task: Vec<String>,
    },
}

fn load_config(cli: &Cli) -> Config {
    let mut config = match cli.config {
        Some(ref path) => match Config::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!(
                    "[pai-hooks] Warning: {}: {} (using defaults)",
                    path.display(),
                    e
                );
                Config::default()
            }
        },
        None => Config::load(),
    };

    if let Some(ref dir) = cli.pai_dir {
        config.general.pai_dir = Some(dir.clone());
    }

    config
}

fn read_input(timeout_ms: u64) -> Result<String> {
    read_stdin_with_timeout(Duration::from_millis(timeout_ms))
}

fn run_agents(config: &Config, action: &AgentsCommand) -> Result<String> {
    let dir = config.agents_dir();
    match action {
        AgentsCommand::List => agents::list_agents(&dir),
        AgentsCommand::Info { agent } => agents::agent_info(&dir, agent),
        AgentsCommand::Prompt { agent, task } => {
            agents::generate_prompt(&dir, agent, &task.join(" "))
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let config = load_config(&cli);

    let code = match cli.command {
        Command::SecurityValidator => {
            let raw = read_input(config.validator.stdin_timeout_ms);
            HookEngine::new(config).security_validator(raw).emit()
        }
        Command::AnalyzeTaskScope => {
            let raw = read_input(config.scope.stdin_timeout_ms);
            HookEngine::new(config).analyze_task_scope(raw).emit()
        }
        Command::Persistence => {
            let raw = read_input(config.persistence.stdin_timeout_ms);
            HookEngine::new(config).persistence(raw).emit()
        }
        Command::Agents { ref action } => match run_agents(&config, action) {
            Ok(text) => {
                println!("{}", text);
                0
            }
            Err(HookError::AgentNotFound { name, available }) => {
                eprintln!("Agent not found: {}", name);
                eprintln!("Available agents: {}", available.join(", "));
                1
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
        },
    };

    process::exit(code);
}
