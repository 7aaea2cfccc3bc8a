//! Agent spawner
//!
//! Reads `<name>.md` agent definitions (frontmatter plus markdown body) and
//! renders listings, details, and ready-to-paste Task tool prompts.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Write as _;
use std::path::Path;

use crate::engine::common::truncate_chars;
use crate::error::{HookError, Result};

const DEFAULT_MODEL: &str = "sonnet";
const GENERAL_PURPOSE: &str = "general-purpose";

/// Custom agents mapped to the closest built-in Task subagent type
const AGENT_TYPE_MAP: &[(&str, &str)] = &[
    ("debugger", "engineer"),
    ("architect", "architect"),
    ("engineer", "engineer"),
    ("designer", "designer"),
    ("pentester", "pentester"),
    ("researcher", "researcher"),
    ("claude-researcher", "claude-researcher"),
    ("perplexity-researcher", "perplexity-researcher"),
    ("gemini-researcher", "gemini-researcher"),
];

static FRONTMATTER: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"(?s)^---\n(.*?)\n---\n(.*)$").ok());
static KEY_LINE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^(\w+):\s*(.*)$").ok());
static LIST_ITEM: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r#"^\s+-\s+"(.+)"$"#).ok());
static SECTION_HEADING: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"(?m)^##\s+").ok());

/// Parsed agent definition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentConfig {
    pub name: Option<String>,
    pub description: Option<String>,
    pub model: Option<String>,
    pub color: Option<String>,
    pub voice_id: Option<String>,
    /// Items of the frontmatter list (`permissions:` block)
    pub permissions: Vec<String>,
    pub body: String,
}

impl AgentConfig {
    /// Parse frontmatter and body. Without a frontmatter block the whole
    /// file is the body and the name is "unknown".
    pub fn parse(content: &str) -> Self {
        let Some(caps) = FRONTMATTER.as_ref().and_then(|re| re.captures(content)) else {
            return Self {
                name: Some("unknown".to_string()),
                description: Some(String::new()),
                body: content.to_string(),
                ..Self::default()
            };
        };

        let mut config = Self {
            body: caps[2].trim().to_string(),
            ..Self::default()
        };

        for line in caps[1].lines() {
            if let Some(kv) = KEY_LINE.as_ref().and_then(|re| re.captures(line)) {
                let value = kv[2].trim();
                if value.is_empty() {
                    continue;
                }
                let value = Some(value.to_string());
                match &kv[1] {
                    "name" => config.name = value,
                    "description" => config.description = value,
                    "model" => config.model = value,
                    "color" => config.color = value,
                    "voiceId" => config.voice_id = value,
                    _ => {}
                }
            } else if let Some(item) = LIST_ITEM.as_ref().and_then(|re| re.captures(line)) {
                config.permissions.push(item[1].to_string());
            }
        }

        config
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    /// Declared name, falling back to the file stem
    pub fn display_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(fallback)
    }

    /// First three `## ` sections of the body, ten lines each
    pub fn key_instructions(&self) -> String {
        let Some(ref re) = *SECTION_HEADING else {
            return String::new();
        };
        re.split(&self.body)
            .skip(1)
            .take(3)
            .map(|section| section.lines().take(10).collect::<Vec<_>>().join("\n"))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Built-in Task subagent type for an agent name
pub fn builtin_type(agent: &str) -> &'static str {
    let lower = agent.to_lowercase();
    AGENT_TYPE_MAP
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, builtin)| *builtin)
        .unwrap_or(GENERAL_PURPOSE)
}

/// Agent names (file stems of `*.md`), sorted
pub fn available_agents(dir: &Path) -> Result<Vec<String>> {
    let mut names: Vec<String> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let file_name = entry.file_name().to_string_lossy().into_owned();
            file_name.strip_suffix(".md").map(String::from)
        })
        .collect();
    names.sort();
    Ok(names)
}

/// Load `<dir>/<name>.md`
pub fn load_agent(dir: &Path, name: &str) -> Result<AgentConfig> {
    let path = dir.join(format!("{}.md", name));
    match std::fs::read_to_string(&path) {
        Ok(content) => Ok(AgentConfig::parse(&content)),
        Err(_) => Err(HookError::AgentNotFound {
            name: name.to_string(),
            available: available_agents(dir).unwrap_or_default(),
        }),
    }
}

/// Markdown table of every agent
pub fn list_agents(dir: &Path) -> Result<String> {
    let mut out = String::from("Available PAI Agents:\n\n");
    out.push_str("| Agent | Built-in Type | Model | Description |\n");
    out.push_str("|-------|---------------|-------|-------------|\n");

    for stem in available_agents(dir)? {
        let content = std::fs::read_to_string(dir.join(format!("{}.md", stem)))?;
        let config = AgentConfig::parse(&content);
        let name = config.display_name(&stem);
        let description = match config.description.as_deref() {
            Some(d) => format!("{}...", truncate_chars(d, 50)),
            None => "No description".to_string(),
        };
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} |",
            name,
            builtin_type(name),
            config.model(),
            description
        );
    }

    out.push_str("\nUsage: pai-hooks agents prompt <agent-name> \"<your task>\"");
    Ok(out)
}

/// Details of one agent
pub fn agent_info(dir: &Path, agent: &str) -> Result<String> {
    let config = load_agent(dir, agent)?;
    let mut out = String::new();

    let _ = writeln!(out, "\n=== {} Agent ===\n", config.display_name(agent));
    let _ = writeln!(out, "Description: {}", config.description.as_deref().unwrap_or("N/A"));
    let _ = writeln!(out, "Model: {}", config.model());
    let _ = writeln!(out, "Color: {}", config.color.as_deref().unwrap_or("N/A"));
    let _ = writeln!(out, "Voice: {}", config.voice_id.as_deref().unwrap_or("N/A"));
    let _ = writeln!(out, "Built-in Type: {}", builtin_type(agent));
    let _ = writeln!(out, "\nPermissions:");
    for permission in &config.permissions {
        let _ = writeln!(out, "  - {}", permission);
    }
    let _ = writeln!(out, "\n--- Agent Instructions (first 500 chars) ---");
    let _ = write!(out, "{}...", truncate_chars(&config.body, 500));

    Ok(out)
}

/// Task tool prompt for running `task` as `agent`
pub fn generate_prompt(dir: &Path, agent: &str, task: &str) -> Result<String> {
    let config = load_agent(dir, agent)?;
    let name = config.display_name(agent);
    let builtin = builtin_type(agent);
    let model = config.model();
    let instructions = config.key_instructions();

    let prompt = format!(
        "You are the {name} agent.

{description}

## Key Instructions
{instructions}

## YOUR TASK
{task}

Follow the systematic approach defined in your agent configuration. Report results clearly.",
        description = config.description.as_deref().unwrap_or(""),
        instructions = truncate_chars(&instructions, 1000),
    );

    let mut out = String::new();
    let _ = writeln!(out, "\n=== Task Tool Call for {} Agent ===\n", name);
    let _ = writeln!(out, "subagent_type: \"{}\"", builtin);
    let _ = writeln!(out, "model: \"{}\"", model);
    let _ = writeln!(out, "\n--- Prompt ---\n");
    let _ = writeln!(out, "{}", prompt);
    let _ = writeln!(out, "\n--- Copy-Paste for Task Tool ---\n");
    let _ = writeln!(out, "Task({{");
    let _ = writeln!(
        out,
        "  description: \"{}: {}...\",",
        agent,
        truncate_chars(task, 30)
    );
    let _ = writeln!(out, "  subagent_type: \"{}\",", builtin);
    let _ = writeln!(out, "  model: \"{}\",", model);
    let _ = writeln!(out, "  prompt: `{}`", prompt.replace('`', "\\`"));
    let _ = write!(out, "}})");

    Ok(out)
}
