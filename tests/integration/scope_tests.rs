//! Integration tests for prompt complexity scoring and the scoping hook

use pai_hooks::{
    analyze_complexity, generate_scoping_guidance, is_informational, ComplexityAnalysis, Config,
    HookEngine, HookResponse, Level,
};

fn engine() -> HookEngine {
    HookEngine::new(Config::default())
}

fn prompt_json(prompt: &str) -> String {
    serde_json::json!({
        "session_id": "test-session",
        "prompt": prompt,
        "hook_event_name": "UserPromptSubmit"
    })
    .to_string()
}

fn filler(n: usize) -> String {
    vec!["word"; n].join(" ")
}

fn long_rewrite_prompt() -> String {
    format!(
        "Rewrite the entire billing platform before the production launch {}",
        filler(112)
    )
}

// ============================================================================
// Scoring
// ============================================================================

#[test]
fn test_score_always_in_range() {
    let prompts = [
        String::new(),
        "ls".to_string(),
        "fix it somehow".to_string(),
        long_rewrite_prompt(),
        format!(
            "{} 1. maybe delete the entire auth database in production, then deploy everywhere",
            filler(200)
        ),
    ];
    for prompt in &prompts {
        let analysis = analyze_complexity(prompt);
        assert!(analysis.score <= 10, "score {} out of range", analysis.score);
        assert_eq!(analysis.level, Level::from_score(analysis.score));
        assert_eq!(analysis.suggested_questions, analysis.level.suggested_questions());
    }
}

#[test]
fn test_long_risky_rewrite_is_complex() {
    let prompt = long_rewrite_prompt();
    assert!(prompt.split_whitespace().count() > 100);

    let analysis = analyze_complexity(&prompt);
    assert!(analysis.score >= 8);
    assert_eq!(analysis.level, Level::Complex);
    assert_eq!(analysis.suggested_questions, 6);
    assert!(analysis.indicators.contains(&"domain: rewrite".to_string()));
    assert!(analysis.indicators.contains(&"risk: production".to_string()));
    assert!(analysis.indicators.contains(&"scope: entire".to_string()));
}

#[test]
fn test_trivial_prompt_is_simple() {
    let analysis = analyze_complexity("rename foo to bar in lib.rs");
    assert_eq!(analysis.score, 0);
    assert_eq!(analysis.level, Level::Simple);
    assert!(analysis.indicators.is_empty());
}

#[test]
fn test_analysis_is_idempotent() {
    let prompt = long_rewrite_prompt();
    assert_eq!(analyze_complexity(&prompt), analyze_complexity(&prompt));
}

// ============================================================================
// Suppression
// ============================================================================

#[test]
fn test_continuations_never_get_guidance() {
    let complex = ComplexityAnalysis {
        score: 10,
        level: Level::Complex,
        indicators: vec!["scope: entire".to_string()],
        suggested_questions: 6,
    };
    for prompt in ["ok", "yes", "Continue", "go ahead", "sounds good", "thanks."] {
        assert_eq!(generate_scoping_guidance(&complex, prompt), "", "{}", prompt);
    }
}

#[test]
fn test_concept_question_suppressed() {
    assert!(is_informational("What is a closure?"));

    let complex = ComplexityAnalysis {
        score: 8,
        level: Level::Complex,
        indicators: vec![],
        suggested_questions: 6,
    };
    assert_eq!(generate_scoping_guidance(&complex, "What is a closure?"), "");
}

#[test]
fn test_task_question_not_suppressed() {
    assert!(!is_informational("Can you fix the login bug across the whole app?"));

    let prompt = "Can you update the payment database across the entire app?";
    let analysis = analyze_complexity(prompt);
    assert_eq!(analysis.level, Level::Medium);

    let guidance = generate_scoping_guidance(&analysis, prompt);
    assert!(guidance.contains("Complexity: Medium (6/10)"));
}

#[test]
fn test_question_mark_before_trailing_newline_still_guided() {
    let prompt = "Delete the entire production database and rewrite the auth layer?\n";
    assert!(!is_informational(prompt));

    let analysis = analyze_complexity(prompt);
    assert_eq!(analysis.level, Level::Medium);

    let guidance = generate_scoping_guidance(&analysis, prompt);
    assert!(guidance.contains("Complexity: Medium (6/10)"));
}

// ============================================================================
// Hook protocol
// ============================================================================

#[test]
fn test_hook_emits_guidance_for_medium_prompt() {
    let response = engine().analyze_task_scope(Ok(prompt_json(
        "refactor the database layer for production everywhere",
    )));

    assert_eq!(response.exit_code, 0);
    let stdout = response.stdout.unwrap();
    assert!(stdout.starts_with("<system-reminder>"));
    assert!(stdout.contains("Complexity: Medium (6/10)"));
    assert_eq!(
        response.diagnostic.as_deref(),
        Some("[analyze-task-scope] Medium task (6/10)")
    );
}

#[test]
fn test_hook_emits_complex_block() {
    let response = engine().analyze_task_scope(Ok(prompt_json(&long_rewrite_prompt())));

    let stdout = response.stdout.unwrap();
    assert!(stdout.contains("COMPLEX TASK DETECTED:"));
    assert!(stdout.contains("thorough (4-6 questions)"));
    assert!(response
        .diagnostic
        .unwrap()
        .starts_with("[analyze-task-scope] Complex task ("));
}

#[test]
fn test_hook_guides_task_with_trailing_newline() {
    let response = engine().analyze_task_scope(Ok(prompt_json(
        "Delete the entire production database and rewrite the auth layer?\n",
    )));
    assert_eq!(
        response.diagnostic.as_deref(),
        Some("[analyze-task-scope] Medium task (6/10)")
    );
    assert!(response.stdout.unwrap().contains("domain: authentication"));
}

#[test]
fn test_hook_silent_for_simple_prompt() {
    let response = engine().analyze_task_scope(Ok(prompt_json("rename foo to bar in lib.rs")));
    assert_eq!(response, HookResponse::silent());
}

#[test]
fn test_hook_silent_for_continuation() {
    let response = engine().analyze_task_scope(Ok(prompt_json("sounds good")));
    assert_eq!(response, HookResponse::silent());
}

#[test]
fn test_hook_silent_for_informational_medium_prompt() {
    let prompt = "What is the difference between database migration strategies in production?";
    assert_eq!(analyze_complexity(prompt).level, Level::Medium);

    let response = engine().analyze_task_scope(Ok(prompt_json(prompt)));
    assert_eq!(response, HookResponse::silent());
}

#[test]
fn test_hook_silent_for_short_and_empty_input() {
    assert_eq!(
        engine().analyze_task_scope(Ok(prompt_json("ok"))),
        HookResponse::silent()
    );
    assert_eq!(
        engine().analyze_task_scope(Ok(String::new())),
        HookResponse::silent()
    );
}

#[test]
fn test_min_prompt_chars_is_configurable() {
    let mut config = Config::default();
    config.scope.min_prompt_chars = 500;
    let engine = HookEngine::new(config);

    let response = engine.analyze_task_scope(Ok(prompt_json(
        "refactor the database layer for production everywhere",
    )));
    assert_eq!(response, HookResponse::silent());
}
