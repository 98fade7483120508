// Unit tests for role inference and match scoring

mod common;

use common::*;
use jobalign::core::roles::{DEFAULT_ROLE, MAX_ROLES};
use jobalign::core::scoring::{heuristic_score, DIRECT_MATCH_SCORE};
use jobalign::core::{Outcome, RoleInference};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_roles_from_primary_prompt() {
    let generator = ScriptedGenerator::fixed("Web Developer, Frontend Developer", "0");
    let engine = RoleInference::new(generator.clone(), TIMEOUT);

    let roles = engine.infer(&skills(&["html", "css"])).await;

    assert_eq!(roles, vec!["Web Developer", "Frontend Developer"]);
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn test_roles_retry_with_simplified_prompt() {
    let generator = ScriptedGenerator::new(|prompt| {
        if prompt.starts_with("List job roles") {
            Ok("Data Engineer,Analytics Engineer".to_string())
        } else {
            Ok(" , ".to_string())
        }
    });
    let engine = RoleInference::new(generator.clone(), TIMEOUT);

    let roles = engine.infer(&skills(&["spark", "airflow"])).await;

    assert_eq!(roles, vec!["Data Engineer", "Analytics Engineer"]);
    assert_eq!(generator.calls(), 2);
}

#[tokio::test]
async fn test_roles_empty_twice_uses_rules() {
    let generator = ScriptedGenerator::fixed("", "0");
    let engine = RoleInference::new(generator.clone(), TIMEOUT);

    let roles = engine.infer(&skills(&["knitting"])).await;

    assert_eq!(roles, vec![DEFAULT_ROLE]);
    assert_eq!(generator.calls(), 2);
}

#[tokio::test]
async fn test_roles_failure_skips_simplified_prompt() {
    let generator = ScriptedGenerator::failing();
    let engine = RoleInference::new(generator.clone(), TIMEOUT);

    let roles = engine.infer(&skills(&["python", "django"])).await;

    assert!(roles.contains(&"Backend Developer".to_string()));
    assert!(roles.contains(&"Python Developer".to_string()));
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn test_roles_timeout_uses_rules() {
    let engine = RoleInference::new(Arc::new(StalledGenerator), Duration::from_millis(20));

    let roles = engine.infer(&skills(&["react"])).await;

    assert_eq!(roles, vec!["Web Developer", "Frontend Developer"]);
}

#[tokio::test]
async fn test_roles_always_bounded_and_non_empty() {
    let skill_sets = [
        vec!["python"],
        vec!["html", "css", "django", "sql", "react", "node"],
        vec!["cobol"],
        vec!["  "],
    ];

    for set in skill_sets {
        let engine = RoleInference::new(ScriptedGenerator::failing(), TIMEOUT);
        let roles = engine.infer(&skills(&set)).await;
        assert!(!roles.is_empty() && roles.len() <= MAX_ROLES, "bad roles for {:?}: {:?}", set, roles);
        assert!(roles.iter().all(|r| !r.is_empty()));
    }
}

#[tokio::test]
async fn test_roles_model_reply_capped() {
    let generator = ScriptedGenerator::fixed("A,B,C,D,E,F,G", "0");
    let roles = RoleInference::new(generator, TIMEOUT).infer(&skills(&["x"])).await;
    assert_eq!(roles.len(), MAX_ROLES);
}

#[tokio::test]
async fn test_variation_match_skips_model() {
    let generator = ScriptedGenerator::fixed("", "10");
    let scorer = scorer(generator.clone());

    let score = scorer
        .score(&skills(&["Backend Developer"]), "Back-end Developer (Remote)")
        .await;

    assert_eq!(score, DIRECT_MATCH_SCORE);
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_variation_tier_declines_unrelated_title() {
    let scorer = scorer(ScriptedGenerator::failing());
    let outcome = scorer.variation_tier(&skills(&["Backend Developer"]), "Pastry Chef");
    assert_eq!(outcome, Outcome::Declined);
}

#[tokio::test]
async fn test_model_estimate_above_threshold() {
    let scorer = scorer(ScriptedGenerator::fixed("", "Match: 65"));
    let score = scorer.score(&skills(&["Backend Developer"]), "Platform Engineer").await;
    assert_eq!(score, 65.0);
}

#[tokio::test]
async fn test_low_model_estimate_is_no_match() {
    let scorer = scorer(ScriptedGenerator::fixed("", "20"));
    let score = scorer.score(&skills(&["Data Engineer"]), "Analytics Lead").await;
    assert_eq!(score, 0.0);
}

#[tokio::test]
async fn test_unparseable_model_reply_is_no_match() {
    let scorer = scorer(ScriptedGenerator::fixed("", "sorry, I cannot rate that"));
    let score = scorer.score(&skills(&["Data Engineer"]), "Analytics Lead").await;
    assert_eq!(score, 0.0);
}

#[tokio::test]
async fn test_model_failure_falls_back_to_heuristic() {
    let roles = skills(&["Data Engineer"]);
    let scorer = scorer(ScriptedGenerator::failing());

    let score = scorer.score(&roles, "Analytics Lead").await;

    assert_eq!(score, heuristic_score(&roles, "Analytics Lead"));
    assert_eq!(score, 0.0);
}

#[tokio::test]
async fn test_role_in_title_wins_before_model() {
    // The canonical role is itself a variation, so this never reaches the heuristic
    let generator = ScriptedGenerator::failing();
    let scorer = scorer(generator.clone());

    let score = scorer.score(&skills(&["Data Engineer"]), "Senior Data Engineer").await;

    assert_eq!(score, DIRECT_MATCH_SCORE);
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_model_timeout_is_bounded() {
    let scorer = jobalign::core::MatchScorer::new(
        Arc::new(StalledGenerator),
        Arc::new(jobalign::core::RoleVariations::standard()),
        Duration::from_millis(20),
    );

    let started = std::time::Instant::now();
    let score = scorer.score(&skills(&["Data Engineer"]), "Analytics Lead").await;

    assert_eq!(score, 0.0);
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_scoring_is_idempotent() {
    let scorer = scorer(ScriptedGenerator::fixed("", "72"));
    let roles = skills(&["Machine Learning Engineer"]);

    let first = scorer.score(&roles, "Applied Scientist").await;
    let second = scorer.score(&roles, "Applied Scientist").await;

    assert_eq!(first, second);
    assert_eq!(first, 72.0);
}

#[tokio::test]
async fn test_custom_threshold() {
    let scorer = scorer(ScriptedGenerator::fixed("", "45")).with_min_model_score(50.0);
    let score = scorer.score(&skills(&["Backend Developer"]), "Site Reliability Engineer").await;
    assert_eq!(score, 0.0);
}
