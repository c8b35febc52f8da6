use assert_approx_eq::assert_approx_eq;
use common::MatchResult;
use rating::{write_report, AgentRating, EloRating, RatingModel, TrueSkill, DEFAULT_ELO_RATING};
use std::fs;

fn members() -> Vec<String> {
    vec!["random".to_string(), "QLearning".to_string()]
}

#[test]
fn test_missing_snapshot_starts_at_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let mut elo = EloRating::load(dir.path().join("strategy_rating.json"), &members()).unwrap();

    assert_eq!(elo.ratings().len(), 2);
    assert_eq!(elo.rating("random"), DEFAULT_ELO_RATING);
}

#[test]
fn test_elo_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("matching").join("strategy_rating.json");

    let mut elo = EloRating::load(path.clone(), &members()).unwrap();
    elo.record(&MatchResult::new("QLearning".into(), "random".into(), 2, 0, 0));
    elo.record(&MatchResult::new("random".into(), "QLearning".into(), 1, 0, 1));
    elo.save().unwrap();

    let loaded = EloRating::load(path, &members()).unwrap();

    assert_eq!(loaded.ratings(), elo.ratings());
}

#[test]
fn test_new_members_are_merged_into_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("strategy_rating.json");

    let mut elo = EloRating::load(path.clone(), &members()).unwrap();
    elo.update("QLearning", "random", 2, 2.0);
    elo.save().unwrap();

    let mut members = members();
    members.push("maximize".to_string());
    let mut loaded = EloRating::load(path, &members).unwrap();

    assert_eq!(loaded.ratings().len(), 3);
    assert_approx_eq!(loaded.rating("QLearning"), 1516.0);
    assert_eq!(loaded.rating("maximize"), DEFAULT_ELO_RATING);
}

#[test]
fn test_trueskill_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trueskill.json");

    let mut trueskill = TrueSkill::load(path.clone(), &members()).unwrap();
    trueskill.record(&MatchResult::new("QLearning".into(), "random".into(), 1, 0, 1));
    trueskill.save().unwrap();

    let loaded = TrueSkill::load(path, &members()).unwrap();

    assert_eq!(loaded.ratings(), trueskill.ratings());
    assert_eq!(loaded.report(), trueskill.report());
}

#[test]
fn test_corrupt_snapshot_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("strategy_rating.json");
    fs::write(&path, "{ \"random\": ").unwrap();

    assert!(EloRating::load(path.clone(), &members()).is_err());
    assert!(TrueSkill::load(path, &members()).is_err());
}

#[test]
fn test_write_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    let report = vec![AgentRating {
        name: "random".to_string(),
        mean: 1500.0,
        uncertainty: 0.0,
    }];

    write_report(&path, &report).unwrap();
    let written: Vec<AgentRating> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

    assert_eq!(written, report);
}
