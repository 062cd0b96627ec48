//! CLI Integration Tests for dinerec-cli

use assert_cmd::Command;
use predicates::prelude::*;

#[path = "../../../tests/common/mod.rs"]
mod common;

use common::{Fixture, DRAGON_WOK, LONELY_DINER, PIZZA_PLACE};

/// Create a dinerec command rooted at the fixture
fn dinerec(fixture: &Fixture) -> Command {
    let mut cmd = Command::cargo_bin("dinerec").expect("Failed to find dinerec binary");
    cmd.arg("--data-dir").arg(fixture.path());
    cmd
}

fn recommend_args(row: usize) -> Vec<String> {
    let mut args = vec!["recommend".to_string()];
    args.extend(common::selection_args(row));
    args
}

// ============================================================================
// home / options
// ============================================================================

#[test]
fn test_home_shows_banner_and_image() {
    let fixture = Fixture::new();
    dinerec(&fixture)
        .arg("home")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Welcome to the Smart Restaurant Recommender!",
        ))
        .stdout(predicate::str::contains("images.png"));
}

#[test]
fn test_home_requires_artifacts() {
    let dir = tempfile::tempdir().expect("temp dir");
    Command::cargo_bin("dinerec")
        .expect("Failed to find dinerec binary")
        .arg("--data-dir")
        .arg(dir.path())
        .arg("home")
        .assert()
        .code(3)
        .stdout(predicate::str::contains("Welcome").not())
        .stderr(predicate::str::contains("encoded_data.zip"));
}

#[test]
fn test_home_fails_on_corrupt_model() {
    let fixture = Fixture::new();
    fixture.write_text("kmeans_model.json", "{}");
    dinerec(&fixture).arg("home").assert().code(4);
}

#[test]
fn test_options_lists_cities() {
    let fixture = Fixture::new();
    dinerec(&fixture)
        .arg("options")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bangalore, Mumbai"))
        .stdout(predicate::str::contains("Next: choose a city"));
}

#[test]
fn test_options_json_cascade() {
    let fixture = Fixture::new();
    let output = dinerec(&fixture)
        .args(["--json", "options", "--city", "Bangalore", "--cuisine", "Chinese"])
        .output()
        .expect("run");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(json["cuisines"], serde_json::json!(["Chinese", "Pizzas"]));
    assert_eq!(json["ratings"], serde_json::json!([3.8, 4.0]));
    assert_eq!(json["next_level"], "rating");
}

#[test]
fn test_options_invalid_city_warns() {
    let fixture = Fixture::new();
    dinerec(&fixture)
        .args(["options", "--city", "Atlantis"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("[WARN]"))
        .stdout(predicate::str::contains("'Atlantis' is not a valid city"));
}

// ============================================================================
// recommend
// ============================================================================

#[test]
fn test_recommend_pizza_place() {
    let fixture = Fixture::new();
    for method in ["euclidean", "cosine"] {
        let mut args = recommend_args(PIZZA_PLACE);
        args.extend(["--method".to_string(), method.to_string()]);
        dinerec(&fixture)
            .args(&args)
            .assert()
            .success()
            .stdout(predicate::str::contains("Recommended Restaurants (Using"))
            .stdout(predicate::str::contains("1. Pizza Place"))
            .stdout(predicate::str::contains("Distance: 0.0000"))
            .stdout(predicate::str::contains(
                "https://www.google.com/maps/search/12+MG+Road,+Bangalore",
            ))
            .stdout(predicate::str::contains("2. ").not());
    }
}

#[test]
fn test_recommend_json() {
    let fixture = Fixture::new();
    let mut args = vec!["--json".to_string()];
    args.extend(recommend_args(DRAGON_WOK));
    let output = dinerec(&fixture).args(&args).output().expect("run");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(
        json["heading"],
        "Top 10 Recommended Restaurants (Using Euclidean Distance)"
    );
    let results = json["results"].as_array().expect("results");
    assert_eq!(results.len(), 3);
    assert_eq!(results[0]["name"], "Dragon Wok");
    assert_eq!(results[0]["distance"], 0.0);
    assert_eq!(results[0]["cost"], "₹300.0");
    assert!(json.get("message").is_none());
}

#[test]
fn test_recommend_none_found_is_success() {
    let fixture = Fixture::new();
    dinerec(&fixture)
        .args(recommend_args(LONELY_DINER))
        .assert()
        .success()
        .stdout(predicate::str::contains("No similar restaurants found."));
}

#[test]
fn test_recommend_top_k_from_flag_and_config() {
    let fixture = Fixture::new();
    let mut args = recommend_args(DRAGON_WOK);
    args.extend(["--top-k".to_string(), "2".to_string()]);
    dinerec(&fixture)
        .args(&args)
        .assert()
        .success()
        .stdout(predicate::str::contains("Top 2 Recommended"))
        .stdout(predicate::str::contains("3. ").not());

    fixture.write_text("dinerec.json", r#"{"recommender": {"top_k": 1}}"#);
    dinerec(&fixture)
        .arg("--config")
        .arg(fixture.path().join("dinerec.json"))
        .args(recommend_args(DRAGON_WOK))
        .assert()
        .success()
        .stdout(predicate::str::contains("2. ").not());
}

#[test]
fn test_recommend_rejects_zero_top_k() {
    let fixture = Fixture::new();
    let mut args = recommend_args(DRAGON_WOK);
    args.extend(["--top-k".to_string(), "0".to_string()]);
    dinerec(&fixture)
        .args(&args)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("top_k"));
}

#[test]
fn test_recommend_invalid_cost_warns() {
    let fixture = Fixture::new();
    let mut args = recommend_args(DRAGON_WOK);
    let cost = args.len() - 1;
    args[cost] = "999".to_string();
    dinerec(&fixture)
        .args(&args)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("'999' is not a valid cost"));
}

#[test]
fn test_recommend_rejects_unknown_method() {
    let fixture = Fixture::new();
    let mut args = recommend_args(DRAGON_WOK);
    args.extend(["--method".to_string(), "manhattan".to_string()]);
    dinerec(&fixture).args(&args).assert().failure();
}

// ============================================================================
// failures at startup
// ============================================================================

#[test]
fn test_missing_archive_exit_code() {
    let dir = tempfile::tempdir().expect("temp dir");
    Command::cargo_bin("dinerec")
        .expect("Failed to find dinerec binary")
        .arg("--data-dir")
        .arg(dir.path())
        .arg("check")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("error: File not found"))
        .stderr(predicate::str::contains("encoded_data.zip"));
}

#[test]
fn test_corrupt_artifact_exit_code() {
    let fixture = Fixture::new();
    fixture.write_text("scaler.json", "nope");
    dinerec(&fixture)
        .arg("check")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("scaler.json"));
}

// ============================================================================
// check / browse
// ============================================================================

#[test]
fn test_check_reports_shapes() {
    let fixture = Fixture::new();
    dinerec(&fixture)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Restaurants: 8"))
        .stdout(predicate::str::contains("PCA components: 3"))
        .stdout(predicate::str::contains("PCA columns: PC1, PC2, PC3"))
        .stdout(predicate::str::contains("Cluster 0: 5"))
        .stdout(predicate::str::contains("All artifacts loaded and consistent"));
}

#[test]
fn test_browse_defaults_then_quit() {
    let fixture = Fixture::new();
    // Enter through every menu: Bangalore, Chinese, 3.8, 40, 250, Euclidean
    dinerec(&fixture)
        .arg("browse")
        .write_stdin("\n\n\n\n\n\nn\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Select City"))
        .stdout(predicate::str::contains("Select Distance Method"))
        .stdout(predicate::str::contains("1. Golden Chopsticks"));
}

#[test]
fn test_browse_by_number_and_eof() {
    let fixture = Fixture::new();
    // Mumbai, Pizzas, then the only rating, count and cost, Cosine
    dinerec(&fixture)
        .arg("browse")
        .write_stdin("2\n3\n\n\n\n2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No similar restaurants found."));
}
