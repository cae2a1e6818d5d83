use assert_cmd::Command;
use predicates::prelude::*;

fn demo_path() -> String {
    format!("{}/scenarios/demo.yaml", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn coin_task_prints_text_report() {
    Command::cargo_bin("probspace")
        .expect("binary built")
        .args(["--task", "coins", "--log-level", "error"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Two coin tosses:"))
        .stdout(predicate::str::contains("A and B independent = yes"))
        .stdout(predicate::str::contains(
            "A, B and C mutually independent = no",
        ));
}

#[test]
fn json_output_is_an_array_of_reports() {
    let output = Command::cargo_bin("probspace")
        .expect("binary built")
        .args(["--task", "independence", "--json", "--log-level", "error"])
        .output()
        .expect("runs");
    assert!(output.status.success());

    let reports: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    let reports = reports.as_array().expect("array");
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[1]["lines"][2]["label"], "independent");
    assert_eq!(reports[1]["lines"][2]["value"], false);
}

#[test]
fn demo_scenarios_validate() {
    Command::cargo_bin("probspace")
        .expect("binary built")
        .args(["--config", &demo_path(), "--validate-only"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Scenario file 'demo' is valid (2 scenarios)",
        ));
}

#[test]
fn demo_scenarios_run() {
    Command::cargo_bin("probspace")
        .expect("binary built")
        .args(["--config", &demo_path(), "--log-level", "warn"])
        .assert()
        .success()
        .stdout(predicate::str::contains("P(even ∩ three_six) = 1/6"))
        .stdout(predicate::str::contains("first_heads and second_heads independent = yes"))
        .stdout(predicate::str::contains(
            "first_heads, second_heads, exactly_one mutually independent = no",
        ));
}

#[test]
fn missing_config_fails() {
    Command::cargo_bin("probspace")
        .expect("binary built")
        .args(["--config", "no/such/file.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config"));
}

#[test]
fn validate_only_requires_config() {
    Command::cargo_bin("probspace")
        .expect("binary built")
        .arg("--validate-only")
        .assert()
        .failure();
}
