use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

fn config(rel: &str) -> String {
    repo_root().join(rel).to_string_lossy().to_string()
}

#[allow(deprecated)]
fn fsr() -> Command {
    let mut cmd = Command::cargo_bin("fsr").unwrap();
    cmd.env_remove("FSR_CONFIG");
    cmd
}

#[test]
fn config_hash_prints_hash_and_canonical_json() {
    fsr()
        .args(["config-hash", &config("config/defaults/station.yaml")])
        .assert()
        .success()
        .stdout(predicate::str::contains("config_hash="))
        .stdout(predicate::str::contains("\"pricing\""));
}

#[test]
fn station_overlay_changes_effective_thresholds() {
    fsr()
        .args([
            "thresholds",
            "--config",
            &config("config/defaults/station.yaml"),
            "--config",
            &config("config/stations/ring_road.yaml"),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("pass_percent=0.75"))
        .stdout(predicate::str::contains("warning_percent=2"));
}

#[test]
fn config_falls_back_to_env_var() {
    fsr()
        .env("FSR_CONFIG", config("config/defaults/station.yaml"))
        .args(["thresholds"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pass_percent=1"));
}

#[test]
fn missing_config_is_an_error() {
    fsr()
        .args(["thresholds"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no config given"));
}

#[test]
fn dip_interpolates_between_chart_rows() {
    fsr()
        .args([
            "dip",
            "--config",
            &config("config/defaults/station.yaml"),
            "--tank",
            "T1",
            "--dip",
            "35",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("volume_l=3350.00"))
        .stdout(predicate::str::contains("low_fuel=false"));
}

#[test]
fn low_dip_converts_with_advisory() {
    fsr()
        .args([
            "dip",
            "--config",
            &config("config/defaults/station.yaml"),
            "--tank",
            "T1",
            "--dip",
            "10",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("volume_l=750.00"))
        .stdout(predicate::str::contains("low_fuel=true"))
        .stderr(predicate::str::contains("LOW_FUEL"));
}

#[test]
fn dip_above_chart_is_a_range_error() {
    fsr()
        .args([
            "dip",
            "--config",
            &config("config/defaults/station.yaml"),
            "--tank",
            "T2",
            "--dip",
            "300",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("RangeError"));
}

#[test]
fn volume_converts_back_to_dip() {
    fsr()
        .args([
            "dip",
            "--config",
            &config("config/defaults/station.yaml"),
            "--tank",
            "T1",
            "--volume",
            "12800",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("dip_cm=100.00"));
}

#[test]
fn unknown_tank_is_rejected() {
    fsr()
        .args([
            "dip",
            "--config",
            &config("config/defaults/station.yaml"),
            "--tank",
            "T9",
            "--dip",
            "10",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown tank: T9"));
}
