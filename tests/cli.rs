#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use seances::{load_schedule_json, read_day_file};
use std::fs;
use tempfile::tempdir;

fn cli() -> Command {
    Command::cargo_bin("seances-cli").unwrap()
}

#[test]
fn generate_without_arguments_writes_data_in_cwd() {
    let cwd = tempdir().unwrap();
    cli()
        .current_dir(cwd.path())
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("30 file(s) written"));

    for i in 1..=30 {
        let slots = read_day_file(cwd.path().join("data").join(format!("day_{i}"))).unwrap();
        assert_eq!(slots.len(), 14);
    }
}

#[test]
fn seeded_generation_is_reproducible() {
    let root = tempdir().unwrap();
    for name in ["a", "b"] {
        cli()
            .args(["generate", "--seed", "11", "--output-dir"])
            .arg(root.path().join(name))
            .assert()
            .success();
    }
    for i in 1..=30 {
        let a = fs::read_to_string(root.path().join("a").join(format!("day_{i}"))).unwrap();
        let b = fs::read_to_string(root.path().join("b").join(format!("day_{i}"))).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn check_flags_appended_rerun_and_overwrite_fixes_it() {
    let root = tempdir().unwrap();
    let dir = root.path().join("data");
    for _ in 0..2 {
        cli().arg("generate").arg("--output-dir").arg(&dir).assert().success();
    }

    let report = root.path().join("issues.csv");
    cli()
        .arg("check")
        .arg("--output-dir")
        .arg(&dir)
        .arg("--report")
        .arg(&report)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Found 30 issue(s)"))
        .stderr(predicate::str::contains("[line-count] expected 14 lines, found 28"));
    let csv = fs::read_to_string(&report).unwrap();
    assert!(csv.starts_with("day,line,kind,detail"));
    assert_eq!(csv.lines().count(), 31);

    cli()
        .args(["generate", "--overwrite", "--output-dir"])
        .arg(&dir)
        .assert()
        .success();
    cli()
        .arg("check")
        .arg("--output-dir")
        .arg(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: 30 day file(s) valid"));
}

#[test]
fn config_file_drives_generation_and_exports() {
    let root = tempdir().unwrap();
    let out = root.path().join("planning");
    let cfg = root.path().join("seances.json");
    fs::write(
        &cfg,
        format!(
            r#"{{
  "outputDir": {out:?},
  "days": 3,
  "firstHour": 18,
  "lastHour": 21,
  "startDate": "2026-03-01",
  "catalog": ["initial_D_stage_one", "initial_D_stage_two"],
  "seed": 5,
  "mode": "overwrite"
}}"#,
            out = out.to_string_lossy()
        ),
    )
    .unwrap();
    let json = root.path().join("schedule.json");
    let csv = root.path().join("schedule.csv");

    cli()
        .arg("--config")
        .arg(&cfg)
        .arg("generate")
        .arg("--out-json")
        .arg(&json)
        .arg("--out-csv")
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 file(s) written"));

    assert!(!out.join("day_4").exists());
    let schedule = load_schedule_json(&json).unwrap();
    assert_eq!(schedule.days.len(), 3);
    assert_eq!(schedule.days[2].date.unwrap().to_string(), "2026-03-03");
    assert_eq!(read_day_file(out.join("day_2")).unwrap(), schedule.days[1].slots);

    let csv = fs::read_to_string(&csv).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("day,date,movie,start,end"));
    assert_eq!(lines.count(), 3 * 4);

    cli()
        .arg("--config")
        .arg(&cfg)
        .arg("check")
        .assert()
        .success();
}

#[test]
fn config_rejects_unknown_keys() {
    let root = tempdir().unwrap();
    let cfg = root.path().join("bad.json");
    fs::write(&cfg, r#"{ "outputDirectory": "x" }"#).unwrap();
    cli()
        .arg("--config")
        .arg(&cfg)
        .arg("catalog")
        .assert()
        .failure()
        .stderr(predicate::str::contains("parsing config"));
}

#[test]
fn catalog_lists_default_titles() {
    cli()
        .arg("catalog")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("initial_D_stage_one\ninitial_D_stage_two\n"))
        .stdout(predicate::str::contains("initial_D_spitfire_stage"));
}
