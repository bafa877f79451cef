use assert_cmd::Command;
use image::{Rgb, RgbImage};
use predicates::prelude::*;

fn write_target(dir: &std::path::Path) -> std::path::PathBuf {
    let mut image = RgbImage::from_pixel(100, 60, Rgb([30, 40, 50]));
    for (x0, y0) in [(10, 10), (60, 30)] {
        for y in y0..y0 + 11 {
            for x in x0..x0 + 11 {
                image.put_pixel(x, y, Rgb([255, 255, 255]));
            }
        }
    }
    let path = dir.join("target.png");
    image.save(&path).unwrap();
    path
}

#[test]
fn annotates_files_and_reports_json() {
    let dir = tempfile::tempdir().unwrap();
    write_target(dir.path());
    let out = dir.path().join("out");
    let report = dir.path().join("report.json");

    Command::cargo_bin("detect_hole")
        .unwrap()
        .arg(format!("{}/*.png", dir.path().display()))
        .arg("--output-dir")
        .arg(&out)
        .arg("--report")
        .arg(&report)
        .assert()
        .success();

    assert!(out.join("target_holes.png").is_file());
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json[0]["hole_count"], 2);
    assert_eq!(json[0]["holes"][0]["labels"][0], 1);
    assert!(json[0]["error"].is_null());
}

#[test]
fn fails_when_nothing_matches() {
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("detect_hole")
        .unwrap()
        .arg(format!("{}/*.png", dir.path().display()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no image matched"));
}

#[test]
fn unreadable_image_is_reported_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_target(dir.path());
    std::fs::write(dir.path().join("broken.png"), b"not a png").unwrap();

    Command::cargo_bin("detect_hole")
        .unwrap()
        .arg(format!("{}/*.png", dir.path().display()))
        .arg("--output-dir")
        .arg(dir.path().join("out"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"error\": \"reading"));
}
