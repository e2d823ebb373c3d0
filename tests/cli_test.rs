use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn log_line(path: &str) -> String {
    format!(
        "10.254.254.28 - - [06/Aug/2007:00:13:48 -0700] \"GET {} HTTP/1.0\" 302 528 \"-\" \"Mozilla/5.0 (Windows; U; Windows NT 5.1; en-US; rv:1.8.1.6) Gecko/20070725 Firefox/2.0.0.6\"",
        path
    )
}

fn write_log(dir: &Path, paths: &[&str]) -> std::path::PathBuf {
    let mut lines: Vec<String> = paths.iter().map(|p| log_line(p)).collect();
    lines.push(log_line("/favicon.ico"));
    let log_path = dir.join("animal_code.google.com");
    fs::write(&log_path, lines.join("\n") + "\n").unwrap();
    log_path
}

/// Runs in `work_dir` so no logpuzzle.toml from elsewhere is picked up.
fn logpuzzle(work_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("logpuzzle").unwrap();
    cmd.current_dir(work_dir);
    cmd
}

#[test]
fn no_arguments_prints_usage() {
    let temp_dir = TempDir::new().unwrap();

    logpuzzle(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn prints_sorted_unique_urls() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = write_log(
        temp_dir.path(),
        &[
            "/edu/puzzle/a-bear-claaa.jpg",
            "/edu/puzzle/b-bear-aaab.jpg",
            "/edu/puzzle/a-bear-claaa.jpg",
        ],
    );

    logpuzzle(temp_dir.path())
        .arg(&log_path)
        .assert()
        .success()
        .stdout(
            "https://code.google.com/edu/puzzle/b-bear-aaab.jpg\n\
             https://code.google.com/edu/puzzle/a-bear-claaa.jpg\n",
        );
}

#[test]
fn prints_empty_line_for_log_without_puzzles() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = write_log(temp_dir.path(), &[]);

    logpuzzle(temp_dir.path())
        .arg(&log_path)
        .assert()
        .success()
        .stdout("\n");
}

#[test]
fn ignores_config_outside_working_dir() {
    let temp_dir = TempDir::new().unwrap();
    let work_dir = temp_dir.path().join("work");
    fs::create_dir(&work_dir).unwrap();
    fs::write(
        temp_dir.path().join("logpuzzle.toml"),
        "[extract]\nhost = \"http://stray.example\"\n",
    )
    .unwrap();
    let log_path = write_log(temp_dir.path(), &["/~foo/puzzle-bar-aaab.jpg"]);

    logpuzzle(&work_dir)
        .arg(&log_path)
        .assert()
        .success()
        .stdout("https://code.google.com/~foo/puzzle-bar-aaab.jpg\n");
}

#[test]
fn working_dir_config_is_loaded() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("logpuzzle.toml"),
        "[extract]\nhost = \"http://local.example\"\n",
    )
    .unwrap();
    let log_path = write_log(temp_dir.path(), &["/~foo/puzzle-bar-aaab.jpg"]);

    logpuzzle(temp_dir.path())
        .arg(&log_path)
        .assert()
        .success()
        .stdout("http://local.example/~foo/puzzle-bar-aaab.jpg\n");
}

#[test]
fn json_output_is_an_array() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = write_log(temp_dir.path(), &["/~foo/puzzle-bar-aaab.jpg"]);

    let output = logpuzzle(temp_dir.path())
        .arg(&log_path)
        .args(["--output-format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let urls: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(urls, vec!["https://code.google.com/~foo/puzzle-bar-aaab.jpg"]);
}

#[test]
fn missing_log_file_fails() {
    let temp_dir = TempDir::new().unwrap();

    logpuzzle(temp_dir.path())
        .arg(temp_dir.path().join("nope.log"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("nope.log"));
}

#[test]
fn invalid_host_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = write_log(temp_dir.path(), &["/~foo/puzzle-bar-aaab.jpg"]);

    logpuzzle(temp_dir.path())
        .arg(&log_path)
        .args(["--host", "https://code.google.com/"])
        .assert()
        .code(2);
}

#[test]
fn downloads_gallery_from_host() {
    let mut server = mockito::Server::new();
    let first = server
        .mock("GET", "/edu/puzzle/b-bear-aaab.jpg")
        .with_status(200)
        .with_body("piece-one")
        .create();
    let second = server
        .mock("GET", "/edu/puzzle/a-bear-claaa.jpg")
        .with_status(200)
        .with_body("piece-two")
        .create();

    let host = server.url();

    let temp_dir = TempDir::new().unwrap();
    let log_path = write_log(
        temp_dir.path(),
        &["/edu/puzzle/a-bear-claaa.jpg", "/edu/puzzle/b-bear-aaab.jpg"],
    );
    let dest = temp_dir.path().join("animaldir");

    logpuzzle(temp_dir.path())
        .arg("--todir")
        .arg(&dest)
        .arg(&log_path)
        .args(["--host", host.as_str(), "--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Retrieving img0 from {}/edu/puzzle/b-bear-aaab.jpg...",
            host
        )))
        .stdout(predicate::str::contains("index.html..."));

    first.assert();
    second.assert();
    assert_eq!(fs::read_to_string(dest.join("img0")).unwrap(), "piece-one");
    assert_eq!(fs::read_to_string(dest.join("img1")).unwrap(), "piece-two");

    let index = fs::read_to_string(dest.join("index.html")).unwrap();
    assert_eq!(
        index,
        "<html>\n  <body>\n    <img src=\"img0\"><img src=\"img1\">\n  </body>\n</html>\n"
    );
}

#[test]
fn verbatim_template_and_quiet_mode() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("GET", "/foo/puzzle-bar-aaab.jpg")
        .with_status(200)
        .with_body("x")
        .create();
    let host = server.url();

    let temp_dir = TempDir::new().unwrap();
    let log_path = write_log(temp_dir.path(), &["/foo/puzzle-bar-aaab.jpg"]);
    let dest = temp_dir.path().join("out");

    logpuzzle(temp_dir.path())
        .arg(&log_path)
        .arg("--todir")
        .arg(&dest)
        .args(["--host", host.as_str(), "--template", "verbatim", "--quiet"])
        .assert()
        .success()
        .stdout("");

    let index = fs::read_to_string(dest.join("index.html")).unwrap();
    assert!(index.starts_with("<verbatim>\n  <html>\n    <body>\n      <img src=\"img0\">"));
}

#[test]
fn require_success_stops_on_error_status() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("GET", "/foo/puzzle-bar-aaab.jpg")
        .with_status(404)
        .with_body("missing")
        .create();
    let host = server.url();

    let temp_dir = TempDir::new().unwrap();
    let log_path = write_log(temp_dir.path(), &["/foo/puzzle-bar-aaab.jpg"]);
    let dest = temp_dir.path().join("out");

    logpuzzle(temp_dir.path())
        .arg(&log_path)
        .arg("--todir")
        .arg(&dest)
        .args(["--host", host.as_str(), "--require-success", "-q"])
        .assert()
        .code(4);

    assert!(dest.is_dir());
    assert!(!dest.join("img0").exists());
    assert!(!dest.join("index.html").exists());
}

#[test]
fn error_status_is_saved_without_require_success() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("GET", "/foo/puzzle-bar-aaab.jpg")
        .with_status(404)
        .with_body("missing")
        .create();
    let host = server.url();

    let temp_dir = TempDir::new().unwrap();
    let log_path = write_log(temp_dir.path(), &["/foo/puzzle-bar-aaab.jpg"]);
    let dest = temp_dir.path().join("out");

    logpuzzle(temp_dir.path())
        .arg(&log_path)
        .arg("--todir")
        .arg(&dest)
        .args(["--host", host.as_str(), "-q"])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(dest.join("img0")).unwrap(), "missing");
}

#[test]
fn nested_destination_is_not_created() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = write_log(temp_dir.path(), &[]);
    let dest = temp_dir.path().join("a").join("b");

    logpuzzle(temp_dir.path())
        .arg(&log_path)
        .arg("--todir")
        .arg(&dest)
        .assert()
        .code(6);

    assert!(!temp_dir.path().join("a").exists());
}

#[test]
fn generate_config_writes_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("logpuzzle.toml");

    logpuzzle(temp_dir.path())
        .arg("--generate-config")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated sample configuration file"));

    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("host = \"https://code.google.com\""));
}

#[test]
fn config_file_sets_host() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = write_log(temp_dir.path(), &["/~foo/puzzle-bar-aaab.jpg"]);
    let config_path = temp_dir.path().join("custom.toml");
    fs::write(&config_path, "[extract]\nhost = \"http://mirror.example\"\n").unwrap();

    logpuzzle(temp_dir.path())
        .arg(&log_path)
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout("http://mirror.example/~foo/puzzle-bar-aaab.jpg\n");
}
