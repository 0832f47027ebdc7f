use assert_cmd::prelude::*;
use pretty_assertions::assert_eq;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn has_git() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

fn init_git_repo(dir: &Path) {
    // init and basic identity
    assert!(Command::new("git")
        .args(["init"])
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
    assert!(Command::new("git")
        .args(["config", "core.autocrlf", "false"])
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
    assert!(Command::new("git")
        .args(["config", "user.email", "you@example.com"])
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
    assert!(Command::new("git")
        .args(["config", "user.name", "Your Name"])
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
}

fn commit_files_at(dir: &Path, files: &[(&str, &str)], date: &str) {
    for (name, content) in files {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        let mut f = File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f.sync_all().unwrap();
    }
    assert!(Command::new("git")
        .args(["add", "."])
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
    assert!(Command::new("git")
        .args(["commit", "-m", &format!("commit at {date}")])
        .env("GIT_AUTHOR_DATE", date)
        .env("GIT_COMMITTER_DATE", date)
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
}

fn commit_file_at(dir: &Path, name: &str, content: &str, date: &str) {
    commit_files_at(dir, &[(name, content)], date);
}

fn cqi(repo: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cqi").unwrap();
    cmd.current_dir(repo)
        .arg("--repo")
        .arg(repo)
        .arg("--utc")
        .arg("--no-progress");
    cmd
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

const NINE_LINES: &str = "\
def scale(values, factor):
    result = []
    for value in values:
        if value > 0:
            result.append(value * factor)
    return result


data = scale([1, 2, 3], 2)
";

fn ten_lines() -> String {
    format!("{NINE_LINES}print(data)\n")
}

#[test]
fn current_snapshot_has_one_row_per_file() {
    let repo = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(repo.path());
    commit_file_at(repo.path(), "a.py", NINE_LINES, "2024-01-01 10:00:00 +0000");
    commit_file_at(repo.path(), "a.py", &ten_lines(), "2024-01-02 10:00:00 +0000");

    let out = tempdir().unwrap();
    cqi(repo.path())
        .args(["inspect", "--output"])
        .arg(out.path())
        .assert()
        .success();

    let by_file = read_lines(&out.path().join("metrics_by_file.csv"));
    assert_eq!(by_file.len(), 2);
    assert_eq!(
        by_file[0],
        "File,Date,Ciclomatic_Complexity,Maintainability,Lines_of_Code"
    );
    assert!(by_file[1].starts_with("a,2024-01-02 10:00:00,3.0,"));
    assert!(by_file[1].ends_with(",10"));

    let metrics = read_lines(&out.path().join("metrics.csv"));
    assert_eq!(metrics.len(), 2);
    assert!(metrics[1].starts_with("3.0,"));
    assert!(metrics[1].ends_with(",10"));

    // No history requested: the directory exists but holds nothing.
    let history_dir = out.path().join("files_history");
    assert!(history_dir.is_dir());
    assert_eq!(fs::read_dir(&history_dir).unwrap().count(), 0);
    assert_eq!(read_lines(&out.path().join("history_metrics.csv")).len(), 1);
}

#[test]
fn history_rows_are_newest_first() {
    let repo = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(repo.path());
    commit_file_at(repo.path(), "a.py", NINE_LINES, "2024-01-01 10:00:00 +0000");
    commit_file_at(repo.path(), "a.py", &ten_lines(), "2024-01-02 10:00:00 +0000");

    let out = tempdir().unwrap();
    cqi(repo.path())
        .args(["inspect", "--history", "--output"])
        .arg(out.path())
        .assert()
        .success();

    let a = read_lines(&out.path().join("files_history").join("a.csv"));
    assert_eq!(a.len(), 3);
    assert_eq!(a[0], "Date,Ciclomatic_Complexity,Maintainability,Lines_of_Code");
    assert!(a[1].starts_with("2024-01-02 10:00:00,"));
    assert!(a[1].ends_with(",10"));
    assert!(a[2].starts_with("2024-01-01 10:00:00,"));
    assert!(a[2].ends_with(",9"));

    let timeline = read_lines(&out.path().join("history_metrics.csv"));
    assert_eq!(timeline.len(), 3);
    assert!(timeline[1].starts_with("2024-01-02 10:00:00,"));
    assert!(timeline[2].starts_with("2024-01-01 10:00:00,"));
}

#[test]
fn max_history_limits_commits() {
    let repo = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(repo.path());
    commit_file_at(repo.path(), "a.py", NINE_LINES, "2024-01-01 10:00:00 +0000");
    commit_file_at(repo.path(), "a.py", &ten_lines(), "2024-01-02 10:00:00 +0000");
    commit_file_at(repo.path(), "b.py", "x = 1\n", "2024-01-03 10:00:00 +0000");

    let out = tempdir().unwrap();
    cqi(repo.path())
        .args(["inspect", "--history", "--max-history", "2", "--output"])
        .arg(out.path())
        .assert()
        .success();

    let a = read_lines(&out.path().join("files_history").join("a.csv"));
    assert_eq!(a.len(), 3);
    let b = read_lines(&out.path().join("files_history").join("b.csv"));
    assert_eq!(b.len(), 2);
    let timeline = read_lines(&out.path().join("history_metrics.csv"));
    assert_eq!(timeline.len(), 3);
}

#[test]
fn package_markers_are_never_tracked() {
    let repo = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(repo.path());
    commit_file_at(
        repo.path(),
        "pkg/__init__.py",
        "from .core import run\n",
        "2024-01-01 10:00:00 +0000",
    );

    let out = tempdir().unwrap();
    cqi(repo.path())
        .args(["inspect", "--history", "--output"])
        .arg(out.path())
        .assert()
        .success();

    let history_dir = out.path().join("files_history");
    assert!(history_dir.is_dir());
    assert_eq!(fs::read_dir(&history_dir).unwrap().count(), 0);
    assert_eq!(
        read_lines(&out.path().join("history_metrics.csv")),
        ["Date,Ciclomatic_Complexity,Maintainability,Lines_of_Code"]
    );
    assert_eq!(read_lines(&out.path().join("metrics_by_file.csv")).len(), 1);
    assert_eq!(
        read_lines(&out.path().join("metrics.csv")),
        ["Ciclomatic_Complexity,Maintainability,Lines_of_Code", "0.0,0.0,0"]
    );
}

#[test]
fn same_second_commits_merge_into_one_date() {
    let repo = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(repo.path());
    commit_files_at(
        repo.path(),
        &[("a.py", "x = 1\n"), ("notes.txt", "hi\n")],
        "2024-05-05 12:00:00 +0000",
    );
    commit_file_at(repo.path(), "b.py", "y = 2\nz = 3\n", "2024-05-05 12:00:00 +0000");

    let out = tempdir().unwrap();
    cqi(repo.path())
        .args(["inspect", "--history", "--output"])
        .arg(out.path())
        .assert()
        .success();

    let timeline = read_lines(&out.path().join("history_metrics.csv"));
    assert_eq!(timeline.len(), 2);
    assert!(timeline[1].starts_with("2024-05-05 12:00:00,"));
    // a.py from both commits plus b.py
    assert!(timeline[1].ends_with(",4"));
    assert_eq!(fs::read_dir(out.path().join("files_history")).unwrap().count(), 2);
    assert_eq!(
        read_lines(&out.path().join("files_history").join("a.csv")).len(),
        3
    );
}

#[test]
fn unparsable_file_is_zeroed_not_fatal() {
    let repo = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(repo.path());
    commit_files_at(
        repo.path(),
        &[("bad.py", "def broken(:\n    pass\n"), ("good.py", "def ok():\n    return 1\n")],
        "2024-01-01 10:00:00 +0000",
    );

    let output = cqi(repo.path())
        .args(["show", "--ndjson"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let rows: Vec<serde_json::Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(rows.len(), 2);
    let bad = rows.iter().find(|r| r["file_name"] == "bad").unwrap();
    assert_eq!(bad["lines_of_code"], 0);
    assert_eq!(bad["ciclomatic_complexity"], 0.0);
    let good = rows.iter().find(|r| r["file_name"] == "good").unwrap();
    assert_eq!(good["lines_of_code"], 2);
}

#[test]
fn show_json_reports_snapshot() {
    let repo = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(repo.path());
    commit_file_at(repo.path(), "a.py", NINE_LINES, "2024-01-01 10:00:00 +0000");

    let output = cqi(repo.path())
        .args(["show", "--json", "--history"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(v["version"], 1);
    assert_eq!(v["metrics"]["lines_of_code"], 9);
    assert_eq!(v["metrics_by_file"].as_array().unwrap().len(), 1);
    assert_eq!(v["history_metrics"].as_array().unwrap().len(), 1);
    assert_eq!(v["files_history"][0]["stem"], "a");
}

#[test]
fn not_a_repository_fails() {
    let dir = tempdir().unwrap();
    let out = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("cqi").unwrap();
    cmd.arg("--repo")
        .arg(dir.path())
        .args(["inspect", "--output"])
        .arg(out.path())
        .assert()
        .failure();
}

#[test]
fn trailing_blank_line_is_not_counted() {
    let repo = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(repo.path());
    commit_files_at(
        repo.path(),
        &[("trail.py", "x = 1\n\n"), ("plain.py", "y = 2\n")],
        "2024-02-01 10:00:00 +0000",
    );

    let out = tempdir().unwrap();
    cqi(repo.path())
        .args(["inspect", "--history", "--output"])
        .arg(out.path())
        .assert()
        .success();

    let by_file = read_lines(&out.path().join("metrics_by_file.csv"));
    let trail = by_file.iter().find(|l| l.starts_with("trail,")).unwrap();
    assert!(trail.ends_with(",1"));
    let plain = by_file.iter().find(|l| l.starts_with("plain,")).unwrap();
    assert!(plain.ends_with(",1"));

    let metrics = read_lines(&out.path().join("metrics.csv"));
    assert!(metrics[1].ends_with(",2"));
    let timeline = read_lines(&out.path().join("history_metrics.csv"));
    assert!(timeline[1].ends_with(",2"));
}

#[test]
fn empty_files_are_never_tracked() {
    let repo = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(repo.path());
    commit_files_at(
        repo.path(),
        &[("empty.py", ""), ("newline.py", "\n"), ("real.py", "x = 1\n")],
        "2024-03-01 10:00:00 +0000",
    );

    let out = tempdir().unwrap();
    cqi(repo.path())
        .args(["inspect", "--history", "--output"])
        .arg(out.path())
        .assert()
        .success();

    let history_dir = out.path().join("files_history");
    assert!(!history_dir.join("empty.csv").exists());
    assert!(!history_dir.join("newline.csv").exists());
    assert!(history_dir.join("real.csv").exists());
    assert_eq!(fs::read_dir(&history_dir).unwrap().count(), 1);

    let by_file = read_lines(&out.path().join("metrics_by_file.csv"));
    assert_eq!(by_file.len(), 2);
    assert!(by_file[1].starts_with("real,"));
}

#[cfg(unix)]
#[test]
fn symlinked_sources_are_read_as_their_target() {
    let repo = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(repo.path());
    std::os::unix::fs::symlink("real.py", repo.path().join("link.py")).unwrap();
    commit_file_at(repo.path(), "real.py", NINE_LINES, "2024-04-01 10:00:00 +0000");

    let out = tempdir().unwrap();
    cqi(repo.path())
        .args(["inspect", "--output"])
        .arg(out.path())
        .assert()
        .success();

    let by_file = read_lines(&out.path().join("metrics_by_file.csv"));
    assert_eq!(by_file.len(), 3);
    let link = by_file.iter().find(|l| l.starts_with("link,")).unwrap();
    assert!(link.ends_with(",1"));
    let real = by_file.iter().find(|l| l.starts_with("real,")).unwrap();
    assert!(real.ends_with(",9"));
}
