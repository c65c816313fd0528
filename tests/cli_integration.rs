use chrono::{Duration, SecondsFormat, Utc};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Isolated home, database and export directory for one test
struct TestEnv {
    root: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        TestEnv {
            root: TempDir::new().expect("create temp dir"),
        }
    }

    fn db_path(&self) -> PathBuf {
        self.root.path().join("data").join("timelog.db")
    }

    fn export_dir(&self) -> PathBuf {
        self.root.path().join("exports")
    }

    fn run(&self, args: &[&str]) -> Output {
        let home = self.root.path().join("home");
        fs::create_dir_all(&home).expect("create home");
        Command::new(env!("CARGO_BIN_EXE_timelog"))
            .arg("--timezone")
            .arg("UTC")
            .args(args)
            .env("HOME", &home)
            .env("XDG_CONFIG_HOME", home.join(".config"))
            .env("XDG_DATA_HOME", home.join(".local/share"))
            .env("TIMELOG_DB", self.db_path())
            .env("TIMELOG_EXPORT_DIR", self.export_dir())
            .env_remove("RUST_LOG")
            .output()
            .expect("run timelog")
    }

    /// Create a sessions table holding several open rows, as written by
    /// versions that did not enforce a single running session.
    fn seed_open_sessions(&self, sessions: &[(&str, &str)]) {
        fs::create_dir_all(self.db_path().parent().expect("db dir")).expect("create db dir");
        let conn = rusqlite::Connection::open(self.db_path()).expect("open db");
        conn.execute_batch(
            "CREATE TABLE sessions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                project TEXT NOT NULL,
                task TEXT,
                start_time TEXT NOT NULL,
                end_time TEXT
            )",
        )
        .expect("create table");
        for (project, start) in sessions {
            conn.execute(
                "INSERT INTO sessions (project, task, start_time) VALUES (?1, 'legacy', ?2)",
                rusqlite::params![project, start],
            )
            .expect("insert open session");
        }
    }

    /// Insert a closed session directly, bypassing the CLI clock.
    fn insert_closed(&self, project: &str, start: chrono::DateTime<Utc>, minutes: i64) {
        let conn = rusqlite::Connection::open(self.db_path()).expect("open db");
        conn.execute(
            "INSERT INTO sessions (project, task, start_time, end_time) VALUES (?1, 'seeded', ?2, ?3)",
            rusqlite::params![
                project,
                start.to_rfc3339_opts(SecondsFormat::Micros, true),
                (start + Duration::minutes(minutes)).to_rfc3339_opts(SecondsFormat::Micros, true),
            ],
        )
        .expect("insert session");
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn summary_json(env: &TestEnv, extra: &[&str]) -> Vec<Value> {
    let mut args = vec!["summary", "--json"];
    args.extend_from_slice(extra);
    let output = env.run(&args);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json: Value = serde_json::from_slice(&output.stdout).expect("json");
    json.as_array().expect("array output").clone()
}

#[test]
fn start_then_current_shows_session() {
    let env = TestEnv::new();
    let started = env.run(&["start", "--project", "Alpha", "--task", "write report"]);
    assert!(started.status.success(), "stderr: {}", stderr(&started));
    assert!(stdout(&started).contains("Started session: [Alpha] - write report"));

    let current = env.run(&["current"]);
    assert_eq!(current.status.code(), Some(0));
    let out = stdout(&current);
    assert!(out.contains("Alpha"));
    assert!(out.contains("Start time"));
    assert!(out.contains("ACTIVE"));
}

#[test]
fn start_then_stop_reports_duration() {
    let env = TestEnv::new();
    assert!(env.run(&["start", "-p", "Beta"]).status.success());

    let stopped = env.run(&["stop"]);
    assert_eq!(stopped.status.code(), Some(0));
    let out = stdout(&stopped);
    assert!(out.contains("Stopped session: [Beta] - general work"));
    let duration = out
        .lines()
        .find_map(|line| line.strip_prefix("Duration  : "))
        .expect("duration line");
    assert!(duration.ends_with('m'), "duration: {duration}");
}

#[test]
fn stop_twice_is_not_an_error() {
    let env = TestEnv::new();
    assert!(env.run(&["start", "-p", "Gamma", "-t", "x"]).status.success());
    let first = env.run(&["stop"]);
    assert!(stdout(&first).contains("Stopped session"));

    let second = env.run(&["stop"]);
    assert_eq!(second.status.code(), Some(0));
    assert!(stdout(&second).contains("No active session to stop."));
}

#[test]
fn current_when_idle_is_not_an_error() {
    let env = TestEnv::new();
    let output = env.run(&["current"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("No active session found."));
}

#[test]
fn remove_missing_session_fails() {
    let env = TestEnv::new();
    let output = env.run(&["remove", "9999", "--force"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Session 9999 not found"));
}

#[test]
fn remove_rejects_non_positive_id() {
    let env = TestEnv::new();
    for id in ["0", "-4", "abc"] {
        let output = env.run(&["remove", id, "-f"]);
        assert_eq!(output.status.code(), Some(1), "id {id}");
        assert!(stderr(&output).contains("Session ID"), "id {id}");
    }
}

#[test]
fn remove_with_force_deletes() {
    let env = TestEnv::new();
    assert!(env.run(&["start", "-p", "RemoveTest", "-t", "testing"]).status.success());
    let output = env.run(&["remove", "1", "-f"]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Deleted session 1"));
    assert!(summary_json(&env, &[]).is_empty());
}

#[test]
fn summary_today_excludes_yesterday() {
    let env = TestEnv::new();
    assert!(env.run(&["start", "-p", "TodayProject", "-t", "now"]).status.success());
    let midnight = Utc::now()
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .expect("midnight")
        .and_utc();
    env.insert_closed("YesterdayProject", midnight - Duration::hours(2), 30);

    let output = env.run(&["summary", "--today"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("TodayProject"));
    assert!(!out.contains("YesterdayProject"));

    let all = summary_json(&env, &[]);
    assert_eq!(all.len(), 2);
}

#[test]
fn summary_date_range_selects_days() {
    let env = TestEnv::new();
    // Creates the schema
    assert!(env.run(&["summary"]).status.success());
    let day = |d: u32| {
        chrono::NaiveDate::from_ymd_opt(2026, 3, d)
            .and_then(|d| d.and_hms_opt(10, 0, 0))
            .expect("date")
            .and_utc()
    };
    env.insert_closed("March1", day(1), 60);
    env.insert_closed("March2", day(2), 60);
    env.insert_closed("March3", day(3), 60);
    env.insert_closed("March4", day(4), 60);

    // The end bound is midnight at the start of the end day
    let rows = summary_json(&env, &["--start", "2026-03-02", "--end", "2026-03-04", "--order", "desc"]);
    let projects: Vec<_> = rows.iter().map(|r| r["project"].as_str().unwrap()).collect();
    assert_eq!(projects, ["March3", "March2"]);
    assert_eq!(rows[0]["duration"], "1h 0m");
    assert_eq!(rows[0]["start"], "03-03-2026 10:00:00");

    let rows = summary_json(&env, &["--start", "2026-03-02", "--end", "2026-03-03"]);
    let projects: Vec<_> = rows.iter().map(|r| r["project"].as_str().unwrap()).collect();
    assert_eq!(projects, ["March2"]);
}

#[test]
fn summary_with_only_start_lists_everything() {
    let env = TestEnv::new();
    assert!(env.run(&["summary"]).status.success());
    let start = chrono::NaiveDate::from_ymd_opt(2026, 3, 1)
        .and_then(|d| d.and_hms_opt(10, 0, 0))
        .expect("date")
        .and_utc();
    env.insert_closed("Early", start, 30);
    env.insert_closed("Late", start + Duration::days(30), 30);

    assert_eq!(summary_json(&env, &["--start", "2026-03-15"]).len(), 2);
    assert_eq!(summary_json(&env, &["--end", "2026-03-15"]).len(), 2);
}

#[test]
fn stop_with_several_open_sessions_closes_newest() {
    let env = TestEnv::new();
    env.seed_open_sessions(&[
        ("Old", "2026-03-01T08:00:00.000000Z"),
        ("New", "2026-03-01T09:00:00.000000Z"),
    ]);

    let output = env.run(&["stop"]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Stopped session: [New] - legacy"));

    let rows = summary_json(&env, &[]);
    let open: Vec<_> = rows.iter().filter(|r| r["end_time"].is_null()).collect();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0]["project"], "Old");
}

#[test]
fn summary_invalid_date_fails() {
    let env = TestEnv::new();
    let output = env.run(&["summary", "--start", "2026/01/01", "--end", "2026-01-31"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Invalid date"));
}

#[test]
fn start_with_yes_replaces_running_session() {
    let env = TestEnv::new();
    assert!(env.run(&["start", "-p", "First", "-t", "a"]).status.success());
    let output = env.run(&["start", "-p", "Second", "-t", "b", "--yes"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Stopped session: [First] - a"));
    assert!(out.contains("Started session: [Second] - b"));

    let rows = summary_json(&env, &[]);
    let open: Vec<_> = rows.iter().filter(|r| r["end_time"].is_null()).collect();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0]["project"], "Second");
}

#[test]
fn start_without_terminal_keeps_running_session() {
    let env = TestEnv::new();
    assert!(env.run(&["start", "-p", "First", "-t", "a"]).status.success());
    let output = env.run(&["start", "-p", "Second", "-t", "b"]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("An active session already exists: [First] - a"));
    assert!(out.contains("Keeping the active session"));
    assert!(out.contains("--yes"));

    let rows = summary_json(&env, &[]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["project"], "First");
}

#[test]
fn remove_without_terminal_is_cancelled() {
    let env = TestEnv::new();
    assert!(env.run(&["start", "-p", "Keep", "-t", "x"]).status.success());
    let output = env.run(&["remove", "1"]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Deletion cancelled"));
    assert_eq!(summary_json(&env, &[]).len(), 1);
}

#[test]
fn export_with_no_sessions_writes_nothing() {
    let env = TestEnv::new();
    let output = env.run(&["export"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("No sessions to export."));
    assert!(!env.export_dir().exists());
}

#[test]
fn export_writes_csv_file() {
    let env = TestEnv::new();
    assert!(env.run(&["start", "-p", "ExportTest", "-t", "testing"]).status.success());
    let output = env.run(&["export"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Exported 1 sessions to"));

    let files: Vec<_> = fs::read_dir(env.export_dir())
        .expect("export dir")
        .map(|e| e.expect("entry").path())
        .collect();
    assert_eq!(files.len(), 1);
    let name = files[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("sessions_") && name.ends_with(".csv"), "{name}");

    let content = fs::read_to_string(&files[0]).expect("read export");
    let lines: Vec<&str> = content.lines().collect();
    assert!(lines[0].starts_with("Exported on,"));
    assert_eq!(lines[1], "ID,Project,Task,Start Time,End Time,Duration");
    assert!(lines[2].starts_with("1,ExportTest,testing,"));
    assert!(lines[2].ends_with(",N/A,RUNNING"));
}
