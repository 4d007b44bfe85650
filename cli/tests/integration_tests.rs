use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

/// Helper to create a temp directory that is cleaned up on drop.
struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!("tabconv_cli_test_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).expect("failed to create temp dir");
        Self { path }
    }

    fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.join(name);
        fs::write(&path, contents).expect("failed to write fixture");
        path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn tabconv(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tabconv"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run tabconv")
}

fn path_str(path: &PathBuf) -> &str {
    path.to_str().unwrap()
}

// ---------------------------------------------------------------------------
// Argument handling
// ---------------------------------------------------------------------------

#[test]
fn missing_arguments_print_usage_and_fail() {
    let output = tabconv(&[]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "stderr was: {stderr}");
}

#[test]
fn conflicting_directions_fail() {
    let output = tabconv(&["--c2j", "--s2c", "a", "b"]);
    assert!(!output.status.success());
}

#[test]
fn conversion_errors_exit_with_one() {
    let dir = TempDir::new("missing_input");
    let output = tabconv(&["--c2j", path_str(&dir.join("nope.csv")), path_str(&dir.join("out.json"))]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("error: "), "stderr was: {stderr}");
}

// ---------------------------------------------------------------------------
// CSV ↔ SQLite
// ---------------------------------------------------------------------------

#[test]
fn csv_to_sqlite_is_the_default() {
    let dir = TempDir::new("default_c2s");
    let input = dir.write("2024-sales.csv", "region,units,price,paid\nnorth,10,2.5,yes\nsouth,7,3,no\n");
    let db = dir.join("sales.db");

    let output = tabconv(&[path_str(&input), path_str(&db)]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).contains("CSV to SQLite done"));

    let conn = rusqlite::Connection::open(&db).unwrap();
    let (units, price, paid): (String, f64, i64) = conn
        .query_row(
            "SELECT units, price, paid FROM `_2024_sales` WHERE region = 'north'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .unwrap();
    assert_eq!(units, "10");
    assert_eq!(price, 2.5);
    assert_eq!(paid, 1);
}

#[test]
fn sqlite_to_csv_exports_every_table() {
    let dir = TempDir::new("s2c");
    let db = dir.join("multi.db");
    {
        let conn = rusqlite::Connection::open(&db).unwrap();
        conn.execute_batch(
            "CREATE TABLE people (name TEXT, age INTEGER);
             INSERT INTO people VALUES ('ann', 31), ('bob', NULL);
             CREATE TABLE notes (body TEXT);
             INSERT INTO notes VALUES ('has, comma');",
        )
        .unwrap();
    }
    let out_dir = dir.join("exported/csv");

    let output = tabconv(&["--s2c", path_str(&db), path_str(&out_dir)]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    assert_eq!(
        fs::read_to_string(out_dir.join("people.csv")).unwrap(),
        "name,age\r\nann,31\r\nbob,\r\n"
    );
    assert_eq!(
        fs::read_to_string(out_dir.join("notes.csv")).unwrap(),
        "body\r\n\"has, comma\"\r\n"
    );
}

#[test]
fn reverse_flag_backs_up_existing_csv() {
    let dir = TempDir::new("reverse_backup");
    let input = dir.write("items.csv", "sku\nA-1\n");
    let db = dir.join("items.db");
    let out_dir = dir.join("out");
    fs::create_dir_all(&out_dir).unwrap();
    fs::write(out_dir.join("items.csv"), "old content\n").unwrap();

    assert!(tabconv(&["--c2s", path_str(&input), path_str(&db)]).status.success());
    assert!(tabconv(&["-R", path_str(&db), path_str(&out_dir)]).status.success());

    assert_eq!(fs::read_to_string(out_dir.join("items.csv~")).unwrap(), "old content\n");
    assert_eq!(fs::read_to_string(out_dir.join("items.csv")).unwrap(), "sku\r\nA-1\r\n");
}

// ---------------------------------------------------------------------------
// CSV ↔ JSON
// ---------------------------------------------------------------------------

#[test]
fn csv_to_json_writes_native_values() {
    let dir = TempDir::new("c2j");
    let input = dir.write("in.csv", "id,flag,ratio,label\n1,1,0.5,a\n2,0,1,b\n");
    let json = dir.join("out.json");

    assert!(tabconv(&["--c2j", path_str(&input), path_str(&json)]).status.success());

    let raw = fs::read_to_string(&json).unwrap();
    assert!(raw.ends_with("\n"));
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        serde_json::json!([
            {"id": 1, "flag": 1, "ratio": 0.5, "label": "a"},
            {"id": 2, "flag": 0, "ratio": 1.0, "label": "b"}
        ])
    );
}

#[test]
fn json_to_csv_round_trips_string_tables() {
    let dir = TempDir::new("round_trip");
    let original = "city,motto\r\nParis,\"  fluctuat, \"\"nec\"\" mergitur \"\r\nOslo,\r\n";
    let input = dir.write("in.csv", original);
    let json = dir.join("mid.json");
    let back = dir.join("back.csv");

    assert!(tabconv(&["--c2j", path_str(&input), path_str(&json)]).status.success());
    assert!(tabconv(&["--j2c", path_str(&json), path_str(&back)]).status.success());

    assert_eq!(fs::read_to_string(&back).unwrap(), original);
}

#[test]
fn config_file_changes_json_indent() {
    let dir = TempDir::new("config");
    let config = dir.write("tabconv.yml", "json_indent: 0\n");
    let input = dir.write("in.csv", "a\nx\n");
    let json = dir.join("out.json");

    let output = tabconv(&[
        "--c2j",
        "--config",
        path_str(&config),
        path_str(&input),
        path_str(&json),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(fs::read_to_string(&json).unwrap(), "[\n{\n\"a\": \"x\"\n}\n]\n");
}

#[test]
fn invalid_config_is_rejected() {
    let dir = TempDir::new("bad_config");
    let config = dir.write("tabconv.yml", "batch_size: 0\n");
    let input = dir.write("in.csv", "a\nx\n");

    let output = tabconv(&[
        "--config",
        path_str(&config),
        path_str(&input),
        path_str(&dir.join("out.db")),
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!dir.join("out.db").exists());
}
