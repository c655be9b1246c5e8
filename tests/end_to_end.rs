use assert_cmd::Command;
use predicates::prelude::predicate::str::contains;
use std::io::Write;
use tempfile::NamedTempFile;

const SAMPLE_CATALOG: &str = "tests/data/tasks.csv";

fn optimizer() -> Command {
    let path = assert_cmd::cargo::cargo_bin!("logistics-optimizer");
    Command::new(path)
}

fn weights(manpower: &str, ammo: &str, food: &str, parts: &str) -> Vec<String> {
    [
        ("--manpower", manpower),
        ("--ammo", ammo),
        ("--food", food),
        ("--parts", parts),
    ]
    .into_iter()
    .flat_map(|(flag, value)| [flag.to_owned(), value.to_owned()])
    .collect()
}

fn catalog_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

#[test]
fn ranks_sample_catalog() {
    let stdout = stdout_of(
        optimizer()
            .arg(SAMPLE_CATALOG)
            .args(weights("1", "1", "1", "1")),
    );
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with("Task 1"));
    assert!(lines[1].starts_with("1-1"));
    assert!(lines[1].ends_with("15.0, 15.0, 15.0, 5.0"));
    assert!(lines[4].starts_with("1-2"));
    assert!(lines[5].ends_with("10.0, 10.0, 10.0, 10.0"));
}

#[test]
fn json_output_respects_top_n_and_subset_size() {
    let stdout = stdout_of(
        optimizer()
            .arg(SAMPLE_CATALOG)
            .args(weights("0", "0", "0", "1"))
            .args(["--top-n", "2", "--subset-size", "2", "--output-mode", "json"]),
    );
    let rows: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(rows.as_array().unwrap().len(), 2);
    assert_eq!(rows[0]["tasks"], serde_json::json!(["1-4", "2-1"]));
    assert_eq!(rows[0]["score"], 15.0);
    // Three pairs score 10; the earliest in enumeration order wins
    assert_eq!(rows[1]["tasks"], serde_json::json!(["1-1", "1-4"]));
}

#[test]
fn negative_weights_are_accepted() {
    let stdout = stdout_of(
        optimizer()
            .arg(SAMPLE_CATALOG)
            .args(weights("-1", "-1", "-1", "-1"))
            .args(["--top-n", "1"]),
    );
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("1-1"));
    assert!(lines[1].ends_with("10.0, 10.0, 10.0, 10.0"));
}

#[test]
fn parallel_output_matches_sequential() {
    let catalog = catalog_file(
        &(0..12)
            .map(|i| format!("{},{},{},{},{},{}\n", i / 3, i % 3, i % 5, (i * 7) % 4, 3, i % 2))
            .collect::<String>(),
    );
    let run = |threads: &str| {
        stdout_of(
            optimizer()
                .arg(catalog.path())
                .args(weights("1", "0.5", "2", "-1"))
                .args(["--top-n", "20", "--threads", threads]),
        )
    };
    assert_eq!(run("1"), run("4"));
}

#[test]
fn rejects_non_numeric_weight() {
    optimizer()
        .arg(SAMPLE_CATALOG)
        .args(weights("1", "lots", "1", "1"))
        .assert()
        .code(2)
        .stdout("")
        .stderr(contains("valid number for the ammo weight"));
}

#[test]
fn malformed_catalog_is_fatal() {
    let catalog = catalog_file("1,1,10,0,0,0\n1,2,0,ten,0,0\n");
    optimizer()
        .arg(catalog.path())
        .args(weights("1", "1", "1", "1"))
        .assert()
        .failure()
        .stdout("")
        .stderr(contains("line 2"));
}

#[test]
fn blank_catalog_row_is_fatal() {
    let catalog = catalog_file("1,1,10,0,0,0\n\n1,2,0,10,0,0\n1,3,0,0,10,0\n1,4,0,0,0,10\n");
    optimizer()
        .arg(catalog.path())
        .args(weights("1", "1", "1", "1"))
        .assert()
        .failure()
        .stdout("")
        .stderr(contains("line 2 has 1 fields"));
}

#[test]
fn missing_catalog_is_fatal() {
    optimizer()
        .arg("tests/data/no-such-file.csv")
        .args(weights("1", "1", "1", "1"))
        .assert()
        .failure()
        .stderr(contains("failed to read catalog"));
}

#[test]
fn too_few_tasks_is_an_empty_result() {
    let catalog = catalog_file("1,1,1,1,1,1\n1,2,2,2,2,2\n");
    optimizer()
        .arg(catalog.path())
        .args(weights("1", "1", "1", "1"))
        .assert()
        .success()
        .stdout(contains("No combinations"));
}
