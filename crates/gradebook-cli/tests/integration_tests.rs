// ABOUTME: Integration tests for the Gradebook CLI commands
// ABOUTME: Drives start and replay through the compiled binary with temp directories

use calamine::{open_workbook, Data, Reader, Xlsx};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn gradebook_binary() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_gradebook"));
    cmd.env_remove("GRADEBOOK_CONFIG").env_remove("RUST_LOG");
    cmd
}

fn write_config(dir: &Path) -> std::path::PathBuf {
    let config = dir.join("gradebook.json");
    let json = format!(
        r#"{{ "schemaVersion": "1.0", "exportDir": {:?} }}"#,
        dir.to_string_lossy()
    );
    fs::write(&config, json).unwrap();
    config
}

fn replay(temp: &TempDir, script: &str) -> Output {
    let script_path = temp.path().join("script.txt");
    fs::write(&script_path, script).unwrap();
    let config = write_config(temp.path());

    gradebook_binary()
        .arg("--config")
        .arg(&config)
        .arg("replay")
        .arg(&script_path)
        .output()
        .unwrap()
}

#[test]
fn test_gradebook_help() {
    let output = gradebook_binary().arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Gradebook CLI"));
    assert!(stdout.contains("start"));
    assert!(stdout.contains("replay"));
}

#[test]
fn test_gradebook_version() {
    let output = gradebook_binary().arg("--version").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("gradebook"));
}

#[test]
fn test_replay_ann_scenario() {
    let temp = TempDir::new().unwrap();
    let script = "Добавить ученика\nAnn\n\
                  Добавить оценку\nAnn\n10\n9\n\
                  Добавить оценку\nAnn\n12\n7\n\
                  Изменить оценку\nAnn\n10\n10\n\
                  Удалить оценку\nAnn\n12\n\
                  Информация об ученике\nAnn\n";

    let output = replay(&temp, script);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Ученик Ann добавлен."));
    assert!(stdout.contains("Оценка 9.0 добавлена для Ann за 10 число."));
    assert!(stdout.contains("Оценка исправлена у ученика Ann за 10 число."));
    assert!(stdout.contains("Оценка удалена у ученика Ann за 12 число."));
    assert!(stdout.ends_with("Информация об ученике Ann:\nСредний балл: 10.0\n10: 10.0\n"));
}

#[test]
fn test_replay_export_writes_workbook() {
    let temp = TempDir::new().unwrap();
    let script = "Добавить ученика\nAnn\n\
                  Добавить ученика\nBob\n\
                  Добавить оценку\nBob\n3\n4.5\n\
                  Экспорт журнала\nclass.xlsx\n";

    let output = replay(&temp, script);
    assert!(output.status.success());

    let path = temp.path().join("class.xlsx");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(&format!("Журнал сохранён: {}", path.display())));

    let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
    let range = workbook.worksheet_range("Sheet1").unwrap();
    assert_eq!(range.get_value((1, 0)), Some(&Data::String("Ann".to_string())));
    assert_eq!(range.get_value((2, 0)), Some(&Data::String("Bob".to_string())));
    assert_eq!(range.get_value((2, 1)), Some(&Data::Float(4.5)));
    assert_eq!(range.get_value((2, 2)), Some(&Data::Float(4.5)));
}

#[test]
fn test_replay_reports_recoverable_conditions() {
    let temp = TempDir::new().unwrap();
    let script = "Добавить ученика\nAnn\n\
                  Добавить ученика\nAnn\n\
                  Удалить ученика\nGhost\n\
                  Экспорт журнала\njournal.txt\n\
                  непонятно\n";

    let output = replay(&temp, script);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Такой ученик уже есть!"));
    assert!(stdout.contains("Такого ученика нет!"));
    assert!(stdout.contains("используйте расширение .xlsx"));
    assert!(stdout.contains("Неизвестная команда. Выберите действие:"));
}

#[test]
fn test_replay_missing_script_fails() {
    let temp = TempDir::new().unwrap();
    let output = gradebook_binary()
        .arg("replay")
        .arg(temp.path().join("missing.txt"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error"));
}

#[test]
fn test_bad_config_fails() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("bad.json");
    fs::write(&config, "{ nope").unwrap();

    let output = gradebook_binary()
        .arg("--config")
        .arg(&config)
        .arg("start")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("JSON error"));
}

#[test]
fn test_start_reads_stdin() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path());

    let mut child = gradebook_binary()
        .arg("--config")
        .arg(&config)
        .arg("start")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();

    child
        .stdin
        .take()
        .unwrap()
        .write_all("Добавить ученика\nAnn\nПосмотреть журнал\n".as_bytes())
        .unwrap();

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Добро пожаловать в классный журнал!"));
    assert!(stdout.contains("Ученик Ann добавлен."));
    assert!(stdout.contains("Средний балл"));
}
