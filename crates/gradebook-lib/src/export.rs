// ABOUTME: Spreadsheet export of the journal
// ABOUTME: Writes one xlsx worksheet with students as rows and average/day columns

use crate::journal::Journal;
use crate::{GradebookError, Result};
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};

/// Name of the single worksheet in an export
pub const SHEET_NAME: &str = "Sheet1";

/// Write the journal to `dir/filename` as an xlsx workbook
///
/// Layout: A1 is blank, row 1 carries the column labels (average first, then
/// days in creation order), each following row starts with the student name.
/// Absent marks are left as empty cells. The filename is not checked; callers
/// decide which extensions they accept. The returned file belongs to the
/// caller.
pub fn export_to_xlsx(journal: &Journal, dir: impl AsRef<Path>, filename: &str) -> Result<PathBuf> {
    let path = dir.as_ref().join(filename);

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let columns = journal.columns();
    for (i, column) in columns.iter().enumerate() {
        worksheet.write_string(0, column_index(i + 1)?, column.label())?;
    }

    for (r, record) in journal.students().iter().enumerate() {
        let row = row_index(r + 1)?;
        worksheet.write_string(row, 0, record.name())?;
        for (i, column) in columns.iter().enumerate() {
            if let Some(value) = record.value(column) {
                worksheet.write_number(row, column_index(i + 1)?, value)?;
            }
        }
    }

    // The file handle lives only for the duration of save().
    workbook.save(&path).map_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "journal export failed");
        GradebookError::Export(e.to_string())
    })?;

    tracing::info!(
        path = %path.display(),
        students = journal.len(),
        days = journal.days().len(),
        "journal exported"
    );
    Ok(path)
}

impl Journal {
    /// Export into the system temporary directory
    pub fn export_to_temp(&self, filename: &str) -> Result<PathBuf> {
        export_to_xlsx(self, std::env::temp_dir(), filename)
    }
}

fn column_index(i: usize) -> Result<u16> {
    u16::try_from(i).map_err(|_| GradebookError::Export(format!("too many columns: {i}")))
}

fn row_index(i: usize) -> Result<u32> {
    u32::try_from(i).map_err(|_| GradebookError::Export(format!("too many rows: {i}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{open_workbook, Data, Reader, Xlsx};
    use tempfile::tempdir;

    fn read_back(path: &Path) -> calamine::Range<Data> {
        let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
        workbook.worksheet_range(SHEET_NAME).unwrap()
    }

    fn cell(range: &calamine::Range<Data>, row: u32, col: u32) -> Data {
        range.get_value((row, col)).cloned().unwrap_or(Data::Empty)
    }

    fn sample_journal() -> Journal {
        let mut journal = Journal::new();
        journal.add_student("Ann").unwrap();
        journal.add_student("Bob").unwrap();
        journal.add_student("Eve").unwrap();
        journal.add_mark("Ann", 10, 9.0).unwrap();
        journal.add_mark("Bob", 3, 4.25).unwrap();
        journal.add_mark("Ann", 3, 7.5).unwrap();
        journal
    }

    #[test]
    fn test_export_returns_path_in_dir() {
        let dir = tempdir().unwrap();
        let journal = sample_journal();

        let path = export_to_xlsx(&journal, dir.path(), "journal.xlsx").unwrap();
        assert_eq!(path, dir.path().join("journal.xlsx"));
        assert!(path.exists());
    }

    #[test]
    fn test_export_layout() {
        let dir = tempdir().unwrap();
        let journal = sample_journal();
        let path = export_to_xlsx(&journal, dir.path(), "journal.xlsx").unwrap();
        let range = read_back(&path);

        assert_eq!(cell(&range, 0, 0), Data::Empty);
        assert_eq!(cell(&range, 0, 1), Data::String("Средний балл".to_string()));
        assert_eq!(cell(&range, 0, 2), Data::String("10".to_string()));
        assert_eq!(cell(&range, 0, 3), Data::String("3".to_string()));

        assert_eq!(cell(&range, 1, 0), Data::String("Ann".to_string()));
        assert_eq!(cell(&range, 2, 0), Data::String("Bob".to_string()));
        assert_eq!(cell(&range, 3, 0), Data::String("Eve".to_string()));

        // Eve has no marks: average 0.0 and blank day cells
        assert_eq!(cell(&range, 3, 1), Data::Float(0.0));
        assert_eq!(cell(&range, 3, 2), Data::Empty);
        assert_eq!(cell(&range, 3, 3), Data::Empty);
    }

    #[test]
    fn test_export_round_trip_preserves_marks() {
        let dir = tempdir().unwrap();
        let journal = sample_journal();
        let path = export_to_xlsx(&journal, dir.path(), "journal.xlsx").unwrap();
        let range = read_back(&path);

        let columns = journal.columns();
        for (r, record) in journal.students().iter().enumerate() {
            let row = (r + 1) as u32;
            assert_eq!(cell(&range, row, 0), Data::String(record.name().to_string()));
            for (c, column) in columns.iter().enumerate() {
                let expected = record.value(column).map_or(Data::Empty, Data::Float);
                assert_eq!(cell(&range, row, (c + 1) as u32), expected);
            }
        }
    }

    #[test]
    fn test_export_empty_journal() {
        let dir = tempdir().unwrap();
        let path = export_to_xlsx(&Journal::new(), dir.path(), "empty.xlsx").unwrap();
        let range = read_back(&path);
        assert_eq!(cell(&range, 0, 1), Data::String("Средний балл".to_string()));
        assert_eq!(cell(&range, 1, 0), Data::Empty);
    }

    #[test]
    fn test_export_accepts_any_filename() {
        let dir = tempdir().unwrap();
        let path = export_to_xlsx(&sample_journal(), dir.path(), "journal.bin").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_export_to_missing_dir_fails() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let err = export_to_xlsx(&sample_journal(), &missing, "journal.xlsx").unwrap_err();
        assert!(matches!(err, GradebookError::Export(_)));
    }

    #[test]
    fn test_export_to_temp() {
        let name = format!("gradebook-test-{}.xlsx", std::process::id());
        let path = sample_journal().export_to_temp(&name).unwrap();
        assert!(path.starts_with(std::env::temp_dir()));
        assert!(path.exists());
        std::fs::remove_file(path).unwrap();
    }
}
