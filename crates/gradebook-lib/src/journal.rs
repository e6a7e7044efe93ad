// ABOUTME: In-memory class journal of students and per-day marks
// ABOUTME: Maintains the derived average column and renders the whole table

use crate::outcome::{format_mark, Column, Outcome, StudentReport, AVERAGE_LABEL};
use crate::{GradebookError, Result};
use std::collections::HashMap;

/// One row of the journal
#[derive(Debug, Clone, PartialEq)]
pub struct StudentRecord {
    name: String,
    /// Day key -> mark; a missing key means no mark was recorded
    marks: HashMap<String, f64>,
    average: f64,
}

impl StudentRecord {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            marks: HashMap::new(),
            average: 0.0,
        }
    }

    /// Student name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Derived average, rounded to two decimals
    pub fn average(&self) -> f64 {
        self.average
    }

    /// Mark recorded under a day key, if any
    pub fn mark(&self, day_key: &str) -> Option<f64> {
        self.marks.get(day_key).copied()
    }

    /// Value of a column for this student
    pub fn value(&self, column: &Column) -> Option<f64> {
        match column {
            Column::Average => Some(self.average),
            Column::Day(key) => self.mark(key),
        }
    }

    /// Mean of present marks, summed in column order so the result is stable
    fn recompute_average(&mut self, days: &[String]) {
        let (sum, count) = days
            .iter()
            .filter_map(|day| self.marks.get(day))
            .fold((0.0, 0usize), |(sum, count), mark| (sum + mark, count + 1));
        self.average = if count == 0 {
            0.0
        } else {
            round2(sum / count as f64)
        };
    }
}

/// Student roster with a growable set of day columns
#[derive(Debug, Clone, Default)]
pub struct Journal {
    /// Day keys in the order their column was created
    days: Vec<String>,
    /// Rows in insertion order
    students: Vec<StudentRecord>,
}

impl Journal {
    /// Create a new empty journal
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a student with no marks and an average of 0.0
    pub fn add_student(&mut self, name: &str) -> Result<Outcome> {
        if name.is_empty() {
            tracing::warn!("rejected empty student name");
            return Err(GradebookError::InvalidArgument(
                "Имя не может быть пустым.".to_string(),
            ));
        }
        if self.contains(name) {
            return Ok(Outcome::StudentExists);
        }

        self.students.push(StudentRecord::new(name));
        tracing::debug!(student = name, "student added");
        Ok(Outcome::StudentAdded {
            name: name.to_string(),
        })
    }

    /// Remove a student and all of their marks; day columns are kept
    pub fn remove_student(&mut self, name: &str) -> Result<Outcome> {
        let Some(index) = self.position(name) else {
            return Ok(Outcome::NoSuchStudent);
        };

        self.students.remove(index);
        tracing::debug!(student = name, "student removed");
        Ok(Outcome::StudentRemoved {
            name: name.to_string(),
        })
    }

    /// Record a mark, overwriting any previous mark for the same day
    pub fn add_mark(&mut self, name: &str, day: u32, mark: f64) -> Result<Outcome> {
        ensure_finite(mark)?;
        let Some(index) = self.position(name) else {
            tracing::warn!(student = name, "mark for unknown student");
            return Err(GradebookError::NotFound(name.to_string()));
        };

        let key = day_key(day);
        if !self.days.contains(&key) {
            self.days.push(key.clone());
            tracing::debug!(day = %key, "day column created");
        }

        let record = &mut self.students[index];
        record.marks.insert(key, mark);
        record.recompute_average(&self.days);
        tracing::debug!(student = name, day, mark, average = record.average, "mark added");

        Ok(Outcome::MarkAdded {
            name: name.to_string(),
            day,
            mark,
        })
    }

    /// Clear the mark of a student for a day
    pub fn remove_mark(&mut self, name: &str, day: u32) -> Result<Outcome> {
        let index = match self.locate(name, day) {
            Ok(index) => index,
            Err(outcome) => return Ok(outcome),
        };

        let record = &mut self.students[index];
        record.marks.remove(&day_key(day));
        record.recompute_average(&self.days);
        tracing::debug!(student = name, day, average = record.average, "mark removed");

        Ok(Outcome::MarkRemoved {
            name: name.to_string(),
            day,
        })
    }

    /// Set the mark of a student for an existing day column
    ///
    /// The slot does not need to hold a mark already; only the day column has
    /// to exist.
    pub fn change_mark(&mut self, name: &str, day: u32, new_mark: f64) -> Result<Outcome> {
        ensure_finite(new_mark)?;
        let index = match self.locate(name, day) {
            Ok(index) => index,
            Err(outcome) => return Ok(outcome),
        };

        let record = &mut self.students[index];
        record.marks.insert(day_key(day), new_mark);
        record.recompute_average(&self.days);
        tracing::debug!(
            student = name,
            day,
            mark = new_mark,
            average = record.average,
            "mark changed"
        );

        Ok(Outcome::MarkChanged {
            name: name.to_string(),
            day,
        })
    }

    /// Report every present value of a student, average first
    pub fn student_info(&self, name: &str) -> Result<Outcome> {
        let Some(record) = self.get(name) else {
            return Ok(Outcome::NoSuchStudent);
        };

        let entries = self
            .columns()
            .into_iter()
            .filter_map(|column| record.value(&column).map(|value| (column, value)))
            .collect();

        Ok(Outcome::StudentInfo(StudentReport {
            name: name.to_string(),
            entries,
        }))
    }

    /// Whether the student is on the roster
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Get a student's row
    pub fn get(&self, name: &str) -> Option<&StudentRecord> {
        self.students.iter().find(|s| s.name == name)
    }

    /// Number of students
    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Rows in insertion order
    pub fn students(&self) -> &[StudentRecord] {
        &self.students
    }

    /// Day keys in creation order
    pub fn days(&self) -> &[String] {
        &self.days
    }

    /// All columns: the average first, then days in creation order
    pub fn columns(&self) -> Vec<Column> {
        std::iter::once(Column::Average)
            .chain(self.days.iter().cloned().map(Column::Day))
            .collect()
    }

    /// Mark of a student for a day
    pub fn mark(&self, name: &str, day: u32) -> Option<f64> {
        self.get(name).and_then(|s| s.mark(&day_key(day)))
    }

    /// Average of a student
    pub fn average(&self, name: &str) -> Option<f64> {
        self.get(name).map(StudentRecord::average)
    }

    /// Plain-text grid of the whole journal
    pub fn render_table(&self) -> String {
        if self.students.is_empty() {
            return "Журнал пуст.".to_string();
        }

        let columns = self.columns();
        let mut grid: Vec<Vec<String>> = Vec::with_capacity(self.students.len() + 1);
        grid.push(
            std::iter::once(String::new())
                .chain(columns.iter().map(|c| c.label().to_string()))
                .collect(),
        );
        for record in &self.students {
            grid.push(
                std::iter::once(record.name.clone())
                    .chain(columns.iter().map(|c| {
                        record
                            .value(c)
                            .map_or_else(|| "NaN".to_string(), format_mark)
                    }))
                    .collect(),
            );
        }

        let widths: Vec<usize> = (0..grid[0].len())
            .map(|col| {
                grid.iter()
                    .map(|row| row[col].chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        grid.iter()
            .map(|row| {
                row.iter()
                    .zip(&widths)
                    .enumerate()
                    .map(|(i, (cell, &width))| {
                        let pad = " ".repeat(width - cell.chars().count());
                        if i == 0 {
                            format!("{cell}{pad}")
                        } else {
                            format!("{pad}{cell}")
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("  ")
                    .trim_end()
                    .to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.students.iter().position(|s| s.name == name)
    }

    /// Row index for a mark edit, or the outcome explaining why there is none
    fn locate(&self, name: &str, day: u32) -> std::result::Result<usize, Outcome> {
        let index = self.position(name).ok_or(Outcome::NotInJournal)?;
        if !self.days.contains(&day_key(day)) {
            return Err(Outcome::NoMarksForDay);
        }
        Ok(index)
    }
}

/// Column key of a day-of-month
fn day_key(day: u32) -> String {
    day.to_string()
}

fn ensure_finite(mark: f64) -> Result<()> {
    if mark.is_finite() {
        Ok(())
    } else {
        Err(GradebookError::InvalidArgument(format!(
            "оценка должна быть числом, получено {mark}"
        )))
    }
}

/// Round to two decimals, nearest to the exact binary value, ties to even
pub(crate) fn round2(value: f64) -> f64 {
    // `{:.2}` rounds the exact binary value; never scale by 100 first.
    format!("{value:.2}").parse().unwrap_or(value)
}
