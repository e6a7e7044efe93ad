// ABOUTME: Business outcomes returned by journal operations
// ABOUTME: Each outcome renders to the message shown to the operator

use std::fmt;

/// Label of the derived average column
pub const AVERAGE_LABEL: &str = "Средний балл";

/// A column of the journal: the derived average or a day-of-month
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Column {
    Average,
    Day(String),
}

impl Column {
    /// Header text for this column
    pub fn label(&self) -> &str {
        match self {
            Column::Average => AVERAGE_LABEL,
            Column::Day(key) => key,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-student report produced by `student_info`
#[derive(Debug, Clone, PartialEq)]
pub struct StudentReport {
    pub name: String,
    /// Present values in column order, average first
    pub entries: Vec<(Column, f64)>,
}

/// Result of a journal operation that did not fail hard
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    StudentAdded { name: String },
    StudentExists,
    StudentRemoved { name: String },
    /// Missing student, as reported by roster and info operations
    NoSuchStudent,
    /// Missing student, as reported by mark removal and correction
    NotInJournal,
    MarkAdded { name: String, day: u32, mark: f64 },
    MarkRemoved { name: String, day: u32 },
    MarkChanged { name: String, day: u32 },
    /// The day column has never been created
    NoMarksForDay,
    StudentInfo(StudentReport),
}

impl Outcome {
    /// Whether the operation changed or read the journal as requested
    pub fn is_applied(&self) -> bool {
        !matches!(
            self,
            Outcome::StudentExists
                | Outcome::NoSuchStudent
                | Outcome::NotInJournal
                | Outcome::NoMarksForDay
        )
    }

    /// Rendered operator message
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::StudentAdded { name } => write!(f, "Ученик {name} добавлен."),
            Outcome::StudentExists => f.write_str("Такой ученик уже есть!"),
            Outcome::StudentRemoved { name } => write!(f, "Ученик {name} удалён."),
            Outcome::NoSuchStudent => f.write_str("Такого ученика нет!"),
            Outcome::NotInJournal => f.write_str("Такого ученика нет в журнале!"),
            Outcome::MarkAdded { name, day, mark } => write!(
                f,
                "Оценка {} добавлена для {name} за {day} число.",
                format_mark(*mark)
            ),
            Outcome::MarkRemoved { name, day } => {
                write!(f, "Оценка удалена у ученика {name} за {day} число.")
            }
            Outcome::MarkChanged { name, day } => {
                write!(f, "Оценка исправлена у ученика {name} за {day} число.")
            }
            Outcome::NoMarksForDay => f.write_str("За это число нет оценок!"),
            Outcome::StudentInfo(report) => {
                writeln!(f, "Информация об ученике {}:", report.name)?;
                for (column, value) in &report.entries {
                    writeln!(f, "{column}: {}", format_mark(*value))?;
                }
                Ok(())
            }
        }
    }
}

/// Render a mark the way operators expect to read it back
///
/// Integral values keep one decimal place (`9.0`); other values use the
/// shortest representation that round-trips (`4.25`). Magnitudes below 1e-4
/// or from 1e16 up switch to exponent notation with a signed two-digit
/// exponent (`1e+16`, `2.5e-05`).
pub fn format_mark(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        return exponent_notation(value);
    }
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

fn exponent_notation(value: f64) -> String {
    let text = format!("{value:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => text,
    }
}
