// ABOUTME: Menu and multi-step prompt flow for the journal conversation
// ABOUTME: Turns each operator line into one reply, calling the journal once per completed flow

use crate::input::{self, DayError};
use gradebook_lib::{export_to_xlsx, Journal, Outcome, Result};
use std::path::PathBuf;

pub const WELCOME: &str = "Добро пожаловать в классный журнал!\n\
Данный бот предназначен для учета оценок учеников. По окончанию работы бота вы можете экспортировать журнал, чтобы сохранить данные об оценках.\n\
Выберите действие:";

const ADD_STUDENT: &str = "Добавить ученика";
const REMOVE_STUDENT: &str = "Удалить ученика";
const ADD_MARK: &str = "Добавить оценку";
const REMOVE_MARK: &str = "Удалить оценку";
const CHANGE_MARK: &str = "Изменить оценку";
const STUDENT_INFO: &str = "Информация об ученике";
const VIEW_JOURNAL: &str = "Посмотреть журнал";
const EXPORT_JOURNAL: &str = "Экспорт журнала";

/// Menu entries in display order
pub const MENU: [&str; 8] = [
    ADD_STUDENT,
    REMOVE_STUDENT,
    ADD_MARK,
    REMOVE_MARK,
    CHANGE_MARK,
    STUDENT_INFO,
    VIEW_JOURNAL,
    EXPORT_JOURNAL,
];

const ASK_NAME: &str = "Введите имя ученика:";
const ASK_DAY: &str = "Введите число месяца (1-31):";
const ASK_MARK: &str = "Введите оценку:";
const ASK_NEW_MARK: &str = "Введите новую оценку:";
const ASK_FILENAME: &str = "Введите имя файла (например, journal.xlsx):";
const UNKNOWN_COMMAND: &str = "Неизвестная команда. Выберите действие:";
const NO_SUCH_STUDENT: &str = "Такого ученика нет!";
const BAD_DATA: &str = "Некорректные данные!";
const BAD_DAY: &str = "Некорректное число месяца!";
const BAD_MARK: &str = "Некорректная оценка!";
const BAD_EXTENSION: &str =
    "Некорректный формат файла. Пожалуйста, используйте расширение .xlsx";

/// Which mark operation a multi-step flow ends in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MarkFlow {
    Add,
    Remove,
    Change,
}

/// What the next operator line answers
#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    AddStudent,
    RemoveStudent,
    StudentInfo,
    MarkName(MarkFlow),
    MarkDay { flow: MarkFlow, name: String },
    MarkValue { flow: MarkFlow, name: String, day: u32 },
    ExportFilename,
}

/// A message for the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// The flow finished and the menu should be offered again
    pub menu: bool,
}

impl Reply {
    fn prompt(text: &str) -> Self {
        Self {
            text: text.to_string(),
            menu: false,
        }
    }

    fn done(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            menu: true,
        }
    }
}

/// One operator's session with its own journal
pub struct Conversation {
    journal: Journal,
    pending: Option<Step>,
    export_dir: PathBuf,
}

impl Conversation {
    /// Start a session with an empty journal
    pub fn new(export_dir: impl Into<PathBuf>) -> Self {
        Self {
            journal: Journal::new(),
            pending: None,
            export_dir: export_dir.into(),
        }
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Whether the next line answers a prompt rather than picking a command
    pub fn is_awaiting_answer(&self) -> bool {
        self.pending.is_some()
    }

    /// Handle one line of operator input
    pub fn handle(&mut self, text: &str) -> Reply {
        match self.pending.take() {
            Some(step) => self.answer(step, text),
            None => self.command(text),
        }
    }

    fn command(&mut self, text: &str) -> Reply {
        let command = menu_entry(text.trim());
        tracing::debug!(command = command.unwrap_or(text), "menu command");

        let (step, prompt) = match command {
            Some(ADD_STUDENT) => (Step::AddStudent, ASK_NAME),
            Some(REMOVE_STUDENT) => (Step::RemoveStudent, ASK_NAME),
            Some(ADD_MARK) => (Step::MarkName(MarkFlow::Add), ASK_NAME),
            Some(REMOVE_MARK) => (Step::MarkName(MarkFlow::Remove), ASK_NAME),
            Some(CHANGE_MARK) => (Step::MarkName(MarkFlow::Change), ASK_NAME),
            Some(STUDENT_INFO) => (Step::StudentInfo, ASK_NAME),
            Some(EXPORT_JOURNAL) => (Step::ExportFilename, ASK_FILENAME),
            Some(VIEW_JOURNAL) => return Reply::done(self.journal.render_table()),
            _ if text.trim() == "/start" => return Reply::done(WELCOME),
            _ => return Reply::done(UNKNOWN_COMMAND),
        };

        self.pending = Some(step);
        Reply::prompt(prompt)
    }

    fn answer(&mut self, step: Step, text: &str) -> Reply {
        match step {
            Step::AddStudent => outcome_reply(self.journal.add_student(text)),
            Step::RemoveStudent => outcome_reply(self.journal.remove_student(text)),
            Step::StudentInfo => outcome_reply(self.journal.student_info(text)),
            Step::MarkName(flow) => {
                if !self.journal.contains(text) {
                    return Reply::done(NO_SUCH_STUDENT);
                }
                self.pending = Some(Step::MarkDay {
                    flow,
                    name: text.to_string(),
                });
                Reply::prompt(ASK_DAY)
            }
            Step::MarkDay { flow, name } => match input::parse_day(text) {
                Ok(day) if flow == MarkFlow::Remove => {
                    outcome_reply(self.journal.remove_mark(&name, day))
                }
                Ok(day) => {
                    let prompt = if flow == MarkFlow::Change {
                        ASK_NEW_MARK
                    } else {
                        ASK_MARK
                    };
                    self.pending = Some(Step::MarkValue { flow, name, day });
                    Reply::prompt(prompt)
                }
                Err(DayError::OutOfRange) => Reply::done(BAD_DAY),
                Err(DayError::NotANumber) => Reply::done(BAD_DATA),
            },
            Step::MarkValue { flow, name, day } => {
                let Some(mark) = input::parse_mark(text) else {
                    return Reply::done(BAD_MARK);
                };
                let result = match flow {
                    MarkFlow::Change => self.journal.change_mark(&name, day, mark),
                    _ => self.journal.add_mark(&name, day, mark),
                };
                outcome_reply(result)
            }
            Step::ExportFilename => self.export(text),
        }
    }

    fn export(&self, filename: &str) -> Reply {
        if !input::is_export_filename(filename) {
            return Reply::done(BAD_EXTENSION);
        }
        match export_to_xlsx(&self.journal, &self.export_dir, filename) {
            Ok(path) => Reply::done(format!("Журнал сохранён: {}", path.display())),
            Err(e) => Reply::done(format!("Ошибка экспорта: {e}")),
        }
    }
}

/// Accept a menu label or its number in the menu
fn menu_entry(text: &str) -> Option<&'static str> {
    if let Some(entry) = MENU.iter().copied().find(|entry| *entry == text) {
        return Some(entry);
    }
    text.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| MENU.get(i))
        .copied()
}

fn outcome_reply(result: Result<Outcome>) -> Reply {
    match result {
        Ok(outcome) => {
            if !outcome.is_applied() {
                tracing::info!(outcome = %outcome, "journal left unchanged");
            }
            Reply::done(outcome.message())
        }
        Err(e) => {
            tracing::warn!(error = %e, "journal operation failed");
            Reply::done(format!("Ошибка: {e}"))
        }
    }
}
