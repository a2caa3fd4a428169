//! Parsing of console input lines

use std::str::FromStr;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    Books,
    Members,
    Loans,
    MemberLoans,
}

impl std::fmt::Display for ScreenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ScreenKind::Books => "books",
            ScreenKind::Members => "members",
            ScreenKind::Loans => "loans",
            ScreenKind::MemberLoans => "member-loans",
        })
    }
}

impl FromStr for ScreenKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "books" => Ok(ScreenKind::Books),
            "members" => Ok(ScreenKind::Members),
            "loans" | "transactions" => Ok(ScreenKind::Loans),
            other => Err(AppError::Validation(format!("Unknown screen '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Login { username: String, password: String },
    Logout,
    Open(ScreenKind),
    /// Raw member identifier, validated by the screen
    MemberLoans(String),
    Search(String),
    Filter(String),
    Refresh,
    New,
    Edit(i64),
    Show(i64),
    Set { field: String, value: String },
    Save,
    Cancel,
    Delete(i64),
    Return(i64),
    Confirm,
    Pick(String),
    Choose(i64),
}

impl Command {
    /// The keyword that introduces this command
    pub fn word(&self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Quit => "quit",
            Command::Login { .. } => "login",
            Command::Logout => "logout",
            Command::Open(ScreenKind::Books) => "books",
            Command::Open(ScreenKind::Members) => "members",
            Command::Open(ScreenKind::Loans) => "loans",
            Command::Open(ScreenKind::MemberLoans) | Command::MemberLoans(_) => "member-loans",
            Command::Search(_) => "search",
            Command::Filter(_) => "filter",
            Command::Refresh => "refresh",
            Command::New => "new",
            Command::Edit(_) => "edit",
            Command::Show(_) => "show",
            Command::Set { .. } => "set",
            Command::Save => "save",
            Command::Cancel => "cancel",
            Command::Delete(_) => "delete",
            Command::Return(_) => "return",
            Command::Confirm => "confirm",
            Command::Pick(_) => "pick",
            Command::Choose(_) => "choose",
        }
    }

    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> AppResult<Option<Command>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "login" => {
                let mut parts = rest.split_whitespace();
                Command::Login {
                    username: parts.next().unwrap_or_default().to_string(),
                    password: parts.next().unwrap_or_default().to_string(),
                }
            }
            "logout" => Command::Logout,
            "books" | "members" | "loans" | "transactions" => Command::Open(word.to_lowercase().parse()?),
            "member-loans" => Command::MemberLoans(rest.to_string()),
            "search" => Command::Search(rest.to_string()),
            "filter" => Command::Filter(required(word, rest)?.to_string()),
            "refresh" => Command::Refresh,
            "new" => Command::New,
            "edit" => Command::Edit(id_argument(word, rest)?),
            "show" => Command::Show(id_argument(word, rest)?),
            "set" => {
                let (field, value) = rest
                    .split_once(char::is_whitespace)
                    .map(|(f, v)| (f, v.trim()))
                    .unwrap_or((rest, ""));
                Command::Set {
                    field: required(word, field)?.to_lowercase(),
                    value: value.to_string(),
                }
            }
            "save" | "submit" => Command::Save,
            "cancel" => Command::Cancel,
            "delete" => Command::Delete(id_argument(word, rest)?),
            "return" => Command::Return(id_argument(word, rest)?),
            "confirm" | "yes" => Command::Confirm,
            "pick" => Command::Pick(rest.to_string()),
            "choose" => Command::Choose(id_argument(word, rest)?),
            other => {
                return Err(AppError::Validation(format!(
                    "Unknown command '{}', type 'help' for a list",
                    other
                )))
            }
        };

        Ok(Some(command))
    }
}

fn required<'a>(command: &str, value: &'a str) -> AppResult<&'a str> {
    if value.is_empty() {
        Err(AppError::Validation(format!("'{}' needs an argument", command)))
    } else {
        Ok(value)
    }
}

fn id_argument(command: &str, rest: &str) -> AppResult<i64> {
    required(command, rest)?
        .parse::<i64>()
        .map_err(|_| AppError::Validation(format!("'{}' expects a numeric id, got '{}'", command, rest)))
}

pub const HELP: &str = "\
Session:   login <user> <password> | logout | quit
Screens:   books | members | loans | member-loans <memberId>
Lists:     search [text] | filter <status> | refresh | show <id>
Forms:     new | edit <id> | set <field> <value> | save | cancel
Deletion:  delete <id> | confirm | cancel
Loans:     new | set member <memberId> | pick <title> | choose <bookId> | save
           return <loanId> | confirm | cancel";
