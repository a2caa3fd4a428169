//! Interactive console: routes parsed commands to the active screen and
//! renders it back as text.

pub mod command;
pub mod render;

use std::sync::Arc;

pub use command::{Command, ScreenKind, HELP};

use crate::{
    api::LibraryBackend,
    error::{AppError, AppResult},
    screens::{BookStatus, BooksScreen, LoanStatus, LoansScreen, MemberLoansScreen, MembersScreen},
    session::Session,
};

/// Result of one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Text to print before the next prompt
    Continue(String),
    Quit,
}

pub struct Console {
    backend: Arc<dyn LibraryBackend>,
    session: Session,
    active: Option<ScreenKind>,
    books: BooksScreen,
    members: MembersScreen,
    loans: LoansScreen,
    member_loans: MemberLoansScreen,
}

impl Console {
    pub fn new(backend: Arc<dyn LibraryBackend>) -> Self {
        Self {
            books: BooksScreen::new(backend.clone()),
            members: MembersScreen::new(backend.clone()),
            loans: LoansScreen::new(backend.clone()),
            member_loans: MemberLoansScreen::new(backend.clone()),
            backend,
            session: Session::default(),
            active: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn active(&self) -> Option<ScreenKind> {
        self.active
    }

    /// Parse and run one input line
    pub async fn handle_line(&mut self, line: &str) -> Outcome {
        match Command::parse(line) {
            Ok(Some(command)) => self.execute(command).await,
            Ok(None) => Outcome::Continue(String::new()),
            Err(err) => Outcome::Continue(format!("error: {}", err.display_message("Invalid command"))),
        }
    }

    /// Run one command. Failures are reported inline and never end the session.
    pub async fn execute(&mut self, command: Command) -> Outcome {
        match command {
            Command::Quit => return Outcome::Quit,
            Command::Help => return Outcome::Continue(HELP.to_string()),
            _ => {}
        }

        match self.dispatch(command).await {
            Ok(Some(text)) => Outcome::Continue(text),
            Ok(None) => Outcome::Continue(self.render()),
            Err(err) => {
                let screen = self.render();
                let message = err.display_message(&err.to_string());
                if screen.is_empty() {
                    Outcome::Continue(format!("error: {}", message))
                } else if shows_banner(&screen, &message) {
                    Outcome::Continue(screen)
                } else {
                    Outcome::Continue(format!("{}\nerror: {}", screen, message))
                }
            }
        }
    }

    /// `Ok(Some(text))` replaces the screen rendering for this command
    async fn dispatch(&mut self, command: Command) -> AppResult<Option<String>> {
        match command {
            Command::Login { username, password } => {
                self.session.login(self.backend.as_ref(), &username, &password).await?;
                self.switch(ScreenKind::Books).await;
                return Ok(None);
            }
            Command::Logout => {
                self.session.logout();
                self.active = None;
                return Ok(Some("Logged out".to_string()));
            }
            _ => {}
        }

        self.session.require()?;

        match command {
            Command::Open(kind) => self.switch(kind).await,
            Command::Show(id) => return self.show(id).await.map(Some),
            Command::MemberLoans(raw_id) => {
                self.active = Some(ScreenKind::MemberLoans);
                self.member_loans.open(&raw_id).await?;
            }
            other => self.on_screen(other).await?,
        }
        Ok(None)
    }

    async fn switch(&mut self, kind: ScreenKind) {
        self.active = Some(kind);
        match kind {
            ScreenKind::Books => self.books.mount().await,
            ScreenKind::Members => self.members.mount().await,
            ScreenKind::Loans => self.loans.mount().await,
            ScreenKind::MemberLoans => self.member_loans.refresh().await,
        }
    }

    /// Details of one record, fetched from the backend
    async fn show(&self, id: i64) -> AppResult<String> {
        match self.active {
            Some(ScreenKind::Books) => {
                let book = self.books.inspect(id).await?;
                Ok(format!(
                    "Book #{}\n  title    {}\n  author   {}\n  isbn     {}\n  status   {}",
                    book.id,
                    book.title,
                    book.author,
                    book.isbn,
                    if book.is_available { "available" } else { "borrowed" }
                ))
            }
            Some(ScreenKind::Members) => {
                let member = self.members.inspect(id).await?;
                Ok(format!(
                    "Member #{}\n  name     {}\n  email    {}\n  ci       {}\n  phone    {}",
                    member.id, member.name, member.email, member.ci, member.phone_number
                ))
            }
            _ => Err(AppError::Validation(
                "'show' works on the books and members screens".to_string(),
            )),
        }
    }

    async fn on_screen(&mut self, command: Command) -> AppResult<()> {
        let kind = self
            .active
            .ok_or_else(|| AppError::Validation("Open a screen first: books, members or loans".to_string()))?;

        match (kind, command) {
            (ScreenKind::Books, Command::Search(q)) => self.books.search(&q),
            (ScreenKind::Books, Command::Filter(s)) => self.books.filter(s.parse::<BookStatus>()?),
            (ScreenKind::Books, Command::Refresh) => self.books.refresh().await,
            (ScreenKind::Books, Command::New) => self.books.open_create(),
            (ScreenKind::Books, Command::Edit(id)) => self.books.open_edit(id)?,
            (ScreenKind::Books, Command::Set { field, value }) => self.books.set_field(&field, &value)?,
            (ScreenKind::Books, Command::Save) => self.books.submit().await?,
            (ScreenKind::Books, Command::Delete(id)) => self.books.request_delete(id),
            (ScreenKind::Books, Command::Confirm) => self.books.confirm_delete().await?,
            (ScreenKind::Books, Command::Cancel) => {
                self.books.cancel_form();
                self.books.cancel_delete();
            }

            (ScreenKind::Members, Command::Search(q)) => self.members.search(&q),
            (ScreenKind::Members, Command::Refresh) => self.members.refresh().await,
            (ScreenKind::Members, Command::New) => self.members.open_create(),
            (ScreenKind::Members, Command::Edit(id)) => self.members.open_edit(id)?,
            (ScreenKind::Members, Command::Set { field, value }) => self.members.set_field(&field, &value)?,
            (ScreenKind::Members, Command::Save) => self.members.submit().await?,
            (ScreenKind::Members, Command::Delete(id)) => self.members.request_delete(id),
            (ScreenKind::Members, Command::Confirm) => self.members.confirm_delete().await?,
            (ScreenKind::Members, Command::Cancel) => {
                self.members.cancel_form();
                self.members.cancel_delete();
            }

            (ScreenKind::Loans, Command::Search(q)) => self.loans.search(&q),
            (ScreenKind::Loans, Command::Filter(s)) => self.loans.filter(s.parse::<LoanStatus>()?),
            (ScreenKind::Loans, Command::Refresh) => self.loans.refresh().await,
            (ScreenKind::Loans, Command::New) => self.loans.open_form(),
            (ScreenKind::Loans, Command::Set { field, value }) if field == "member" => {
                self.loans.set_member(&value)?
            }
            (ScreenKind::Loans, Command::Pick(text)) => self.loans.search_book(&text)?,
            (ScreenKind::Loans, Command::Choose(id)) => self.loans.choose_book(id)?,
            (ScreenKind::Loans, Command::Save) => self.loans.submit().await?,
            (ScreenKind::Loans, Command::Return(id)) => self.loans.request_return(id)?,
            (ScreenKind::Loans, Command::Confirm) => self.loans.confirm_return().await?,
            (ScreenKind::Loans, Command::Cancel) => {
                self.loans.cancel_form();
                self.loans.cancel_return();
            }

            (ScreenKind::MemberLoans, Command::Refresh) => self.member_loans.refresh().await,

            (kind, command) => {
                return Err(AppError::Validation(format!(
                    "'{}' is not available on the {} screen",
                    command.word(),
                    kind
                )))
            }
        }
        Ok(())
    }

    /// Text rendering of the active screen (empty when none is open)
    pub fn render(&self) -> String {
        match self.active {
            Some(ScreenKind::Books) => render::books(&self.books),
            Some(ScreenKind::Members) => render::members(&self.members),
            Some(ScreenKind::Loans) => render::loans(&self.loans),
            Some(ScreenKind::MemberLoans) => render::member_loans(&self.member_loans),
            None => String::new(),
        }
    }
}

/// Whether a `! ...` banner line of the rendered screen already carries `message`
fn shows_banner(screen: &str, message: &str) -> bool {
    screen
        .lines()
        .filter_map(|line| line.trim_start().strip_prefix("! "))
        .any(|banner| banner.contains(message))
}
