//! Plain-text rendering of the screens

use std::fmt::Write;

use crate::models::Loan;
use crate::screens::{
    BooksScreen, Draft, FormController, FormMode, LoanStatus, LoansScreen, Managed, MemberLoansScreen,
    MembersScreen, StatusFilter,
};

/// Left-aligned table with a header rule
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&line(headers.to_vec()));
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&line(rule.iter().map(String::as_str).collect()));
    for row in rows {
        out.push('\n');
        out.push_str(&line(row.iter().map(String::as_str).collect()));
    }
    out
}

fn counts_line<S: StatusFilter>(active: S, counts: &[(S, usize)]) -> String {
    counts
        .iter()
        .map(|(status, count)| {
            if *status == active {
                format!("[{} ({})]", status, count)
            } else {
                format!("{} ({})", status, count)
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn banner(out: &mut String, error: Option<&str>) {
    if let Some(error) = error {
        let _ = writeln!(out, "! {}", error);
    }
}

fn form_block<D: Draft>(out: &mut String, noun: &str, form: &FormController<D>, read_only: &str) {
    let _ = match form.mode() {
        FormMode::Create => writeln!(out, "\n-- New {} --", noun),
        FormMode::Edit(id) => writeln!(out, "\n-- Edit {} #{} --", noun, id),
    };
    for (field, value) in form.draft().fields() {
        let lock = if form.mode().is_edit() && field == read_only { " (read-only)" } else { "" };
        let _ = writeln!(out, "  {:<8} {}{}", field, value, lock);
    }
    banner(out, form.error());
    out.push_str("  save | cancel");
}

fn pending_delete<E: Managed>(out: &mut String, pending: Option<i64>) {
    if let Some(id) = pending {
        let _ = write!(out, "\nDelete {} #{}? confirm | cancel", E::NOUN, id);
    }
}

fn date(value: &chrono::DateTime<chrono::Utc>) -> String {
    value.format("%Y-%m-%d").to_string()
}

pub fn books(screen: &BooksScreen) -> String {
    let list = screen.list();
    let mut out = String::from("== Books ==\n");
    if list.is_loading() {
        out.push_str("Loading...");
        return out;
    }
    banner(&mut out, list.error());
    let _ = writeln!(out, "search: \"{}\"  {}", list.query(), counts_line(list.status(), &list.counts()));

    let rows: Vec<Vec<String>> = list
        .visible()
        .iter()
        .map(|b| {
            vec![
                b.id.to_string(),
                b.title.clone(),
                b.author.clone(),
                b.isbn.clone(),
                if b.is_available { "available" } else { "borrowed" }.to_string(),
            ]
        })
        .collect();
    out.push_str(&table(&["ID", "TITLE", "AUTHOR", "ISBN", "STATUS"], &rows));

    if let Some(form) = screen.form() {
        form_block(&mut out, "book", form, "isbn");
    }
    pending_delete::<crate::models::Book>(&mut out, screen.pending_delete());
    out
}

pub fn members(screen: &MembersScreen) -> String {
    let list = screen.list();
    let mut out = String::from("== Members ==\n");
    if list.is_loading() {
        out.push_str("Loading...");
        return out;
    }
    banner(&mut out, list.error());
    let _ = writeln!(out, "search: \"{}\"  {} members", list.query(), list.items().len());

    let rows: Vec<Vec<String>> = list
        .visible()
        .iter()
        .map(|m| {
            vec![
                m.id.to_string(),
                m.name.clone(),
                m.email.clone(),
                m.ci.clone(),
                m.phone_number.clone(),
            ]
        })
        .collect();
    out.push_str(&table(&["ID", "NAME", "EMAIL", "CI", "PHONE"], &rows));

    if let Some(form) = screen.form() {
        form_block(&mut out, "member", form, "ci");
    }
    pending_delete::<crate::models::Member>(&mut out, screen.pending_delete());
    out
}

fn loan_rows(loans: &[&Loan]) -> Vec<Vec<String>> {
    loans
        .iter()
        .map(|l| {
            vec![
                l.id.to_string(),
                l.book.title.clone(),
                l.member.name.clone(),
                date(&l.loan_date),
                l.return_date.as_ref().map(date).unwrap_or_else(|| "-".to_string()),
                LoanStatus::of(l).to_string(),
            ]
        })
        .collect()
}

const LOAN_HEADERS: &[&str] = &["ID", "BOOK", "MEMBER", "LOANED", "RETURNED", "STATUS"];

pub fn loans(screen: &LoansScreen) -> String {
    let list = screen.list();
    let mut out = String::from("== Loans ==\n");
    if list.is_loading() {
        out.push_str("Loading...");
        return out;
    }
    banner(&mut out, list.error());
    let _ = writeln!(out, "search: \"{}\"  {}", list.query(), counts_line(list.status(), &list.counts()));
    out.push_str(&table(LOAN_HEADERS, &loan_rows(&list.visible())));

    if let Some(form) = screen.form() {
        out.push_str("\n\n-- New loan --\n");
        let _ = writeln!(out, "  member   {}", form.member_id);
        let _ = writeln!(
            out,
            "  book     {}{}",
            form.picker.search(),
            if form.picker.selected().is_some() { " (selected)" } else { "" }
        );
        if form.picker.selected().is_none() {
            for book in screen.book_candidates() {
                let _ = writeln!(out, "    > {} {}", book.id, book.title);
            }
        }
        banner(&mut out, form.error());
        out.push_str(if form.can_submit() { "  save | cancel" } else { "  cancel" });
    }
    if let Some(id) = screen.pending_return() {
        let _ = write!(out, "\nRegister return of loan #{}? confirm | cancel", id);
    }
    out
}

pub fn member_loans(screen: &MemberLoansScreen) -> String {
    let list = screen.list();
    let mut out = match screen.member_id() {
        Some(id) => format!("== Loans of member #{} ==\n", id),
        None => String::from("== Member loans ==\n"),
    };
    if list.is_loading() {
        out.push_str("Loading...");
        return out;
    }
    banner(&mut out, list.error());
    if list.error().is_none() && screen.loans().is_empty() {
        out.push_str("This member has no loans.");
        return out;
    }
    let rows: Vec<&Loan> = screen.loans().iter().collect();
    out.push_str(&table(LOAN_HEADERS, &loan_rows(&rows)));
    out
}
