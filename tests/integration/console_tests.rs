//! Screens and the console shell over real HTTP

use std::sync::Arc;

use library_console::{
    screens::{BookStatus, BooksScreen, LoanStatus, LoansScreen, MemberLoansScreen, MembersScreen},
    Console, Outcome,
};

use crate::backend::FakeBackend;

async fn run(console: &mut Console, line: &str) -> String {
    match console.handle_line(line).await {
        Outcome::Continue(text) => text,
        Outcome::Quit => panic!("console quit on '{}'", line),
    }
}

#[tokio::test]
async fn test_books_search_and_filter() {
    let backend = FakeBackend::seeded().await;
    let mut screen = BooksScreen::new(Arc::new(backend.client()));
    screen.mount().await;

    screen.search("97");
    assert_eq!(screen.list().visible().len(), 3);

    screen.filter(BookStatus::Borrowed);
    let visible: Vec<&str> = screen.list().visible().iter().map(|b| b.title.as_str()).collect();
    assert_eq!(visible, vec!["Dune"]);

    screen.search("HERBERT");
    assert_eq!(screen.list().visible().len(), 1);

    screen.search("");
    screen.filter(BookStatus::Available);
    assert_eq!(screen.list().visible().len(), 2);
}

#[tokio::test]
async fn test_book_create_refetches() {
    let backend = FakeBackend::empty().await;
    let mut screen = BooksScreen::new(Arc::new(backend.client()));
    screen.mount().await;
    assert_eq!(backend.book_lists(), 1);

    screen.open_create();
    screen.set_field("title", "Dune").unwrap();
    screen.set_field("author", "Herbert").unwrap();
    screen.set_field("isbn", "111").unwrap();
    screen.submit().await.unwrap();

    assert!(screen.form().is_none());
    assert_eq!(backend.book_lists(), 2);
    assert_eq!(screen.list().items().len(), 1);
    assert!(screen.list().items()[0].is_available);
}

#[tokio::test]
async fn test_member_delete_conflict_shows_server_text() {
    let backend = FakeBackend::seeded().await;
    let mut screen = MembersScreen::new(Arc::new(backend.client()));
    screen.mount().await;

    screen.request_delete(1);
    assert!(screen.confirm_delete().await.is_err());

    assert_eq!(screen.list().error(), Some("Member has open loans"));
    assert_eq!(screen.list().items().len(), 2);
    assert_eq!(backend.requests(), vec!["DELETE /Members/1"]);
}

#[tokio::test]
async fn test_loan_lifecycle() {
    let backend = FakeBackend::seeded().await;
    let mut screen = LoansScreen::new(Arc::new(backend.client()));
    screen.mount().await;

    // open loans come first
    let ids: Vec<i64> = screen.list().visible().iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![7, 8, 6]);

    screen.open_form();
    screen.set_member("2").unwrap();
    screen.search_book("kind").unwrap();
    let candidates: Vec<i64> = screen.book_candidates().iter().map(|b| b.id).collect();
    assert_eq!(candidates, vec![4]);
    screen.choose_book(4).unwrap();
    screen.submit().await.unwrap();

    assert!(screen.form().is_none());
    assert_eq!(screen.list().items().len(), 4);

    screen.request_return(7).unwrap();
    screen.confirm_return().await.unwrap();
    screen.filter(LoanStatus::Returned);
    let returned: Vec<i64> = screen.list().visible().iter().map(|l| l.id).collect();
    assert_eq!(returned, vec![6, 7]);

    assert_eq!(
        backend.requests(),
        vec!["POST /Loans/loan?memberId=2&bookId=4", "POST /Loans/return?loanId=7"]
    );
}

#[tokio::test]
async fn test_member_loans_unknown_member() {
    let backend = FakeBackend::seeded().await;
    let mut screen = MemberLoansScreen::new(Arc::new(backend.client()));

    screen.open("2").await.unwrap();
    assert_eq!(screen.loans().len(), 2);

    screen.open("42").await.unwrap();
    assert!(screen.loans().is_empty());
    assert_eq!(screen.list().error(), Some("Member 42 not found"));
}

#[tokio::test]
async fn test_console_session() {
    let backend = FakeBackend::seeded().await;
    let mut console = Console::new(Arc::new(backend.client()));

    let text = run(&mut console, "login admin wrong").await;
    assert!(text.contains("Invalid username or password"));

    let text = run(&mut console, "login admin admin").await;
    assert!(text.contains("Dune"));
    assert!(text.contains("Kindred"));

    run(&mut console, "members").await;
    let text = run(&mut console, "show 2").await;
    assert!(text.contains("Luis Vega"));

    let text = run(&mut console, "member-loans abc").await;
    assert!(text.contains("Invalid member ID"));

    run(&mut console, "loans").await;
    run(&mut console, "return 8").await;
    let text = run(&mut console, "confirm").await;
    assert!(!text.contains("error:"));
    assert_eq!(backend.requests(), vec!["POST /Loans/return?loanId=8"]);

    assert_eq!(console.handle_line("quit").await, Outcome::Quit);
}
