//! HTTP client against the fake backend

use library_console::{
    config::ApiConfig,
    models::{BookPayload, Credentials, MemberPayload},
    ApiClient, AppError, LibraryBackend,
};
use tokio_test::{assert_err, assert_ok};

use crate::backend::FakeBackend;

fn dune() -> BookPayload {
    BookPayload {
        book_id: None,
        title: "Dune".to_string(),
        author: "Herbert".to_string(),
        isbn: "111".to_string(),
        is_available: true,
    }
}

#[tokio::test]
async fn test_login() {
    let backend = FakeBackend::empty().await;
    let client = backend.client();

    let response = assert_ok!(
        client
            .login(&Credentials {
                username: "admin".to_string(),
                password: "admin".to_string(),
            })
            .await
    );
    assert_eq!(response.token, "fake-jwt-token");

    let err = assert_err!(
        client
            .login(&Credentials {
                username: "admin".to_string(),
                password: "wrong".to_string(),
            })
            .await
    );
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.server_message(), None);
}

#[tokio::test]
async fn test_create_book_then_list() {
    let backend = FakeBackend::empty().await;
    let client = backend.client();

    assert_ok!(client.create_book(&dune()).await);

    let books = client.list_books().await.unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "Dune");
    assert_eq!(books[0].author, "Herbert");
    assert_eq!(books[0].isbn, "111");
    assert!(books[0].is_available);

    let fetched = client.get_book(books[0].id).await.unwrap();
    assert_eq!(fetched, books[0]);
}

#[tokio::test]
async fn test_create_is_not_idempotent() {
    let backend = FakeBackend::empty().await;
    let client = backend.client();

    client.create_book(&dune()).await.unwrap();
    client.create_book(&dune()).await.unwrap();

    assert_eq!(client.list_books().await.unwrap().len(), 2);
    assert_eq!(backend.requests(), vec!["POST /Books", "POST /Books"]);
}

#[tokio::test]
async fn test_update_and_delete_book() {
    let backend = FakeBackend::seeded().await;
    let client = backend.client();

    let payload = BookPayload {
        book_id: Some(2),
        title: "Emma (annotated)".to_string(),
        author: "Jane Austen".to_string(),
        isbn: "9780141439587".to_string(),
        is_available: true,
    };
    client.update_book(2, &payload).await.unwrap();
    assert_eq!(client.get_book(2).await.unwrap().title, "Emma (annotated)");

    client.delete_book(4).await.unwrap();
    let err = client.get_book(4).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.server_message(), Some("Book 4 not found"));
}

#[tokio::test]
async fn test_validation_problem_is_flattened() {
    let backend = FakeBackend::seeded().await;
    let client = backend.client();

    let payload = MemberPayload {
        name: "Ana Clone".to_string(),
        email: "clone@example.com".to_string(),
        ci: "4455667".to_string(),
        phone_number: "70000000".to_string(),
    };
    let err = client.create_member(&payload).await.unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(
        err.display_message("Error saving the member"),
        "Ci: A member with this CI already exists."
    );
}

#[tokio::test]
async fn test_return_loan_closes_it() {
    let backend = FakeBackend::seeded().await;
    let client = backend.client();

    let open = client.list_loans().await.unwrap();
    let loan = open.iter().find(|l| l.id == 7).unwrap();
    assert!(loan.return_date.is_none());
    assert!(!loan.book.is_available);

    client.return_loan(7).await.unwrap();
    assert_eq!(backend.requests(), vec!["POST /Loans/return?loanId=7"]);

    let loans = client.list_loans().await.unwrap();
    let loan = loans.iter().find(|l| l.id == 7).unwrap();
    assert!(loan.return_date.is_some());
    assert!(loan.book.is_available);

    let err = client.return_loan(7).await.unwrap_err();
    assert_eq!(err.server_message(), Some("Loan already returned"));
}

#[tokio::test]
async fn test_create_loan_sends_query_parameters() {
    let backend = FakeBackend::seeded().await;
    let client = backend.client();

    client.create_loan("1", 2).await.unwrap();
    assert_eq!(backend.requests(), vec!["POST /Loans/loan?memberId=1&bookId=2"]);

    let loans = client.list_member_loans(1).await.unwrap();
    assert_eq!(loans.len(), 2);
    assert!(loans.iter().any(|l| l.book.id == 2 && l.is_open()));

    let err = client.create_loan("1", 2).await.unwrap_err();
    assert_eq!(err.server_message(), Some("Book is not available"));
}

#[tokio::test]
async fn test_unreachable_backend_is_a_network_error() {
    let client = ApiClient::new(&ApiConfig {
        base_url: "http://127.0.0.1:1/api".to_string(),
        timeout_secs: 2,
        ..ApiConfig::default()
    })
    .unwrap();

    let err = client.list_books().await.unwrap_err();
    assert!(matches!(err, AppError::Network(_)));
    assert_eq!(err.display_message("Error loading books"), "Error loading books");
}
