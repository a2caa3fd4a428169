//! In-memory fake of the library backend REST API, served by axum on an
//! ephemeral port.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use serde_json::json;
use std::sync::{Arc, Mutex};

use library_console::{
    config::ApiConfig,
    models::{Book, Loan, Member},
    ApiClient,
};

#[derive(Debug, Clone)]
pub struct LoanRecord {
    pub id: i64,
    pub book_id: i64,
    pub member_id: i64,
    pub loan_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
pub struct Store {
    pub books: Vec<Book>,
    pub members: Vec<Member>,
    pub loans: Vec<LoanRecord>,
    pub next_id: i64,
    /// Mutating requests in arrival order, e.g. `POST /Loans/return?loanId=7`
    pub requests: Vec<String>,
    /// Number of `GET /Books` calls
    pub book_lists: usize,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn loan_view(&self, record: &LoanRecord) -> Option<Loan> {
        Some(Loan {
            id: record.id,
            book: self.books.iter().find(|b| b.id == record.book_id)?.clone(),
            member: self.members.iter().find(|m| m.id == record.member_id)?.clone(),
            loan_date: record.loan_date,
            return_date: record.return_date,
        })
    }

    fn seeded() -> Self {
        let book = |id, title: &str, author: &str, isbn: &str, is_available| Book {
            id,
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
            is_available,
        };
        let member = |id, name: &str, email: &str, ci: &str, phone: &str| Member {
            id,
            name: name.to_string(),
            email: email.to_string(),
            ci: ci.to_string(),
            phone_number: phone.to_string(),
        };
        let day = |d| Utc.with_ymd_and_hms(2024, 5, d, 10, 0, 0).unwrap();

        Self {
            books: vec![
                book(1, "Dune", "Frank Herbert", "9780441013593", false),
                book(2, "Emma", "Jane Austen", "9780141439587", true),
                book(3, "Ubik", "Philip K. Dick", "0547572298", false),
                book(4, "Kindred", "Octavia Butler", "9780807083697", true),
            ],
            members: vec![
                member(1, "Ana Rojas", "ana@example.com", "4455667", "70012345"),
                member(2, "Luis Vega", "luis@example.com", "9911223", "71155500"),
            ],
            loans: vec![
                LoanRecord { id: 6, book_id: 2, member_id: 2, loan_date: day(1), return_date: Some(day(3)) },
                LoanRecord { id: 7, book_id: 1, member_id: 1, loan_date: day(2), return_date: None },
                LoanRecord { id: 8, book_id: 3, member_id: 2, loan_date: day(4), return_date: None },
            ],
            next_id: 100,
            ..Self::default()
        }
    }
}

pub type Shared = Arc<Mutex<Store>>;

pub struct FakeBackend {
    pub base_url: String,
    pub store: Shared,
}

impl FakeBackend {
    pub async fn empty() -> Self {
        Self::serve(Store::default()).await
    }

    pub async fn seeded() -> Self {
        Self::serve(Store::seeded()).await
    }

    async fn serve(store: Store) -> Self {
        let store: Shared = Arc::new(Mutex::new(store));

        let app = Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/Books", get(list_books).post(create_book))
            .route("/api/Books/:id", get(get_book).put(update_book).delete(delete_book))
            .route("/api/Members", get(list_members).post(create_member))
            .route("/api/Members/:id", get(get_member).put(update_member).delete(delete_member))
            .route("/api/Loans", get(list_loans))
            .route("/api/Loans/member/:id", get(member_loans))
            .route("/api/Loans/loan", post(create_loan))
            .route("/api/Loans/return", post(return_loan))
            .with_state(store.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake backend");
        let addr = listener.local_addr().expect("No local address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Fake backend crashed");
        });

        Self {
            base_url: format!("http://{}/api", addr),
            store,
        }
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&ApiConfig {
            base_url: self.base_url.clone(),
            ..ApiConfig::default()
        })
        .expect("Failed to build client")
    }

    pub fn requests(&self) -> Vec<String> {
        self.store.lock().unwrap().requests.clone()
    }

    pub fn book_lists(&self) -> usize {
        self.store.lock().unwrap().book_lists
    }
}

fn not_found(what: &str, id: i64) -> Response {
    (StatusCode::NOT_FOUND, format!("{} {} not found", what, id)).into_response()
}

#[derive(Deserialize)]
struct LoginBody {
    username: String,
    password: String,
}

async fn login(Json(body): Json<LoginBody>) -> Response {
    if body.username == "admin" && body.password == "admin" {
        Json(json!({ "token": "fake-jwt-token" })).into_response()
    } else {
        StatusCode::UNAUTHORIZED.into_response()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookBody {
    title: String,
    author: String,
    isbn: String,
}

async fn list_books(State(store): State<Shared>) -> Json<Vec<Book>> {
    let mut store = store.lock().unwrap();
    store.book_lists += 1;
    Json(store.books.clone())
}

async fn get_book(State(store): State<Shared>, Path(id): Path<i64>) -> Response {
    let store = store.lock().unwrap();
    match store.books.iter().find(|b| b.id == id) {
        Some(book) => Json(book.clone()).into_response(),
        None => not_found("Book", id),
    }
}

async fn create_book(State(store): State<Shared>, Json(body): Json<BookBody>) -> Response {
    let mut store = store.lock().unwrap();
    store.requests.push("POST /Books".to_string());
    let book = Book {
        id: store.next_id(),
        title: body.title,
        author: body.author,
        isbn: body.isbn,
        // availability is derived from loans, whatever the client sent
        is_available: true,
    };
    store.books.push(book.clone());
    (StatusCode::CREATED, Json(book)).into_response()
}

async fn update_book(
    State(store): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<BookBody>,
) -> Response {
    let mut store = store.lock().unwrap();
    store.requests.push(format!("PUT /Books/{}", id));
    match store.books.iter_mut().find(|b| b.id == id) {
        Some(book) => {
            book.title = body.title;
            book.author = body.author;
            StatusCode::NO_CONTENT.into_response()
        }
        None => not_found("Book", id),
    }
}

async fn delete_book(State(store): State<Shared>, Path(id): Path<i64>) -> Response {
    let mut store = store.lock().unwrap();
    store.requests.push(format!("DELETE /Books/{}", id));
    let before = store.books.len();
    store.books.retain(|b| b.id != id);
    if store.books.len() == before {
        not_found("Book", id)
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MemberBody {
    name: String,
    email: String,
    ci: String,
    phone_number: String,
}

async fn list_members(State(store): State<Shared>) -> Json<Vec<Member>> {
    Json(store.lock().unwrap().members.clone())
}

async fn get_member(State(store): State<Shared>, Path(id): Path<i64>) -> Response {
    let store = store.lock().unwrap();
    match store.members.iter().find(|m| m.id == id) {
        Some(member) => Json(member.clone()).into_response(),
        None => not_found("Member", id),
    }
}

async fn create_member(State(store): State<Shared>, Json(body): Json<MemberBody>) -> Response {
    let mut store = store.lock().unwrap();
    store.requests.push("POST /Members".to_string());
    if store.members.iter().any(|m| m.ci == body.ci) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "title": "One or more validation errors occurred.",
                "status": 400,
                "errors": { "Ci": ["A member with this CI already exists."] }
            })),
        )
            .into_response();
    }
    let member = Member {
        id: store.next_id(),
        name: body.name,
        email: body.email,
        ci: body.ci,
        phone_number: body.phone_number,
    };
    store.members.push(member.clone());
    (StatusCode::CREATED, Json(member)).into_response()
}

async fn update_member(
    State(store): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<MemberBody>,
) -> Response {
    let mut store = store.lock().unwrap();
    store.requests.push(format!("PUT /Members/{}", id));
    match store.members.iter_mut().find(|m| m.id == id) {
        Some(member) => {
            member.name = body.name;
            member.email = body.email;
            member.phone_number = body.phone_number;
            StatusCode::NO_CONTENT.into_response()
        }
        None => not_found("Member", id),
    }
}

async fn delete_member(State(store): State<Shared>, Path(id): Path<i64>) -> Response {
    let mut store = store.lock().unwrap();
    store.requests.push(format!("DELETE /Members/{}", id));
    if store.loans.iter().any(|l| l.member_id == id && l.return_date.is_none()) {
        return (StatusCode::CONFLICT, Json(json!("Member has open loans"))).into_response();
    }
    let before = store.members.len();
    store.members.retain(|m| m.id != id);
    if store.members.len() == before {
        not_found("Member", id)
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

async fn list_loans(State(store): State<Shared>) -> Json<Vec<Loan>> {
    let store = store.lock().unwrap();
    Json(store.loans.iter().filter_map(|l| store.loan_view(l)).collect())
}

async fn member_loans(State(store): State<Shared>, Path(id): Path<i64>) -> Response {
    let store = store.lock().unwrap();
    if !store.members.iter().any(|m| m.id == id) {
        return not_found("Member", id);
    }
    let loans: Vec<Loan> = store
        .loans
        .iter()
        .filter(|l| l.member_id == id)
        .filter_map(|l| store.loan_view(l))
        .collect();
    Json(loans).into_response()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LendQuery {
    member_id: i64,
    book_id: i64,
}

async fn create_loan(State(store): State<Shared>, Query(query): Query<LendQuery>) -> Response {
    let mut store = store.lock().unwrap();
    store.requests.push(format!(
        "POST /Loans/loan?memberId={}&bookId={}",
        query.member_id, query.book_id
    ));

    if !store.members.iter().any(|m| m.id == query.member_id) {
        return not_found("Member", query.member_id);
    }
    match store.books.iter_mut().find(|b| b.id == query.book_id) {
        Some(book) if book.is_available => book.is_available = false,
        Some(_) => return (StatusCode::BAD_REQUEST, "Book is not available").into_response(),
        None => return not_found("Book", query.book_id),
    }

    let record = LoanRecord {
        id: store.next_id(),
        book_id: query.book_id,
        member_id: query.member_id,
        loan_date: Utc::now(),
        return_date: None,
    };
    store.loans.push(record);
    StatusCode::OK.into_response()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReturnQuery {
    loan_id: i64,
}

async fn return_loan(State(store): State<Shared>, Query(query): Query<ReturnQuery>) -> Response {
    let mut store = store.lock().unwrap();
    store.requests.push(format!("POST /Loans/return?loanId={}", query.loan_id));

    let Some(record) = store.loans.iter_mut().find(|l| l.id == query.loan_id) else {
        return not_found("Loan", query.loan_id);
    };
    if record.return_date.is_some() {
        return (StatusCode::BAD_REQUEST, Json(json!({ "message": "Loan already returned" }))).into_response();
    }
    record.return_date = Some(Utc::now());
    let book_id = record.book_id;
    if let Some(book) = store.books.iter_mut().find(|b| b.id == book_id) {
        book.is_available = true;
    }
    StatusCode::OK.into_response()
}
