//! PostgreSQLアダプターのテスト
//!
//! DATABASE_URL で接続できるPostgreSQLが必要なため `#[ignore]` にしている。
//! 実行: `cargo test --test postgres_repository_test -- --ignored`

mod common;

use chrono::{DateTime, Utc};
use library_lending_api::adapters::postgres::{
    PostgresBookRepository, PostgresBorrowRepository, PostgresUserRepository,
};
use library_lending_api::application::library::{
    LibraryApplicationError, ServiceDependencies, borrow_book,
};
use library_lending_api::domain::commands::BorrowBook;
use library_lending_api::domain::{BookId, Name, UserId, UserScore};
use library_lending_api::ports::{
    BookRepository, BorrowRepository, OpenOutcome, UserRepository,
};
use serial_test::serial;
use sqlx::PgPool;
use std::sync::Arc;

/// PostgreSQLの時刻精度（マイクロ秒）に合わせて丸める
fn truncate_to_micros(dt: DateTime<Utc>) -> DateTime<Utc> {
    let micros = dt.timestamp_micros();
    DateTime::from_timestamp_micros(micros).expect("Invalid timestamp")
}

fn name(value: &str) -> Name {
    Name::from_stored(value.to_string())
}

async fn setup() -> (PgPool, UserId, UserId, BookId) {
    let pool = common::create_test_pool().await;
    common::cleanup_database(&pool).await;

    let users = PostgresUserRepository::new(pool.clone());
    let books = PostgresBookRepository::new(pool.clone());

    let alice = users.create(name("Alice")).await.unwrap();
    let bob = users.create(name("Bob")).await.unwrap();
    let dune = books.create(name("Dune")).await.unwrap();

    (pool, alice.id, bob.id, dune.id)
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_create_assigns_sequential_ids() {
    let (pool, alice, bob, dune) = setup().await;
    let users = PostgresUserRepository::new(pool.clone());

    assert_eq!(alice, UserId::new(1));
    assert_eq!(bob, UserId::new(2));
    assert_eq!(dune, BookId::new(1));

    let listed = users.list().await.unwrap();
    let names: Vec<&str> = listed.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Bob"]);

    assert!(users.find_by_id(UserId::new(99)).await.unwrap().is_none());
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_open_and_close_borrow() {
    let (pool, alice, _, dune) = setup().await;
    let borrows = PostgresBorrowRepository::new(pool.clone());
    let books = PostgresBookRepository::new(pool.clone());
    let borrowed_at = truncate_to_micros(Utc::now());

    let outcome = borrows.open(alice, dune, borrowed_at).await.unwrap();
    let OpenOutcome::Opened(open) = outcome else {
        panic!("expected a new borrow");
    };
    assert_eq!(open.user_id, alice);
    assert_eq!(open.book_id, dune);
    assert_eq!(open.borrowed_at, borrowed_at);

    assert_eq!(books.find_scores(dune).await.unwrap(), vec![None]);

    let score = UserScore::try_from(8).unwrap();
    let returned_at = truncate_to_micros(Utc::now());
    let closed = borrows
        .close(alice, dune, returned_at, score)
        .await
        .unwrap()
        .expect("open borrow should be closed");
    assert_eq!(closed.borrow_id, open.borrow_id);
    assert_eq!(closed.returned_at, returned_at);
    assert_eq!(closed.user_score, score);

    // 二重返却は更新されない
    assert!(
        borrows
            .close(alice, dune, Utc::now(), score)
            .await
            .unwrap()
            .is_none()
    );

    assert_eq!(books.find_scores(dune).await.unwrap(), vec![Some(score)]);
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_unique_index_prevents_second_open_borrow() {
    let (pool, alice, bob, dune) = setup().await;
    let borrows = PostgresBorrowRepository::new(pool.clone());

    borrows.open(alice, dune, Utc::now()).await.unwrap();
    let second = borrows.open(bob, dune, Utc::now()).await.unwrap();

    assert_eq!(second, OpenOutcome::AlreadyBorrowed);

    let open = borrows.find_open_by_book(dune).await.unwrap().unwrap();
    assert_eq!(open.user_id, alice);
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_borrow_history_joins_book_names() {
    let (pool, alice, _, dune) = setup().await;
    let users = PostgresUserRepository::new(pool.clone());
    let books = PostgresBookRepository::new(pool.clone());
    let borrows = PostgresBorrowRepository::new(pool.clone());
    let emma = books.create(name("Emma")).await.unwrap().id;
    let score = UserScore::try_from(4).unwrap();

    borrows.open(alice, dune, Utc::now()).await.unwrap();
    borrows.close(alice, dune, Utc::now(), score).await.unwrap();
    borrows.open(alice, emma, Utc::now()).await.unwrap();

    let history = users.find_borrow_history(alice).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].book_name.as_str(), "Dune");
    assert_eq!(history[0].user_score, Some(score));
    assert!(history[0].returned_at.is_some());
    assert_eq!(history[1].book_id, emma);
    assert!(history[1].returned_at.is_none());

    let open = borrows.find_open_by_book(emma).await.unwrap().unwrap();
    assert_eq!(open.user_id, alice);
    assert!(borrows.find_open_by_book(dune).await.unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[serial]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_concurrent_borrows_against_database() {
    let (pool, alice, bob, dune) = setup().await;
    let deps = ServiceDependencies {
        user_repository: Arc::new(PostgresUserRepository::new(pool.clone())),
        book_repository: Arc::new(PostgresBookRepository::new(pool.clone())),
        borrow_repository: Arc::new(PostgresBorrowRepository::new(pool.clone())),
    };

    let handles = [alice, bob, alice, bob, alice, bob].map(|user_id| {
        let deps = deps.clone();
        tokio::spawn(async move {
            let cmd = BorrowBook {
                user_id,
                book_id: dune,
                borrowed_at: Utc::now(),
            };
            borrow_book(&deps, cmd).await
        })
    });

    let results = futures::future::join_all(handles).await;

    let opened = results
        .into_iter()
        .map(|r| r.expect("task panicked"))
        .filter(|r| match r {
            Ok(_) => true,
            Err(LibraryApplicationError::BookAlreadyBorrowed) => false,
            Err(e) => panic!("unexpected error: {e:?}"),
        })
        .count();
    assert_eq!(opened, 1);

    let open_rows: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM borrows WHERE book_id = $1 AND return_date IS NULL",
    )
    .bind(dune.value())
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(open_rows, 1);
}
