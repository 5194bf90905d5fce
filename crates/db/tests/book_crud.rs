use bookstall_db::book_repo::{
    create_book, delete_book, get_book, list_books, list_books_by_seller, update_book,
};
use bookstall_db::seller_repo::create_seller;
use bookstall_db::{open_db_in_memory, BookUpdate, NewBook, NewSeller};
use rusqlite::Connection;

fn seed_seller(conn: &Connection) -> i64 {
    create_seller(
        conn,
        &NewSeller {
            first_name: "Ivan".to_string(),
            last_name: "Ivanov".to_string(),
            e_mail: "ivan@example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
        },
    )
    .unwrap()
    .id
}

fn sample_book(saller_id: i64) -> NewBook {
    NewBook {
        title: "Wrong Code".to_string(),
        author: "Robert Martin".to_string(),
        year: 2007,
        count_pages: 104,
        saller_id,
    }
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let owner = seed_seller(&conn);
    let created = create_book(&conn, &sample_book(owner)).unwrap();

    let loaded = get_book(&conn, created.id).unwrap().unwrap();
    assert_eq!(loaded, created);
    assert_eq!(loaded.saller_id, owner);
}

#[test]
fn create_rejects_unknown_owner() {
    let conn = open_db_in_memory().unwrap();
    // foreign_keys=ON makes a dangling saller_id a constraint violation.
    let result = create_book(&conn, &sample_book(999));
    assert!(result.is_err());
}

#[test]
fn update_preserves_owner() {
    let conn = open_db_in_memory().unwrap();
    let owner = seed_seller(&conn);
    let created = create_book(&conn, &sample_book(owner)).unwrap();

    let updated = update_book(
        &conn,
        created.id,
        &BookUpdate {
            title: "Clean Code".to_string(),
            author: "Robert Martin".to_string(),
            year: 2008,
            count_pages: 464,
        },
    )
    .unwrap()
    .unwrap();

    assert_eq!(updated.title, "Clean Code");
    assert_eq!(updated.year, 2008);
    assert_eq!(updated.saller_id, owner);
}

#[test]
fn update_missing_book_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let result = update_book(
        &conn,
        42,
        &BookUpdate {
            title: "x".to_string(),
            author: "y".to_string(),
            year: 1999,
            count_pages: 1,
        },
    )
    .unwrap();
    assert!(result.is_none());
}

#[test]
fn list_by_seller_filters_other_owners() {
    let conn = open_db_in_memory().unwrap();
    let first = seed_seller(&conn);
    let second = create_seller(
        &conn,
        &NewSeller {
            first_name: "Petr".to_string(),
            last_name: "Petrov".to_string(),
            e_mail: "petr@example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
        },
    )
    .unwrap()
    .id;

    create_book(&conn, &sample_book(first)).unwrap();
    create_book(&conn, &sample_book(second)).unwrap();

    let owned = list_books_by_seller(&conn, first).unwrap();
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].saller_id, first);
    assert_eq!(list_books(&conn).unwrap().len(), 2);
}

#[test]
fn delete_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let owner = seed_seller(&conn);
    let created = create_book(&conn, &sample_book(owner)).unwrap();

    delete_book(&conn, created.id).unwrap();
    assert!(get_book(&conn, created.id).unwrap().is_none());

    // Deleting again (or any absent id) still succeeds.
    delete_book(&conn, created.id).unwrap();
    delete_book(&conn, 1234).unwrap();
}
