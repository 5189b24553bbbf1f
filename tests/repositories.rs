//! Repository-contract tests against in-memory SQLite.

use diesel::prelude::*;

use pawspots_backend::db::{self, Db};
use pawspots_backend::error::StorageError;
use pawspots_backend::models::{ListingPayload, ReviewPayload};
use pawspots_backend::repos::{
    ListingRepository, ReviewRepository, SqliteListingRepository, SqliteReviewRepository,
};
use pawspots_backend::schema::listings;
use pawspots_backend::seed;

fn empty_db() -> Db {
    let db = db::connect(":memory:").unwrap();
    {
        let mut conn = db.lock().unwrap();
        db::run_migrations(&mut conn).unwrap();
    }
    db
}

fn seeded_db() -> Db {
    let db = empty_db();
    {
        let mut conn = db.lock().unwrap();
        seed::seed_demo_data(&mut conn).unwrap();
    }
    db
}

fn park_payload(name: &str) -> ListingPayload {
    ListingPayload {
        name: name.to_string(),
        location: "Somewhere".to_string(),
        kind: "park".to_string(),
        allowed_pets: vec!["dogs".to_string()],
        ..ListingPayload::default()
    }
}

#[test]
fn create_assigns_increasing_ids_and_timestamps() {
    let repo = SqliteListingRepository::new(empty_db());

    let first = repo.create(park_payload("First")).unwrap();
    let second = repo.create(park_payload("Second")).unwrap();
    assert!(second.id > first.id);
    assert!(first.reviews.is_empty());
    assert!(first.updated_at.is_none());
    assert_eq!(first.allowed_pets, vec!["dogs"]);
}

#[test]
fn get_and_delete_of_missing_rows_are_not_errors() {
    let repo = SqliteListingRepository::new(empty_db());
    assert!(repo.get(424242).unwrap().is_none());
    assert!(!repo.delete(424242).unwrap());
    assert!(repo.update(424242, park_payload("Ghost")).unwrap().is_none());
}

#[test]
fn update_is_a_full_field_replace() {
    let repo = SqliteListingRepository::new(empty_db());
    let created = repo.create(park_payload("Before")).unwrap();

    let replacement = ListingPayload {
        name: "After".to_string(),
        description: "New description".to_string(),
        price: 9.5,
        address: Some("1 New Street".to_string()),
        location: "Elsewhere".to_string(),
        kind: "cafe".to_string(),
        allowed_pets: vec!["cats".to_string()],
        amenities: vec!["Water bowls".to_string()],
        rating: 3.5,
        photos: vec!["after.jpg".to_string()],
    };
    let updated = repo.update(created.id, replacement).unwrap().unwrap();

    assert_eq!(updated.name, "After");
    assert_eq!(updated.kind, "cafe");
    assert_eq!(updated.price, 9.5);
    assert_eq!(updated.rating, 3.5);
    assert_eq!(updated.allowed_pets, vec!["cats"]);
    assert_eq!(updated.photos, vec!["after.jpg"]);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at.is_some());
}

#[test]
fn seeding_twice_does_not_duplicate_rows() {
    let db = seeded_db();
    {
        let mut conn = db.lock().unwrap();
        seed::seed_demo_data(&mut conn).unwrap();
    }
    let listings_repo = SqliteListingRepository::new(db.clone());
    let reviews_repo = SqliteReviewRepository::new(db);
    assert_eq!(listings_repo.list().unwrap().len(), 7);
    assert_eq!(reviews_repo.list().unwrap().len(), 13);
}

#[test]
fn seeded_listings_embed_their_reviews() {
    let repo = SqliteListingRepository::new(seeded_db());
    let listing = repo.get(6).unwrap().unwrap();
    assert_eq!(listing.reviews.len(), 3);
    assert!(listing.reviews.iter().all(|review| review.listing_id == 6));

    let bare = repo.get(7).unwrap().unwrap();
    assert!(bare.reviews.is_empty());
}

#[test]
fn review_with_unknown_listing_is_rejected_by_the_foreign_key() {
    let db = seeded_db();
    let repo = SqliteReviewRepository::new(db.clone());
    let result = repo.create(ReviewPayload {
        listing_id: 424242,
        reviewer: "Nobody".to_string(),
        rating: 3,
        comment: "dangling".to_string(),
    });
    assert!(matches!(result, Err(StorageError::Database(_))));
    assert_eq!(repo.list().unwrap().len(), 13);
}

#[test]
fn review_update_never_moves_a_review() {
    let repo = SqliteReviewRepository::new(seeded_db());
    let updated = repo
        .update(
            101,
            ReviewPayload {
                listing_id: 2,
                reviewer: "Alex J.".to_string(),
                rating: 3,
                comment: "Revised.".to_string(),
            },
        )
        .unwrap()
        .unwrap();
    assert_eq!(updated.listing_id, 1);
    assert_eq!(updated.rating, 3);
    assert_eq!(updated.reviewer, "Alex J.");
}

#[test]
fn deleting_a_listing_cascades_to_reviews() {
    let db = seeded_db();
    let listings_repo = SqliteListingRepository::new(db.clone());
    let reviews_repo = SqliteReviewRepository::new(db);

    assert!(listings_repo.delete(4).unwrap());
    assert!(reviews_repo.list_for_listing(4).unwrap().is_empty());
    assert!(reviews_repo.get(401).unwrap().is_none());
    assert_eq!(reviews_repo.list().unwrap().len(), 11);
}

#[test]
fn corrupt_list_column_surfaces_as_a_decode_error() {
    let db = seeded_db();
    {
        let mut conn = db.lock().unwrap();
        diesel::update(listings::table.find(1))
            .set(listings::allowed_pets.eq("oops"))
            .execute(&mut *conn)
            .unwrap();
    }
    let repo = SqliteListingRepository::new(db);
    assert!(matches!(repo.get(1), Err(StorageError::Decode(_))));
}
