//! Canonical demo catalog: 7 listings and 13 reviews with fixed ids.
//!
//! Seeding is idempotent — it checks for existing listings first and backs
//! off, so re-running bootstrap never duplicates rows.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::codec;
use crate::error::StorageError;
use crate::models::{ListingRow, Review};
use crate::schema::{listings, reviews};

pub fn seed_demo_data(conn: &mut SqliteConnection) -> Result<(), StorageError> {
    let existing: i64 = listings::table.count().get_result(conn)?;
    if existing > 0 {
        log::info!("Database already contains listings, skipping seed");
        return Ok(());
    }

    let catalog = demo_listings();
    let review_rows = demo_reviews();
    diesel::insert_into(listings::table)
        .values(&catalog)
        .execute(conn)?;
    diesel::insert_into(reviews::table)
        .values(&review_rows)
        .execute(conn)?;
    log::info!(
        "Seeded {} listings and {} reviews",
        catalog.len(),
        review_rows.len()
    );
    Ok(())
}

fn demo_listings() -> Vec<ListingRow> {
    vec![
        listing(
            1,
            "Pawsome Park",
            "123 Park Avenue, New York, NY",
            "park",
            4.7,
            day(2025, 4, 15),
            "A spacious park with dedicated areas for dogs to run off-leash. Beautiful walking paths and rest areas for owners.",
            &["dogs", "cats"],
            &["Water fountains", "Waste stations", "Benches", "Shade areas"],
            &["park1.jpg", "park2.jpg"],
        ),
        listing(
            2,
            "Whiskers Cafe",
            "456 Main Street, Seattle, WA",
            "cafe",
            4.5,
            day(2025, 4, 18),
            "A cozy cafe with a special menu for pets. Indoor and outdoor seating available with pet-friendly accommodations.",
            &["dogs", "cats", "small_mammals"],
            &["Pet menu", "Water bowls", "Pet beds", "Outdoor patio"],
            &["cafe1.jpg", "cafe2.jpg"],
        ),
        listing(
            3,
            "Pet Haven Home",
            "789 Oak Road, San Francisco, CA",
            "home",
            4.9,
            day(2025, 3, 28),
            "A beautiful vacation home with a fenced yard, pet doors, and all necessities for your furry friends.",
            &["dogs", "cats", "birds", "small_mammals"],
            &["Fenced yard", "Pet doors", "Pet beds", "Feeding stations", "Pet toys"],
            &["home1.jpg", "home2.jpg"],
        ),
        listing(
            4,
            "Pets & Pillows Hotel",
            "101 Sunset Blvd, Los Angeles, CA",
            "hotel",
            4.8,
            day(2025, 4, 2),
            "Luxury hotel that welcomes pets of all sizes. Special pet services available including walking and grooming.",
            &["dogs", "cats", "birds"],
            &["Pet spa", "Walking service", "Pet menu", "Pet sitting", "Pet beds"],
            &["hotel1.jpg", "hotel2.jpg"],
        ),
        listing(
            5,
            "Furry Friends Store",
            "246 Cherry Lane, Chicago, IL",
            "custom",
            4.6,
            day(2025, 4, 12),
            "A pet store with a play area where pets are welcome to try toys and meet other animals.",
            &["dogs", "cats", "small_mammals", "birds", "other"],
            &["Play area", "Treats bar", "Water stations", "Pet events"],
            &["store1.jpg", "store2.jpg"],
        ),
        listing(
            6,
            "Mooch's Meow",
            "789 Banana Street, Miami, FL",
            "cafe",
            5.0,
            day(2025, 4, 28),
            "A unique monkey-themed cafe where you can enjoy your coffee surrounded by banana decor and monkey-themed treats. Perfect for primate enthusiasts and their pets!",
            &["dogs", "cats", "small_mammals", "other"],
            &[
                "Banana treats",
                "Monkey-themed play area",
                "Climbing structures",
                "Tropical atmosphere",
                "Pet-friendly seating",
            ],
            &["moochs1.jpg", "moochs2.jpg"],
        ),
        listing(
            7,
            "Maui Paws",
            "123 Hibiscus Street, Lahaina, HI",
            "cafe",
            5.0,
            day(2025, 5, 2),
            "A local venue for local pet owners",
            &["dogs", "cats", "small_mammals", "other"],
            &[
                "Hawaiian treats",
                "Outdoors",
                "Climbing structures",
                "Tropical atmosphere",
                "Pet-friendly seating",
            ],
            &["moochs1.jpg", "moochs2.jpg"],
        ),
    ]
}

fn demo_reviews() -> Vec<Review> {
    vec![
        review(101, 1, "Alex Johnson", 5, "My golden retriever loves this park! Plenty of space to run around.", day(2025, 4, 15)),
        review(102, 1, "Taylor Smith", 4, "Clean and well-maintained. Would be perfect with more shade in summer.", day(2025, 4, 10)),
        review(201, 2, "Jamie Lee", 5, "They have treats for my dog and great coffee for me!", day(2025, 4, 18)),
        review(202, 2, "Casey Morgan", 4, "My cat enjoyed lounging on their special pet beds. Very accommodating staff.", day(2025, 4, 5)),
        review(301, 3, "Jordan Riley", 5, "Best pet-friendly accommodation we've found! Our dogs loved the yard.", day(2025, 3, 28)),
        review(302, 3, "Riley Chen", 5, "Even our parakeet was comfortable here. Thoughtful touches for all types of pets.", day(2025, 3, 15)),
        review(401, 4, "Sam Wilson", 5, "They treated my dog like royalty! Room service even for pets.", day(2025, 4, 2)),
        review(402, 4, "Jesse Taylor", 4, "Great amenities for pets, though a bit pricey.", day(2025, 3, 20)),
        review(501, 5, "Taylor Kim", 5, "My ferret loved the play area! Staff was very knowledgeable about exotic pets.", day(2025, 4, 12)),
        review(502, 5, "Alex Rivera", 4, "Great selection of products for all types of pets.", day(2025, 4, 8)),
        review(601, 6, "Charlie Simmons", 5, "Such a fun atmosphere! My dog loved the banana-shaped treats and the staff was amazing.", day(2025, 4, 28)),
        review(602, 6, "Morgan Patel", 5, "The monkey theme is adorable! Great place to bring your pets, they have special accommodations for all types of animals.", day(2025, 4, 22)),
        review(603, 6, "Sam Washington", 5, "Best cafe experience ever! My cat actually enjoyed the climbing structures, and I loved the monkey-themed lattes!", day(2025, 5, 1)),
    ]
}

#[allow(clippy::too_many_arguments)]
fn listing(
    id: i32,
    name: &str,
    location: &str,
    kind: &str,
    rating: f64,
    created_at: NaiveDateTime,
    description: &str,
    allowed_pets: &[&str],
    amenities: &[&str],
    photos: &[&str],
) -> ListingRow {
    ListingRow {
        id,
        name: name.to_string(),
        description: description.to_string(),
        price: 0.0,
        address: Some(location.to_string()),
        location: location.to_string(),
        kind: kind.to_string(),
        allowed_pets: enc(allowed_pets),
        amenities: enc(amenities),
        rating,
        photos: enc(photos),
        created_at,
        updated_at: None,
    }
}

fn review(
    id: i32,
    listing_id: i32,
    reviewer: &str,
    rating: i32,
    comment: &str,
    created_at: NaiveDateTime,
) -> Review {
    Review {
        id,
        listing_id,
        reviewer: reviewer.to_string(),
        rating,
        comment: comment.to_string(),
        created_at,
    }
}

fn enc(values: &[&str]) -> String {
    codec::encode(
        &values
            .iter()
            .map(|value| value.to_string())
            .collect::<Vec<_>>(),
    )
}

fn day(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}
