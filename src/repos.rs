//! Repository contracts and their SQLite implementations.
//!
//! The HTTP layer only sees the traits; everything diesel-shaped lives
//! here. Each operation is a single round trip against the store, and all
//! referential integrity is left to the schema (foreign key, cascade).

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::MutexGuard;

use crate::codec;
use crate::db::Db;
use crate::error::StorageError;
use crate::models::{
    Listing, ListingPayload, ListingRow, NewListingRow, NewReviewRow, Review, ReviewPayload,
};
use crate::schema::{listings, reviews};

/// CRUD contract for listings. List and get eagerly include the listing's
/// reviews.
pub trait ListingRepository: Send + Sync {
    fn list(&self) -> Result<Vec<Listing>, StorageError>;
    fn get(&self, id: i32) -> Result<Option<Listing>, StorageError>;
    /// Assigns id and creation timestamp, persists, returns the stored row.
    fn create(&self, payload: ListingPayload) -> Result<Listing, StorageError>;
    /// Full-field replace; returns `None` when the id is absent.
    fn update(&self, id: i32, payload: ListingPayload) -> Result<Option<Listing>, StorageError>;
    /// Returns whether a row was removed. Reviews go with it via cascade.
    fn delete(&self, id: i32) -> Result<bool, StorageError>;
}

/// CRUD contract for reviews.
pub trait ReviewRepository: Send + Sync {
    fn list(&self) -> Result<Vec<Review>, StorageError>;
    fn list_for_listing(&self, listing_id: i32) -> Result<Vec<Review>, StorageError>;
    fn get(&self, id: i32) -> Result<Option<Review>, StorageError>;
    fn create(&self, payload: ReviewPayload) -> Result<Review, StorageError>;
    /// Updates reviewer, rating and comment in place; a review never moves
    /// between listings.
    fn update(&self, id: i32, payload: ReviewPayload) -> Result<Option<Review>, StorageError>;
    fn delete(&self, id: i32) -> Result<bool, StorageError>;
}

pub struct SqliteListingRepository {
    db: Db,
}

impl SqliteListingRepository {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    fn conn(&self) -> Result<MutexGuard<'_, SqliteConnection>, StorageError> {
        self.db.lock().map_err(|_| StorageError::LockPoisoned)
    }
}

fn load_listing(
    conn: &mut SqliteConnection,
    id: i32,
) -> Result<Option<Listing>, StorageError> {
    let row = listings::table
        .find(id)
        .first::<ListingRow>(conn)
        .optional()?;
    match row {
        Some(row) => {
            let child_reviews = reviews::table
                .filter(reviews::listing_id.eq(id))
                .load::<Review>(conn)?;
            Ok(Some(row.into_listing(child_reviews)?))
        }
        None => Ok(None),
    }
}

impl ListingRepository for SqliteListingRepository {
    fn list(&self) -> Result<Vec<Listing>, StorageError> {
        let mut conn = self.conn()?;
        let rows = listings::table
            .order(listings::id.asc())
            .load::<ListingRow>(&mut *conn)?;
        let grouped = Review::belonging_to(&rows)
            .load::<Review>(&mut *conn)?
            .grouped_by(&rows);
        rows.into_iter()
            .zip(grouped)
            .map(|(row, child_reviews)| row.into_listing(child_reviews))
            .collect()
    }

    fn get(&self, id: i32) -> Result<Option<Listing>, StorageError> {
        let mut conn = self.conn()?;
        load_listing(&mut conn, id)
    }

    fn create(&self, payload: ListingPayload) -> Result<Listing, StorageError> {
        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();
        let new_row = NewListingRow {
            name: payload.name,
            description: payload.description,
            price: payload.price,
            address: payload.address,
            location: payload.location,
            kind: payload.kind,
            allowed_pets: codec::encode(&payload.allowed_pets),
            amenities: codec::encode(&payload.amenities),
            rating: payload.rating,
            photos: codec::encode(&payload.photos),
            created_at: now,
            updated_at: None,
        };
        let row: ListingRow = diesel::insert_into(listings::table)
            .values(&new_row)
            .get_result(&mut *conn)?;
        row.into_listing(Vec::new())
    }

    fn update(&self, id: i32, payload: ListingPayload) -> Result<Option<Listing>, StorageError> {
        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();
        let changed = diesel::update(listings::table.find(id))
            .set((
                listings::name.eq(&payload.name),
                listings::description.eq(&payload.description),
                listings::price.eq(payload.price),
                listings::address.eq(payload.address.clone()),
                listings::location.eq(&payload.location),
                listings::kind.eq(&payload.kind),
                listings::allowed_pets.eq(codec::encode(&payload.allowed_pets)),
                listings::amenities.eq(codec::encode(&payload.amenities)),
                listings::rating.eq(payload.rating),
                listings::photos.eq(codec::encode(&payload.photos)),
                listings::updated_at.eq(Some(now)),
            ))
            .execute(&mut *conn)?;
        if changed == 0 {
            return Ok(None);
        }
        load_listing(&mut conn, id)
    }

    fn delete(&self, id: i32) -> Result<bool, StorageError> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(listings::table.find(id)).execute(&mut *conn)?;
        Ok(deleted > 0)
    }
}

pub struct SqliteReviewRepository {
    db: Db,
}

impl SqliteReviewRepository {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    fn conn(&self) -> Result<MutexGuard<'_, SqliteConnection>, StorageError> {
        self.db.lock().map_err(|_| StorageError::LockPoisoned)
    }
}

impl ReviewRepository for SqliteReviewRepository {
    fn list(&self) -> Result<Vec<Review>, StorageError> {
        let mut conn = self.conn()?;
        Ok(reviews::table
            .order(reviews::id.asc())
            .load::<Review>(&mut *conn)?)
    }

    fn list_for_listing(&self, listing_id: i32) -> Result<Vec<Review>, StorageError> {
        let mut conn = self.conn()?;
        Ok(reviews::table
            .filter(reviews::listing_id.eq(listing_id))
            .load::<Review>(&mut *conn)?)
    }

    fn get(&self, id: i32) -> Result<Option<Review>, StorageError> {
        let mut conn = self.conn()?;
        Ok(reviews::table
            .find(id)
            .first::<Review>(&mut *conn)
            .optional()?)
    }

    fn create(&self, payload: ReviewPayload) -> Result<Review, StorageError> {
        let mut conn = self.conn()?;
        // An unknown listing_id is rejected here by the foreign key.
        let new_row = NewReviewRow {
            listing_id: payload.listing_id,
            reviewer: payload.reviewer,
            rating: payload.rating,
            comment: payload.comment,
            created_at: Utc::now().naive_utc(),
        };
        Ok(diesel::insert_into(reviews::table)
            .values(&new_row)
            .get_result(&mut *conn)?)
    }

    fn update(&self, id: i32, payload: ReviewPayload) -> Result<Option<Review>, StorageError> {
        let mut conn = self.conn()?;
        let changed = diesel::update(reviews::table.find(id))
            .set((
                reviews::reviewer.eq(&payload.reviewer),
                reviews::rating.eq(payload.rating),
                reviews::comment.eq(&payload.comment),
            ))
            .execute(&mut *conn)?;
        if changed == 0 {
            return Ok(None);
        }
        Ok(reviews::table
            .find(id)
            .first::<Review>(&mut *conn)
            .optional()?)
    }

    fn delete(&self, id: i32) -> Result<bool, StorageError> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(reviews::table.find(id)).execute(&mut *conn)?;
        Ok(deleted > 0)
    }
}
