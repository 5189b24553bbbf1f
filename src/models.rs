use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::StorageError;
use crate::schema::{listings, reviews};

/// A rated comment attached to exactly one listing.
///
/// The wire shape carries `listingId` only; reviews never hold a reference
/// back to their listing, so serializing a listing with its reviews cannot
/// cycle.
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, Queryable, Identifiable, Insertable, Associations,
)]
#[diesel(table_name = reviews, belongs_to(ListingRow, foreign_key = listing_id))]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i32,
    pub listing_id: i32,
    pub reviewer: String,
    /// Expected range 1-5; not enforced anywhere.
    pub rating: i32,
    pub comment: String,
    pub created_at: NaiveDateTime,
}

/// A pet-friendly venue as served over the API, with its reviews embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub address: Option<String>,
    pub location: String,
    /// Category tag: park, cafe, home, hotel or custom.
    #[serde(rename = "type")]
    pub kind: String,
    pub allowed_pets: Vec<String>,
    pub amenities: Vec<String>,
    /// Stored display rating in [0, 5]; written by clients, never derived
    /// from review ratings.
    pub rating: f64,
    pub photos: Vec<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// Storage image of a listing; the list-valued fields are JSON text.
#[derive(Debug, Clone, Queryable, Identifiable, Insertable)]
#[diesel(table_name = listings)]
pub struct ListingRow {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub address: Option<String>,
    pub location: String,
    pub kind: String,
    pub allowed_pets: String,
    pub amenities: String,
    pub rating: f64,
    pub photos: String,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

impl ListingRow {
    /// Decodes the list columns and attaches the given reviews.
    pub fn into_listing(self, reviews: Vec<Review>) -> Result<Listing, StorageError> {
        Ok(Listing {
            id: self.id,
            name: self.name,
            description: self.description,
            price: self.price,
            address: self.address,
            location: self.location,
            kind: self.kind,
            allowed_pets: codec::decode(&self.allowed_pets)?,
            amenities: codec::decode(&self.amenities)?,
            rating: self.rating,
            photos: codec::decode(&self.photos)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
            reviews,
        })
    }
}

/// Insert image for API-created listings; the id is server-assigned.
#[derive(Debug, Insertable)]
#[diesel(table_name = listings)]
pub struct NewListingRow {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub address: Option<String>,
    pub location: String,
    pub kind: String,
    pub allowed_pets: String,
    pub amenities: String,
    pub rating: f64,
    pub photos: String,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

/// Insert image for API-created reviews.
#[derive(Debug, Insertable)]
#[diesel(table_name = reviews)]
pub struct NewReviewRow {
    pub listing_id: i32,
    pub reviewer: String,
    pub rating: i32,
    pub comment: String,
    pub created_at: NaiveDateTime,
}

/// Client-supplied listing fields. Binding is lenient: absent fields take
/// their defaults, matching the permissive input model of the API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingPayload {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub address: Option<String>,
    pub location: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub allowed_pets: Vec<String>,
    pub amenities: Vec<String>,
    pub rating: f64,
    pub photos: Vec<String>,
}

/// Client-supplied review fields. `listing_id` is only honored on create;
/// updates touch reviewer, rating and comment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReviewPayload {
    pub listing_id: i32,
    pub reviewer: String,
    pub rating: i32,
    pub comment: String,
}
