//! Booking entity for database

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Booking status
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum BookingStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl Default for BookingStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Confirmed => write!(f, "confirmed"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Where the work takes place
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum ServiceLocation {
    #[sea_orm(string_value = "shop")]
    Shop,
    #[sea_orm(string_value = "mobile")]
    Mobile,
    #[sea_orm(string_value = "home")]
    Home,
}

impl Default for ServiceLocation {
    fn default() -> Self {
        Self::Shop
    }
}

/// Booking model - one submitted booking request
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Customer-facing reference code
    pub reference_code: String,

    /// Client-generated key that makes submission retries safe
    #[sea_orm(unique)]
    pub submission_key: String,

    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,

    pub vehicle_type: String,
    pub vehicle_year: String,
    pub vehicle_make: String,
    pub vehicle_model: String,

    pub service_id: String,

    /// Selected add-on ids as a JSON array of strings
    pub add_on_ids: Json,

    pub service_location: ServiceLocation,

    /// Street address for mobile and home jobs
    pub address: Option<String>,

    pub preferred_date: NaiveDate,
    pub time_slot: String,

    /// Server-computed total in whole US dollars
    pub total_price: i64,

    pub status: BookingStatus,

    /// Free-form notes added by staff
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
