//! Gallery image entity for database

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Gallery image model - one published before/after pair
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "gallery_images")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub title: String,
    pub description: Option<String>,

    /// Category slug used for filtering and for object paths
    pub category: String,

    /// Public URL of the "before" image
    pub before_url: String,
    /// Public URL of the "after" image
    pub after_url: String,

    /// Object store path backing `before_url`
    pub before_path: String,
    /// Object store path backing `after_url`
    pub after_path: String,

    pub is_featured: bool,
    pub display_order: i32,

    /// Hidden entries stay stored but are not served publicly
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
