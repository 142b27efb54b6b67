//! Home page content entity for database

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Home content model - one editable section of the home page
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "home_content")]
pub struct Model {
    /// Section slug, e.g. `hero` or `about`
    #[sea_orm(primary_key, auto_increment = false)]
    pub section: String,

    pub title: String,
    pub subtitle: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub body: Option<String>,

    pub image_url: Option<String>,
    pub sort_order: i32,

    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
