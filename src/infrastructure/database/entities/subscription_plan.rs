//! Subscription plan entity for database

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Billing cadence for subscription plans
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum BillingCadence {
    #[sea_orm(string_value = "monthly")]
    Monthly,
    #[sea_orm(string_value = "quarterly")]
    Quarterly,
    #[sea_orm(string_value = "yearly")]
    Yearly,
}

impl Default for BillingCadence {
    fn default() -> Self {
        Self::Monthly
    }
}

impl std::fmt::Display for BillingCadence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Monthly => write!(f, "monthly"),
            Self::Quarterly => write!(f, "quarterly"),
            Self::Yearly => write!(f, "yearly"),
        }
    }
}

/// Subscription plan model - one sellable wash-club plan
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subscription_plans")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,

    /// URL-friendly identifier, unique across plans
    #[sea_orm(unique)]
    pub slug: String,

    pub description: Option<String>,

    /// Price per billing period in whole US dollars
    pub price: i64,

    pub billing_cadence: BillingCadence,

    /// Marketing bullet points as a JSON array of strings
    pub features: Json,

    pub is_active: bool,
    pub sort_order: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::customer_subscription::Entity")]
    CustomerSubscriptions,
}

impl Related<super::customer_subscription::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CustomerSubscriptions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
