//! Pricing catalog and quote calculation

use serde::{Deserialize, Serialize};

/// Surcharge applied when the mobile rig is dispatched (whole US dollars)
pub const MOBILE_SURCHARGE: i64 = 25;

/// Where the detailing work takes place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceLocation {
    /// Customer brings the vehicle to the shop
    Shop,
    /// Mobile rig drives out to the customer
    Mobile,
    /// Scheduled at the customer's home address
    Home,
}

impl Default for ServiceLocation {
    fn default() -> Self {
        Self::Shop
    }
}

impl std::fmt::Display for ServiceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shop => write!(f, "shop"),
            Self::Mobile => write!(f, "mobile"),
            Self::Home => write!(f, "home"),
        }
    }
}

impl ServiceLocation {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "shop" => Some(Self::Shop),
            "mobile" => Some(Self::Mobile),
            "home" => Some(Self::Home),
            _ => None,
        }
    }

    /// Whether booking at this location needs a street address
    pub fn requires_address(&self) -> bool {
        !matches!(self, Self::Shop)
    }
}

/// A bookable detailing service
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceOffering {
    pub id: String,
    pub name: String,
    pub description: String,
    /// List price in whole US dollars
    pub base_price: i64,
    /// Rough duration estimate shown to customers
    pub duration_minutes: u32,
}

/// An optional extra applied on top of a service
#[derive(Debug, Clone, PartialEq)]
pub struct AddOn {
    pub id: String,
    pub name: String,
    /// Price in whole US dollars
    pub price: i64,
}

/// Catalog of services and add-ons with their list prices
#[derive(Debug, Clone)]
pub struct PricingCatalog {
    services: Vec<ServiceOffering>,
    add_ons: Vec<AddOn>,
}

impl Default for PricingCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl PricingCatalog {
    /// The standard AquaShine price list
    pub fn standard() -> Self {
        let service = |id: &str, name: &str, description: &str, base_price: i64, minutes: u32| {
            ServiceOffering {
                id: id.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                base_price,
                duration_minutes: minutes,
            }
        };
        let add_on = |id: &str, name: &str, price: i64| AddOn {
            id: id.to_string(),
            name: name.to_string(),
            price,
        };

        Self {
            services: vec![
                service(
                    "express-wash",
                    "Express Wash",
                    "Hand wash, wheel clean and spray wax",
                    50,
                    45,
                ),
                service(
                    "exterior-detail",
                    "Exterior Detail",
                    "Clay bar, machine polish and sealant",
                    90,
                    150,
                ),
                service(
                    "interior-detail",
                    "Interior Detail",
                    "Deep vacuum, steam clean and leather care",
                    100,
                    180,
                ),
                service(
                    "full-detail",
                    "Full Detail",
                    "Complete interior and exterior restoration",
                    150,
                    300,
                ),
                service(
                    "showroom-package",
                    "Showroom Package",
                    "Full detail plus paint correction and engine bay",
                    250,
                    480,
                ),
            ],
            add_ons: vec![
                add_on("engine-bay", "Engine Bay Detail", 50),
                add_on("pet-hair-removal", "Pet Hair Removal", 40),
                add_on("ceramic-coating", "Ceramic Coating", 100),
                add_on("headlight-restoration", "Headlight Restoration", 60),
                add_on("odor-treatment", "Odor Treatment", 35),
            ],
        }
    }

    pub fn services(&self) -> &[ServiceOffering] {
        &self.services
    }

    pub fn add_ons(&self) -> &[AddOn] {
        &self.add_ons
    }

    pub fn service(&self, id: &str) -> Option<&ServiceOffering> {
        self.services.iter().find(|s| s.id == id)
    }

    pub fn add_on(&self, id: &str) -> Option<&AddOn> {
        self.add_ons.iter().find(|a| a.id == id)
    }

    /// Price a service selection.
    ///
    /// Unknown service or add-on ids contribute 0 instead of failing, and
    /// duplicate add-on ids are counted once. The mobile surcharge applies
    /// only when the mobile rig is dispatched.
    pub fn quote(
        &self,
        service_id: &str,
        add_on_ids: &[String],
        location: ServiceLocation,
    ) -> Quote {
        let base_price = self.service(service_id).map(|s| s.base_price).unwrap_or(0);

        let mut seen: Vec<&str> = Vec::new();
        let mut add_ons = Vec::new();
        for id in add_on_ids {
            if seen.contains(&id.as_str()) {
                continue;
            }
            seen.push(id);
            if let Some(add_on) = self.add_on(id) {
                add_ons.push(QuoteLine {
                    id: add_on.id.clone(),
                    name: add_on.name.clone(),
                    price: add_on.price,
                });
            }
        }

        let location_surcharge = if location == ServiceLocation::Mobile {
            MOBILE_SURCHARGE
        } else {
            0
        };

        let add_on_total: i64 = add_ons.iter().map(|line| line.price).sum();

        Quote {
            service_id: service_id.to_string(),
            base_price,
            add_ons,
            location_surcharge,
            total: base_price + add_on_total + location_surcharge,
        }
    }
}

/// Priced breakdown for a service selection
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub service_id: String,
    pub base_price: i64,
    pub add_ons: Vec<QuoteLine>,
    pub location_surcharge: i64,
    pub total: i64,
}

/// One priced add-on line inside a quote
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteLine {
    pub id: String,
    pub name: String,
    pub price: i64,
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn full_detail_with_add_ons_and_mobile_rig() {
        let catalog = PricingCatalog::standard();
        let quote = catalog.quote(
            "full-detail",
            &ids(&["ceramic-coating", "engine-bay"]),
            ServiceLocation::Mobile,
        );
        // 150 + 100 + 50 + 25
        assert_eq!(quote.base_price, 150);
        assert_eq!(quote.location_surcharge, 25);
        assert_eq!(quote.total, 325);
    }

    #[test]
    fn same_selection_at_the_shop_skips_surcharge() {
        let catalog = PricingCatalog::standard();
        let quote = catalog.quote(
            "full-detail",
            &ids(&["ceramic-coating", "engine-bay"]),
            ServiceLocation::Shop,
        );
        assert_eq!(quote.location_surcharge, 0);
        assert_eq!(quote.total, 300);
    }

    #[test]
    fn home_location_has_no_surcharge() {
        let catalog = PricingCatalog::standard();
        let quote = catalog.quote("express-wash", &[], ServiceLocation::Home);
        assert_eq!(quote.location_surcharge, 0);
        assert_eq!(quote.total, 50);
    }

    #[test]
    fn unknown_service_id_prices_at_zero() {
        let catalog = PricingCatalog::standard();
        let quote = catalog.quote("granite-polish", &[], ServiceLocation::Shop);
        assert_eq!(quote.base_price, 0);
        assert_eq!(quote.total, 0);
    }

    #[test]
    fn unknown_add_on_ids_are_ignored() {
        let catalog = PricingCatalog::standard();
        let quote = catalog.quote(
            "full-detail",
            &ids(&["granite-polish", "ceramic-coating"]),
            ServiceLocation::Shop,
        );
        assert_eq!(quote.add_ons.len(), 1);
        assert_eq!(quote.total, 250);
    }

    #[test]
    fn unknown_service_still_gets_mobile_surcharge() {
        let catalog = PricingCatalog::standard();
        let quote = catalog.quote("granite-polish", &[], ServiceLocation::Mobile);
        assert_eq!(quote.total, 25);
    }

    #[test]
    fn duplicate_add_ons_count_once() {
        let catalog = PricingCatalog::standard();
        let quote = catalog.quote(
            "express-wash",
            &ids(&["ceramic-coating", "ceramic-coating"]),
            ServiceLocation::Shop,
        );
        assert_eq!(quote.add_ons.len(), 1);
        assert_eq!(quote.total, 150);
    }

    #[test]
    fn quote_parts_sum_to_total() {
        let catalog = PricingCatalog::standard();
        let quote = catalog.quote(
            "showroom-package",
            &ids(&["odor-treatment", "pet-hair-removal"]),
            ServiceLocation::Mobile,
        );
        let add_on_total: i64 = quote.add_ons.iter().map(|line| line.price).sum();
        assert_eq!(
            quote.total,
            quote.base_price + add_on_total + quote.location_surcharge
        );
    }

    #[test]
    fn catalog_lookups() {
        let catalog = PricingCatalog::standard();
        assert_eq!(catalog.service("full-detail").map(|s| s.base_price), Some(150));
        assert_eq!(catalog.add_on("engine-bay").map(|a| a.price), Some(50));
        assert!(catalog.service("nope").is_none());
        assert!(catalog.add_on("nope").is_none());
    }

    #[test]
    fn location_parse_is_case_insensitive() {
        assert_eq!(ServiceLocation::parse("Mobile"), Some(ServiceLocation::Mobile));
        assert_eq!(ServiceLocation::parse("SHOP"), Some(ServiceLocation::Shop));
        assert_eq!(ServiceLocation::parse("home"), Some(ServiceLocation::Home));
        assert_eq!(ServiceLocation::parse("orbit"), None);
    }

    #[test]
    fn location_address_requirement() {
        assert!(!ServiceLocation::Shop.requires_address());
        assert!(ServiceLocation::Mobile.requires_address());
        assert!(ServiceLocation::Home.requires_address());
    }

    #[test]
    fn location_display() {
        assert_eq!(ServiceLocation::Mobile.to_string(), "mobile");
        assert_eq!(ServiceLocation::Shop.to_string(), "shop");
    }
}
