use crate::models::{Property, PropertyType};

/// How many listings the highlight view shows.
pub const FEATURED_LIMIT: usize = 6;

/// Inclusive price band. `max` absent means open-ended upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBand {
    pub min: i64,
    pub max: Option<i64>,
}

impl PriceBand {
    /// Parses the form-boundary encoding `"min-max"` or `"min"`.
    /// Anything malformed yields `None`, which filtering treats as
    /// "any price".
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        let mut parts = raw.splitn(2, '-');
        let min = parts.next()?.trim().parse::<i64>().ok()?;
        let max = match parts.next() {
            None => None,
            Some(rest) => {
                let rest = rest.trim();
                if rest.is_empty() {
                    None
                } else {
                    Some(rest.parse::<i64>().ok()?)
                }
            }
        };
        Some(PriceBand { min, max })
    }

    pub fn contains(&self, price: i64) -> bool {
        price >= self.min && self.max.map_or(true, |max| price <= max)
    }
}

/// User-selected criteria narrowing the displayed collection.
///
/// A value object: replaced wholesale on each edit, never mutated in
/// place. An unset criterion imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    /// Matched case-insensitively against title, city and address.
    /// Empty means no text constraint.
    pub search_text: String,
    pub location: Option<String>,
    pub property_type: Option<PropertyType>,
    pub price: Option<PriceBand>,
    pub bhk: Option<u32>,
}

impl FilterSpec {
    /// Builds a spec from raw form-control strings. Empty selects mean
    /// "any"; malformed price bands or bedroom counts are corrected to
    /// "any" rather than surfaced as failures.
    pub fn from_form(
        search_text: &str,
        location: &str,
        property_type: &str,
        price_range: &str,
        bhk: &str,
    ) -> Self {
        FilterSpec {
            search_text: search_text.trim().to_string(),
            location: non_empty(location),
            property_type: non_empty(property_type).map(PropertyType::from),
            price: PriceBand::parse(price_range),
            bhk: bhk.trim().parse::<u32>().ok(),
        }
    }

    fn matches(&self, property: &Property) -> bool {
        self.matches_text(property)
            && self.matches_location(property)
            && self.matches_type(property)
            && self.matches_price(property)
            && self.matches_bhk(property)
    }

    fn matches_text(&self, property: &Property) -> bool {
        if self.search_text.is_empty() {
            return true;
        }
        let needle = self.search_text.to_lowercase();
        [&property.title, &property.city, &property.address]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    fn matches_location(&self, property: &Property) -> bool {
        match &self.location {
            None => true,
            Some(city) => property.city.to_lowercase() == city.to_lowercase(),
        }
    }

    fn matches_type(&self, property: &Property) -> bool {
        match &self.property_type {
            None => true,
            // PropertyType is lowercase-normalized, so equality is
            // already case-insensitive. An unknown value matches only
            // properties carrying the same unknown value, never "any".
            Some(kind) => property.property_type == *kind,
        }
    }

    fn matches_price(&self, property: &Property) -> bool {
        match self.price {
            None => true,
            Some(band) => band.contains(property.price),
        }
    }

    fn matches_bhk(&self, property: &Property) -> bool {
        match self.bhk {
            None => true,
            // Exact match, including the top band: the UI labels it
            // "5+" but the original filters on equality with 5.
            Some(bhk) => property.bhk == bhk,
        }
    }
}

/// Derives the filtered view of `items` under `spec`.
///
/// Pure and total: conjunctive predicates, no reordering, no failure
/// mode. Deterministic for a given `(items, spec)` pair.
pub fn apply(items: &[Property], spec: &FilterSpec) -> Vec<Property> {
    items
        .iter()
        .filter(|property| spec.matches(property))
        .cloned()
        .collect()
}

/// Highlight view: the `limit` most recently created listings, newest
/// first. The sort is stable, so equal timestamps keep input order.
pub fn featured(items: &[Property], limit: usize) -> Vec<Property> {
    let mut ordered = items.to_vec();
    ordered.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    ordered.truncate(limit);
    ordered
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
