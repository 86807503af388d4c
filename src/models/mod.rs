use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category of a property listing.
///
/// Normalized to lowercase at construction so comparisons are
/// case-insensitive; values outside the known set are preserved
/// verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PropertyType {
    Apartment,
    Villa,
    House,
    Penthouse,
    Other(String),
}

impl PropertyType {
    pub fn as_str(&self) -> &str {
        match self {
            PropertyType::Apartment => "apartment",
            PropertyType::Villa => "villa",
            PropertyType::House => "house",
            PropertyType::Penthouse => "penthouse",
            PropertyType::Other(s) => s,
        }
    }
}

impl From<String> for PropertyType {
    fn from(value: String) -> Self {
        match value.to_lowercase().as_str() {
            "apartment" => PropertyType::Apartment,
            "villa" => PropertyType::Villa,
            "house" => PropertyType::House,
            "penthouse" => PropertyType::Penthouse,
            other => PropertyType::Other(other.to_string()),
        }
    }
}

impl From<PropertyType> for String {
    fn from(value: PropertyType) -> Self {
        value.as_str().to_string()
    }
}

/// Image attached to a listing. The backend sends either a bare URL
/// string or an object carrying a `url` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageRef {
    Url(String),
    Record { url: String },
}

impl ImageRef {
    pub fn url(&self) -> &str {
        match self {
            ImageRef::Url(url) => url,
            ImageRef::Record { url } => url,
        }
    }
}

fn default_bathrooms() -> u32 {
    2
}

fn default_area() -> f64 {
    1200.0
}

/// Core property listing model.
///
/// Optional wire fields are resolved to defaults here, at the decode
/// boundary, so downstream code always sees total values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    pub city: String,
    pub address: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    /// Asking price in the smallest currency unit. Never negative.
    pub price: i64,
    /// Bedroom count ("3 BHK" = three bedrooms). At least 1.
    pub bhk: u32,
    #[serde(default = "default_bathrooms")]
    pub bathrooms: u32,
    /// Floor area in square feet.
    #[serde(default = "default_area")]
    pub area: f64,
    #[serde(default)]
    pub images: Vec<ImageRef>,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating or replacing a property listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInput {
    pub title: String,
    pub city: String,
    pub address: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub price: i64,
    pub bhk: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    pub images: Vec<ImageRef>,
}

/// Workflow state of a customer enquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnquiryStatus {
    #[default]
    Pending,
    Contacted,
    Closed,
}

impl EnquiryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnquiryStatus::Pending => "pending",
            EnquiryStatus::Contacted => "contacted",
            EnquiryStatus::Closed => "closed",
        }
    }
}

/// Customer enquiry, owned by the remote service. The core only reads,
/// updates status, deletes, and reconciles the list it is showing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enquiry {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_id: Option<String>,
    #[serde(default)]
    pub status: EnquiryStatus,
}

/// Contact-form submission payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnquiryInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_id: Option<String>,
}

/// Authenticated admin identity. Identity details are only known after
/// a login round-trip; a session restored from a persisted token has
/// them unset until the next login.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminUser {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// An authenticated admin session. `user` and `token` are always
/// present together; the unauthenticated state is the absence of the
/// whole session.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: AdminUser,
    pub token: String,
}
