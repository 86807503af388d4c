use async_trait::async_trait;

use crate::api::types::LoginReply;
use crate::error::ApiError;
use crate::models::{Enquiry, EnquiryInput, EnquiryStatus, Property, PropertyInput};

/// Seam to the remote property service.
///
/// The core treats the backend as "a collection of property records"
/// plus "a login endpoint returning a session token"; this trait is the
/// whole of that assumption, which also makes the stores testable
/// against in-memory fakes.
#[async_trait]
pub trait EstateApi: Send + Sync {
    /// Full read of the property collection. Public.
    async fn fetch_properties(&self) -> Result<Vec<Property>, ApiError>;

    /// Exchange credentials for a session token. Bad credentials come
    /// back as `ApiError::Unauthorized` with the server's message.
    async fn login(&self, email: &str, password: &str) -> Result<LoginReply, ApiError>;

    async fn create_property(
        &self,
        token: &str,
        input: &PropertyInput,
    ) -> Result<Property, ApiError>;

    async fn update_property(
        &self,
        token: &str,
        id: &str,
        input: &PropertyInput,
    ) -> Result<Property, ApiError>;

    async fn delete_property(&self, token: &str, id: &str) -> Result<(), ApiError>;

    /// Contact-form submission. Public.
    async fn submit_enquiry(&self, input: &EnquiryInput) -> Result<Enquiry, ApiError>;

    /// Full read of the enquiry collection. Admin-only.
    async fn fetch_enquiries(&self, token: &str) -> Result<Vec<Enquiry>, ApiError>;

    async fn update_enquiry_status(
        &self,
        token: &str,
        id: &str,
        status: EnquiryStatus,
    ) -> Result<Enquiry, ApiError>;

    async fn delete_enquiry(&self, token: &str, id: &str) -> Result<(), ApiError>;
}
