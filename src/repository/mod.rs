use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use crate::api::traits::EstateApi;
use crate::error::{ApiError, StoreError};
use crate::models::{Enquiry, EnquiryInput, EnquiryStatus, Property, PropertyInput};
use crate::query::{self, FilterSpec};
use crate::session::SessionStore;

/// Request-generation bookkeeping for full-collection fetches.
///
/// Responses are applied in issuance order: a response belonging to a
/// generation at or below the last applied one is discarded, so a slow
/// early request can never clobber the result of a later one.
#[derive(Debug, Default)]
struct FetchGate {
    issued: u64,
    applied: u64,
    resolved: u64,
}

impl FetchGate {
    fn begin(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Marks `generation` resolved and reports whether its response may
    /// still be applied.
    fn admit(&mut self, generation: u64) -> bool {
        self.resolved = self.resolved.max(generation);
        if generation <= self.applied {
            return false;
        }
        self.applied = generation;
        true
    }

    /// Supersedes everything currently in flight.
    fn abandon(&mut self) {
        self.applied = self.issued;
        self.resolved = self.issued;
    }

    fn loading(&self) -> bool {
        self.resolved < self.issued
    }
}

#[derive(Default)]
struct CatalogState {
    items: Vec<Property>,
    error: Option<String>,
    gate: FetchGate,
}

/// Converts an admin-call failure, clearing the session when the
/// service no longer accepts our token.
fn admin_failure(session: &SessionStore, err: ApiError) -> StoreError {
    match err {
        ApiError::Unauthorized(message) => {
            session.force_logout();
            StoreError::SessionExpired(message)
        }
        other => StoreError::Api(other),
    }
}

/// Single source of truth for property data.
///
/// Holds the last successfully fetched collection alongside loading and
/// error status; admin mutations patch the local copy on success so the
/// view stays consistent without a full refetch.
pub struct PropertyRepository {
    api: Arc<dyn EstateApi>,
    state: Mutex<CatalogState>,
}

impl PropertyRepository {
    pub fn new(api: Arc<dyn EstateApi>) -> Self {
        Self {
            api,
            state: Mutex::new(CatalogState::default()),
        }
    }

    /// Replaces the collection with a full read from the service.
    ///
    /// Idempotent and safe to call concurrently: stale responses are
    /// discarded by generation. A failed fetch keeps the previous items
    /// and records the message; retry by calling again.
    pub async fn fetch_all(&self) -> Result<(), ApiError> {
        let generation = self.state.lock().unwrap().gate.begin();
        debug!(generation, "fetching property catalog");

        let result = self.api.fetch_properties().await;

        let mut state = self.state.lock().unwrap();
        if !state.gate.admit(generation) {
            debug!(generation, "discarding superseded catalog response");
            return Ok(());
        }
        match result {
            Ok(items) => {
                info!(generation, count = items.len(), "property catalog refreshed");
                state.items = items;
                state.error = None;
                Ok(())
            }
            Err(err) => {
                warn!(generation, error = %err, "property catalog fetch failed");
                state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Supersedes every in-flight fetch, e.g. when the consuming view
    /// goes away; their responses will be discarded on arrival.
    pub fn abandon_pending(&self) {
        self.state.lock().unwrap().gate.abandon();
    }

    /// The last successfully fetched collection, in service order.
    pub fn items(&self) -> Vec<Property> {
        self.state.lock().unwrap().items.clone()
    }

    /// True strictly between a request start and its resolution.
    pub fn is_loading(&self) -> bool {
        self.state.lock().unwrap().gate.loading()
    }

    /// Message of the most recent failed fetch, cleared by the next
    /// successful one.
    pub fn error(&self) -> Option<String> {
        self.state.lock().unwrap().error.clone()
    }

    /// Filtered view of the live collection under `spec`.
    pub fn filtered(&self, spec: &FilterSpec) -> Vec<Property> {
        let state = self.state.lock().unwrap();
        query::apply(&state.items, spec)
    }

    /// Highlight view: the `limit` most recently created listings.
    /// Recomputed from the live collection on every call.
    pub fn featured(&self, limit: usize) -> Vec<Property> {
        let state = self.state.lock().unwrap();
        query::featured(&state.items, limit)
    }

    /// Distinct cities across the collection, first-seen order, for the
    /// location filter control.
    pub fn cities(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        let mut cities: Vec<String> = Vec::new();
        for property in &state.items {
            if !cities.iter().any(|c| c == &property.city) {
                cities.push(property.city.clone());
            }
        }
        cities
    }

    pub async fn create(
        &self,
        session: &SessionStore,
        input: &PropertyInput,
    ) -> Result<Property, StoreError> {
        let token = session.token().ok_or(StoreError::NotAuthenticated)?;
        let created = self
            .api
            .create_property(&token, input)
            .await
            .map_err(|err| admin_failure(session, err))?;
        self.state.lock().unwrap().items.push(created.clone());
        info!(id = %created.id, "property created");
        Ok(created)
    }

    pub async fn update(
        &self,
        session: &SessionStore,
        id: &str,
        input: &PropertyInput,
    ) -> Result<Property, StoreError> {
        let token = session.token().ok_or(StoreError::NotAuthenticated)?;
        let updated = self
            .api
            .update_property(&token, id, input)
            .await
            .map_err(|err| admin_failure(session, err))?;
        let mut state = self.state.lock().unwrap();
        match state.items.iter_mut().find(|p| p.id == updated.id) {
            Some(slot) => *slot = updated.clone(),
            None => state.items.push(updated.clone()),
        }
        info!(id = %updated.id, "property updated");
        Ok(updated)
    }

    pub async fn delete(&self, session: &SessionStore, id: &str) -> Result<(), StoreError> {
        let token = session.token().ok_or(StoreError::NotAuthenticated)?;
        self.api
            .delete_property(&token, id)
            .await
            .map_err(|err| admin_failure(session, err))?;
        self.state.lock().unwrap().items.retain(|p| p.id != id);
        info!(id, "property deleted");
        Ok(())
    }
}

#[derive(Default)]
struct EnquiryState {
    items: Vec<Enquiry>,
    error: Option<String>,
    gate: FetchGate,
}

/// Admin-side view of the enquiry collection, plus the public
/// contact-form submission path.
pub struct EnquiryRepository {
    api: Arc<dyn EstateApi>,
    state: Mutex<EnquiryState>,
}

impl EnquiryRepository {
    pub fn new(api: Arc<dyn EstateApi>) -> Self {
        Self {
            api,
            state: Mutex::new(EnquiryState::default()),
        }
    }

    /// Full read of the enquiry collection. Admin-only; rejected
    /// locally when no session is present.
    pub async fn fetch_all(&self, session: &SessionStore) -> Result<(), StoreError> {
        let token = session.token().ok_or(StoreError::NotAuthenticated)?;
        let generation = self.state.lock().unwrap().gate.begin();
        debug!(generation, "fetching enquiry collection");

        let result = self.api.fetch_enquiries(&token).await;

        let mut state = self.state.lock().unwrap();
        if !state.gate.admit(generation) {
            debug!(generation, "discarding superseded enquiry response");
            return Ok(());
        }
        match result {
            Ok(items) => {
                info!(generation, count = items.len(), "enquiry list refreshed");
                state.items = items;
                state.error = None;
                Ok(())
            }
            Err(err) => {
                warn!(generation, error = %err, "enquiry fetch failed");
                state.error = Some(err.to_string());
                drop(state);
                Err(admin_failure(session, err))
            }
        }
    }

    pub fn abandon_pending(&self) {
        self.state.lock().unwrap().gate.abandon();
    }

    pub fn items(&self) -> Vec<Enquiry> {
        self.state.lock().unwrap().items.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().unwrap().gate.loading()
    }

    pub fn error(&self) -> Option<String> {
        self.state.lock().unwrap().error.clone()
    }

    /// Contact-form submission. Public; does not touch the admin list.
    pub async fn submit(&self, input: &EnquiryInput) -> Result<Enquiry, ApiError> {
        let enquiry = self.api.submit_enquiry(input).await?;
        info!(id = %enquiry.id, "enquiry submitted");
        Ok(enquiry)
    }

    pub async fn set_status(
        &self,
        session: &SessionStore,
        id: &str,
        status: EnquiryStatus,
    ) -> Result<Enquiry, StoreError> {
        let token = session.token().ok_or(StoreError::NotAuthenticated)?;
        let updated = self
            .api
            .update_enquiry_status(&token, id, status)
            .await
            .map_err(|err| admin_failure(session, err))?;
        let mut state = self.state.lock().unwrap();
        if let Some(slot) = state.items.iter_mut().find(|e| e.id == updated.id) {
            *slot = updated.clone();
        }
        info!(id = %updated.id, status = status.as_str(), "enquiry status updated");
        Ok(updated)
    }

    pub async fn delete(&self, session: &SessionStore, id: &str) -> Result<(), StoreError> {
        let token = session.token().ok_or(StoreError::NotAuthenticated)?;
        self.api
            .delete_enquiry(&token, id)
            .await
            .map_err(|err| admin_failure(session, err))?;
        self.state.lock().unwrap().items.retain(|e| e.id != id);
        info!(id, "enquiry deleted");
        Ok(())
    }
}
