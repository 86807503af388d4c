//! Scripted in-memory stand-in for the remote service, used by the
//! session and repository unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tokio::sync::oneshot;

use crate::api::traits::EstateApi;
use crate::api::types::LoginReply;
use crate::error::ApiError;
use crate::models::{
    AdminUser, Enquiry, EnquiryInput, EnquiryStatus, Property, PropertyInput, PropertyType,
};

/// A scripted response: either ready immediately, or held until the
/// test releases it through the paired sender.
pub enum Scripted<T> {
    Ready(Result<T, ApiError>),
    Gated(oneshot::Receiver<Result<T, ApiError>>),
}

#[derive(Default)]
pub struct FakeApi {
    login_replies: Mutex<VecDeque<Result<LoginReply, ApiError>>>,
    property_fetches: Mutex<VecDeque<Scripted<Vec<Property>>>>,
    property_saves: Mutex<VecDeque<Result<Property, ApiError>>>,
    property_deletes: Mutex<VecDeque<Result<(), ApiError>>>,
    enquiry_fetches: Mutex<VecDeque<Result<Vec<Enquiry>, ApiError>>>,
    enquiry_saves: Mutex<VecDeque<Result<Enquiry, ApiError>>>,
    enquiry_deletes: Mutex<VecDeque<Result<(), ApiError>>>,
    submissions: Mutex<VecDeque<Result<Enquiry, ApiError>>>,
    /// Number of property-collection fetches the fake has received.
    pub fetch_calls: AtomicUsize,
    /// Number of token-bearing calls the fake has received.
    pub admin_calls: AtomicUsize,
}

fn unscripted<T>() -> Result<T, ApiError> {
    Err(ApiError::Transport("no scripted response".to_string()))
}

impl FakeApi {
    pub fn accept_login(&self, token: &str, name: &str) {
        self.login_replies.lock().unwrap().push_back(Ok(LoginReply {
            user: AdminUser {
                name: Some(name.to_string()),
                email: None,
            },
            token: token.to_string(),
        }));
    }

    pub fn reject_login(&self, message: &str) {
        self.login_replies
            .lock()
            .unwrap()
            .push_back(Err(ApiError::Unauthorized(message.to_string())));
    }

    pub fn queue_fetch(&self, result: Result<Vec<Property>, ApiError>) {
        self.property_fetches
            .lock()
            .unwrap()
            .push_back(Scripted::Ready(result));
    }

    /// Queues a fetch that blocks until the returned sender fires.
    pub fn gate_fetch(&self) -> oneshot::Sender<Result<Vec<Property>, ApiError>> {
        let (tx, rx) = oneshot::channel();
        self.property_fetches
            .lock()
            .unwrap()
            .push_back(Scripted::Gated(rx));
        tx
    }

    pub fn queue_save(&self, result: Result<Property, ApiError>) {
        self.property_saves.lock().unwrap().push_back(result);
    }

    pub fn queue_delete(&self, result: Result<(), ApiError>) {
        self.property_deletes.lock().unwrap().push_back(result);
    }

    pub fn queue_enquiry_fetch(&self, result: Result<Vec<Enquiry>, ApiError>) {
        self.enquiry_fetches.lock().unwrap().push_back(result);
    }

    pub fn queue_enquiry_save(&self, result: Result<Enquiry, ApiError>) {
        self.enquiry_saves.lock().unwrap().push_back(result);
    }

    pub fn queue_enquiry_delete(&self, result: Result<(), ApiError>) {
        self.enquiry_deletes.lock().unwrap().push_back(result);
    }

    pub fn queue_submission(&self, result: Result<Enquiry, ApiError>) {
        self.submissions.lock().unwrap().push_back(result);
    }
}

#[async_trait]
impl EstateApi for FakeApi {
    async fn fetch_properties(&self) -> Result<Vec<Property>, ApiError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self.property_fetches.lock().unwrap().pop_front();
        match scripted {
            None => unscripted(),
            Some(Scripted::Ready(result)) => result,
            Some(Scripted::Gated(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(ApiError::Transport("gate dropped".to_string()))),
        }
    }

    async fn login(&self, _email: &str, _password: &str) -> Result<LoginReply, ApiError> {
        self.login_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(unscripted)
    }

    async fn create_property(
        &self,
        _token: &str,
        _input: &PropertyInput,
    ) -> Result<Property, ApiError> {
        self.admin_calls.fetch_add(1, Ordering::SeqCst);
        self.property_saves
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(unscripted)
    }

    async fn update_property(
        &self,
        _token: &str,
        _id: &str,
        _input: &PropertyInput,
    ) -> Result<Property, ApiError> {
        self.admin_calls.fetch_add(1, Ordering::SeqCst);
        self.property_saves
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(unscripted)
    }

    async fn delete_property(&self, _token: &str, _id: &str) -> Result<(), ApiError> {
        self.admin_calls.fetch_add(1, Ordering::SeqCst);
        self.property_deletes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(unscripted)
    }

    async fn submit_enquiry(&self, _input: &EnquiryInput) -> Result<Enquiry, ApiError> {
        self.submissions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(unscripted)
    }

    async fn fetch_enquiries(&self, _token: &str) -> Result<Vec<Enquiry>, ApiError> {
        self.admin_calls.fetch_add(1, Ordering::SeqCst);
        self.enquiry_fetches
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(unscripted)
    }

    async fn update_enquiry_status(
        &self,
        _token: &str,
        _id: &str,
        _status: EnquiryStatus,
    ) -> Result<Enquiry, ApiError> {
        self.admin_calls.fetch_add(1, Ordering::SeqCst);
        self.enquiry_saves
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(unscripted)
    }

    async fn delete_enquiry(&self, _token: &str, _id: &str) -> Result<(), ApiError> {
        self.admin_calls.fetch_add(1, Ordering::SeqCst);
        self.enquiry_deletes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(unscripted)
    }
}

pub fn listing(id: &str, city: &str, price: i64, bhk: u32) -> Property {
    Property {
        id: id.to_string(),
        title: format!("{bhk} BHK in {city}"),
        city: city.to_string(),
        address: format!("{id} Main Street"),
        property_type: PropertyType::Apartment,
        price,
        bhk,
        bathrooms: 2,
        area: 1200.0,
        images: vec![],
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

pub fn enquiry(id: &str, status: EnquiryStatus) -> Enquiry {
    Enquiry {
        id: id.to_string(),
        name: "Asha".to_string(),
        email: "asha@example.com".to_string(),
        phone: "9800000000".to_string(),
        message: "Is it still available?".to_string(),
        property_id: None,
        status,
    }
}
