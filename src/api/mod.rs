//! Typed wrappers for each backend area, plus the resources and mutation
//! bundles the console builds on them.

pub mod auth;
pub mod communications;
pub mod contacts;
pub mod endpoints;
pub mod leads;
pub mod models;

pub use auth::AuthApi;
pub use communications::{CommunicationOperations, CommunicationsApi};
pub use contacts::{ContactFilter, ContactOperations, ContactsApi};
pub use leads::{LeadFilter, LeadOperations, LeadsApi};
pub use models::*;

use crate::transport::ApiClient;

/// Every entity API sharing one client (and so one session).
#[derive(Debug, Clone)]
pub struct Api {
    pub auth: AuthApi,
    pub contacts: ContactsApi,
    pub leads: LeadsApi,
    pub communications: CommunicationsApi,
}

impl Api {
    pub fn new(client: ApiClient) -> Self {
        Self {
            auth: AuthApi::new(client.clone()),
            contacts: ContactsApi::new(client.clone()),
            leads: LeadsApi::new(client.clone()),
            communications: CommunicationsApi::new(client),
        }
    }
}
