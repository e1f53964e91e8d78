//! Contact CRUD and the resources built on it.

use crate::resource::{fetcher, Filter, Mutation, Resource};
use crate::transport::{ApiClient, QueryParam, RemoteError, Reply};

use super::endpoints;
use super::models::{Contact, ContactForm, DeleteReply, LeadClass};

/// Server-side selection for the contact list.
///
/// `sort_by` is a backend field name (e.g. `Full_name`, `-created_at`);
/// the server defaults to `Full_name`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFilter {
    pub lead_class: Option<LeadClass>,
    pub sort_by: Option<String>,
}

impl Filter for ContactFilter {
    fn to_query(&self) -> Vec<QueryParam<'static>> {
        vec![
            ("lead_class", self.lead_class.map(|c| c.as_str().to_string())),
            ("sort_by", self.sort_by.clone()),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct ContactsApi {
    client: ApiClient,
}

impl ContactsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, filter: &ContactFilter) -> Result<Vec<Contact>, RemoteError> {
        self.client
            .get(endpoints::CONTACTS, &filter.to_query())
            .await
    }

    pub async fn get(&self, id: i64) -> Result<Contact, RemoteError> {
        self.client.get(&endpoints::contact_detail(id), &[]).await
    }

    pub async fn create(&self, form: &ContactForm) -> Result<Contact, RemoteError> {
        self.client.post(endpoints::CONTACT_ADD, Some(form)).await
    }

    pub async fn update(&self, id: i64, form: &ContactForm) -> Result<Contact, RemoteError> {
        self.client.put(&endpoints::contact_update(id), form).await
    }

    /// A `{success: false}` body is reported as a rejection.
    pub async fn delete(&self, id: i64) -> Result<(), RemoteError> {
        match self
            .client
            .delete::<DeleteReply>(&endpoints::contact_delete(id))
            .await?
        {
            Reply::NoContent => Ok(()),
            Reply::Content(reply) if reply.success => Ok(()),
            Reply::Content(reply) => Err(RemoteError::rejected(
                200,
                reply.message.unwrap_or_default(),
                None,
            )),
        }
    }
}

/// Contact list resource for one filter.
pub fn list_resource(
    api: &ContactsApi,
    filter: ContactFilter,
) -> Resource<Vec<Contact>, ContactFilter> {
    let api = api.clone();
    Resource::new(
        "contacts",
        filter,
        fetcher(move |filter: ContactFilter| {
            let api = api.clone();
            async move { api.list(&filter).await }
        }),
    )
}

/// Single contact resource keyed by id.
pub fn detail_resource(api: &ContactsApi, id: i64) -> Resource<Contact, i64> {
    let api = api.clone();
    Resource::new(
        format!("contact {}", id),
        id,
        fetcher(move |id: i64| {
            let api = api.clone();
            async move { api.get(id).await }
        }),
    )
}

/// Imperative contact operations, each tracked separately.
///
/// None of them refetch; call `refetch` on the affected resource.
#[derive(Debug, Clone)]
pub struct ContactOperations {
    api: ContactsApi,
    pub create: Mutation,
    pub update: Mutation,
    pub delete: Mutation,
}

impl ContactOperations {
    pub fn new(api: ContactsApi) -> Self {
        Self {
            api,
            create: Mutation::new("create contact"),
            update: Mutation::new("update contact"),
            delete: Mutation::new("delete contact"),
        }
    }

    pub async fn create(&self, form: &ContactForm) -> Result<Contact, RemoteError> {
        self.create.run(self.api.create(form)).await
    }

    pub async fn update(&self, id: i64, form: &ContactForm) -> Result<Contact, RemoteError> {
        self.update.run(self.api.update(id, form)).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), RemoteError> {
        self.delete.run(self.api.delete(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_query_skips_unset_fields() {
        let filter = ContactFilter {
            lead_class: Some(LeadClass::GrowingInterest),
            sort_by: None,
        };
        assert_eq!(
            filter.to_query(),
            vec![
                ("lead_class", Some("Growing Interest".to_string())),
                ("sort_by", None),
            ]
        );
    }

    #[test]
    fn test_filters_compare_structurally() {
        let a = ContactFilter {
            lead_class: Some(LeadClass::Cold),
            sort_by: Some("Full_name".to_string()),
        };
        assert_eq!(a, a.clone());
        assert_ne!(a, ContactFilter::default());
    }
}
