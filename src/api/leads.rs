//! Researcher-generated leads.
//!
//! The item route accepts only complete bodies, so every field toggle
//! resends the whole lead with the one field replaced.

use crate::resource::{fetcher, Filter, Mutation, NoFilter, Resource};
use crate::transport::{ApiClient, QueryParam, RemoteError, Reply};

use super::endpoints;
use super::models::{DeleteReply, GenerateLeadsReply, Lead, LeadClass, LeadForm};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeadFilter {
    pub promoted: Option<bool>,
    pub is_active_lead: Option<bool>,
    pub lead_class: Option<LeadClass>,
}

impl Filter for LeadFilter {
    fn to_query(&self) -> Vec<QueryParam<'static>> {
        vec![
            ("promoted", self.promoted.map(|v| v.to_string())),
            ("is_active_lead", self.is_active_lead.map(|v| v.to_string())),
            ("lead_class", self.lead_class.map(|c| c.as_str().to_string())),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct LeadsApi {
    client: ApiClient,
}

impl LeadsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, filter: &LeadFilter) -> Result<Vec<Lead>, RemoteError> {
        self.client.get(endpoints::LEADS, &filter.to_query()).await
    }

    pub async fn get(&self, id: i64) -> Result<Lead, RemoteError> {
        self.client.get(&endpoints::lead(id), &[]).await
    }

    /// The lead currently being worked.
    pub async fn current(&self) -> Result<Lead, RemoteError> {
        self.client.get(endpoints::CURRENT_LEAD, &[]).await
    }

    pub async fn create(&self, form: &LeadForm) -> Result<Lead, RemoteError> {
        self.client.post(endpoints::LEADS, Some(form)).await
    }

    pub async fn update(&self, id: i64, form: &LeadForm) -> Result<Lead, RemoteError> {
        self.client.put(&endpoints::lead(id), form).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), RemoteError> {
        match self.client.delete::<DeleteReply>(&endpoints::lead(id)).await? {
            Reply::NoContent => Ok(()),
            Reply::Content(reply) if reply.success => Ok(()),
            Reply::Content(reply) => Err(RemoteError::rejected(
                200,
                reply.message.unwrap_or_default(),
                None,
            )),
        }
    }

    /// Start a background research run. The new leads appear in later list
    /// fetches, not in this reply.
    pub async fn generate(&self) -> Result<GenerateLeadsReply, RemoteError> {
        let reply: GenerateLeadsReply = self.client.get(endpoints::GENERATE_LEADS, &[]).await?;
        if reply.success {
            Ok(reply)
        } else {
            let message = reply.error.clone().or_else(|| reply.message.clone());
            Err(RemoteError::rejected(
                200,
                message.unwrap_or_default(),
                None,
            ))
        }
    }
}

pub fn list_resource(api: &LeadsApi, filter: LeadFilter) -> Resource<Vec<Lead>, LeadFilter> {
    let api = api.clone();
    Resource::new(
        "leads",
        filter,
        fetcher(move |filter: LeadFilter| {
            let api = api.clone();
            async move { api.list(&filter).await }
        }),
    )
}

pub fn detail_resource(api: &LeadsApi, id: i64) -> Resource<Lead, i64> {
    let api = api.clone();
    Resource::new(
        format!("lead {}", id),
        id,
        fetcher(move |id: i64| {
            let api = api.clone();
            async move { api.get(id).await }
        }),
    )
}

pub fn current_lead_resource(api: &LeadsApi) -> Resource<Lead, NoFilter> {
    let api = api.clone();
    Resource::new(
        "current lead",
        NoFilter,
        fetcher(move |_: NoFilter| {
            let api = api.clone();
            async move { api.current().await }
        }),
    )
}

/// Lead mutations, one tracker per operation.
#[derive(Debug, Clone)]
pub struct LeadOperations {
    api: LeadsApi,
    pub create: Mutation,
    pub update: Mutation,
    pub delete: Mutation,
    pub generate: Mutation,
    pub toggle_promoted: Mutation,
    pub toggle_active_lead: Mutation,
    pub update_lead_class: Mutation,
    pub update_notes: Mutation,
}

impl LeadOperations {
    pub fn new(api: LeadsApi) -> Self {
        Self {
            api,
            create: Mutation::new("create lead"),
            update: Mutation::new("update lead"),
            delete: Mutation::new("delete lead"),
            generate: Mutation::new("generate leads"),
            toggle_promoted: Mutation::new("toggle promoted"),
            toggle_active_lead: Mutation::new("toggle active lead"),
            update_lead_class: Mutation::new("update lead class"),
            update_notes: Mutation::new("update notes"),
        }
    }

    pub async fn create(&self, form: &LeadForm) -> Result<Lead, RemoteError> {
        self.create.run(self.api.create(form)).await
    }

    pub async fn update(&self, id: i64, form: &LeadForm) -> Result<Lead, RemoteError> {
        self.update.run(self.api.update(id, form)).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), RemoteError> {
        self.delete.run(self.api.delete(id)).await
    }

    pub async fn generate(&self) -> Result<GenerateLeadsReply, RemoteError> {
        self.generate.run(self.api.generate()).await
    }

    /// Flip `promoted` on the given snapshot of the lead.
    pub async fn toggle_promoted(&self, lead: &Lead) -> Result<Lead, RemoteError> {
        let form = LeadForm {
            promoted: !lead.promoted,
            ..LeadForm::from(lead)
        };
        self.toggle_promoted.run(self.api.update(lead.id, &form)).await
    }

    pub async fn toggle_active_lead(&self, lead: &Lead) -> Result<Lead, RemoteError> {
        let form = LeadForm {
            is_active_lead: !lead.is_active_lead,
            ..LeadForm::from(lead)
        };
        self.toggle_active_lead
            .run(self.api.update(lead.id, &form))
            .await
    }

    pub async fn update_lead_class(
        &self,
        lead: &Lead,
        lead_class: LeadClass,
    ) -> Result<Lead, RemoteError> {
        let form = LeadForm {
            lead_class,
            ..LeadForm::from(lead)
        };
        self.update_lead_class
            .run(self.api.update(lead.id, &form))
            .await
    }

    pub async fn update_notes(
        &self,
        lead: &Lead,
        notes: impl Into<String>,
    ) -> Result<Lead, RemoteError> {
        let form = LeadForm {
            notes: Some(notes.into()),
            ..LeadForm::from(lead)
        };
        self.update_notes.run(self.api.update(lead.id, &form)).await
    }
}
