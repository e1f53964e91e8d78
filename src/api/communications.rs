//! Outbound email/SMS and the communication history.

use crate::resource::{fetcher, Mutation, NoFilter, Resource};
use crate::transport::{ApiClient, RemoteError};

use super::endpoints;
use super::models::{CommunicationLogs, EmailMessage, SentEmail, SentSms, SmsMessage};

#[derive(Debug, Clone)]
pub struct CommunicationsApi {
    client: ApiClient,
}

impl CommunicationsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn send_email(
        &self,
        contact_id: i64,
        message: &EmailMessage,
    ) -> Result<SentEmail, RemoteError> {
        self.client
            .post(&endpoints::send_email(contact_id), Some(message))
            .await
    }

    pub async fn send_sms(
        &self,
        contact_id: i64,
        message: &SmsMessage,
    ) -> Result<SentSms, RemoteError> {
        self.client
            .post(&endpoints::send_sms(contact_id), Some(message))
            .await
    }

    pub async fn logs(&self) -> Result<CommunicationLogs, RemoteError> {
        self.client.get(endpoints::COMMUNICATION_LOGS, &[]).await
    }

    /// Emails sent to one contact, newest first.
    pub async fn contact_emails(&self, contact_id: i64) -> Result<Vec<SentEmail>, RemoteError> {
        self.client
            .get(&endpoints::contact_emails(contact_id), &[])
            .await
    }
}

pub fn logs_resource(api: &CommunicationsApi) -> Resource<CommunicationLogs, NoFilter> {
    let api = api.clone();
    Resource::new(
        "communication logs",
        NoFilter,
        fetcher(move |_: NoFilter| {
            let api = api.clone();
            async move { api.logs().await }
        }),
    )
}

pub fn contact_emails_resource(
    api: &CommunicationsApi,
    contact_id: i64,
) -> Resource<Vec<SentEmail>, i64> {
    let api = api.clone();
    Resource::new(
        format!("emails for contact {}", contact_id),
        contact_id,
        fetcher(move |contact_id: i64| {
            let api = api.clone();
            async move { api.contact_emails(contact_id).await }
        }),
    )
}

#[derive(Debug, Clone)]
pub struct CommunicationOperations {
    api: CommunicationsApi,
    pub send_email: Mutation,
    pub send_sms: Mutation,
}

impl CommunicationOperations {
    pub fn new(api: CommunicationsApi) -> Self {
        Self {
            api,
            send_email: Mutation::new("send email"),
            send_sms: Mutation::new("send sms"),
        }
    }

    pub async fn send_email(
        &self,
        contact_id: i64,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<SentEmail, RemoteError> {
        let message = EmailMessage {
            subject: subject.into(),
            message: message.into(),
        };
        self.send_email
            .run(self.api.send_email(contact_id, &message))
            .await
    }

    pub async fn send_sms(
        &self,
        contact_id: i64,
        body: impl Into<String>,
    ) -> Result<SentSms, RemoteError> {
        let message = SmsMessage { body: body.into() };
        self.send_sms.run(self.api.send_sms(contact_id, &message)).await
    }
}
