//! Wire types for every endpoint.
//!
//! Unknown fields are ignored; missing required fields fail decoding with a
//! `Decode` error at the transport boundary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::resource::Searchable;

/// The logged-in user as returned by the user-detail endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pk: Option<i64>,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// Partial user update; only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// Sales-funnel stage shared by contacts and leads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadClass {
    #[default]
    New,
    Contacted,
    #[serde(rename = "Growing Interest")]
    GrowingInterest,
    Leading,
    Dying,
    Converted,
    Cold,
}

impl LeadClass {
    pub const ALL: [LeadClass; 7] = [
        LeadClass::New,
        LeadClass::Contacted,
        LeadClass::GrowingInterest,
        LeadClass::Leading,
        LeadClass::Dying,
        LeadClass::Converted,
        LeadClass::Cold,
    ];

    /// Wire value, also used as the query-string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadClass::New => "New",
            LeadClass::Contacted => "Contacted",
            LeadClass::GrowingInterest => "Growing Interest",
            LeadClass::Leading => "Leading",
            LeadClass::Dying => "Dying",
            LeadClass::Converted => "Converted",
            LeadClass::Cold => "Cold",
        }
    }
}

impl fmt::Display for LeadClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadClass {
    type Err = String;

    /// Accepts the wire value case-insensitively, with `-`/`_` as spaces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace(['-', '_'], " ").to_lowercase();
        LeadClass::ALL
            .into_iter()
            .find(|class| class.as_str().to_lowercase() == normalized)
            .ok_or_else(|| {
                let names: Vec<&str> = LeadClass::ALL.iter().map(LeadClass::as_str).collect();
                format!("unknown lead class '{}' (expected one of: {})", s, names.join(", "))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    #[serde(rename = "Full_name", default)]
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub lead_class: LeadClass,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Body for contact create and (full) update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContactForm {
    #[serde(rename = "Full_name")]
    pub full_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub company: String,
    pub lead_class: LeadClass,
    pub notes: String,
    pub address: String,
}

impl From<&Contact> for ContactForm {
    fn from(contact: &Contact) -> Self {
        Self {
            full_name: contact.full_name.clone(),
            email: contact.email.clone(),
            phone_number: contact.phone_number.clone(),
            company: contact.company.clone(),
            lead_class: contact.lead_class,
            notes: contact.notes.clone(),
            address: contact.address.clone(),
        }
    }
}

impl Searchable for Contact {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.full_name.as_str()),
            Some(self.email.as_str()),
            Some(self.company.as_str()),
        ]
    }
}

/// A "super researcher" lead, usually produced by lead generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: i64,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub promoted: bool,
    #[serde(default)]
    pub is_active_lead: bool,
    #[serde(default)]
    pub lead_class: LeadClass,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Full lead body for create and update; toggles resend every field.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LeadForm {
    pub company: Option<String>,
    pub website: Option<String>,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub promoted: bool,
    pub is_active_lead: bool,
    pub lead_class: LeadClass,
    pub notes: Option<String>,
    pub address: Option<String>,
}

impl From<&Lead> for LeadForm {
    fn from(lead: &Lead) -> Self {
        Self {
            company: lead.company.clone(),
            website: lead.website.clone(),
            full_name: lead.full_name.clone(),
            phone_number: lead.phone_number.clone(),
            email: lead.email.clone(),
            promoted: lead.promoted,
            is_active_lead: lead.is_active_lead,
            lead_class: lead.lead_class,
            notes: lead.notes.clone(),
            address: lead.address.clone(),
        }
    }
}

impl Searchable for Lead {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            self.full_name.as_deref(),
            self.email.as_deref(),
            self.company.as_deref(),
        ]
    }
}

/// Counters shown above the lead list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeadStats {
    pub total: usize,
    pub promoted: usize,
    pub active: usize,
    pub converted: usize,
}

impl LeadStats {
    pub fn from_leads(leads: &[Lead]) -> Self {
        leads.iter().fold(
            LeadStats {
                total: leads.len(),
                ..LeadStats::default()
            },
            |mut stats, lead| {
                stats.promoted += usize::from(lead.promoted);
                stats.active += usize::from(lead.is_active_lead);
                stats.converted += usize::from(lead.lead_class == LeadClass::Converted);
                stats
            },
        )
    }
}

/// Reply of the lead-generation trigger.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenerateLeadsReply {
    pub success: bool,
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Reply of delete endpoints that answer with a body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DeleteReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailMessage {
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SmsMessage {
    pub body: String,
}

/// Record created by a successful send-email call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SentEmail {
    pub id: i64,
    pub contact: i64,
    pub subject: String,
    /// Nullable on the server.
    #[serde(default)]
    pub message: Option<String>,
    pub sent_at: String,
    #[serde(default)]
    pub from_email: Option<String>,
    #[serde(default)]
    pub sent_by: Option<i64>,
}

/// Record created by a successful send-sms call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SentSms {
    pub id: i64,
    pub contact: i64,
    #[serde(default)]
    pub body: Option<String>,
    pub sent_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EmailLogEntry {
    pub id: i64,
    /// Contact display name.
    pub contact: String,
    pub contact_id: i64,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    pub sent_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SmsLogEntry {
    pub id: i64,
    pub contact: String,
    pub contact_id: i64,
    #[serde(default)]
    pub body: Option<String>,
    pub sent_at: String,
}

/// Combined history, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CommunicationLogs {
    #[serde(default)]
    pub emails: Vec<EmailLogEntry>,
    #[serde(default)]
    pub sms: Vec<SmsLogEntry>,
}
