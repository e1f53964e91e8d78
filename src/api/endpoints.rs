//! Backend paths, relative to the configured base URL.
//!
//! Trailing slashes are significant: the lead routes only match with them.

pub const CSRF: &str = crate::transport::CSRF_BOOTSTRAP_PATH;
pub const LOGIN: &str = "/api/auth/login";
pub const REGISTER: &str = "/api/auth/register";
pub const LOGOUT: &str = "/api/auth/logout";
pub const USER: &str = "/api/auth/user";

pub const CONTACTS: &str = "/api/contact/index";
pub const CONTACT_ADD: &str = "/api/contact/add";

pub const LEADS: &str = "/api/super_researcher/";
pub const CURRENT_LEAD: &str = "/api/super_researcher/current-lead/";
pub const GENERATE_LEADS: &str = "/api/super_researcher/generate-leads/";

pub const COMMUNICATION_LOGS: &str = "/api/communications/communication-logs";

pub fn contact_detail(id: i64) -> String {
    format!("/api/contact/moreinfo/{}", id)
}

pub fn contact_update(id: i64) -> String {
    format!("/api/contact/update/{}", id)
}

pub fn contact_delete(id: i64) -> String {
    format!("/api/contact/delete/{}", id)
}

/// Detail, update and delete share one route.
pub fn lead(id: i64) -> String {
    format!("/api/super_researcher/{}", id)
}

pub fn send_email(contact_id: i64) -> String {
    format!("/api/communications/send-email/{}", contact_id)
}

pub fn send_sms(contact_id: i64) -> String {
    format!("/api/communications/send-sms/{}", contact_id)
}

pub fn contact_emails(contact_id: i64) -> String {
    format!("/api/communications/contact-emails/{}", contact_id)
}
