//! Command-line front end: signs in, runs one command, prints the result.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};

use lead_console::api::{
    communications, contacts, leads, Api, CommunicationOperations, Contact, ContactFilter,
    ContactOperations, Lead, LeadClass, LeadFilter, LeadOperations, LeadStats,
};
use lead_console::config::credentials::{EMAIL_ENV, PASSWORD_ENV};
use lead_console::config::ConfigStore;
use lead_console::resource::{Filter, Resource, ResourceState};
use lead_console::{ApiClient, Config, Credentials, SessionManager};

#[derive(Parser)]
#[command(name = "lead-console")]
#[command(version)]
#[command(about = "Manage contacts, leads and outreach from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file (default: ~/.config/lead-console/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Backend base URL, overrides the config file
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Login email
    #[arg(long, env = EMAIL_ENV)]
    email: Option<String>,

    /// Login password
    #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
    password: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Show the signed-in user
    Whoami,

    /// Work with contacts
    Contacts {
        #[command(subcommand)]
        command: ContactCommand,
    },

    /// Work with generated leads
    Leads {
        #[command(subcommand)]
        command: LeadCommand,
    },

    /// Send an email to a contact
    Email {
        #[arg(value_name = "CONTACT_ID")]
        contact_id: i64,
        #[arg(short, long)]
        subject: String,
        #[arg(short, long)]
        message: String,
    },

    /// Send an SMS to a contact
    Sms {
        #[arg(value_name = "CONTACT_ID")]
        contact_id: i64,
        #[arg(short, long)]
        body: String,
    },

    /// Show the email and SMS history
    Logs,
}

#[derive(Subcommand)]
enum ContactCommand {
    /// List contacts
    List {
        /// Only contacts in this class (e.g. "growing-interest")
        #[arg(long)]
        lead_class: Option<LeadClass>,
        /// Backend field to sort by (e.g. "-created_at")
        #[arg(long)]
        sort_by: Option<String>,
        /// Narrow the list locally by name, email or company
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one contact
    Show {
        #[arg(value_name = "ID")]
        id: i64,
    },
    /// Delete a contact
    Delete {
        #[arg(value_name = "ID")]
        id: i64,
    },
}

#[derive(Subcommand)]
enum LeadCommand {
    /// List leads
    List {
        /// Only promoted (true) or unpromoted (false) leads
        #[arg(long)]
        promoted: Option<bool>,
        /// Only active (true) or inactive (false) leads
        #[arg(long)]
        active: Option<bool>,
        #[arg(long)]
        lead_class: Option<LeadClass>,
        /// Narrow the list locally by name, email or company
        #[arg(long)]
        search: Option<String>,
    },
    /// Show lead counters
    Stats,
    /// Start a lead-generation run
    Generate,
    /// Mark a lead as promoted
    Promote {
        #[arg(value_name = "ID")]
        id: i64,
        /// Remove the promotion instead
        #[arg(long)]
        off: bool,
    },
    /// Mark a lead as actively worked
    Activate {
        #[arg(value_name = "ID")]
        id: i64,
        /// Deactivate instead
        #[arg(long)]
        off: bool,
    },
    /// Move a lead to another class
    Classify {
        #[arg(value_name = "ID")]
        id: i64,
        #[arg(value_name = "CLASS")]
        class: LeadClass,
    },
}

pub async fn run(cli: Cli) -> Result<()> {
    let store = match &cli.config {
        Some(path) => ConfigStore::new(Config::load_from(path)?, path.clone()),
        None => ConfigStore::load_default()?,
    };
    if let Some(url) = &cli.api_url {
        let mut config = store.get();
        config.api.base_url = url.clone();
        store.set(config)?;
    }

    let client = ApiClient::new(&store.get())?;
    let session = SessionManager::new(client.clone());
    let signed_in_here = sign_in(&session, cli.email, cli.password).await?;

    let result = dispatch(&session, &Api::new(client), cli.command).await;
    if signed_in_here {
        session.logout().await;
    }
    result
}

async fn dispatch(session: &SessionManager, api: &Api, command: Command) -> Result<()> {
    match command {
        Command::Whoami => {
            let view = session.view();
            let user = view.user.ok_or_else(|| anyhow!("Not signed in"))?;
            println!("{} <{}>", user.username, user.email);
        }
        Command::Contacts { command } => run_contacts(api, command).await?,
        Command::Leads { command } => run_leads(api, command).await?,
        Command::Email {
            contact_id,
            subject,
            message,
        } => {
            let ops = CommunicationOperations::new(api.communications.clone());
            let sent = ops.send_email(contact_id, subject, message).await?;
            println!("Email {} sent at {}", sent.id, sent.sent_at);
        }
        Command::Sms { contact_id, body } => {
            let ops = CommunicationOperations::new(api.communications.clone());
            let sent = ops.send_sms(contact_id, body).await?;
            println!("SMS {} sent at {}", sent.id, sent.sent_at);
        }
        Command::Logs => {
            let logs = load(&communications::logs_resource(&api.communications)).await?;
            for email in &logs.emails {
                println!(
                    "{}  email  {:<24} {}",
                    email.sent_at,
                    email.contact,
                    email.subject.as_deref().unwrap_or("")
                );
            }
            for sms in &logs.sms {
                println!(
                    "{}  sms    {:<24} {}",
                    sms.sent_at,
                    sms.contact,
                    sms.body.as_deref().unwrap_or("")
                );
            }
        }
    }

    Ok(())
}

/// Explicit credentials sign in; otherwise an existing session is probed.
///
/// Returns whether this run created the session (and so should end it).
async fn sign_in(
    session: &SessionManager,
    email: Option<String>,
    password: Option<String>,
) -> Result<bool> {
    match (email, password) {
        (Some(email), Some(password)) => {
            session
                .login(&Credentials::new(email, password))
                .await
                .context("Login failed")?;
            Ok(true)
        }
        (None, None) => {
            session.initialize().await;
            if !session.view().is_authenticated {
                bail!(
                    "Not signed in; pass --email and --password or set {} and {}",
                    EMAIL_ENV,
                    PASSWORD_ENV
                );
            }
            Ok(false)
        }
        _ => bail!("Both --email and --password are required"),
    }
}

async fn run_contacts(api: &Api, command: ContactCommand) -> Result<()> {
    match command {
        ContactCommand::List {
            lead_class,
            sort_by,
            search,
        } => {
            let filter = ContactFilter {
                lead_class,
                sort_by,
            };
            let resource = contacts::list_resource(&api.contacts, filter);
            let state = mount(&resource).await?;
            for contact in state.search(search.as_deref().unwrap_or("")) {
                print_contact_row(contact);
            }
        }
        ContactCommand::Show { id } => {
            let contact = load(&contacts::detail_resource(&api.contacts, id)).await?;
            print_contact_row(&contact);
            if let Some(phone) = &contact.phone_number {
                println!("  phone:   {}", phone);
            }
            if !contact.address.is_empty() {
                println!("  address: {}", contact.address);
            }
            if !contact.notes.is_empty() {
                println!("  notes:   {}", contact.notes);
            }
        }
        ContactCommand::Delete { id } => {
            ContactOperations::new(api.contacts.clone()).delete(id).await?;
            println!("Deleted contact {}", id);
        }
    }
    Ok(())
}

async fn run_leads(api: &Api, command: LeadCommand) -> Result<()> {
    let ops = LeadOperations::new(api.leads.clone());
    match command {
        LeadCommand::List {
            promoted,
            active,
            lead_class,
            search,
        } => {
            let filter = LeadFilter {
                promoted,
                is_active_lead: active,
                lead_class,
            };
            let resource = leads::list_resource(&api.leads, filter);
            let state = mount(&resource).await?;
            for lead in state.search(search.as_deref().unwrap_or("")) {
                print_lead_row(lead);
            }
        }
        LeadCommand::Stats => {
            let all = load(&leads::list_resource(&api.leads, LeadFilter::default())).await?;
            let stats = LeadStats::from_leads(&all);
            println!("total:     {}", stats.total);
            println!("promoted:  {}", stats.promoted);
            println!("active:    {}", stats.active);
            println!("converted: {}", stats.converted);
        }
        LeadCommand::Generate => {
            let reply = ops.generate().await?;
            match reply.task_id {
                Some(task) => println!("Lead generation started (task {})", task),
                None => println!(
                    "{}",
                    reply
                        .message
                        .unwrap_or_else(|| "Lead generation started".to_string())
                ),
            }
        }
        LeadCommand::Promote { id, off } => {
            let lead = api.leads.get(id).await?;
            if lead.promoted == !off {
                print_lead_row(&lead);
            } else {
                print_lead_row(&ops.toggle_promoted(&lead).await?);
            }
        }
        LeadCommand::Activate { id, off } => {
            let lead = api.leads.get(id).await?;
            if lead.is_active_lead == !off {
                print_lead_row(&lead);
            } else {
                print_lead_row(&ops.toggle_active_lead(&lead).await?);
            }
        }
        LeadCommand::Classify { id, class } => {
            let lead = api.leads.get(id).await?;
            print_lead_row(&ops.update_lead_class(&lead, class).await?);
        }
    }
    Ok(())
}

/// Mount `resource` and fail on a fetch error.
async fn mount<T, F>(resource: &Resource<T, F>) -> Result<ResourceState<T>>
where
    T: Clone + PartialEq + Send + Sync + 'static,
    F: Filter,
{
    resource.mount().await;
    let state = resource.state();
    if let Some(error) = &state.error {
        bail!("Failed to load {}: {}", resource.label(), error);
    }
    Ok(state)
}

async fn load<T, F>(resource: &Resource<T, F>) -> Result<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
    F: Clone + PartialEq + std::fmt::Debug + Send + Sync + 'static,
{
    resource.mount().await;
    let state = resource.state();
    if let Some(error) = state.error {
        bail!("Failed to load {}: {}", resource.label(), error);
    }
    state
        .data
        .ok_or_else(|| anyhow!("{} returned no data", resource.label()))
}

fn print_contact_row(contact: &Contact) {
    println!(
        "{:>5}  {:<24} {:<32} {:<20} {}",
        contact.id, contact.full_name, contact.email, contact.company, contact.lead_class
    );
}

fn print_lead_row(lead: &Lead) {
    let flag = |on: bool, c: char| if on { c } else { '-' };
    println!(
        "{:>5}  {}{}  {:<24} {:<28} {:<20} {}",
        lead.id,
        flag(lead.promoted, 'P'),
        flag(lead.is_active_lead, 'A'),
        lead.full_name.as_deref().unwrap_or(""),
        lead.email.as_deref().unwrap_or(""),
        lead.company.as_deref().unwrap_or(""),
        lead.lead_class
    );
}
