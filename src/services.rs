pub mod auth;
pub mod lead_service;
pub mod lookup_service;
pub mod notification_service;
pub mod reminder_poller;
pub mod search_provider;

pub use auth::{AdminCredential, AuthService};
pub use lead_service::LeadService;
pub use lookup_service::LookupService;
pub use notification_service::NotificationService;
pub use reminder_poller::{PollerSettings, ReminderPoller};
pub use search_provider::{LeadSearchProvider, MockLeadSearchProvider};
