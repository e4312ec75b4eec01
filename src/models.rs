pub mod auth;
pub mod leads;
pub mod lookup;
pub mod notifications;
