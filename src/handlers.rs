pub mod admin;
pub mod auth;
pub mod client_returns;
pub mod leads;
pub mod location;
pub mod notifications;
pub mod reference;
pub mod search;
