pub mod json_store;
pub mod kv_store;
pub mod sqlite_store;

pub mod user_repo;
pub use user_repo::UserRepository;
pub mod session_repo;
pub use session_repo::SessionRepository;
pub mod lead_repo;
pub use lead_repo::LeadRepository;
pub mod notification_repo;
pub use notification_repo::NotificationRepository;

pub use kv_store::{KeyValueStore, MemoryKvStore};
pub use sqlite_store::SqliteKvStore;

// Layout persistido: uma coleção JSON por chave.
pub mod keys {
    pub const CURRENT_USER: &str = "currentUser";
    pub const USERS: &str = "users";
    pub const INTERESTED_LEADS: &str = "interestedLeads";
    pub const CLIENT_RETURNS: &str = "clientReturns";
    pub const NOTIFICATIONS: &str = "notifications";
    pub const USER_LOCATION: &str = "userLocation";
}
