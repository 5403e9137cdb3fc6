//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    /// User documents, keyed by identity-provider subject id
    pub const USERS: &str = "users";
    pub const EVENTS: &str = "events";
    pub const NOTIFICATIONS: &str = "notifications";
}
