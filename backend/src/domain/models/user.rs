//! Account profile rows managed by the admin console.
//!
//! Authentication lives in the external identity provider; this row is the
//! profile it maps onto (email mirror, display name, admin flag).

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn to_dto(&self) -> shared::UserAccount {
        shared::UserAccount {
            id: self.id.clone(),
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            is_admin: self.is_admin,
            created_at: self.created_at,
        }
    }
}
