//! Admin console: account profiles and per-user statistics.
//!
//! Every privileged method takes the caller explicitly and checks the admin
//! flag itself; there is no ambient auth state anywhere in the domain layer.

use anyhow::{anyhow, Result};
use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::models::UserProfile;
use crate::events::{ChangeOp, Collection, EventBus};
use crate::storage::{AgeGroupStorage, DonationStorage, UsageStorage, UserStorage};
use shared::{
    CreateUserRequest, UpdateUserRequest, UserListResponse, UserResponse, UserStatsResponse,
};

#[derive(Clone)]
pub struct AdminService {
    user_storage: Arc<dyn UserStorage>,
    age_group_storage: Arc<dyn AgeGroupStorage>,
    donation_storage: Arc<dyn DonationStorage>,
    usage_storage: Arc<dyn UsageStorage>,
    event_bus: EventBus,
}

impl AdminService {
    pub fn new(
        user_storage: Arc<dyn UserStorage>,
        age_group_storage: Arc<dyn AgeGroupStorage>,
        donation_storage: Arc<dyn DonationStorage>,
        usage_storage: Arc<dyn UsageStorage>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            user_storage,
            age_group_storage,
            donation_storage,
            usage_storage,
            event_bus,
        }
    }

    /// Whether the account carries the admin flag. Unknown accounts are not
    /// admins.
    pub async fn is_admin(&self, user_id: &str) -> Result<bool> {
        Ok(self
            .user_storage
            .get_user(user_id)?
            .map(|user| user.is_admin)
            .unwrap_or(false))
    }

    /// List every account profile.
    pub async fn list_users(&self, caller_id: &str) -> Result<UserListResponse> {
        self.require_admin(caller_id)?;
        let users = self.user_storage.list_users()?;
        Ok(UserListResponse {
            users: users.iter().map(|user| user.to_dto()).collect(),
        })
    }

    /// Create an account profile.
    pub async fn create_user(
        &self,
        caller_id: &str,
        request: CreateUserRequest,
    ) -> Result<UserResponse> {
        self.require_admin(caller_id)?;
        info!("Admin {} creating user {}", caller_id, request.email);

        if request.email.trim().is_empty() || !request.email.contains('@') {
            return Err(anyhow!("Invalid email address"));
        }
        if self
            .user_storage
            .get_user_by_email(request.email.trim())?
            .is_some()
        {
            return Err(anyhow!("Email already registered: {}", request.email));
        }

        let now = Utc::now();
        let user = UserProfile {
            id: Uuid::new_v4().to_string(),
            email: request.email.trim().to_string(),
            display_name: request.display_name,
            is_admin: request.is_admin,
            created_at: now,
            updated_at: now,
        };
        self.user_storage.store_user(&user)?;
        self.event_bus.publish(Collection::Users, ChangeOp::Created);

        Ok(UserResponse {
            user: user.to_dto(),
            success_message: "User created successfully".to_string(),
        })
    }

    /// Update an account's email or display name.
    pub async fn update_user(
        &self,
        caller_id: &str,
        user_id: &str,
        request: UpdateUserRequest,
    ) -> Result<UserResponse> {
        self.require_admin(caller_id)?;
        info!("Admin {} updating user {}", caller_id, user_id);

        let mut user = self
            .user_storage
            .get_user(user_id)?
            .ok_or_else(|| anyhow!("User not found: {}", user_id))?;

        if let Some(email) = request.email {
            if email.trim().is_empty() || !email.contains('@') {
                return Err(anyhow!("Invalid email address"));
            }
            if let Some(other) = self.user_storage.get_user_by_email(email.trim())? {
                if other.id != user.id {
                    return Err(anyhow!("Email already registered: {}", email));
                }
            }
            user.email = email.trim().to_string();
        }
        if request.display_name.is_some() {
            user.display_name = request.display_name;
        }
        user.updated_at = Utc::now();

        self.user_storage.update_user(&user)?;
        self.event_bus.publish(Collection::Users, ChangeOp::Updated);

        Ok(UserResponse {
            user: user.to_dto(),
            success_message: "User updated successfully".to_string(),
        })
    }

    /// Grant or revoke the admin flag. Revoking your own flag is rejected so
    /// the console cannot lock itself out.
    pub async fn set_admin_status(
        &self,
        caller_id: &str,
        user_id: &str,
        is_admin: bool,
    ) -> Result<UserResponse> {
        self.require_admin(caller_id)?;

        if caller_id == user_id && !is_admin {
            return Err(anyhow!("Cannot revoke your own admin access"));
        }

        let mut user = self
            .user_storage
            .get_user(user_id)?
            .ok_or_else(|| anyhow!("User not found: {}", user_id))?;
        user.is_admin = is_admin;
        user.updated_at = Utc::now();
        self.user_storage.update_user(&user)?;
        self.event_bus.publish(Collection::Users, ChangeOp::Updated);

        info!(
            "Admin {} set admin={} for user {}",
            caller_id, is_admin, user_id
        );
        Ok(UserResponse {
            user: user.to_dto(),
            success_message: "Admin status updated".to_string(),
        })
    }

    /// Delete an account profile. Deleting yourself is rejected.
    pub async fn delete_user(&self, caller_id: &str, user_id: &str) -> Result<()> {
        self.require_admin(caller_id)?;

        if caller_id == user_id {
            return Err(anyhow!("Cannot delete your own account"));
        }

        if !self.user_storage.delete_user(user_id)? {
            return Err(anyhow!("User not found: {}", user_id));
        }
        self.event_bus.publish(Collection::Users, ChangeOp::Deleted);
        warn!("Admin {} deleted user {}", caller_id, user_id);
        Ok(())
    }

    /// Activity counters for the admin detail view.
    pub async fn user_stats(&self, caller_id: &str, user_id: &str) -> Result<UserStatsResponse> {
        self.require_admin(caller_id)?;

        let groups = self.age_group_storage.list_age_groups(user_id)?;
        let group_ids: Vec<String> = groups.iter().map(|g| g.id.clone()).collect();
        let donations = self.donation_storage.list_donations_for_groups(&group_ids)?;
        let usage = self.usage_storage.list_usage(user_id)?;

        Ok(UserStatsResponse {
            user_id: user_id.to_string(),
            age_group_count: groups.len(),
            donation_count: donations.len(),
            usage_count: usage.len(),
            total_donated_quantity: donations.iter().map(|d| d.quantity).sum(),
        })
    }

    fn require_admin(&self, caller_id: &str) -> Result<()> {
        let is_admin = self
            .user_storage
            .get_user(caller_id)?
            .map(|user| user.is_admin)
            .unwrap_or(false);
        if !is_admin {
            return Err(anyhow!("Admin privileges required"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::test_store;
    use crate::storage::{MemoryStore, UserStorage as _};
    use chrono::Utc;

    fn service(store: &MemoryStore) -> AdminService {
        AdminService::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            EventBus::new(),
        )
    }

    fn seed_user(store: &MemoryStore, id: &str, email: &str, is_admin: bool) {
        let now = Utc::now();
        store
            .store_user(&UserProfile {
                id: id.to_string(),
                email: email.to_string(),
                display_name: None,
                is_admin,
                created_at: now,
                updated_at: now,
            })
            .unwrap();
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_admin() {
        let store = test_store();
        assert!(!service(&store).is_admin("ghost").await.unwrap());
    }

    #[tokio::test]
    async fn test_non_admin_cannot_list_users() {
        let store = test_store();
        seed_user(&store, "u1", "u1@example.com", false);
        assert!(service(&store).list_users("u1").await.is_err());
    }

    #[tokio::test]
    async fn test_admin_creates_and_lists_users() {
        let store = test_store();
        seed_user(&store, "root", "root@example.com", true);
        let service = service(&store);

        service
            .create_user(
                "root",
                CreateUserRequest {
                    email: "family@example.com".to_string(),
                    display_name: Some("Família Silva".to_string()),
                    is_admin: false,
                },
            )
            .await
            .unwrap();

        let list = service.list_users("root").await.unwrap();
        assert_eq!(list.users.len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let store = test_store();
        seed_user(&store, "root", "root@example.com", true);

        let result = service(&store)
            .create_user(
                "root",
                CreateUserRequest {
                    email: "root@example.com".to_string(),
                    display_name: None,
                    is_admin: false,
                },
            )
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_cannot_revoke_own_admin_flag() {
        let store = test_store();
        seed_user(&store, "root", "root@example.com", true);

        let result = service(&store).set_admin_status("root", "root", false).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_promote_and_demote_other_user() {
        let store = test_store();
        seed_user(&store, "root", "root@example.com", true);
        seed_user(&store, "u1", "u1@example.com", false);
        let service = service(&store);

        let promoted = service.set_admin_status("root", "u1", true).await.unwrap();
        assert!(promoted.user.is_admin);
        assert!(service.is_admin("u1").await.unwrap());

        let demoted = service.set_admin_status("root", "u1", false).await.unwrap();
        assert!(!demoted.user.is_admin);
    }

    #[tokio::test]
    async fn test_cannot_delete_self() {
        let store = test_store();
        seed_user(&store, "root", "root@example.com", true);
        assert!(service(&store).delete_user("root", "root").await.is_err());
    }

    #[tokio::test]
    async fn test_delete_removes_user() {
        let store = test_store();
        seed_user(&store, "root", "root@example.com", true);
        seed_user(&store, "u1", "u1@example.com", false);
        let service = service(&store);

        service.delete_user("root", "u1").await.unwrap();
        assert!(store.get_user("u1").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_user_stats_counts_rows() {
        use crate::domain::test_support::{age_group, donation, usage_record, TEST_USER};
        use crate::storage::{AgeGroupStorage as _, DonationStorage as _, UsageStorage as _};
        use chrono::NaiveDate;

        let store = test_store();
        seed_user(&store, "root", "root@example.com", true);
        store.store_age_group(&age_group("g", "P", 100, 0.5)).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        store.store_donation(&donation("g", 30, date)).unwrap();
        store.store_usage(&usage_record("g", 5, date)).unwrap();

        let stats = service(&store).user_stats("root", TEST_USER).await.unwrap();
        assert_eq!(stats.age_group_count, 1);
        assert_eq!(stats.donation_count, 1);
        assert_eq!(stats.usage_count, 1);
        assert_eq!(stats.total_donated_quantity, 30);
    }
}
