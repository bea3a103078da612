//! User profile table.

use anyhow::{anyhow, Result};

use super::MemoryStore;
use crate::domain::models::UserProfile;
use crate::storage::traits::UserStorage;

impl UserStorage for MemoryStore {
    fn store_user(&self, user: &UserProfile) -> Result<()> {
        let mut tables = self.write()?;
        if tables
            .users
            .iter()
            .any(|u| u.id == user.id || u.email == user.email)
        {
            return Err(anyhow!("User already exists: {}", user.email));
        }
        tables.users.push(user.clone());
        Ok(())
    }

    fn get_user(&self, id: &str) -> Result<Option<UserProfile>> {
        let tables = self.read()?;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    fn get_user_by_email(&self, email: &str) -> Result<Option<UserProfile>> {
        let tables = self.read()?;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    fn list_users(&self) -> Result<Vec<UserProfile>> {
        let tables = self.read()?;
        let mut users = tables.users.clone();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(users)
    }

    fn update_user(&self, user: &UserProfile) -> Result<()> {
        let mut tables = self.write()?;
        let slot = tables
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| anyhow!("User not found: {}", user.id))?;
        *slot = user.clone();
        Ok(())
    }

    fn delete_user(&self, id: &str) -> Result<bool> {
        let mut tables = self.write()?;
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        Ok(tables.users.len() != before)
    }
}
