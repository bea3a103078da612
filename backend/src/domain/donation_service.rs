//! Donation recording and moderation.
//!
//! Donations registered by the family are applied to stock immediately.
//! Donations arriving through the public page start out pending and only
//! touch stock once an admin approves them; rejecting leaves stock alone.
//! Records are immutable apart from their status.

use anyhow::{anyhow, Result};
use chrono::Utc;
use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::models::{AgeGroup, DonationRecord, ValidationError};
use crate::domain::stock_service::StockService;
use crate::events::{ChangeOp, Collection, EventBus};
use crate::storage::{AgeGroupStorage, DonationStorage};
use shared::{CreateDonationRequest, Donation, DonationListResponse, DonationResponse, DonationStatus};

#[derive(Clone)]
pub struct DonationService {
    donation_storage: Arc<dyn DonationStorage>,
    age_group_storage: Arc<dyn AgeGroupStorage>,
    stock_service: StockService,
    event_bus: EventBus,
}

impl DonationService {
    pub fn new(
        donation_storage: Arc<dyn DonationStorage>,
        age_group_storage: Arc<dyn AgeGroupStorage>,
        stock_service: StockService,
        event_bus: EventBus,
    ) -> Self {
        Self {
            donation_storage,
            age_group_storage,
            stock_service,
            event_bus,
        }
    }

    /// Record a donation. `created_by` is the authenticated account, or
    /// `None` when the donation came through the public page.
    pub async fn record_donation(
        &self,
        created_by: Option<&str>,
        request: CreateDonationRequest,
    ) -> Result<DonationResponse> {
        info!("Recording donation: {:?}", request);

        if request.quantity == 0 {
            return Err(ValidationError::NonPositiveQuantity.into());
        }

        let group = self
            .age_group_storage
            .get_age_group(&request.age_group_id)?
            .ok_or_else(|| anyhow!("Age group not found: {}", request.age_group_id))?;

        // Family-registered donations skip moderation; public ones wait.
        let status = if created_by.is_some() {
            DonationStatus::Approved
        } else {
            DonationStatus::Pending
        };

        let donation = DonationRecord {
            id: Uuid::new_v4().to_string(),
            age_group_id: group.id.clone(),
            quantity: request.quantity,
            donor_name: request.donor_name,
            donor_contact: request.donor_contact,
            donor_email: request.donor_email,
            notes: request.notes,
            donation_date: request
                .donation_date
                .unwrap_or_else(|| Utc::now().date_naive()),
            status,
            created_by: created_by.map(|id| id.to_string()),
            created_at: Utc::now(),
        };
        self.donation_storage.store_donation(&donation)?;

        if status == DonationStatus::Approved {
            self.stock_service
                .increase_for_group(&group.id, donation.quantity)?;
        }
        self.event_bus.publish(Collection::Donations, ChangeOp::Created);

        let message = match status {
            DonationStatus::Approved => "Donation registered successfully",
            _ => "Donation received and awaiting approval",
        };
        Ok(DonationResponse {
            donation: donation.to_dto(group.name),
            success_message: message.to_string(),
        })
    }

    /// List all donations for an account's groups, most recent first.
    pub async fn list_recent(&self, user_id: &str) -> Result<DonationListResponse> {
        let group_ids = self.group_ids(user_id)?;
        let donations = self.donation_storage.list_donations_for_groups(&group_ids)?;
        Ok(DonationListResponse {
            donations: self.to_dtos(donations)?,
        })
    }

    /// List pending donations awaiting moderation.
    pub async fn list_pending(&self, user_id: &str) -> Result<DonationListResponse> {
        let group_ids = self.group_ids(user_id)?;
        let donations = self
            .donation_storage
            .list_donations_by_status(&group_ids, DonationStatus::Pending)?;
        Ok(DonationListResponse {
            donations: self.to_dtos(donations)?,
        })
    }

    /// Approve a pending donation and apply its quantity to stock.
    pub async fn approve(&self, user_id: &str, donation_id: &str) -> Result<DonationResponse> {
        info!("Approving donation {} for user {}", donation_id, user_id);
        let (donation, group) = self.moderatable_donation(user_id, donation_id)?;

        self.donation_storage
            .update_donation_status(donation_id, DonationStatus::Approved)?;
        self.stock_service
            .increase_for_group(&donation.age_group_id, donation.quantity)?;
        self.event_bus.publish(Collection::Donations, ChangeOp::Updated);

        let mut approved = donation;
        approved.status = DonationStatus::Approved;
        Ok(DonationResponse {
            donation: approved.to_dto(group.name),
            success_message: "Donation approved".to_string(),
        })
    }

    /// Reject a pending donation. Stock is untouched.
    pub async fn reject(&self, user_id: &str, donation_id: &str) -> Result<DonationResponse> {
        info!("Rejecting donation {} for user {}", donation_id, user_id);
        let (donation, group) = self.moderatable_donation(user_id, donation_id)?;

        self.donation_storage
            .update_donation_status(donation_id, DonationStatus::Rejected)?;
        self.event_bus.publish(Collection::Donations, ChangeOp::Updated);

        let mut rejected = donation;
        rejected.status = DonationStatus::Rejected;
        Ok(DonationResponse {
            donation: rejected.to_dto(group.name),
            success_message: "Donation rejected".to_string(),
        })
    }

    fn moderatable_donation(
        &self,
        user_id: &str,
        donation_id: &str,
    ) -> Result<(DonationRecord, AgeGroup)> {
        let donation = self
            .donation_storage
            .get_donation(donation_id)?
            .ok_or_else(|| anyhow!("Donation not found: {}", donation_id))?;

        let group = self
            .age_group_storage
            .get_age_group(&donation.age_group_id)?
            .filter(|g| g.user_id == user_id)
            .ok_or_else(|| anyhow!("Donation not found: {}", donation_id))?;

        if donation.status != DonationStatus::Pending {
            return Err(anyhow!("Donation is not pending"));
        }
        Ok((donation, group))
    }

    fn group_ids(&self, user_id: &str) -> Result<Vec<String>> {
        Ok(self
            .age_group_storage
            .list_age_groups(user_id)?
            .into_iter()
            .map(|g| g.id)
            .collect())
    }

    fn to_dtos(&self, donations: Vec<DonationRecord>) -> Result<Vec<Donation>> {
        let mut dtos = Vec::with_capacity(donations.len());
        for donation in donations {
            let name = self
                .age_group_storage
                .get_age_group(&donation.age_group_id)?
                .map(|g| g.name)
                .unwrap_or_default();
            dtos.push(donation.to_dto(name));
        }
        Ok(dtos)
    }
}
