use std::fmt::Display;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use database_model::rental::prelude::ComplaintModel;
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::notification::{Notification, NotificationKind, NotificationStatus};
use super::room::Room;
use crate::exception::{RentalException, RentalResult};
use crate::model::vo::{Caller, Role};

/// 投诉
///
/// Each party hides a complaint for itself only; the two flags are independent.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub landlord_id: Uuid,
    pub room_id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub status: ComplaintStatus,
    pub hidden_by_tenant: bool,
    pub hidden_by_landlord: bool,
    pub created_time: DateTime<Utc>,
    pub last_modified_time: DateTime<Utc>,
}

/// 投诉状态
#[derive(FromPrimitive, ToPrimitive, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplaintStatus {
    #[default]
    Pending,
    InProgress,
    Resolved,
    Cancelled,
}

impl ComplaintStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Pending => "pending",
            ComplaintStatus::InProgress => "in-progress",
            ComplaintStatus::Resolved => "resolved",
            ComplaintStatus::Cancelled => "cancelled",
        }
    }

    pub fn can_become(&self, next: ComplaintStatus) -> bool {
        use ComplaintStatus::*;
        matches!(
            (*self, next),
            (Pending, InProgress) | (InProgress, Resolved) | (Pending | InProgress, Cancelled)
        )
    }
}

impl Display for ComplaintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplaintStatus {
    type Err = RentalException;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "pending" => ComplaintStatus::Pending,
            "in-progress" => ComplaintStatus::InProgress,
            "resolved" => ComplaintStatus::Resolved,
            "cancelled" => ComplaintStatus::Cancelled,
            _ => {
                return Err(RentalException::UnknownStatus {
                    status: s.to_owned(),
                })
            }
        })
    }
}

impl From<ComplaintStatus> for NotificationStatus {
    fn from(status: ComplaintStatus) -> Self {
        match status {
            ComplaintStatus::Pending => NotificationStatus::Pending,
            ComplaintStatus::InProgress => NotificationStatus::InProgress,
            ComplaintStatus::Resolved => NotificationStatus::Resolved,
            ComplaintStatus::Cancelled => NotificationStatus::Cancelled,
        }
    }
}

impl Complaint {
    /// Files a complaint against `room`. Only the room's current tenant may do so.
    pub fn new(
        caller: &Caller,
        room: &Room,
        kind: String,
        description: String,
        now: DateTime<Utc>,
    ) -> RentalResult<Self> {
        caller.require_role(Role::Tenant, "create complaint")?;
        if kind.trim().is_empty() {
            return Err(RentalException::MissingField { field: "type" });
        }
        if description.trim().is_empty() {
            return Err(RentalException::MissingField {
                field: "description",
            });
        }
        if !room.is_occupied_by(caller.id) {
            return Err(RentalException::Forbidden {
                caller: caller.id,
                operation: "create complaint".to_owned(),
            });
        }
        Ok(Self {
            id: Uuid::new_v4(),
            tenant_id: caller.id,
            landlord_id: room.landlord_id,
            room_id: room.id,
            kind,
            description,
            status: ComplaintStatus::Pending,
            hidden_by_tenant: false,
            hidden_by_landlord: false,
            created_time: now,
            last_modified_time: now,
        })
    }

    pub fn created_notification(&self, now: DateTime<Utc>) -> Notification {
        self.notify(Role::Landlord, NotificationStatus::Pending, now)
    }

    /// Either party may move the complaint along; the counterpart is notified.
    pub fn set_status(
        &mut self,
        caller: &Caller,
        status: ComplaintStatus,
        now: DateTime<Utc>,
    ) -> RentalResult<Notification> {
        self.require_party(caller, "set complaint status")?;
        if !self.status.can_become(status) {
            return Err(RentalException::IllegalComplaintTransition {
                id: self.id,
                from: self.status,
                to: status,
            });
        }
        self.status = status;
        self.last_modified_time = now;
        Ok(self.notify(counterpart(caller.role), status.into(), now))
    }

    /// Hides the complaint from the caller's listing.
    ///
    /// A landlord hiding a complaint also cancels it; the tenant is notified
    /// when that changes the status.
    pub fn hide(&mut self, caller: &Caller, now: DateTime<Utc>) -> RentalResult<Option<Notification>> {
        self.require_party(caller, "hide complaint")?;
        self.last_modified_time = now;
        match caller.role {
            Role::Tenant => {
                self.hidden_by_tenant = true;
                Ok(None)
            }
            Role::Landlord => {
                self.hidden_by_landlord = true;
                if self.status == ComplaintStatus::Cancelled {
                    return Ok(None);
                }
                self.status = ComplaintStatus::Cancelled;
                Ok(Some(self.notify(Role::Tenant, NotificationStatus::Cancelled, now)))
            }
        }
    }

    pub fn is_visible_to(&self, role: Role) -> bool {
        match role {
            Role::Tenant => !self.hidden_by_tenant,
            Role::Landlord => !self.hidden_by_landlord,
        }
    }

    fn require_party(&self, caller: &Caller, operation: &str) -> RentalResult<()> {
        caller.require_party(
            caller.role,
            caller.party_of(self.tenant_id, self.landlord_id),
            operation,
        )
    }

    fn notify(&self, recipient: Role, status: NotificationStatus, now: DateTime<Utc>) -> Notification {
        Notification::new(
            self.tenant_id,
            self.landlord_id,
            recipient,
            NotificationKind::IssueReport,
            status,
            None,
            now,
        )
        .with_complaint(self.id)
        .with_room(self.room_id)
    }
}

fn counterpart(role: Role) -> Role {
    match role {
        Role::Tenant => Role::Landlord,
        Role::Landlord => Role::Tenant,
    }
}

impl TryFrom<ComplaintModel> for Complaint {
    type Error = anyhow::Error;

    fn try_from(model: ComplaintModel) -> Result<Self, Self::Error> {
        let ComplaintModel {
            id,
            tenant_id,
            landlord_id,
            room_id,
            r#type,
            description,
            status,
            hidden_by_tenant,
            hidden_by_landlord,
            created_time,
            last_modified_time,
        } = model;

        Ok(Self {
            id,
            tenant_id,
            landlord_id,
            room_id,
            kind: r#type,
            description,
            status: ComplaintStatus::from_i32(status)
                .ok_or(anyhow!("complaint status is invalid"))?,
            hidden_by_tenant,
            hidden_by_landlord,
            created_time,
            last_modified_time,
        })
    }
}

impl From<Complaint> for ComplaintModel {
    fn from(l: Complaint) -> Self {
        Self {
            id: l.id,
            tenant_id: l.tenant_id,
            landlord_id: l.landlord_id,
            room_id: l.room_id,
            r#type: l.kind,
            description: l.description,
            status: l.status as i32,
            hidden_by_tenant: l.hidden_by_tenant,
            hidden_by_landlord: l.hidden_by_landlord,
            created_time: l.created_time,
            last_modified_time: l.last_modified_time,
        }
    }
}
