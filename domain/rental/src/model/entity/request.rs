use std::fmt::Display;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use database_model::rental::prelude::RoomRequestModel;
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::notification::{Notification, NotificationKind, NotificationStatus};
use super::room::Room;
use crate::exception::{RentalException, RentalResult};
use crate::model::vo::{Caller, Role};

/// 看房申请
///
/// One tenant's visit/occupancy intent for one room. The three party
/// references never change after creation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub landlord_id: Uuid,
    pub room_id: Uuid,
    pub visit_date: Option<DateTime<Utc>>,
    pub message: String,
    pub status: RequestStatus,
    /// Landlord badge: the request has not been acted on or opened by the landlord.
    pub is_new: bool,
    /// Tenant badge: the tenant has seen the latest status change.
    pub is_read: bool,
    pub created_time: DateTime<Utc>,
}

/// 申请状态
#[derive(FromPrimitive, ToPrimitive, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    /// # 等待中
    /// 租客已提交，等待房东处理
    #[default]
    #[serde(rename = "pending")]
    Pending,
    /// # 已同意
    /// 房东同意看房，等待租客确认入住
    #[serde(rename = "approve", alias = "approved")]
    Approved,
    /// # 已拒绝
    /// 房东取消了该申请
    #[serde(rename = "cancelled")]
    Cancelled,
    /// # 已入住
    /// 租客确认入住，终态
    #[serde(rename = "completed")]
    Completed,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approve",
            RequestStatus::Cancelled => "cancelled",
            RequestStatus::Completed => "completed",
        }
    }
}

impl Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transitions a party can apply to an existing request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestAction {
    TenantCancel,
    Approve,
    LandlordCancel,
    TenantConfirm,
}

impl RequestAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestAction::TenantCancel => "tenant-cancel",
            RequestAction::Approve => "approve",
            RequestAction::LandlordCancel => "landlord-cancel",
            RequestAction::TenantConfirm => "tenant-confirm",
        }
    }

    /// The only role allowed to perform the action.
    pub fn actor(&self) -> Role {
        match self {
            RequestAction::TenantCancel | RequestAction::TenantConfirm => Role::Tenant,
            RequestAction::Approve | RequestAction::LandlordCancel => Role::Landlord,
        }
    }
}

impl Display for RequestAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestAction {
    type Err = RentalException;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "tenant-cancel" => RequestAction::TenantCancel,
            "approve" => RequestAction::Approve,
            "landlord-cancel" => RequestAction::LandlordCancel,
            "tenant-confirm" => RequestAction::TenantConfirm,
            _ => {
                return Err(RentalException::UnknownAction {
                    action: s.to_owned(),
                })
            }
        })
    }
}

/// What must happen to the stored request row.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestChange {
    Update(Request),
    Delete(Uuid),
    /// Update that also claims the room for the tenant.
    Confirm(Request),
}

/// A request state change paired with the notification it emits. Both are
/// persisted in one commit or not at all.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub change: RequestChange,
    pub notification: Notification,
}

impl Request {
    /// A fresh pending request from `tenant_id` against `room`.
    pub fn new(
        tenant_id: Uuid,
        room: &Room,
        visit_date: Option<DateTime<Utc>>,
        message: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            landlord_id: room.landlord_id,
            room_id: room.id,
            visit_date,
            message,
            status: RequestStatus::Pending,
            is_new: true,
            is_read: true,
            created_time: now,
        }
    }

    /// Landlord-facing notification announcing this request.
    pub fn created_notification(&self, now: DateTime<Utc>) -> Notification {
        let notification = self.notify(
            Role::Landlord,
            NotificationKind::RoomRequest,
            NotificationStatus::Pending,
            now,
        );
        if self.message.is_empty() {
            notification
        } else {
            notification.with_content(self.message.to_owned())
        }
    }

    /// Applies `action` on behalf of `caller`.
    ///
    /// Checks the caller's role and party identity first, then the status
    /// table. The room occupancy guard is not evaluated here; a
    /// [`RequestChange::Confirm`] still has to win the room claim when it is
    /// committed.
    pub fn transition(
        &self,
        action: RequestAction,
        caller: &Caller,
        now: DateTime<Utc>,
    ) -> RentalResult<Transition> {
        let party = match action.actor() {
            Role::Tenant => self.tenant_id,
            Role::Landlord => self.landlord_id,
        };
        caller.require_party(action.actor(), party, action.as_str())?;

        use RequestStatus::*;
        let illegal = || RentalException::IllegalRequestTransition {
            id: self.id,
            status: self.status,
            action,
        };
        let (change, notification) = match action {
            RequestAction::TenantCancel => {
                if self.status == Completed {
                    return Err(illegal());
                }
                (
                    RequestChange::Delete(self.id),
                    self.notify(
                        Role::Landlord,
                        NotificationKind::RoomStatus,
                        NotificationStatus::TenantCancelled,
                        now,
                    ),
                )
            }
            RequestAction::Approve => {
                if self.status == Completed {
                    return Err(illegal());
                }
                (
                    RequestChange::Update(self.answered(Approved)),
                    self.notify(
                        Role::Tenant,
                        NotificationKind::RoomStatus,
                        NotificationStatus::Approve,
                        now,
                    ),
                )
            }
            RequestAction::LandlordCancel => {
                if self.status == Completed {
                    return Err(illegal());
                }
                (
                    RequestChange::Update(self.answered(Cancelled)),
                    self.notify(
                        Role::Tenant,
                        NotificationKind::RoomStatus,
                        NotificationStatus::LandlordCancelled,
                        now,
                    ),
                )
            }
            RequestAction::TenantConfirm => {
                if self.status != Approved {
                    return Err(illegal());
                }
                let mut confirmed = self.clone();
                confirmed.status = Completed;
                (
                    RequestChange::Confirm(confirmed),
                    self.notify(
                        Role::Landlord,
                        NotificationKind::RoomStatus,
                        NotificationStatus::Confirmed,
                        now,
                    ),
                )
            }
        };
        Ok(Transition {
            change,
            notification,
        })
    }

    /// Whether `caller` is the stored party of this request for the caller's role.
    pub fn involves(&self, caller: &Caller) -> bool {
        caller.party_of(self.tenant_id, self.landlord_id) == caller.id
    }

    // A landlord answer clears the landlord badge and raises the tenant one.
    fn answered(&self, status: RequestStatus) -> Request {
        let mut next = self.clone();
        next.status = status;
        next.is_new = false;
        next.is_read = false;
        next
    }

    fn notify(
        &self,
        recipient: Role,
        kind: NotificationKind,
        status: NotificationStatus,
        now: DateTime<Utc>,
    ) -> Notification {
        Notification::new(self.tenant_id, self.landlord_id, recipient, kind, status, None, now)
            .with_request(self.id)
            .with_room(self.room_id)
    }
}

impl TryFrom<RoomRequestModel> for Request {
    type Error = anyhow::Error;

    fn try_from(model: RoomRequestModel) -> Result<Self, Self::Error> {
        let RoomRequestModel {
            id,
            tenant_id,
            landlord_id,
            room_id,
            visit_date,
            message,
            status,
            is_new,
            is_read,
            created_time,
        } = model;

        Ok(Self {
            id,
            tenant_id,
            landlord_id,
            room_id,
            visit_date,
            message,
            status: RequestStatus::from_i32(status).ok_or(anyhow!("request status is invalid"))?,
            is_new,
            is_read,
            created_time,
        })
    }
}

impl From<Request> for RoomRequestModel {
    fn from(l: Request) -> Self {
        Self {
            id: l.id,
            tenant_id: l.tenant_id,
            landlord_id: l.landlord_id,
            room_id: l.room_id,
            visit_date: l.visit_date,
            message: l.message,
            status: l.status as i32,
            is_new: l.is_new,
            is_read: l.is_read,
            created_time: l.created_time,
        }
    }
}
