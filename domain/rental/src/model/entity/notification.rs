use std::fmt::Display;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use database_model::rental::prelude::NotificationModel;
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::exception::RentalException;
use crate::model::vo::Role;

/// 通知
///
/// A directed record of one lifecycle event. After creation only `is_read`
/// ever changes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub landlord_id: Uuid,
    /// Which of the two parties the notification is addressed to.
    pub recipient: Role,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub status: NotificationStatus,
    pub title: String,
    pub content: Option<String>,
    pub request_id: Option<Uuid>,
    pub room_id: Option<Uuid>,
    pub complaint_id: Option<Uuid>,
    pub is_read: bool,
    pub created_time: DateTime<Utc>,
}

/// 通知类型
#[derive(FromPrimitive, ToPrimitive, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    RoomRequest,
    RoomStatus,
    IssueReport,
    Maintenance,
    CustomMessage,
    Activity,
    Warning,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::RoomRequest => "room-request",
            NotificationKind::RoomStatus => "room-status",
            NotificationKind::IssueReport => "issue-report",
            NotificationKind::Maintenance => "maintenance",
            NotificationKind::CustomMessage => "custom-message",
            NotificationKind::Activity => "activity",
            NotificationKind::Warning => "warning",
        }
    }
}

impl Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = RentalException;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "room-request" => NotificationKind::RoomRequest,
            "room-status" => NotificationKind::RoomStatus,
            "issue-report" => NotificationKind::IssueReport,
            "maintenance" => NotificationKind::Maintenance,
            "custom-message" => NotificationKind::CustomMessage,
            "activity" => NotificationKind::Activity,
            "warning" => NotificationKind::Warning,
            _ => {
                return Err(RentalException::UnknownNotificationType {
                    value: s.to_owned(),
                })
            }
        })
    }
}

/// 通知事件状态
///
/// Overlaps with, but is not the same as, the request and complaint statuses.
#[derive(FromPrimitive, ToPrimitive, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationStatus {
    Pending,
    TenantCancelled,
    LandlordCancelled,
    Approve,
    Confirmed,
    TenantLeave,
    InProgress,
    Resolved,
    Cancelled,
}

/// Default title for a notification of the given type and status.
pub fn derive_title(kind: NotificationKind, status: NotificationStatus) -> String {
    use NotificationKind as K;
    use NotificationStatus as S;

    match (kind, status) {
        (K::RoomRequest, _) => "New room request",
        (K::RoomStatus, S::Approve) => "Visit request approved",
        (K::RoomStatus, S::LandlordCancelled) => "Visit request declined by landlord",
        (K::RoomStatus, S::TenantCancelled) => "Visit request withdrawn by tenant",
        (K::RoomStatus, S::Confirmed) => "Room occupancy confirmed",
        (K::RoomStatus, S::TenantLeave) => "Tenant moved out",
        (K::RoomStatus, _) => "Room status updated",
        (K::IssueReport, S::Pending) => "New issue reported",
        (K::IssueReport, S::InProgress) => "Issue is being handled",
        (K::IssueReport, S::Resolved) => "Issue resolved",
        (K::IssueReport, S::Cancelled) => "Issue cancelled",
        (K::IssueReport, _) => "Issue updated",
        (K::Maintenance, _) => "Maintenance notice",
        (K::CustomMessage, _) => "New message",
        (K::Activity, _) => "Account activity",
        (K::Warning, _) => "Warning",
    }
    .to_owned()
}

impl Notification {
    /// Builds an unread notification. A missing title is derived from type and status.
    pub fn new(
        tenant_id: Uuid,
        landlord_id: Uuid,
        recipient: Role,
        kind: NotificationKind,
        status: NotificationStatus,
        title: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            landlord_id,
            recipient,
            kind,
            status,
            title: title.unwrap_or_else(|| derive_title(kind, status)),
            content: None,
            request_id: None,
            room_id: None,
            complaint_id: None,
            is_read: false,
            created_time: now,
        }
    }

    pub fn with_request(mut self, request_id: Uuid) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_room(mut self, room_id: Uuid) -> Self {
        self.room_id = Some(room_id);
        self
    }

    pub fn with_complaint(mut self, complaint_id: Uuid) -> Self {
        self.complaint_id = Some(complaint_id);
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Whether `party` is the addressee when acting as `role`.
    pub fn is_addressed_to(&self, role: Role, party: Uuid) -> bool {
        self.recipient == role
            && match role {
                Role::Tenant => self.tenant_id == party,
                Role::Landlord => self.landlord_id == party,
            }
    }
}

impl TryFrom<NotificationModel> for Notification {
    type Error = anyhow::Error;

    fn try_from(model: NotificationModel) -> Result<Self, Self::Error> {
        let NotificationModel {
            id,
            tenant_id,
            landlord_id,
            recipient,
            r#type,
            status,
            title,
            content,
            request_id,
            room_id,
            complaint_id,
            is_read,
            created_time,
        } = model;

        Ok(Self {
            id,
            tenant_id,
            landlord_id,
            recipient: Role::from_i32(recipient).ok_or(anyhow!("recipient is invalid"))?,
            kind: NotificationKind::from_i32(r#type)
                .ok_or(anyhow!("notification type is invalid"))?,
            status: NotificationStatus::from_i32(status)
                .ok_or(anyhow!("notification status is invalid"))?,
            title,
            content,
            request_id,
            room_id,
            complaint_id,
            is_read,
            created_time,
        })
    }
}

impl From<Notification> for NotificationModel {
    fn from(l: Notification) -> Self {
        Self {
            id: l.id,
            tenant_id: l.tenant_id,
            landlord_id: l.landlord_id,
            recipient: l.recipient as i32,
            r#type: l.kind as i32,
            status: l.status as i32,
            title: l.title,
            content: l.content,
            request_id: l.request_id,
            room_id: l.room_id,
            complaint_id: l.complaint_id,
            is_read: l.is_read,
            created_time: l.created_time,
        }
    }
}
