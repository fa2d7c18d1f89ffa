use anyhow::anyhow;
use chrono::{DateTime, Utc};
use database_model::rental::prelude::RoomModel;
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 房源
///
/// Only the occupancy-relevant subset of a listing. The listing schema itself
/// belongs to the listing store.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: Uuid,
    pub landlord_id: Uuid,
    pub address: String,
    pub rent: i64,
    pub status: RoomStatus,
    pub is_active: bool,
    /// At most one tenant per occupancy cycle.
    pub tenant_id: Option<Uuid>,
    pub joining_date: Option<DateTime<Utc>>,
    pub created_time: DateTime<Utc>,
}

/// 房源入住状态
#[derive(FromPrimitive, ToPrimitive, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoomStatus {
    #[default]
    Vacant,
    Occupied,
}

impl Room {
    pub fn is_occupied(&self) -> bool {
        self.tenant_id.is_some()
    }

    pub fn is_occupied_by(&self, tenant_id: Uuid) -> bool {
        self.tenant_id == Some(tenant_id)
    }
}

impl TryFrom<RoomModel> for Room {
    type Error = anyhow::Error;

    fn try_from(model: RoomModel) -> Result<Self, Self::Error> {
        let RoomModel {
            id,
            landlord_id,
            address,
            rent,
            status,
            is_active,
            tenant_id,
            joining_date,
            created_time,
        } = model;

        Ok(Self {
            id,
            landlord_id,
            address,
            rent,
            status: RoomStatus::from_i32(status).ok_or(anyhow!("room status is invalid"))?,
            is_active,
            tenant_id,
            joining_date,
            created_time,
        })
    }
}
