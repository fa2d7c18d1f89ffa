use chrono::{DateTime, Utc};
use domain_rental::command::{CreateComplaintCommand, CreateRequestCommand};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestDto {
    pub room_id: Option<Uuid>,
    pub visit_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub message: String,
}

impl From<CreateRequestDto> for CreateRequestCommand {
    fn from(dto: CreateRequestDto) -> Self {
        Self {
            room_id: dto.room_id,
            visit_date: dto.visit_date,
            message: dto.message,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TransitionRequestDto {
    pub request_id: Option<Uuid>,
    #[serde(default)]
    pub action: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateComplaintDto {
    pub room_id: Option<Uuid>,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub description: String,
}

impl From<CreateComplaintDto> for CreateComplaintCommand {
    fn from(dto: CreateComplaintDto) -> Self {
        Self {
            room_id: dto.room_id,
            kind: dto.kind,
            description: dto.description,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SetComplaintStatusDto {
    pub complaint_id: Option<Uuid>,
    #[serde(default)]
    pub status: String,
}

#[derive(Deserialize, Debug)]
pub struct NotificationQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct CountDto {
    pub count: u64,
}
