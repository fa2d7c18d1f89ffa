use chrono::{DateTime, Utc};
use uuid::Uuid;

pub struct CreateRequestCommand {
    pub room_id: Option<Uuid>,
    pub visit_date: Option<DateTime<Utc>>,
    pub message: String,
}

pub struct CreateComplaintCommand {
    pub room_id: Option<Uuid>,
    pub kind: String,
    pub description: String,
}
