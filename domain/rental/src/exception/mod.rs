use thiserror::Error;
use uuid::Uuid;

use crate::model::entity::{ComplaintStatus, RequestAction, RequestStatus};

pub type RentalResult<T> = Result<T, RentalException>;

/// The failure classes callers must be able to tell apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceptionKind {
    Authentication,
    Authorization,
    NotFound,
    Conflict,
    Validation,
    Internal,
}

#[derive(Error, Debug)]
pub enum RentalException {
    #[error("Caller is not authenticated.")]
    Unauthenticated,

    #[error("Caller {caller} is not allowed to {operation}.")]
    Forbidden { caller: Uuid, operation: String },

    #[error("There is no request with id: {id}.")]
    RequestNotFound { id: Uuid },

    #[error("There is no room with id: {id}.")]
    RoomNotFound { id: Uuid },

    #[error("There is no complaint with id: {id}.")]
    ComplaintNotFound { id: Uuid },

    #[error("There is no notification with id: {id}.")]
    NotificationNotFound { id: Uuid },

    #[error("Room {room_id} is already occupied.")]
    RoomOccupied { room_id: Uuid },

    #[error("Room {room_id} is not occupied by tenant {tenant_id}.")]
    RoomNotOccupiedBy { room_id: Uuid, tenant_id: Uuid },

    #[error("Cannot {action} request {id} in status {status}.")]
    IllegalRequestTransition {
        id: Uuid,
        status: RequestStatus,
        action: RequestAction,
    },

    #[error("Request {id} was changed by the other party; reload and retry.")]
    RequestChanged { id: Uuid },

    #[error("Complaint {id} cannot go from {from} to {to}.")]
    IllegalComplaintTransition {
        id: Uuid,
        from: ComplaintStatus,
        to: ComplaintStatus,
    },

    #[error("Missing required field: {field}.")]
    MissingField { field: &'static str },

    #[error("Unrecognized action: {action}.")]
    UnknownAction { action: String },

    #[error("Unrecognized status: {status}.")]
    UnknownStatus { status: String },

    #[error("Unrecognized notification type: {value}.")]
    UnknownNotificationType { value: String },

    #[error("Malformed payload: {reason}")]
    InvalidPayload { reason: String },

    #[error("Rental internal error: {source}")]
    InternalError {
        #[source]
        source: anyhow::Error,
    },
}

impl RentalException {
    pub fn kind(&self) -> ExceptionKind {
        use RentalException::*;
        match self {
            Unauthenticated => ExceptionKind::Authentication,
            Forbidden { .. } => ExceptionKind::Authorization,
            RequestNotFound { .. }
            | RoomNotFound { .. }
            | ComplaintNotFound { .. }
            | NotificationNotFound { .. } => ExceptionKind::NotFound,
            RoomOccupied { .. }
            | RoomNotOccupiedBy { .. }
            | IllegalRequestTransition { .. }
            | RequestChanged { .. }
            | IllegalComplaintTransition { .. } => ExceptionKind::Conflict,
            MissingField { .. }
            | UnknownAction { .. }
            | UnknownStatus { .. }
            | UnknownNotificationType { .. }
            | InvalidPayload { .. } => ExceptionKind::Validation,
            InternalError { .. } => ExceptionKind::Internal,
        }
    }

    /// Stable numeric code reported to clients next to the message.
    pub fn code(&self) -> u16 {
        use RentalException::*;
        match self {
            Unauthenticated => 100,
            Forbidden { .. } => 101,
            RequestNotFound { .. } => 200,
            RoomNotFound { .. } => 201,
            ComplaintNotFound { .. } => 202,
            NotificationNotFound { .. } => 203,
            RoomOccupied { .. } => 300,
            RoomNotOccupiedBy { .. } => 301,
            IllegalRequestTransition { .. } => 302,
            IllegalComplaintTransition { .. } => 303,
            RequestChanged { .. } => 304,
            MissingField { .. } => 400,
            UnknownAction { .. } => 401,
            UnknownStatus { .. } => 402,
            UnknownNotificationType { .. } => 403,
            InvalidPayload { .. } => 404,
            InternalError { .. } => 500,
        }
    }
}

impl From<anyhow::Error> for RentalException {
    fn from(e: anyhow::Error) -> Self {
        RentalException::InternalError { source: e }
    }
}
