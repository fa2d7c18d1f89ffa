use std::fmt::Display;

use actix_web::{body::BoxBody, http::StatusCode, HttpRequest, HttpResponse, Responder, ResponseError};
use domain_rental::exception::{ExceptionKind, RentalException};
use serde::{Deserialize, Serialize};

/// 统一响应体
#[derive(Serialize, Deserialize, Debug)]
pub struct ResponseBody<T> {
    pub status: u16,
    pub message: String,
    pub content: Option<T>,
}

pub struct ApiResponder<T>(pub T);

pub type ApiResult<T> = Result<ApiResponder<T>, ApiError>;

impl<T: Serialize> Responder for ApiResponder<T> {
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        HttpResponse::Ok().json(ResponseBody {
            status: StatusCode::OK.as_u16(),
            message: "success".to_owned(),
            content: Some(self.0),
        })
    }
}

#[derive(Debug)]
pub struct ApiError(pub RentalException);

impl Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<RentalException> for ApiError {
    fn from(e: RentalException) -> Self {
        Self(e)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.0.kind() {
            ExceptionKind::Authentication => StatusCode::UNAUTHORIZED,
            ExceptionKind::Authorization => StatusCode::FORBIDDEN,
            ExceptionKind::NotFound => StatusCode::NOT_FOUND,
            ExceptionKind::Conflict => StatusCode::CONFLICT,
            ExceptionKind::Validation => StatusCode::BAD_REQUEST,
            ExceptionKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        // Store details stay in the log.
        let message = match self.0.kind() {
            ExceptionKind::Internal => {
                tracing::error!(error = ?self.0, "request failed");
                "Internal server error.".to_owned()
            }
            _ => self.0.to_string(),
        };
        HttpResponse::build(self.status_code()).json(ResponseBody::<()> {
            status: self.0.code(),
            message,
            content: None,
        })
    }
}
