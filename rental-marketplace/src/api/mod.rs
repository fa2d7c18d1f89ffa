use std::str::FromStr;

use domain_rental::exception::{RentalException, RentalResult};
use uuid::Uuid;

pub mod complaint;
pub mod dtos;
pub mod notification;
pub mod request;
mod response;
pub mod room;

pub use response::{ApiError, ApiResponder, ApiResult, ResponseBody};

fn extract_uuid(s: &str) -> RentalResult<Uuid> {
    Uuid::from_str(s).map_err(|e| RentalException::InvalidPayload {
        reason: format!(r#"error when parse uuid from "{s}": {e}"#),
    })
}
