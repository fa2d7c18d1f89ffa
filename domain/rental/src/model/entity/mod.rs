pub mod complaint;
pub mod notification;
pub mod request;
pub mod room;

#[rustfmt::skip]
pub use {
    complaint::{Complaint, ComplaintStatus},
    notification::{derive_title, Notification, NotificationKind, NotificationStatus},
    request::{Request, RequestAction, RequestChange, RequestStatus, Transition},
    room::{Room, RoomStatus},
};
