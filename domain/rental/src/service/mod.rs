mod complaint;
mod notification;
mod request;
mod room;

#[rustfmt::skip]
pub use {
    complaint::ComplaintService,
    notification::NotificationService,
    request::RequestService,
    room::RoomService,
};
