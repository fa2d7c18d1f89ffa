mod complaint;
mod notification;
mod request;
mod room;
mod tenant;
