pub mod authorization;
pub mod timeout;
