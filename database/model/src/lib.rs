pub mod rental;

pub use sea_orm;
