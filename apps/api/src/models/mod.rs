pub mod payment;
pub mod resume;
pub mod subscription;
pub mod user;
