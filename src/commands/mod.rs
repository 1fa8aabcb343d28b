pub mod combine;
pub mod copy;
pub mod remove;
pub mod rotate;
pub mod sizes;
pub mod stamp;
pub mod trim;
