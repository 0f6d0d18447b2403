pub mod ghost;
pub mod solve;
pub mod walk;
