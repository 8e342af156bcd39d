pub mod emotion;
pub mod sentiment;
