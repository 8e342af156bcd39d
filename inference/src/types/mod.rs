pub mod emotion;
pub mod polarity;
