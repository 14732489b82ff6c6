pub mod angle;
pub mod digits;
