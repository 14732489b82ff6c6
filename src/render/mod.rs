pub mod cache;
pub mod compositor;
pub mod cpu;
pub mod layout;
pub mod surface;
