pub mod compositor;
pub mod date;
pub mod geometry;
pub mod template;
