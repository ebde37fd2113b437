pub mod arena;
pub mod document;
pub mod item;
pub mod palette;
pub mod reference;
pub mod resolver;
