pub(crate) mod canvas;
pub mod composite;
