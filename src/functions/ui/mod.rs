pub mod component;
pub mod pagination;
