pub mod input;
pub mod navigation;
