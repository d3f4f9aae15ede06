pub mod point;
pub mod path;
pub mod entity;
pub mod animation;
