pub mod court;
pub mod play;
pub mod time;
