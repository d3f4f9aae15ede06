pub mod queue;
pub mod stroke;
