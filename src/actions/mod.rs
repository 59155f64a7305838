pub mod movement;
pub mod orders;
pub mod system;
