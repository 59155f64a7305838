pub mod data;
pub mod grid;
pub mod position;

pub use data::*;
pub use grid::*;
pub use position::*;
