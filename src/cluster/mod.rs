pub mod assignment;
pub mod data;
pub mod discovery;
pub mod registry;
pub mod system;
pub mod unionfind;
