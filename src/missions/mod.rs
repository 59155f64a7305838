pub mod data;
pub mod explore;
pub mod lifecycle;
pub mod missionsystem;
pub mod negotiator;
pub mod scoring;
