// [apps/control-api/src/handlers/mod.rs]
pub mod decisions;
pub mod gaps;
pub mod runs;
