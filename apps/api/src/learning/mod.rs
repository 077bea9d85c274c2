//! Learning paths and trainings: AI-assisted path generation, the sequential
//! module-unlock state machine, and training enrollment lifecycle.

pub mod handlers;
pub mod paths;
pub mod prompts;
pub mod training;
