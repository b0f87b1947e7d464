//! VRAM estimation engine
//!
//! Every function here is pure: the same inputs always give the same breakdown.

pub mod calculator;
pub mod components;
pub mod estimate;

pub use calculator::{calculate_vram, calculate_vram_requirements, total_memory, VramBreakdown};
pub use components::MemoryComponent;
pub use estimate::{Confidence, MemoryEstimate};
