// Shared helpers that don't belong to any engine subsystem

pub mod math;
