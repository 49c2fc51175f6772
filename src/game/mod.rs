// Game layer: fighters and how they hit each other

pub mod characters;
pub mod combat;
