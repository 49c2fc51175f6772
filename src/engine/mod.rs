// Engine modules: renderer, physics, input, audio

pub mod assets;
pub mod game_loop;
pub mod input;
pub mod physics;
pub mod renderer;
