// Moonfall brawler character core
//
// Movement, combos, transformation forms, animation selection and hit
// detection for the fighters of a 2D side-scroller. Rendering, windowing and
// asset files stay outside; the core only talks to them through the
// `RenderTarget`, `ViewProjection` and `AnimationTableProvider` seams.

pub mod config;
pub mod core;
pub mod engine;
pub mod game;
