// Engine modules: renderer, input, assets, timing

pub mod assets;
pub mod game_loop;
pub mod input;
pub mod renderer;
