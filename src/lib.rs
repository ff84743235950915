//! Rhythm timing and judgment core for a single-input parry minigame.
//!
//! A host owns the clock, calls [`game::TimingManager::update`] once per tick
//! and [`game::TimingManager::resolve_input`] whenever the player acts.

pub mod config;
pub mod game;
pub mod model;
pub mod pattern;
pub mod replay;
pub mod traits;
pub mod util;

#[cfg(test)]
mod test_utils;
