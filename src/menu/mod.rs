//! Menu tree, navigation engine, and rendering.

pub mod engine;
pub mod geometry;
pub mod history;
pub mod item;
pub mod layout;
pub mod render;
pub mod text;
pub mod tree;

#[cfg(test)]
mod test_properties;
#[cfg(test)]
mod test_scenarios;
