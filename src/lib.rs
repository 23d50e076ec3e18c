//! Layout-tree engine for the simulation dashboard.
//!
//! Panes are arranged in a binary split tree ([`layout_engine::LayoutNode`]).
//! [`layout_engine::LayoutStore`] owns the current tree, validates every
//! change, and writes it through a [`sys::persist::KeyValueStore`].

pub mod common;
pub mod layout_engine;
pub mod model;
pub mod sys;
