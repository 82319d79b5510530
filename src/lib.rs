//! World energy narrative: three chart scenes over one aggregate series.

pub mod color;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod render;
pub mod scene;
pub mod state;
