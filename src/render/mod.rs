//! Headless renderers for a scene's [`DrawList`](crate::scene::draw::DrawList).

pub mod svg;
