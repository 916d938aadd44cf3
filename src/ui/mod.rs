//! egui widgets. Nothing here mutates viewer state directly (apart from the
//! band text buffer); widgets push [`crate::state::ViewerEvent`]s instead.

pub mod panels;
pub mod plot;
