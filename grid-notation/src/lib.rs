//! Splitting of abstract rational-length events into notatable notes,
//! tied and beamed by an arbitrary rhythmic grid.

pub mod dom;
pub mod notation;
pub mod primitives;
pub mod segmentation;
