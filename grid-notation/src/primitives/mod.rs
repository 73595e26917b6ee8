//! Elements, from which measures are constructed.
//!
//! At first, a Grid is built from the measure pulses (or TimeSignature).
//! Then abstract events are placed on it by cumulative delays.
//! Then every event is split by grid and by assignability.
//! Then rendered items are tied and beamed inside the Measure.

pub mod event;
pub mod fraction_tools;
pub mod grid;
pub mod length;
pub mod measure;
pub mod time_map;

pub use event::{Chord, Event, EventType, ItemInfo};
pub use fraction_tools::{dots, is_assignable, separate_by_assignability};
pub use grid::{Grid, TimeSignature};
pub use length::Length;
pub use measure::{apply_beams, Measure, NotationFactory};
pub use time_map::{MeasureInfo, TimeMap};

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum GridError {
    #[error("Invalid span: {start}..{stop} in grid of total length {total}")]
    InvalidSpan {
        start: Length,
        stop: Length,
        total: Length,
    },
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),
    #[error(
        "Can not decompose {duration} into assignable lengths \
        not longer than {max}"
    )]
    UnsatisfiableDecomposition { duration: Length, max: Length },
    #[error("No partition found for span {start}..{stop}")]
    SearchExhausted { start: Length, stop: Length },
    #[error("Lengths do not sum up. Expected: {expected}, found: {found}")]
    LengthMismatch { expected: Length, found: Length },
    #[error("Can not parse length from `{0}`")]
    ParseLength(String),
}
pub type GridResult<T> = Result<T, GridError>;
