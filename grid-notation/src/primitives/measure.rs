//! Measure contains rendered items of one voice.
//!
//! Measure is built from abstract events in one pass: every event is
//! split by the grid, then by assignability, then its items are tied.
//! After all, items are beamed by pulses of the grid.
//!
//! See `Measure::build` for examples.
//!
//! # Developer Note
//! Measure only collects items, ties and beams as index ranges.
//! Making real notation objects of them is the job of [NotationFactory].

use std::ops::Range;

use itertools::Itertools;
use log::debug;

use crate::{
    notation::Attachments,
    segmentation::{separate_by_grid, SegmentSettings},
};

use super::{
    grid::cell_at, separate_by_assignability, Event, EventType, Grid,
    GridError, GridResult, ItemInfo, Length, TimeSignature,
};

/// Capability to construct notation objects from the Measure.
pub trait NotationFactory<P> {
    type Object;
    fn chord(
        &mut self,
        pitches: &[P],
        length: Length,
        attachments: &Attachments,
    ) -> Self::Object;
    fn rest(&mut self, length: Length, attachments: &Attachments) -> Self::Object;
    /// Tie all given objects together.
    fn tie(&mut self, objects: &mut [Self::Object]);
    /// Beam all given objects together.
    fn beam(&mut self, objects: &mut [Self::Object]);
    /// The last object of measure is tied to the first of the next one.
    fn tie_over_barline(&mut self, _object: &mut Self::Object) {}
}

#[derive(Debug, PartialEq, Clone)]
pub struct Measure<P> {
    index: u32,
    time_signature: TimeSignature,
    items: Vec<ItemInfo<P>>,
    ties: Vec<Range<usize>>,
    beams: Vec<Range<usize>>,
    tie_to_next: bool,
}
impl<P: Clone> Measure<P> {
    /// Build measure from events, placed one after another from the
    /// measure start.
    ///
    /// # Example
    /// ```
    /// use grid_notation::primitives::{Event, Grid, Length, Measure};
    /// use grid_notation::segmentation::SegmentSettings;
    ///
    /// let grid = Grid::from_groups(&[3, 2, 2], 8).unwrap();
    /// let events = vec![
    ///     Event::new([60u8], Length::new(1, 8)),
    ///     Event::new([62u8], Length::new(5, 8)),
    ///     Event::rest(Length::new(1, 8)),
    /// ];
    /// let measure = Measure::build(&events, &grid, &SegmentSettings::default()).unwrap();
    /// let lengths: Vec<Length> = measure.items().iter().map(|it| it.length).collect();
    /// assert_eq!(
    ///     lengths,
    ///     vec![
    ///         Length::new(1, 8),
    ///         Length::new(1, 2),
    ///         Length::new(1, 8),
    ///         Length::new(1, 8)
    ///     ]
    /// );
    /// assert_eq!(measure.ties(), &[1..3]);
    /// assert_eq!(measure.beams(), &[0..2, 2..4]);
    /// ```
    pub fn build(
        events: &[Event<P>],
        grid: &Grid,
        settings: &SegmentSettings,
    ) -> GridResult<Self> {
        let mut items = Vec::new();
        let mut ties = Vec::new();
        let mut start = Length::zero();
        for event in events.iter() {
            if event.delay.is_zero() {
                continue;
            }
            let stop = start + event.delay;
            let segments = separate_by_grid(start, stop, grid, settings)?;
            check_sum(event.delay, &segments)?;

            let mut lengths = Vec::new();
            for segment in segments {
                let assignable =
                    separate_by_assignability(segment, settings.max_length)?;
                check_sum(segment, &assignable)?;
                lengths.extend(assignable);
            }

            let first = items.len();
            let mut position = start;
            for (idx, length) in lengths.iter().enumerate() {
                let mut item = ItemInfo::new(
                    position,
                    *length,
                    EventType::from_pitches(&event.pitches),
                );
                item.attachments = event.attachments.for_item(idx, lengths.len());
                items.push(item);
                position += *length;
            }
            if lengths.len() > 1 && !event.is_rest() {
                ties.push(first..items.len());
            }
            start = stop;
        }
        let total: Length = events.iter().map(|ev| ev.delay).sum();
        let durations: Vec<Length> = items.iter().map(|it| it.length).collect();
        check_sum(total, &durations)?;

        let beams = apply_beams(&items, &durations, grid.absolute());
        debug!(
            "measure built: {} items, ties: {:?}, beams: {:?}",
            items.len(),
            ties,
            beams
        );
        Ok(Self {
            index: 1,
            time_signature: grid.time_signature()?,
            items,
            ties,
            beams,
            tie_to_next: false,
        })
    }

    /// Make notation objects by the factory, tie and beam them.
    pub fn render_with<F: NotationFactory<P>>(&self, factory: &mut F) -> Vec<F::Object> {
        let mut objects: Vec<F::Object> = self
            .items
            .iter()
            .map(|item| match &item.event {
                EventType::Chord(chord) => {
                    factory.chord(chord.pitches(), item.length, &item.attachments)
                }
                EventType::Rest => factory.rest(item.length, &item.attachments),
            })
            .collect();
        for tie in self.ties.iter() {
            factory.tie(&mut objects[tie.clone()]);
        }
        for beam in self.beams.iter() {
            factory.beam(&mut objects[beam.clone()]);
        }
        if self.tie_to_next {
            if let Some(last) = objects.last_mut() {
                factory.tie_over_barline(last);
            }
        }
        objects
    }
}
impl<P> Measure<P> {
    pub fn index(&self) -> u32 {
        self.index
    }
    pub fn set_index(&mut self, index: u32) -> &mut Self {
        self.index = index;
        self
    }
    pub fn time_signature(&self) -> &TimeSignature {
        &self.time_signature
    }
    pub fn items(&self) -> &[ItemInfo<P>] {
        &self.items
    }
    /// Ranges of items, tied together.
    pub fn ties(&self) -> &[Range<usize>] {
        &self.ties
    }
    /// Ranges of items, beamed together.
    pub fn beams(&self) -> &[Range<usize>] {
        &self.beams
    }
    pub fn length(&self) -> Length {
        self.items.iter().map(|it| it.length).sum()
    }
    pub fn tie_to_next(&self) -> bool {
        self.tie_to_next
    }
    pub fn set_tie_to_next(&mut self, tie: bool) -> &mut Self {
        self.tie_to_next = tie;
        self
    }
}

fn check_sum(expected: Length, lengths: &[Length]) -> GridResult<()> {
    let found: Length = lengths.iter().sum();
    match found == expected {
        true => Ok(()),
        false => Err(GridError::LengthMismatch { expected, found }),
    }
}

/// Group items by grid cells, in which they start.
///
/// # Returns
/// ranges of items, which should be beamed. Runs, consisted of one item,
/// or of rests only, are not beamed.
///
/// # Example
/// ```
/// # use grid_notation::primitives::{apply_beams, Chord, EventType, ItemInfo, Length};
/// let eighth = Length::new(1, 8);
/// let items: Vec<ItemInfo<u8>> = (0..4)
///     .map(|idx| ItemInfo::new(
///         Length::new(idx, 8),
///         eighth,
///         EventType::Chord(Chord::new(vec![60])),
///     ))
///     .collect();
/// let absolute = [Length::zero(), Length::new(3, 8), Length::new(5, 8)];
/// assert_eq!(apply_beams(&items, &[eighth; 4], &absolute), vec![0..3]);
/// ```
pub fn apply_beams<P>(
    items: &[ItemInfo<P>],
    durations: &[Length],
    absolute_grid: &[Length],
) -> Vec<Range<usize>> {
    let cells: Vec<usize> = durations
        .iter()
        .scan(Length::zero(), |offset, duration| {
            let start = *offset;
            *offset += *duration;
            Some(start)
        })
        .map(|offset| cell_at(absolute_grid, offset))
        .collect();
    let mut beams = Vec::new();
    let mut start = 0;
    for (_cell, group) in &cells.iter().group_by(|cell| **cell) {
        let end = start + group.count();
        let run = &items[start..end];
        if run.len() > 1 && run.iter().any(|item| !item.is_rest()) {
            beams.push(start..end);
        }
        start = end;
    }
    beams
}

#[cfg(test)]
mod tests {
    use crate::{
        notation::{Attachments, Dynamic, Fermata},
        primitives::{
            apply_beams, Chord, Event, EventType, Grid, GridError, ItemInfo,
            Length, Measure, TimeSignature,
        },
        segmentation::SegmentSettings,
    };

    fn chord(position: Length, length: Length) -> ItemInfo<u8> {
        ItemInfo::new(position, length, EventType::Chord(Chord::new(vec![60])))
    }
    fn rest(position: Length, length: Length) -> ItemInfo<u8> {
        ItemInfo::new(position, length, EventType::Rest)
    }

    #[test]
    fn test_beams_by_cells() {
        let eighth = Length::new(1, 8);
        let items: Vec<_> = (0..4).map(|i| chord(Length::new(i, 8), eighth)).collect();
        let absolute = [Length::zero(), Length::new(3, 8), Length::new(5, 8)];
        assert_eq!(apply_beams(&items, &[eighth; 4], &absolute), vec![0..3]);
    }

    #[test]
    fn test_no_beams_for_rests() {
        let eighth = Length::new(1, 8);
        let items = vec![
            rest(Length::zero(), eighth),
            rest(eighth, eighth),
            chord(Length::new(2, 8), eighth),
            rest(Length::new(3, 8), eighth),
        ];
        let absolute = [Length::zero(), Length::new(1, 4), Length::new(1, 2)];
        assert_eq!(apply_beams(&items, &[eighth; 4], &absolute), vec![2..4]);
    }

    #[test]
    fn test_build_ties() {
        let grid = Grid::from_time_signature(&TimeSignature::new(4, 4)).unwrap();
        let events = vec![
            Event::new([60u8], Length::new(3, 8)),
            Event::rest(Length::new(3, 8)),
            Event::new([62u8, 65], Length::new(1, 4)),
        ];
        let measure = Measure::build(&events, &grid, &SegmentSettings::default()).unwrap();
        let lengths: Vec<Length> = measure.items().iter().map(|it| it.length).collect();
        assert_eq!(
            lengths,
            vec![
                Length::new(1, 4),
                Length::new(1, 8),
                Length::new(1, 8),
                Length::new(1, 4),
                Length::new(1, 4),
            ]
        );
        assert_eq!(measure.ties(), &[0..2]);
        assert_eq!(measure.beams(), &[1..3]);
        assert_eq!(measure.length(), Length::whole());
        assert_eq!(measure.time_signature(), &TimeSignature::new(4, 4));
    }

    #[test]
    fn test_build_attachments() {
        let grid = Grid::from_groups(&[1, 1], 2).unwrap();
        let attachments = Attachments {
            dynamic: Some(Dynamic("pp".to_string())),
            fermata: Some(Fermata::Normal),
            ..Default::default()
        };
        let events = vec![
            Event::rest(Length::new(3, 8)),
            Event::new([60u8], Length::new(5, 8)).with_attachments(attachments),
        ];
        let measure = Measure::build(&events, &grid, &SegmentSettings::default()).unwrap();
        let items = measure.items();
        assert_eq!(items.len(), 3);
        assert_eq!(measure.ties(), &[1..3]);
        assert_eq!(items[1].attachments.dynamic, Some(Dynamic("pp".to_string())));
        assert_eq!(items[1].attachments.fermata, None);
        assert_eq!(items[2].attachments.dynamic, None);
        assert_eq!(items[2].attachments.fermata, Some(Fermata::Normal));
    }

    #[test]
    fn test_build_overflow() {
        let grid = Grid::from_groups(&[1, 1], 4).unwrap();
        let events = vec![Event::new([60u8], Length::new(3, 4))];
        assert!(matches!(
            Measure::build(&events, &grid, &SegmentSettings::default()),
            Err(GridError::InvalidSpan { .. })
        ));
    }
}
