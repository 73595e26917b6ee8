//! Abstract events, and rendered items, to which they are split.
use crate::notation::Attachments;

use super::Length;

/// Abstract musical event: pitches (or nothing for rest) sounding for
/// the `delay`, which does not know anything about notation.
///
/// `P` is any pitch identifier of the caller.
#[derive(Debug, PartialEq, Clone)]
pub struct Event<P> {
    pub pitches: Vec<P>,
    pub delay: Length,
    pub attachments: Attachments,
}
impl<P> Event<P> {
    pub fn new(pitches: impl IntoIterator<Item = P>, delay: Length) -> Self {
        Self {
            pitches: pitches.into_iter().collect(),
            delay,
            attachments: Attachments::default(),
        }
    }
    pub fn rest(delay: Length) -> Self {
        Self {
            pitches: Vec::new(),
            delay,
            attachments: Attachments::default(),
        }
    }
    pub fn with_attachments(mut self, attachments: Attachments) -> Self {
        self.attachments = attachments;
        self
    }
    pub fn is_rest(&self) -> bool {
        self.pitches.is_empty()
    }
}

/// Rendered piece of event with assignable length.
///
/// ItemInfo is more about position and length, while
/// EventType responds for representation.
#[derive(Debug, PartialEq, Clone)]
pub struct ItemInfo<P> {
    /// distance from the measure start.
    pub position: Length,
    pub length: Length,
    pub event: EventType<P>,
    pub attachments: Attachments,
}
impl<P> ItemInfo<P> {
    pub fn new(position: Length, length: Length, event: EventType<P>) -> Self {
        Self {
            position,
            length,
            event,
            attachments: Attachments::default(),
        }
    }
    pub fn end_position(&self) -> Length {
        self.position + self.length
    }
    pub fn is_rest(&self) -> bool {
        matches!(self.event, EventType::Rest)
    }
}

#[derive(Debug, PartialEq, Clone, Default)]
pub enum EventType<P> {
    #[default]
    Rest,
    Chord(Chord<P>),
}
impl<P: Clone> EventType<P> {
    /// Chord, if there are pitches, otherwise Rest.
    pub fn from_pitches(pitches: &[P]) -> Self {
        match pitches.is_empty() {
            true => Self::Rest,
            false => Self::Chord(Chord::new(pitches.to_vec())),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Chord<P> {
    pitches: Vec<P>,
}
impl<P> Chord<P> {
    pub fn new(pitches: Vec<P>) -> Self {
        Self { pitches }
    }
    pub fn pitches(&self) -> &[P] {
        &self.pitches
    }
    pub fn push(mut self, pitch: P) -> Self {
        self.pitches.push(pitch);
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::primitives::{Chord, Event, EventType, ItemInfo, Length};

    #[test]
    fn test_event_type() {
        assert_eq!(EventType::<u8>::from_pitches(&[]), EventType::Rest);
        assert_eq!(
            EventType::from_pitches(&[60u8, 64]),
            EventType::Chord(Chord::new(vec![60]).push(64))
        );
        assert!(Event::<u8>::rest(Length::new(1, 4)).is_rest());
        assert!(!Event::new([60u8], Length::new(1, 4)).is_rest());
    }

    #[test]
    fn test_item_end() {
        let item = ItemInfo::new(
            Length::new(1, 4),
            Length::new(3, 8),
            EventType::Chord(Chord::new(vec![60u8])),
        );
        assert_eq!(item.end_position(), Length::new(5, 8));
        assert!(!item.is_rest());
    }
}
