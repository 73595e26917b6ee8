//! Notations, attached to the event.
//!
//! Every kind of attachment is a separate optional field of [Attachments],
//! and decides by itself, on which part of split event it should be kept.
use serde::{Deserialize, Serialize};

pub mod articulation;

pub use articulation::{Articulation, Fermata};

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum NotationError {
    #[error("Unexpected Token: {0}")]
    UnexpectedToken(String),
}

/// Way to decide which note should carry the notation on note-split.
///
/// if corresponding function returns true → it will be kept at the head, at
/// tail or in both. By default, only head specified, then tail is inverted.
/// But both functions can be implemented.
pub trait NotationSplitPosition {
    fn is_head(&self) -> bool;
    fn is_tail(&self) -> bool {
        !self.is_head()
    }
}

/// Dynamics string, like `"mf"` or `"sfz"`.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Dynamic(pub String);
impl NotationSplitPosition for Dynamic {
    fn is_head(&self) -> bool {
        true
    }
}

/// Free text above the staff.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Markup(pub String);
impl NotationSplitPosition for Markup {
    fn is_head(&self) -> bool {
        true
    }
}

/// All notations, which event can hold.
///
/// # Example
///
/// ```
/// # use grid_notation::notation::{Attachments, Dynamic, Fermata};
/// let attachments = Attachments {
///     dynamic: Some(Dynamic("p".to_string())),
///     fermata: Some(Fermata::Normal),
///     ..Default::default()
/// };
/// let (head, tail) = attachments.split();
/// assert_eq!(head.dynamic, Some(Dynamic("p".to_string())));
/// assert_eq!(head.fermata, None);
/// assert_eq!(tail.dynamic, None);
/// assert_eq!(tail.fermata, Some(Fermata::Normal));
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Default, Serialize, Deserialize)]
pub struct Attachments {
    pub dynamic: Option<Dynamic>,
    pub articulation: Option<Articulation>,
    pub markup: Option<Markup>,
    pub fermata: Option<Fermata>,
}
impl Attachments {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Split attachments between the head and the tail of event.
    pub fn split(&self) -> (Self, Self) {
        (self.filtered(true, false), self.filtered(false, true))
    }

    /// Attachments for item at `index` of event, split into `count` items.
    pub fn for_item(&self, index: usize, count: usize) -> Self {
        self.filtered(index == 0, index + 1 == count)
    }

    fn filtered(&self, head: bool, tail: bool) -> Self {
        Self {
            dynamic: place(&self.dynamic, head, tail),
            articulation: place(&self.articulation, head, tail),
            markup: place(&self.markup, head, tail),
            fermata: place(&self.fermata, head, tail),
        }
    }
}

fn place<T: NotationSplitPosition + Clone>(
    notation: &Option<T>,
    head: bool,
    tail: bool,
) -> Option<T> {
    notation
        .as_ref()
        .filter(|n| (head && n.is_head()) || (tail && n.is_tail()))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::{Articulation, Attachments, Dynamic, Fermata, Markup};

    fn full() -> Attachments {
        Attachments {
            dynamic: Some(Dynamic("mf".to_string())),
            articulation: Some(Articulation::Accent),
            markup: Some(Markup("dolce".to_string())),
            fermata: Some(Fermata::Long),
        }
    }

    #[test]
    fn test_for_item() {
        let attachments = full();
        assert_eq!(attachments.for_item(0, 1), attachments);
        let head = attachments.for_item(0, 3);
        assert_eq!(head.articulation, Some(Articulation::Accent));
        assert_eq!(head.fermata, None);
        assert!(attachments.for_item(1, 3).is_empty());
        let tail = attachments.for_item(2, 3);
        assert_eq!(tail.fermata, Some(Fermata::Long));
        assert_eq!(tail.markup, None);
    }

    #[test]
    fn test_split_of_split() {
        let (head, tail) = full().split();
        assert_eq!(head.for_item(0, 1), head);
        assert!(head.for_item(1, 2).is_empty());
        assert!(tail.for_item(0, 2).is_empty());
        assert_eq!(tail.for_item(1, 2), tail);
    }
}
