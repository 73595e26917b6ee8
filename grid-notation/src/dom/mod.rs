use std::sync::Arc;

use log::debug;

use crate::{
    primitives::{Event, GridError, GridResult, Length, Measure, NotationFactory, TimeMap},
    segmentation::SegmentSettings,
};

/// One voice through all the measures of the TimeMap.
#[derive(Debug)]
pub struct Voice<P> {
    pub time_map: Arc<TimeMap>,
    pub measures: Vec<Measure<P>>,
}
impl<P: Clone> Voice<P> {
    /// Place events one after another from the TimeMap start.
    ///
    /// Events crossing barlines are cut and tied over them. Measures,
    /// which are not filled by events, are completed by rests.
    ///
    /// # Example
    /// ```
    /// # use std::sync::Arc;
    /// # use grid_notation::dom::Voice;
    /// # use grid_notation::primitives::{Event, Grid, Length, TimeMap};
    /// # use grid_notation::segmentation::SegmentSettings;
    /// let grid = Grid::from_groups(&[1, 1], 4).unwrap();
    /// let time_map = Arc::new(TimeMap::new(1, vec![grid.clone(), grid]).unwrap());
    /// let events = vec![Event::new([60u8], Length::new(3, 4))];
    /// let voice = Voice::build(time_map, &events, &SegmentSettings::default()).unwrap();
    /// assert_eq!(voice.measures.len(), 2);
    /// assert!(voice.measures[0].tie_to_next());
    /// assert_eq!(voice.measures[1].items().len(), 2);
    /// assert!(voice.measures[1].items()[1].is_rest());
    /// ```
    pub fn build(
        time_map: Arc<TimeMap>,
        events: &[Event<P>],
        settings: &SegmentSettings,
    ) -> GridResult<Self> {
        let amount = time_map.get().len();
        let begin = time_map.begin_measure();
        let total = time_map.total();
        let mut fragments: Vec<Vec<Event<P>>> = vec![Vec::new(); amount];
        let mut tie_to_next = vec![false; amount];

        let mut position = Length::zero();
        for event in events.iter() {
            if event.delay.is_zero() {
                continue;
            }
            let end = position + event.delay;
            if end > total {
                return Err(GridError::InvalidSpan {
                    start: position,
                    stop: end,
                    total,
                });
            }
            let (head, tail) = event.attachments.split();
            let mut start = position;
            while start < end {
                let measure = time_map.get_measure_from_position(start).ok_or(
                    GridError::InvalidSpan {
                        start,
                        stop: end,
                        total,
                    },
                )?;
                let piece_end = end.min(measure.end());
                let attachments = match (start == position, piece_end == end) {
                    (true, true) => event.attachments.clone(),
                    (true, false) => head.clone(),
                    (false, true) => tail.clone(),
                    (false, false) => Default::default(),
                };
                let slot = (measure.index - begin) as usize;
                if piece_end != end && !event.is_rest() {
                    debug!("event at {position} is tied over the barline {piece_end}");
                    tie_to_next[slot] = true;
                }
                fragments[slot].push(Event {
                    pitches: event.pitches.clone(),
                    delay: piece_end - start,
                    attachments,
                });
                start = piece_end;
            }
            position = end;
        }

        let mut measures = Vec::with_capacity(amount);
        for ((info, mut events), tie) in time_map
            .get()
            .iter()
            .zip(fragments)
            .zip(tie_to_next)
        {
            let filled: Length = events.iter().map(|ev| ev.delay).sum();
            if let Some(rest) = info.grid.total().checked_sub(filled) {
                if !rest.is_zero() {
                    events.push(Event::rest(rest));
                }
            }
            let mut measure = Measure::build(&events, &info.grid, settings)?;
            measure.set_index(info.index).set_tie_to_next(tie);
            measures.push(measure);
        }
        Ok(Self { time_map, measures })
    }

    /// Render every measure by the factory.
    pub fn render_with<F: NotationFactory<P>>(&self, factory: &mut F) -> Vec<Vec<F::Object>> {
        self.measures
            .iter()
            .map(|measure| measure.render_with(factory))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use once_cell::sync::OnceCell;

    use crate::{
        notation::{Attachments, Dynamic, Fermata},
        primitives::{Event, Grid, GridError, Length, TimeMap, TimeSignature},
        segmentation::SegmentSettings,
    };

    use super::Voice;

    static TIME_MAP: OnceCell<Arc<TimeMap>> = OnceCell::new();

    fn get_time_map() -> Arc<TimeMap> {
        TIME_MAP
            .get_or_init(|| {
                Arc::new(
                    TimeMap::new(
                        1,
                        vec![
                            Grid::from_time_signature(&TimeSignature::new(4, 4)).unwrap(),
                            Grid::from_groups(&[3, 2, 2], 8).unwrap(),
                            Grid::from_groups(&[2, 2, 3], 8).unwrap(),
                        ],
                    )
                    .unwrap(),
                )
            })
            .clone()
    }

    #[test]
    fn test_voice() -> Result<(), GridError> {
        let _ = env_logger::builder().is_test(true).try_init();
        let attachments = Attachments {
            dynamic: Some(Dynamic("f".to_string())),
            fermata: Some(Fermata::Short),
            ..Default::default()
        };
        let events = vec![
            Event::new([60u8], Length::new(3, 4)),
            Event::new([62u8], Length::new(5, 8)).with_attachments(attachments),
        ];
        let voice = Voice::build(get_time_map(), &events, &SegmentSettings::default())?;
        assert_eq!(voice.measures.len(), 3);

        let first = &voice.measures[0];
        assert_eq!(first.index(), 1);
        assert!(first.tie_to_next());
        assert_eq!(first.length(), Length::whole());
        let last_of_first = &first.items()[first.items().len() - 1];
        assert_eq!(last_of_first.length, Length::new(1, 4));
        assert_eq!(last_of_first.attachments.dynamic, Some(Dynamic("f".to_string())));
        assert_eq!(last_of_first.attachments.fermata, None);

        let second = &voice.measures[1];
        assert_eq!(second.index(), 2);
        assert!(!second.tie_to_next());
        assert_eq!(second.items()[0].length, Length::new(3, 8));
        assert_eq!(second.items()[0].attachments.fermata, Some(Fermata::Short));
        assert_eq!(second.items()[0].attachments.dynamic, None);
        assert!(second.items()[1].is_rest());
        assert_eq!(second.length(), Length::new(7, 8));

        let third = &voice.measures[2];
        assert!(third.items().iter().all(|item| item.is_rest()));
        assert_eq!(third.length(), Length::new(7, 8));
        Ok(())
    }

    #[test]
    fn test_voice_too_long() {
        let events = vec![Event::new([60u8], Length::new(3, 1))];
        assert!(matches!(
            Voice::build(get_time_map(), &events, &SegmentSettings::default()),
            Err(GridError::InvalidSpan { .. })
        ));
    }

    #[test]
    fn test_rest_is_not_tied() {
        let events: Vec<Event<u8>> = vec![
            Event::new([60u8], Length::new(1, 2)),
            Event::rest(Length::new(7, 8)),
        ];
        let voice = Voice::build(get_time_map(), &events, &SegmentSettings::default()).unwrap();
        assert!(voice.measures.iter().all(|m| !m.tie_to_next()));
    }
}
