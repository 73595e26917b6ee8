//! Main "ruler" for making voices and moving through score.
use super::{Grid, GridError, GridResult, Length};

/// Represents consecutive measures, each with its own grid.
///
/// Considered to be used as reference for building voices, navigating
/// through them and converting positions from absolute to measure-relative.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeMap {
    measures: Vec<MeasureInfo>,
}
impl TimeMap {
    /// Measures are indexed from `begin`.
    pub fn new(begin: u32, grids: impl IntoIterator<Item = Grid>) -> GridResult<Self> {
        let mut start = Length::zero();
        let mut measures = Vec::new();
        for (index, grid) in (begin..).zip(grids) {
            let measure = MeasureInfo { index, start, grid };
            start += measure.grid.total();
            measures.push(measure);
        }
        if measures.is_empty() {
            return Err(GridError::InvalidGrid(
                "Can not build TimeMap without measures".to_string(),
            ));
        }
        Ok(Self { measures })
    }
    pub fn get(&self) -> &[MeasureInfo] {
        &self.measures
    }
    pub fn begin_measure(&self) -> u32 {
        self.measures[0].index
    }
    pub fn end_measure(&self) -> u32 {
        self.measures[self.measures.len() - 1].index
    }
    pub fn total(&self) -> Length {
        self.measures
            .last()
            .map(|m| m.end())
            .unwrap_or_default()
    }
    pub fn get_measure_info(&self, measure_index: u32) -> Option<&MeasureInfo> {
        let idx = measure_index.checked_sub(self.begin_measure())?;
        self.measures.get(idx as usize)
    }
    /// Get measure under given position.
    pub fn get_measure_from_position(&self, position: Length) -> Option<&MeasureInfo> {
        self.measures.iter().find(|m| m.start <= position && position < m.end())
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct MeasureInfo {
    pub index: u32,
    /// position of the measure start from the TimeMap start.
    pub start: Length,
    pub grid: Grid,
}
impl MeasureInfo {
    pub fn end(&self) -> Length {
        self.start + self.grid.total()
    }
}
