//! Fixed-dimension samples.

use crate::stats::error::{StatsError, StatsResult};

/// An ordered collection of points sharing one dimension.
///
/// Points are stored row-major in a single buffer. The dimension is fixed when
/// the sample is created and never changes; the sample may be empty.
///
/// ```
/// use estimr::stats::Sample;
///
/// let sample = Sample::from_rows(&[vec![0.1, 0.2], vec![0.3, 0.4]]).unwrap();
/// assert_eq!(sample.dimension(), 2);
/// assert_eq!(sample.len(), 2);
/// assert_eq!(sample.row(1), &[0.3, 0.4]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    dimension: usize,
    data: Vec<f64>,
}

impl Sample {
    /// Create an empty sample of the given dimension.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            data: Vec::new(),
        }
    }

    /// Create a one-dimensional sample from a slice of values.
    pub fn from_values(values: &[f64]) -> Self {
        Self {
            dimension: 1,
            data: values.to_vec(),
        }
    }

    /// Create a sample from rows. All rows must have the same length.
    ///
    /// An empty slice yields an empty one-dimensional sample.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> StatsResult<Self> {
        let dimension = rows.first().map_or(1, |r| r.as_ref().len());
        let mut sample = Self::new(dimension);
        for row in rows {
            sample.push(row.as_ref())?;
        }
        Ok(sample)
    }

    /// Create a sample from a row-major buffer.
    pub fn from_flat(dimension: usize, data: Vec<f64>) -> StatsResult<Self> {
        if dimension == 0 || data.len() % dimension != 0 {
            return Err(StatsError::DimensionMismatch {
                expected: dimension,
                got: data.len(),
                context: "Sample::from_flat".to_string(),
            });
        }
        Ok(Self { dimension, data })
    }

    /// Append a point.
    pub fn push(&mut self, point: &[f64]) -> StatsResult<()> {
        if point.len() != self.dimension {
            return Err(StatsError::DimensionMismatch {
                expected: self.dimension,
                got: point.len(),
                context: "Sample::push".to_string(),
            });
        }
        self.data.extend_from_slice(point);
        Ok(())
    }

    /// Append a point whose dimension the caller guarantees.
    pub(crate) fn push_unchecked(&mut self, point: &[f64]) {
        debug_assert_eq!(point.len(), self.dimension, "point dimension differs from the sample");
        self.data.extend_from_slice(point);
    }

    /// Dimension of every point.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        if self.dimension == 0 {
            0
        } else {
            self.data.len() / self.dimension
        }
    }

    /// Whether the sample has no points.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The i-th point.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.dimension..(i + 1) * self.dimension]
    }

    /// Iterate over the points.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.data.chunks_exact(self.dimension.max(1))
    }

    /// Copy out the j-th coordinate of every point.
    pub fn column(&self, j: usize) -> Vec<f64> {
        self.rows().map(|r| r[j]).collect()
    }

    /// Row-major view of the underlying buffer.
    pub fn as_flat(&self) -> &[f64] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_rows_and_columns() {
        let s = Sample::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]).unwrap();
        assert_eq!(s.len(), 3);
        assert_eq!(s.column(1), vec![2.0, 4.0, 6.0]);
        assert_eq!(s.rows().count(), 3);
    }

    #[test]
    fn test_sample_dimension_is_fixed() {
        let mut s = Sample::new(2);
        assert!(s.is_empty());
        assert!(s.push(&[1.0]).is_err());
        s.push(&[1.0, 2.0]).unwrap();
        assert_eq!(s.len(), 1);

        let ragged: Vec<Vec<f64>> = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(Sample::from_rows(&ragged).is_err());
    }

    #[test]
    fn test_sample_from_flat() {
        let s = Sample::from_flat(3, vec![0.0; 6]).unwrap();
        assert_eq!(s.len(), 2);
        assert!(Sample::from_flat(4, vec![0.0; 6]).is_err());
    }
}
