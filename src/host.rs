//! Reference host arrays
//!
//! [`HostArray`] is the host-side half of a fixture pair: a dense rank-1 or
//! rank-2 array with an explicit element precision and, for rank 2, an
//! explicit memory order. It is the ground truth a device container is
//! compared against, and is immutable once built.

use crate::container::{Layout, Order, Shape};
use crate::dtype::{self, DType};
use crate::error::{Error, Result};

/// Dense host-resident numeric array of rank 1 or 2
pub struct HostArray {
    /// Element bytes, laid out per `order`
    data: Vec<u8>,
    dtype: DType,
    shape: Shape,
    order: Order,
}

impl HostArray {
    /// Build a host array from f64 values given in row-major order
    ///
    /// Values are cast to `dtype` and stored in `order`. Rank must be 1 or
    /// 2 and `values.len()` must match the shape.
    pub fn from_f64(values: &[f64], shape: &[usize], order: Order, dtype: DType) -> Result<Self> {
        if shape.is_empty() || shape.len() > 2 {
            return Err(Error::Rank { ndim: shape.len() });
        }
        let numel: usize = shape.iter().product();
        if values.len() != numel {
            return Err(Error::shape_mismatch(shape, &[values.len()]));
        }

        // Permute row-major input into the requested storage order
        let layout = Layout::with_order(shape, order);
        let mut stored = vec![0.0f64; numel];
        match shape {
            [_] => stored.copy_from_slice(values),
            [rows, cols] => {
                for i in 0..*rows {
                    for j in 0..*cols {
                        // index() is total here: i, j are in range
                        if let Some(pos) = layout.index(&[i, j]) {
                            stored[pos] = values[i * cols + j];
                        }
                    }
                }
            }
            _ => unreachable!("rank checked above"),
        }

        Ok(Self {
            data: dtype::f64s_to_bytes(&stored, dtype),
            dtype,
            shape: shape.iter().copied().collect(),
            order,
        })
    }

    /// Build a host array filled with zeros
    pub fn zeros(shape: &[usize], order: Order, dtype: DType) -> Result<Self> {
        let numel: usize = shape.iter().product();
        Self::from_f64(&vec![0.0; numel], shape, order, dtype)
    }

    /// Build a host array filled with ones
    pub fn ones(shape: &[usize], order: Order, dtype: DType) -> Result<Self> {
        let numel: usize = shape.iter().product();
        Self::from_f64(&vec![1.0; numel], shape, order, dtype)
    }

    /// Wrap dense row-major bytes read back from a device container
    pub(crate) fn from_dense_bytes(data: Vec<u8>, dtype: DType, shape: &[usize]) -> Self {
        debug_assert_eq!(data.len(), shape.iter().product::<usize>() * dtype.size_in_bytes());
        Self {
            data,
            dtype,
            shape: shape.iter().copied().collect(),
            order: Order::RowMajor,
        }
    }

    /// Number of dimensions (1 or 2)
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Shape of the array
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Total number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.shape.iter().product()
    }

    /// True if the array has no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element precision
    #[inline]
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Memory order of the stored bytes
    #[inline]
    pub fn order(&self) -> Order {
        self.order
    }

    /// Element at the given indices as f64
    ///
    /// Returns `None` for out-of-bounds indices or wrong index arity.
    pub fn get(&self, indices: &[usize]) -> Option<f64> {
        let layout = Layout::with_order(&self.shape, self.order);
        let pos = layout.index(indices)?;
        Some(dtype::read_f64(&self.data, self.dtype, pos))
    }

    /// All elements as f64 in row-major order
    pub fn to_f64_vec(&self) -> Vec<f64> {
        match (self.ndim(), self.order) {
            (1, _) | (2, Order::RowMajor) => dtype::bytes_to_f64s(&self.data, self.dtype),
            (2, Order::ColMajor) => {
                let (rows, cols) = (self.shape[0], self.shape[1]);
                let mut out = Vec::with_capacity(rows * cols);
                for i in 0..rows {
                    for j in 0..cols {
                        out.push(dtype::read_f64(&self.data, self.dtype, j * rows + i));
                    }
                }
                out
            }
            _ => unreachable!("rank checked at construction"),
        }
    }

    /// Transposed copy: shape `[cols, rows]`, same order and dtype
    ///
    /// Only meaningful for rank-2 arrays; a rank-1 array is returned
    /// unchanged.
    pub fn transposed(&self) -> Self {
        if self.ndim() != 2 {
            return Self {
                data: self.data.clone(),
                dtype: self.dtype,
                shape: self.shape.clone(),
                order: self.order,
            };
        }

        let (rows, cols) = (self.shape[0], self.shape[1]);
        let values = self.to_f64_vec();
        let mut swapped = vec![0.0f64; rows * cols];
        for i in 0..rows {
            for j in 0..cols {
                swapped[j * rows + i] = values[i * cols + j];
            }
        }

        Self::from_f64(&swapped, &[cols, rows], self.order, self.dtype)
            .expect("transposed shape is valid by construction")
    }
}

impl std::fmt::Debug for HostArray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostArray")
            .field("shape", &self.shape.as_slice())
            .field("dtype", &self.dtype)
            .field("order", &self.order)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_validation() {
        assert!(matches!(
            HostArray::from_f64(&[1.0], &[1, 1, 1], Order::RowMajor, DType::F64),
            Err(Error::Rank { ndim: 3 })
        ));
        assert!(matches!(
            HostArray::from_f64(&[1.0], &[], Order::RowMajor, DType::F64),
            Err(Error::Rank { ndim: 0 })
        ));
    }

    #[test]
    fn test_get_row_major() {
        let a =
            HostArray::from_f64(&[1.0, 2.0, 3.0, 4.0], &[2, 2], Order::RowMajor, DType::F64)
                .unwrap();
        assert_eq!(a.get(&[0, 1]), Some(2.0));
        assert_eq!(a.get(&[1, 0]), Some(3.0));
        assert_eq!(a.get(&[2, 0]), None);
    }

    #[test]
    fn test_col_major_storage_same_logical_values() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let row = HostArray::from_f64(&values, &[2, 3], Order::RowMajor, DType::F64).unwrap();
        let col = HostArray::from_f64(&values, &[2, 3], Order::ColMajor, DType::F64).unwrap();
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(row.get(&[i, j]), col.get(&[i, j]));
            }
        }
        assert_eq!(row.to_f64_vec(), col.to_f64_vec());
    }

    #[test]
    fn test_transposed() {
        let a = HostArray::from_f64(
            &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            &[2, 3],
            Order::RowMajor,
            DType::F64,
        )
        .unwrap();
        let t = a.transposed();
        assert_eq!(t.shape(), &[3, 2]);
        assert_eq!(t.to_f64_vec(), vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
        assert_eq!(t.get(&[2, 1]), Some(6.0));
    }

    #[test]
    fn test_f32_values_narrowed() {
        let a = HostArray::from_f64(&[0.1], &[1], Order::RowMajor, DType::F32).unwrap();
        assert_eq!(a.get(&[0]), Some(0.1f32 as f64));
    }
}
