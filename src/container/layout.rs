//! Layout: shape, strides, and offset for container memory layout

use smallvec::SmallVec;
use std::fmt;

/// Stack allocation threshold for dimensions
/// Containers are rank 1 or 2, so shapes always fit inline
const STACK_DIMS: usize = 2;

/// Shape type: dimensions of a container
pub type Shape = SmallVec<[usize; STACK_DIMS]>;

/// Strides type: element offsets between consecutive elements along each dimension
/// Signed so that stride arithmetic composes with isize offsets
/// NOTE: Strides are in ELEMENTS, not bytes
pub type Strides = SmallVec<[isize; STACK_DIMS]>;

/// Memory order for rank-2 containers
///
/// Determines which dimension is dense in storage. Rank-1 containers have a
/// single stride and no order distinction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Order {
    /// Row-major (C order): elements of a row are adjacent
    #[default]
    RowMajor,
    /// Column-major (Fortran order): elements of a column are adjacent
    ColMajor,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RowMajor => write!(f, "row-major"),
            Self::ColMajor => write!(f, "col-major"),
        }
    }
}

/// A strided index range along one dimension: `start, start+step, ...` up to
/// but excluding `stop`
///
/// Selects exactly `ceil((stop - start) / step)` indices.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StridedRange {
    /// First index (inclusive)
    pub start: usize,
    /// End index (exclusive)
    pub stop: usize,
    /// Distance between selected indices
    pub step: usize,
}

impl StridedRange {
    /// Create a strided range
    pub const fn new(start: usize, stop: usize, step: usize) -> Self {
        Self { start, stop, step }
    }

    /// Number of indices the range selects
    ///
    /// Degenerate ranges (`stop <= start` or `step == 0`) select none.
    /// [`StridedRange::check`] rejects a zero step before a view is built.
    #[inline]
    pub const fn len(&self) -> usize {
        if self.step == 0 {
            return 0;
        }
        self.stop.saturating_sub(self.start).div_ceil(self.step)
    }

    /// True if the range selects no indices
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.stop <= self.start
    }

    /// Validate against a backing extent
    pub fn check(&self, len: usize) -> crate::error::Result<()> {
        if self.step == 0 {
            return Err(crate::error::Error::invalid_argument(
                "step",
                "step must be nonzero",
            ));
        }
        if self.start > self.stop || self.stop > len {
            return Err(crate::error::Error::ViewOutOfBounds {
                start: self.start,
                stop: self.stop,
                len,
            });
        }
        Ok(())
    }
}

/// Layout describes the memory layout of a container
///
/// Elements live in a backing buffer, but not necessarily densely or in
/// row-major order. The layout specifies how to compute the element offset
/// of any position:
///
/// Offset of element at indices [i0, i1, ..., in]:
///   offset + i0 * strides[0] + i1 * strides[1] + ... + in * strides[n]
#[derive(Clone, PartialEq, Eq)]
pub struct Layout {
    /// Shape: size along each dimension
    shape: Shape,
    /// Strides: offset (in elements) between consecutive elements along each dimension
    strides: Strides,
    /// Offset: starting element index in the underlying storage
    offset: usize,
}

impl Layout {
    /// Create a new contiguous (row-major) layout from a shape
    pub fn contiguous(shape: &[usize]) -> Self {
        Self::with_order(shape, Order::RowMajor)
    }

    /// Create a dense layout in the given memory order
    ///
    /// For rank-1 shapes the order makes no difference.
    pub fn with_order(shape: &[usize], order: Order) -> Self {
        let shape: Shape = shape.iter().copied().collect();
        let strides = Self::compute_dense_strides(&shape, order);
        Self {
            shape,
            strides,
            offset: 0,
        }
    }

    /// Create a layout with explicit shape, strides, and offset
    pub fn new(shape: Shape, strides: Strides, offset: usize) -> Self {
        debug_assert_eq!(shape.len(), strides.len());
        Self {
            shape,
            strides,
            offset,
        }
    }

    /// Compute dense strides for a shape in the given order
    fn compute_dense_strides(shape: &[usize], order: Order) -> Strides {
        let mut strides: Strides = SmallVec::with_capacity(shape.len());
        let mut stride = 1isize;

        match order {
            Order::RowMajor => {
                for &dim in shape.iter().rev() {
                    strides.push(stride);
                    stride *= dim as isize;
                }
                strides.reverse();
            }
            Order::ColMajor => {
                for &dim in shape.iter() {
                    strides.push(stride);
                    stride *= dim as isize;
                }
            }
        }

        strides
    }

    /// Get the shape
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Get the strides
    #[inline]
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    /// Get the offset
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of dimensions (rank)
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements
    #[inline]
    pub fn elem_count(&self) -> usize {
        self.shape.iter().product()
    }

    /// Check if memory is dense row-major starting at offset 0
    pub fn is_contiguous(&self) -> bool {
        let expected = Self::compute_dense_strides(&self.shape, Order::RowMajor);
        self.strides == expected && self.offset == 0
    }

    /// Compute the linear element offset for given indices
    pub fn index(&self, indices: &[usize]) -> Option<usize> {
        if indices.len() != self.ndim() {
            return None;
        }

        // Check bounds
        for (idx, &dim) in indices.iter().zip(self.shape.iter()) {
            if *idx >= dim {
                return None;
            }
        }

        let mut linear = self.offset as isize;
        for (&idx, &stride) in indices.iter().zip(self.strides.iter()) {
            linear += idx as isize * stride;
        }

        Some(linear as usize)
    }

    /// Derive a view layout restricted by one strided range per dimension
    ///
    /// The caller must have validated each range against this layout's shape.
    pub fn view(&self, ranges: &[StridedRange]) -> Self {
        debug_assert_eq!(ranges.len(), self.ndim());

        let mut offset = self.offset as isize;
        let mut shape: Shape = SmallVec::with_capacity(self.ndim());
        let mut strides: Strides = SmallVec::with_capacity(self.ndim());

        for (range, &stride) in ranges.iter().zip(self.strides.iter()) {
            offset += range.start as isize * stride;
            shape.push(range.len());
            strides.push(stride * range.step as isize);
        }

        Self::new(shape, strides, offset as usize)
    }
}

impl fmt::Debug for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Layout {{ shape: {:?}, strides: {:?}, offset: {} }}",
            self.shape.as_slice(),
            self.strides.as_slice(),
            self.offset
        )
    }
}
