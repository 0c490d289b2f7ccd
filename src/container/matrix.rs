//! Device-backed rank-2 container with explicit memory order

use super::{Layout, Order, Storage, StridedRange, gather_bytes, scatter_bytes};
use crate::dtype::{self, DType};
use crate::error::{Error, Result};
use crate::host::HostArray;
use crate::runtime::{Context, Runtime};
use std::ops::Range;

/// Rank-2 container stored on a compute device
///
/// Every matrix carries an [`Order`] tag recording whether its backing
/// storage is row-major or column-major. Views (2-D ranges and slices)
/// share storage with the matrix they were derived from and inherit its
/// order tag.
pub struct Matrix<R: Runtime> {
    storage: Storage<R>,
    layout: Layout,
    order: Order,
}

impl<R: Runtime> Matrix<R> {
    /// Upload a rank-2 host array to the device in the requested order
    pub fn from_host(host: &HostArray, order: Order, ctx: &Context<R>) -> Result<Self> {
        if host.ndim() != 2 {
            return Err(Error::Rank { ndim: host.ndim() });
        }

        let out = Self::zeros_impl(host.shape()[0], host.shape()[1], host.dtype(), order, ctx);
        let bytes = dtype::f64s_to_bytes(&host.to_f64_vec(), host.dtype());
        scatter_bytes(&bytes, &out.storage, &out.layout);
        Ok(out)
    }

    /// Create a zero-filled matrix
    pub fn zeros(rows: usize, cols: usize, dtype: DType, order: Order, ctx: &Context<R>) -> Self {
        Self::zeros_impl(rows, cols, dtype, order, ctx)
    }

    /// Create a matrix filled with ones
    pub fn ones(rows: usize, cols: usize, dtype: DType, order: Order, ctx: &Context<R>) -> Self {
        let out = Self::zeros_impl(rows, cols, dtype, order, ctx);
        let bytes = dtype::f64s_to_bytes(&vec![1.0; rows * cols], dtype);
        scatter_bytes(&bytes, &out.storage, &out.layout);
        out
    }

    fn zeros_impl(rows: usize, cols: usize, dtype: DType, order: Order, ctx: &Context<R>) -> Self {
        let storage = Storage::new(rows * cols, dtype, ctx.device());
        let layout = Layout::with_order(&[rows, cols], order);
        Self {
            storage,
            layout,
            order,
        }
    }

    /// Number of rows
    #[inline]
    pub fn rows(&self) -> usize {
        self.layout.shape()[0]
    }

    /// Number of columns
    #[inline]
    pub fn cols(&self) -> usize {
        self.layout.shape()[1]
    }

    /// Shape as `[rows, cols]`
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    /// Element type
    #[inline]
    pub fn dtype(&self) -> DType {
        self.storage.dtype()
    }

    /// Memory order of the backing storage
    #[inline]
    pub fn order(&self) -> Order {
        self.order
    }

    /// The underlying storage (shared with any views)
    #[inline]
    pub fn storage(&self) -> &Storage<R> {
        &self.storage
    }

    /// Layout metadata (shape, strides, offset)
    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Contiguous 2-D block view over the given row and column ranges
    pub fn range(&self, rows: Range<usize>, cols: Range<usize>) -> Result<Self> {
        self.slice(
            StridedRange::new(rows.start, rows.end, 1),
            StridedRange::new(cols.start, cols.end, 1),
        )
    }

    /// Strided 2-D view with an independent strided range per dimension
    ///
    /// The view has `rows.len() x cols.len()` elements, where each range
    /// selects `ceil((stop - start) / step)` indices.
    pub fn slice(&self, rows: StridedRange, cols: StridedRange) -> Result<Self> {
        rows.check(self.rows())?;
        cols.check(self.cols())?;
        Ok(Self {
            storage: self.storage.clone(),
            layout: self.layout.view(&[rows, cols]),
            order: self.order,
        })
    }

    /// Write the elements of `src` into this container (or view)
    ///
    /// Shapes and dtypes must match exactly. The memory orders of the two
    /// sides are free to differ: assignment is by logical index.
    pub fn assign(&self, src: &Matrix<R>) -> Result<()> {
        if src.shape() != self.shape() {
            return Err(Error::shape_mismatch(self.shape(), src.shape()));
        }
        if src.dtype() != self.dtype() {
            return Err(Error::dtype_mismatch(self.dtype(), src.dtype()));
        }

        let bytes = gather_bytes(&src.storage, &src.layout);
        scatter_bytes(&bytes, &self.storage, &self.layout);
        Ok(())
    }

    /// Copy this matrix fully into host memory (row-major)
    pub fn to_host(&self) -> HostArray {
        let bytes = gather_bytes(&self.storage, &self.layout);
        HostArray::from_dense_bytes(bytes, self.dtype(), self.layout.shape())
    }

    /// Copy this matrix into host memory as row-major f64 values
    pub fn to_f64_vec(&self) -> Vec<f64> {
        dtype::bytes_to_f64s(&gather_bytes(&self.storage, &self.layout), self.dtype())
    }
}

impl<R: Runtime> Clone for Matrix<R> {
    /// Zero-copy clone: the new matrix shares this matrix's storage
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            layout: self.layout.clone(),
            order: self.order,
        }
    }
}

impl<R: Runtime> std::fmt::Debug for Matrix<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matrix")
            .field("shape", &self.shape())
            .field("dtype", &self.dtype())
            .field("order", &self.order)
            .field("layout", &self.layout)
            .finish()
    }
}
