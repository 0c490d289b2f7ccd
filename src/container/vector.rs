//! Device-backed rank-1 container

use super::{Layout, Storage, StridedRange, gather_bytes, scatter_bytes};
use crate::dtype::{self, DType, Element};
use crate::error::{Error, Result};
use crate::host::HostArray;
use crate::runtime::{Context, Runtime};
use std::ops::Range;

/// Rank-1 container stored on a compute device
///
/// A `Vector` is either a full container owning its storage, or a view
/// (range or slice) sharing storage with the container it was derived from.
/// Views have read/write semantics equivalent to the backing container:
/// [`Vector::assign`] writes through the view's strides.
pub struct Vector<R: Runtime> {
    storage: Storage<R>,
    layout: Layout,
}

impl<R: Runtime> Vector<R> {
    /// Upload a rank-1 host array to the device
    pub fn from_host(host: &HostArray, ctx: &Context<R>) -> Result<Self> {
        if host.ndim() != 1 {
            return Err(Error::Rank { ndim: host.ndim() });
        }

        let bytes = dtype::f64s_to_bytes(&host.to_f64_vec(), host.dtype());
        let storage = Storage::from_bytes(&bytes, host.dtype(), ctx.device());
        let layout = Layout::contiguous(host.shape());
        Ok(Self { storage, layout })
    }

    /// Create a vector from a typed slice
    pub fn from_slice<T: Element>(data: &[T], ctx: &Context<R>) -> Self {
        let storage = Storage::from_slice(data, ctx.device());
        let layout = Layout::contiguous(&[data.len()]);
        Self { storage, layout }
    }

    /// Create a vector filled with ones
    pub fn ones(len: usize, dtype: DType, ctx: &Context<R>) -> Self {
        let bytes = dtype::f64s_to_bytes(&vec![1.0; len], dtype);
        let storage = Storage::from_bytes(&bytes, dtype, ctx.device());
        let layout = Layout::contiguous(&[len]);
        Self { storage, layout }
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.layout.shape()[0]
    }

    /// True if the vector has no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element type
    #[inline]
    pub fn dtype(&self) -> DType {
        self.storage.dtype()
    }

    /// The underlying storage (shared with any views)
    #[inline]
    pub fn storage(&self) -> &Storage<R> {
        &self.storage
    }

    /// Layout metadata (shape, stride, offset)
    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Contiguous sub-range view over `[range.start, range.end)`
    ///
    /// The view shares this vector's storage; writing through it writes into
    /// the backing memory.
    pub fn range(&self, range: Range<usize>) -> Result<Self> {
        self.slice(StridedRange::new(range.start, range.end, 1))
    }

    /// Strided sub-slice view selecting `start, start+step, ...` below `stop`
    ///
    /// The view has exactly `ceil((stop - start) / step)` elements.
    pub fn slice(&self, range: StridedRange) -> Result<Self> {
        range.check(self.len())?;
        Ok(Self {
            storage: self.storage.clone(),
            layout: self.layout.view(&[range]),
        })
    }

    /// Write the elements of `src` into this container (or view)
    ///
    /// Shapes and dtypes must match exactly.
    pub fn assign(&self, src: &Vector<R>) -> Result<()> {
        if src.len() != self.len() {
            return Err(Error::shape_mismatch(
                self.layout.shape(),
                src.layout.shape(),
            ));
        }
        if src.dtype() != self.dtype() {
            return Err(Error::dtype_mismatch(self.dtype(), src.dtype()));
        }

        let bytes = gather_bytes(&src.storage, &src.layout);
        scatter_bytes(&bytes, &self.storage, &self.layout);
        Ok(())
    }

    /// Copy this vector fully into host memory
    pub fn to_host(&self) -> HostArray {
        let bytes = gather_bytes(&self.storage, &self.layout);
        HostArray::from_dense_bytes(bytes, self.dtype(), self.layout.shape())
    }

    /// Copy this vector into host memory as f64 values
    pub fn to_f64_vec(&self) -> Vec<f64> {
        dtype::bytes_to_f64s(&gather_bytes(&self.storage, &self.layout), self.dtype())
    }
}

impl<R: Runtime> Clone for Vector<R> {
    /// Zero-copy clone: the new vector shares this vector's storage
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            layout: self.layout.clone(),
        }
    }
}

impl<R: Runtime> std::fmt::Debug for Vector<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vector")
            .field("len", &self.len())
            .field("dtype", &self.dtype())
            .field("layout", &self.layout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::cpu::CpuRuntime;

    fn ctx() -> Context<CpuRuntime> {
        Context::default()
    }

    #[test]
    fn test_from_slice_to_host() {
        let ctx = ctx();
        let v = Vector::from_slice(&[1.0f64, 2.0, 3.0], &ctx);
        assert_eq!(v.len(), 3);
        assert_eq!(v.dtype(), DType::F64);
        assert_eq!(v.to_f64_vec(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_range_view_reads_backing() {
        let ctx = ctx();
        let v = Vector::from_slice(&[0.0f32, 1.0, 2.0, 3.0, 4.0, 5.0], &ctx);
        let r = v.range(2..5).unwrap();
        assert_eq!(r.len(), 3);
        assert_eq!(r.to_f64_vec(), vec![2.0, 3.0, 4.0]);
        assert!(r.storage().shares_memory(v.storage()));
    }

    #[test]
    fn test_slice_view_stride_two() {
        let ctx = ctx();
        let v = Vector::from_slice(&[0.0f64, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0], &ctx);
        let s = v.slice(StridedRange::new(1, 7, 2)).unwrap();
        assert_eq!(s.len(), 3);
        assert_eq!(s.to_f64_vec(), vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn test_assign_through_view_writes_backing() {
        let ctx = ctx();
        let backing = Vector::ones(8, DType::F64, &ctx);
        let small = Vector::from_slice(&[7.0f64, 8.0], &ctx);
        let view = backing.slice(StridedRange::new(2, 6, 2)).unwrap();
        view.assign(&small).unwrap();
        assert_eq!(
            backing.to_f64_vec(),
            vec![1.0, 1.0, 7.0, 1.0, 8.0, 1.0, 1.0, 1.0]
        );
    }

    #[test]
    fn test_range_out_of_bounds() {
        let ctx = ctx();
        let v = Vector::from_slice(&[1.0f64; 4], &ctx);
        assert!(matches!(
            v.range(2..5),
            Err(Error::ViewOutOfBounds { stop: 5, len: 4, .. })
        ));
    }

    #[test]
    fn test_assign_shape_mismatch() {
        let ctx = ctx();
        let a = Vector::from_slice(&[1.0f64; 4], &ctx);
        let b = Vector::from_slice(&[1.0f64; 3], &ctx);
        assert!(matches!(a.assign(&b), Err(Error::ShapeMismatch { .. })));
    }
}
