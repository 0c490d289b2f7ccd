//! CPU runtime implementation

use super::client::CpuClient;
use super::device::CpuDevice;
use crate::runtime::Runtime;
use std::alloc::{Layout as AllocLayout, alloc_zeroed, dealloc};

/// CPU compute runtime
///
/// This is the default runtime and works on any platform.
/// Memory is allocated on the heap using the system allocator.
#[derive(Clone, Debug, Default)]
pub struct CpuRuntime;

impl Runtime for CpuRuntime {
    type Device = CpuDevice;
    type Client = CpuClient;

    fn name() -> &'static str {
        "cpu"
    }

    fn allocate(size_bytes: usize, _device: &Self::Device) -> u64 {
        if size_bytes == 0 {
            return 0;
        }

        // Use aligned allocation for SIMD compatibility
        let align = 64;
        let layout =
            AllocLayout::from_size_align(size_bytes, align).expect("Invalid allocation layout");

        let ptr = unsafe { alloc_zeroed(layout) };

        if ptr.is_null() {
            panic!("Failed to allocate {} bytes", size_bytes);
        }

        ptr as u64
    }

    fn deallocate(ptr: u64, size_bytes: usize, _device: &Self::Device) {
        if ptr == 0 || size_bytes == 0 {
            return;
        }

        let align = 64;
        let layout =
            AllocLayout::from_size_align(size_bytes, align).expect("Invalid allocation layout");

        unsafe {
            dealloc(ptr as *mut u8, layout);
        }
    }

    fn copy_to_device(src: &[u8], dst: u64, _device: &Self::Device) {
        if src.is_empty() || dst == 0 {
            return;
        }

        unsafe {
            std::ptr::copy_nonoverlapping(src.as_ptr(), dst as *mut u8, src.len());
        }
    }

    fn copy_from_device(src: u64, dst: &mut [u8], _device: &Self::Device) {
        if dst.is_empty() || src == 0 {
            return;
        }

        unsafe {
            std::ptr::copy_nonoverlapping(src as *const u8, dst.as_mut_ptr(), dst.len());
        }
    }

    fn copy_strided(
        src_handle: u64,
        src_byte_offset: usize,
        dst_handle: u64,
        shape: &[usize],
        strides: &[isize],
        elem_size: usize,
        _device: &Self::Device,
    ) {
        if src_handle == 0 || dst_handle == 0 || shape.is_empty() {
            return;
        }

        let numel: usize = shape.iter().product();
        if numel == 0 {
            return;
        }

        // For CPU, we can use pointer arithmetic directly
        let src_base = (src_handle as usize + src_byte_offset) as *const u8;
        let dst_base = dst_handle as *mut u8;

        for_each_strided(shape, strides, |dst_offset, src_elem_offset| unsafe {
            std::ptr::copy_nonoverlapping(
                src_base.offset(src_elem_offset * elem_size as isize),
                dst_base.add(dst_offset * elem_size),
                elem_size,
            );
        });
    }

    fn write_strided(
        src: &[u8],
        dst_handle: u64,
        dst_byte_offset: usize,
        shape: &[usize],
        strides: &[isize],
        elem_size: usize,
        _device: &Self::Device,
    ) {
        if src.is_empty() || dst_handle == 0 || shape.is_empty() {
            return;
        }

        let numel: usize = shape.iter().product();
        if numel == 0 {
            return;
        }
        debug_assert_eq!(src.len(), numel * elem_size);

        let src_base = src.as_ptr();
        let dst_base = (dst_handle as usize + dst_byte_offset) as *mut u8;

        for_each_strided(shape, strides, |src_offset, dst_elem_offset| unsafe {
            std::ptr::copy_nonoverlapping(
                src_base.add(src_offset * elem_size),
                dst_base.offset(dst_elem_offset * elem_size as isize),
                elem_size,
            );
        });
    }

    fn default_device() -> Self::Device {
        CpuDevice::new()
    }

    fn default_client(device: &Self::Device) -> Self::Client {
        CpuClient::new(device.clone())
    }
}

/// Walk `shape` in row-major order, yielding the dense element index on the
/// contiguous side and the strided element offset on the strided side.
fn for_each_strided(shape: &[usize], strides: &[isize], mut f: impl FnMut(usize, isize)) {
    let numel: usize = shape.iter().product();
    let mut indices = vec![0usize; shape.len()];

    for dense in 0..numel {
        let mut strided: isize = 0;
        for (i, &idx) in indices.iter().enumerate() {
            strided += (idx as isize) * strides[i];
        }

        f(dense, strided);

        // Increment indices (row-major order)
        for dim in (0..shape.len()).rev() {
            indices[dim] += 1;
            if indices[dim] < shape[dim] {
                break;
            }
            indices[dim] = 0;
        }
    }
}
