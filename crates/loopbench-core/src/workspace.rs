//! The shared numeric working set mutated by every kernel
//!
//! All arrays are allocated once, aligned to a platform vector width, and
//! live for the whole process. Kernels mutate them in place; isolation
//! between kernels is guaranteed only by [`crate::initialise`] re-running
//! before each kernel, never by copying.

use std::alloc::{alloc, dealloc, Layout};
use std::marker::PhantomData;
use std::mem;
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::ptr::NonNull;

use num_traits::Zero;

use crate::config::{BenchConfig, ARRAY_ALIGNMENT};
use crate::Real;

/// A fixed-length, vector-width-aligned buffer.
///
/// Unlike a `Vec`, the length is fixed at construction and every element is
/// zero-initialized, so kernels can index the full extent immediately.
/// Dereferences to a slice for iteration and indexing.
pub struct AlignedVec<T> {
    ptr: NonNull<T>,
    len: usize,
    layout: Layout,
    _marker: PhantomData<T>,
}

impl<T: Copy + Zero> AlignedVec<T> {
    /// Allocate `len` zeroed elements aligned to [`ARRAY_ALIGNMENT`].
    ///
    /// # Panics
    /// If `len` is zero or allocation fails.
    pub fn new(len: usize) -> Self {
        assert!(len > 0, "AlignedVec length must be positive");
        assert!(
            ARRAY_ALIGNMENT >= mem::align_of::<T>(),
            "Alignment must be at least {}",
            mem::align_of::<T>()
        );

        let layout = Layout::from_size_align(len * mem::size_of::<T>(), ARRAY_ALIGNMENT)
            .expect("Invalid layout");

        let ptr = unsafe {
            let raw_ptr = alloc(layout) as *mut T;
            NonNull::new(raw_ptr).expect("Allocation failed")
        };

        let mut buf = Self {
            ptr,
            len,
            layout,
            _marker: PhantomData,
        };
        buf.fill_with(|_| T::zero());
        buf
    }

    /// Overwrite every element with a function of its index.
    #[inline]
    pub fn fill_with(&mut self, mut f: impl FnMut(usize) -> T) {
        for (i, slot) in self.as_mut_slice().iter_mut().enumerate() {
            *slot = f(i);
        }
    }

    /// View the full buffer as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// View the full buffer as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl<T> Drop for AlignedVec<T> {
    fn drop(&mut self) {
        unsafe {
            dealloc(self.ptr.as_ptr() as *mut u8, self.layout);
        }
    }
}

impl<T: Copy + Zero> Deref for AlignedVec<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: Copy + Zero> DerefMut for AlignedVec<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

/// A dense square matrix backed by an [`AlignedVec`], indexed by
/// `(row, column)` pairs in row-major order.
pub struct Matrix<T> {
    data: AlignedVec<T>,
    dim: usize,
}

impl<T: Copy + Zero> Matrix<T> {
    /// Allocate a zeroed `dim x dim` matrix.
    pub fn new(dim: usize) -> Self {
        Self {
            data: AlignedVec::new(dim * dim),
            dim,
        }
    }

    /// Matrix dimension (rows == columns).
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Overwrite every element with a function of its row-major flat index.
    #[inline]
    pub fn fill_with(&mut self, f: impl FnMut(usize) -> T) {
        self.data.fill_with(f);
    }

    /// Row-major view of the whole matrix.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.data.as_slice()
    }
}

impl<T: Copy + Zero> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        debug_assert!(row < self.dim && col < self.dim);
        &self.data[row * self.dim + col]
    }
}

impl<T: Copy + Zero> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        debug_assert!(row < self.dim && col < self.dim);
        &mut self.data[row * self.dim + col]
    }
}

/// The process-wide working set shared by every kernel.
///
/// Five 1-D vectors, three square matrices, one flattened buffer used for
/// packed-triangular walks, and one integer discriminant array. A kernel
/// must never allocate its own copy; everything operates on this identity.
pub struct Workspace {
    pub a: AlignedVec<Real>,
    pub b: AlignedVec<Real>,
    pub c: AlignedVec<Real>,
    pub d: AlignedVec<Real>,
    pub e: AlignedVec<Real>,
    pub aa: Matrix<Real>,
    pub bb: Matrix<Real>,
    pub cc: Matrix<Real>,
    /// Flattened `len_2d^2` buffer for computed-offset addressing.
    pub flat: AlignedVec<Real>,
    /// Discriminant array driving multi-way dispatch kernels.
    pub indx: AlignedVec<i32>,
    len_1d: usize,
    len_2d: usize,
}

impl Workspace {
    /// Allocate all arrays for the given configuration. Contents are zeroed;
    /// callers run [`crate::initialise`] before the first kernel.
    pub fn new(cfg: &BenchConfig) -> Self {
        let n1 = cfg.len_1d;
        let n2 = cfg.len_2d;
        Self {
            a: AlignedVec::new(n1),
            b: AlignedVec::new(n1),
            c: AlignedVec::new(n1),
            d: AlignedVec::new(n1),
            e: AlignedVec::new(n1),
            aa: Matrix::new(n2),
            bb: Matrix::new(n2),
            cc: Matrix::new(n2),
            flat: AlignedVec::new(n2 * n2),
            indx: AlignedVec::new(n1),
            len_1d: n1,
            len_2d: n2,
        }
    }

    /// Length of the 1-D vectors.
    #[inline]
    pub fn len_1d(&self) -> usize {
        self.len_1d
    }

    /// Dimension of the square matrices.
    #[inline]
    pub fn len_2d(&self) -> usize {
        self.len_2d
    }
}
