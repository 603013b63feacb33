//! Order statistics over 3, 5, 7 and 8 values.
//!
//! All functions work on plain `Copy + PartialOrd` values and never
//! allocate. Inputs are expected to be free of NaN.

use num_traits::Float;

/// Sort a small array in place with an insertion sort.
#[inline]
fn sort_small<T: Copy + PartialOrd, const N: usize>(v: &mut [T; N]) {
    for i in 1..N {
        let mut j = i;
        while j > 0 && v[j] < v[j - 1] {
            v.swap(j, j - 1);
            j -= 1;
        }
    }
}

#[inline]
fn min_of<T: Copy + PartialOrd>(v: &[T]) -> T {
    let mut m = v[0];
    for &x in &v[1..] {
        if x < m {
            m = x;
        }
    }
    m
}

#[inline]
fn max_of<T: Copy + PartialOrd>(v: &[T]) -> T {
    let mut m = v[0];
    for &x in &v[1..] {
        if x > m {
            m = x;
        }
    }
    m
}

/// Median of three values.
#[inline]
pub fn med3<T: Copy + PartialOrd>(a: T, b: T, c: T) -> T {
    if a < b {
        if b < c {
            b
        } else if a < c {
            c
        } else {
            a
        }
    } else if a < c {
        a
    } else if b < c {
        c
    } else {
        b
    }
}

/// Median of five values.
#[inline]
pub fn med5<T: Copy + PartialOrd>(a: T, b: T, c: T, d: T, e: T) -> T {
    let mut v = [a, b, c, d, e];
    sort_small(&mut v);
    v[2]
}

/// Median of seven values.
#[inline]
pub fn med7<T: Copy + PartialOrd>(a: T, b: T, c: T, d: T, e: T, f: T, g: T) -> T {
    let mut v = [a, b, c, d, e, f, g];
    sort_small(&mut v);
    v[3]
}

/// Minimum of three values.
#[inline]
pub fn min3<T: Copy + PartialOrd>(a: T, b: T, c: T) -> T {
    min_of(&[a, b, c])
}

/// Minimum of five values.
#[inline]
pub fn min5<T: Copy + PartialOrd>(a: T, b: T, c: T, d: T, e: T) -> T {
    min_of(&[a, b, c, d, e])
}

/// Minimum of eight values.
#[inline]
pub fn min8<T: Copy + PartialOrd>(v: [T; 8]) -> T {
    min_of(&v)
}

/// Maximum of three values.
#[inline]
pub fn max3<T: Copy + PartialOrd>(a: T, b: T, c: T) -> T {
    max_of(&[a, b, c])
}

/// Maximum of five values.
#[inline]
pub fn max5<T: Copy + PartialOrd>(a: T, b: T, c: T, d: T, e: T) -> T {
    max_of(&[a, b, c, d, e])
}

/// Maximum of eight values.
#[inline]
pub fn max8<T: Copy + PartialOrd>(v: [T; 8]) -> T {
    max_of(&v)
}

/// Mean of five values after dropping one minimum and one maximum.
///
/// The first occurrence of the minimum is dropped, then the first
/// occurrence of the maximum among the remaining values. The three values
/// left are summed in input order and divided by three.
///
/// # Examples
///
/// ```
/// use framesieve_filter::select::trimmed_mean5;
///
/// assert_eq!(trimmed_mean5(1.0f32, 2.0, 3.0, 4.0, 100.0), 3.0);
/// ```
#[inline]
pub fn trimmed_mean5<T: Float>(a: T, b: T, c: T, d: T, e: T) -> T {
    let v = [a, b, c, d, e];

    let mut imin = 0;
    for i in 1..5 {
        if v[i] < v[imin] {
            imin = i;
        }
    }

    let mut imax = if imin == 0 { 1 } else { 0 };
    for i in 0..5 {
        if i != imin && v[i] > v[imax] {
            imax = i;
        }
    }

    let mut sum = T::zero();
    for (i, &x) in v.iter().enumerate() {
        if i != imin && i != imax {
            sum = sum + x;
        }
    }

    let three = T::one() + T::one() + T::one();
    sum / three
}
