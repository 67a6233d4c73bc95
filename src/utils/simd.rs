//! Byte-array search primitives for the small (N4/N8/N16/N32) node shapes.
//!
//! Each shape stores its keys as a flat `[u8; WIDTH]` array. Finding a byte's
//! position, or the position a new byte should be inserted at to keep the
//! array sorted, is the hot path for every lookup and insert. We special-case
//! the widths wide enough to benefit from SIMD (16 and 32) and fall back to
//! linear/binary scans everywhere else, matching what x86_64 SSE2/AVX2 and
//! aarch64 NEON actually buy you at these sizes.

#[cfg(all(
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "sse2"
))]
#[inline]
fn x86_sse_seek_insert_pos_16(key: u8, keys: [u8; 16], num_children: usize) -> Option<usize> {
    use std::arch::x86_64::{
        __m128i, _mm_cmplt_epi8, _mm_loadu_si128, _mm_movemask_epi8, _mm_set1_epi8, _mm_xor_si128,
    };

    // `_mm_cmplt_epi8` compares signed bytes; key bytes are unsigned, so bias
    // both operands by flipping the sign bit (XOR 0x80) before comparing,
    // the standard signed/unsigned-compare conversion trick.
    let bitfield = unsafe {
        let bias = _mm_set1_epi8(-128i8);
        let cmp_vec = _mm_xor_si128(_mm_set1_epi8(key as i8), bias);
        let node_keys_vec =
            _mm_xor_si128(_mm_loadu_si128(keys.as_ptr() as *const __m128i), bias);
        let cmp = _mm_cmplt_epi8(cmp_vec, node_keys_vec);
        let mask = (1 << num_children) - 1;
        _mm_movemask_epi8(cmp) & mask
    };

    if bitfield != 0 {
        return Some(bitfield.trailing_zeros() as usize);
    }
    None
}

#[cfg(all(
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "sse2"
))]
#[inline]
fn x86_sse_find_key_16_up_to(key: u8, keys: [u8; 16], num_children: usize) -> Option<usize> {
    use std::arch::x86_64::{
        __m128i, _mm_cmpeq_epi8, _mm_loadu_si128, _mm_movemask_epi8, _mm_set1_epi8,
    };

    let bitfield = unsafe {
        let key_vec = _mm_set1_epi8(key as i8);
        let results = _mm_cmpeq_epi8(key_vec, _mm_loadu_si128(keys.as_ptr() as *const __m128i));
        let mask = (1 << num_children) - 1;
        _mm_movemask_epi8(results) & mask
    };
    if bitfield != 0 {
        return Some(bitfield.trailing_zeros() as usize);
    }
    None
}

#[cfg(all(target_arch = "x86_64", target_feature = "avx2"))]
#[target_feature(enable = "avx2")]
#[inline]
unsafe fn x86_64_avx_find_key_32_up_to(
    key: u8,
    keys: [u8; 32],
    num_children: usize,
) -> Option<usize> {
    use std::arch::x86_64::{
        __m256i, _mm256_cmpeq_epi8, _mm256_loadu_si256, _mm256_movemask_epi8, _mm256_set1_epi8,
    };

    let bitfield = unsafe {
        let key_vec = _mm256_set1_epi8(key as i8);
        let results =
            _mm256_cmpeq_epi8(key_vec, _mm256_loadu_si256(keys.as_ptr() as *const __m256i));
        let mask: i64 = (1 << num_children) - 1;
        _mm256_movemask_epi8(results) as i64 & mask
    };
    if bitfield != 0 {
        return Some(bitfield.trailing_zeros() as usize);
    }
    None
}

#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
#[inline]
fn aarch64_neon_seek_insert_pos(key: u8, keys: &[u8], num_children: usize) -> Option<usize> {
    use std::arch::aarch64::*;
    unsafe {
        let key_vec = vdupq_n_u8(key);
        let node_keys_vec = vld1q_u8(keys.as_ptr());
        let cmp_vec = vcltq_u8(key_vec, node_keys_vec);
        let eq_mask = vreinterpretq_u16_u8(cmp_vec);
        let res = vshrn_n_u16::<4>(eq_mask);
        let matches = vget_lane_u64::<0>(vreinterpret_u64_u8(res));
        if matches != 0 {
            let shifted = (matches.trailing_zeros() >> 2) as usize;
            if shifted < num_children {
                return Some(shifted);
            }
        }
        None
    }
}

#[cfg(target_arch = "aarch64")]
#[inline]
fn aarch64_neon_find_key(key: u8, keys: &[u8], num_children: usize) -> Option<usize> {
    use std::arch::aarch64::*;
    unsafe {
        if num_children == 0 {
            return None;
        }
        let key_vec = vdupq_n_u8(key);
        let node_keys_vec = vld1q_u8(keys.as_ptr());
        let cmp_vec = vceqq_u8(key_vec, node_keys_vec);
        let eq_mask = vreinterpretq_u16_u8(cmp_vec);
        let res = vshrn_n_u16::<4>(eq_mask);
        let matches = vget_lane_u64::<0>(vreinterpret_u64_u8(res));
        if matches != 0 {
            let shifted = (matches.trailing_zeros() >> 2) as usize;
            if shifted < num_children {
                return Some(shifted);
            }
        }
        None
    }
}

fn binary_find_key(key: u8, keys: &[u8], num_children: usize) -> Option<usize> {
    let mut left = 0;
    let mut right = num_children;
    while left < right {
        let mid = (left + right) / 2;
        match keys[mid].cmp(&key) {
            std::cmp::Ordering::Less => left = mid + 1,
            std::cmp::Ordering::Equal => return Some(mid),
            std::cmp::Ordering::Greater => right = mid,
        }
    }
    None
}

/// Find `key`'s position in a sorted key array, width-dispatched.
#[allow(unreachable_code)]
pub fn find_key_sorted<const WIDTH: usize>(key: u8, keys: &[u8], num_children: usize) -> Option<usize> {
    if WIDTH <= 8 {
        return (0..num_children).find(|&i| keys[i] == key);
    }

    if WIDTH == 16 {
        #[cfg(all(
            any(target_arch = "x86", target_arch = "x86_64"),
            target_feature = "sse2"
        ))]
        {
            return x86_sse_find_key_16_up_to(key, keys.try_into().unwrap(), num_children);
        }
        #[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
        {
            return aarch64_neon_find_key(key, keys, num_children);
        }
    }

    if WIDTH == 32 {
        #[cfg(all(target_arch = "x86_64", target_feature = "avx2"))]
        {
            return unsafe { x86_64_avx_find_key_32_up_to(key, keys.try_into().unwrap(), num_children) };
        }
    }

    binary_find_key(key, keys, num_children)
}

/// Find `key`'s position in a key array that is *not* necessarily sorted,
/// width-dispatched. Equality-compare SIMD doesn't care about order, so this
/// reuses the same vectorized paths as [`find_key_sorted`] but falls back to
/// a plain linear scan instead of a binary search when no SIMD path matched.
#[allow(unreachable_code)]
pub fn find_key_any<const WIDTH: usize>(key: u8, keys: &[u8], num_children: usize) -> Option<usize> {
    if WIDTH <= 8 {
        return (0..num_children).find(|&i| keys[i] == key);
    }

    if WIDTH == 16 {
        #[cfg(all(
            any(target_arch = "x86", target_arch = "x86_64"),
            target_feature = "sse2"
        ))]
        {
            return x86_sse_find_key_16_up_to(key, keys.try_into().unwrap(), num_children);
        }
        #[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
        {
            return aarch64_neon_find_key(key, keys, num_children);
        }
    }

    if WIDTH == 32 {
        #[cfg(all(target_arch = "x86_64", target_feature = "avx2"))]
        {
            return unsafe { x86_64_avx_find_key_32_up_to(key, keys.try_into().unwrap(), num_children) };
        }
    }

    (0..num_children).find(|&i| keys[i] == key)
}

/// Find the insertion position for `key` in a sorted array of `num_children`
/// live entries, width-dispatched.
pub fn find_insert_pos<const WIDTH: usize>(key: u8, keys: &[u8], num_children: usize) -> usize {
    if WIDTH == 16 {
        #[cfg(all(
            any(target_arch = "x86", target_arch = "x86_64"),
            target_feature = "sse2"
        ))]
        {
            return x86_sse_seek_insert_pos_16(key, keys.try_into().unwrap(), num_children)
                .unwrap_or(num_children);
        }
        #[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
        {
            return aarch64_neon_seek_insert_pos(key, keys, num_children).unwrap_or(num_children);
        }
    }

    (0..num_children)
        .find(|&i| key < keys[i])
        .unwrap_or(num_children)
}
