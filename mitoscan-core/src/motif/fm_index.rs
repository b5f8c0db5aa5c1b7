//! FM-index over a byte string.
//!
//! The target is rank-compressed (`0` is reserved for the sentinel, present
//! bytes get ranks `1..` in byte order), its suffix array is built with SA-IS,
//! and occurrence counts over the BWT are checkpointed every
//! [`OCC_INTERVAL`] rows.

use std::ops::Range;

use bio::data_structures::suffix_array::suffix_array;

use crate::error::{CoreError, CoreResult};

/// Distance between occurrence checkpoints
pub const OCC_INTERVAL: usize = 64;

const SENTINEL: u8 = 0;
const ABSENT: u8 = 0;

#[derive(Debug, Clone)]
pub(crate) struct FmIndex {
    /// Rank of each byte value, `ABSENT` when the byte does not occur
    ranks: [u8; 256],
    /// Alphabet size including the sentinel
    sigma: usize,
    suffix_array: Vec<usize>,
    bwt: Vec<u8>,
    /// `less[c]`: number of text symbols smaller than `c`
    less: Vec<usize>,
    /// Row-major checkpoints, `sigma` counts per checkpoint
    occ: Vec<u32>,
}

impl FmIndex {
    pub(crate) fn build(target: &[u8]) -> CoreResult<Self> {
        if target.len() >= u32::MAX as usize {
            return Err(CoreError::invalid_input(format!(
                "target of {} bytes is too long to index",
                target.len()
            )));
        }

        let mut present = [false; 256];
        for &b in target {
            present[b as usize] = true;
        }
        let distinct = present.iter().filter(|&&p| p).count();
        if distinct == 256 {
            return Err(CoreError::invalid_input(
                "target uses all 256 byte values, leaving no sentinel symbol",
            ));
        }

        let mut ranks = [ABSENT; 256];
        let mut next = 1u8;
        for byte in 0..256 {
            if present[byte] {
                ranks[byte] = next;
                next = next.wrapping_add(1);
            }
        }
        let sigma = distinct + 1;

        let mut text: Vec<u8> = target.iter().map(|&b| ranks[b as usize]).collect();
        text.push(SENTINEL);
        let n = text.len();

        let suffix_array = if target.is_empty() {
            vec![0]
        } else {
            suffix_array(&text)
        };

        let bwt: Vec<u8> = suffix_array
            .iter()
            .map(|&pos| if pos == 0 { text[n - 1] } else { text[pos - 1] })
            .collect();

        let mut counts = vec![0usize; sigma];
        for &c in &text {
            counts[c as usize] += 1;
        }
        let mut less = vec![0usize; sigma];
        let mut total = 0;
        for (c, &count) in counts.iter().enumerate() {
            less[c] = total;
            total += count;
        }

        let mut running = vec![0u32; sigma];
        let mut occ = Vec::with_capacity((n / OCC_INTERVAL + 1) * sigma);
        for (i, &c) in bwt.iter().enumerate() {
            if i % OCC_INTERVAL == 0 {
                occ.extend_from_slice(&running);
            }
            running[c as usize] += 1;
        }
        if n % OCC_INTERVAL == 0 {
            occ.extend_from_slice(&running);
        }

        Ok(Self {
            ranks,
            sigma,
            suffix_array,
            bwt,
            less,
            occ,
        })
    }

    /// Occurrences of rank `c` in `bwt[..i]`.
    #[inline]
    fn occ(&self, c: u8, i: usize) -> usize {
        let checkpoint = i / OCC_INTERVAL;
        let base = self.occ[checkpoint * self.sigma + c as usize] as usize;
        let tail = self.bwt[checkpoint * OCC_INTERVAL..i]
            .iter()
            .filter(|&&b| b == c)
            .count();
        base + tail
    }

    /// Suffix-array interval of rows prefixed by `pattern`; empty if none.
    pub(crate) fn backward_search(&self, pattern: &[u8]) -> Range<usize> {
        let mut lo = 0;
        let mut hi = self.bwt.len();

        for &byte in pattern.iter().rev() {
            let c = self.ranks[byte as usize];
            if c == ABSENT {
                return 0..0;
            }
            lo = self.less[c as usize] + self.occ(c, lo);
            hi = self.less[c as usize] + self.occ(c, hi);
            if lo >= hi {
                return 0..0;
            }
        }

        lo..hi
    }

    /// Target offsets of every occurrence of `pattern`, ascending.
    pub(crate) fn locate(&self, pattern: &[u8]) -> Vec<usize> {
        let interval = self.backward_search(pattern);
        let mut positions = self.suffix_array[interval].to_vec();
        positions.sort_unstable();
        positions
    }

    /// Approximate heap footprint in bytes
    pub(crate) fn size_in_bytes(&self) -> usize {
        self.suffix_array.len() * std::mem::size_of::<usize>()
            + self.bwt.len()
            + self.less.len() * std::mem::size_of::<usize>()
            + self.occ.len() * std::mem::size_of::<u32>()
    }
}
