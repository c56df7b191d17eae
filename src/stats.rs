//! Avalanche statistics for the stages of SpookyHash.
//!
//! For every input bit, each round flips that bit and records which output
//! bits flip in response.  A good mixer flips every output bit with
//! probability one half, independently of the others.

use std::{fs::File, path::Path};

use nanorand::{Rng, WyRand};
use tracing::{debug, instrument, trace};

use crate::rehash::rehash64;

/// Minimum, average and maximum of some per-cell or per-row measure.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    pub min: f64,
    pub avg: f64,
    pub max: f64,
}

impl Summary {
    fn of<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let mut summary = Summary {
            min: f64::INFINITY,
            avg: 0.0,
            max: f64::NEG_INFINITY,
        };
        let mut count = 0usize;
        for v in values {
            summary.min = summary.min.min(v);
            summary.max = summary.max.max(v);
            summary.avg += v;
            count += 1;
        }
        summary.avg /= count.max(1) as f64;
        summary
    }
}

pub struct Stats {
    pub input_bit_len: usize,
    pub output_bit_len: usize,
    pub digest_bit_len: usize,

    // Number of rounds accumulated.
    pub sample_count: usize,

    // `input_bit_len * output_bit_len` flip counts, one row per input bit.
    // Empty if avalanche wasn't requested.
    pub avalanche_chart: Vec<u32>,

    // For every input bit and ordered pair of distinct output bits, counts of
    // (both flipped, neither, only the first, only the second).  Empty if the
    // bit independence criterion wasn't requested.
    pub bic_chart: Vec<[u32; 4]>,
}

impl Stats {
    pub fn new(
        input_bit_len: usize,
        output_bit_len: usize,
        digest_bit_len: usize,
        do_avalanche: bool,
        do_bic: bool,
    ) -> Self {
        Self {
            input_bit_len,
            output_bit_len,
            digest_bit_len,
            sample_count: 0,
            avalanche_chart: if do_avalanche {
                vec![0; input_bit_len * output_bit_len]
            } else {
                Vec::new()
            },
            bic_chart: if do_bic {
                vec![[0; 4]; input_bit_len * bic_stride(output_bit_len)]
            } else {
                Vec::new()
            },
        }
    }

    pub fn get_row(&self, in_bit: usize) -> &[u32] {
        let start = in_bit * self.output_bit_len;
        &self.avalanche_chart[start..(start + self.output_bit_len)]
    }

    fn probabilities(&self) -> impl Iterator<Item = f64> + '_ {
        let norm = 1.0 / self.sample_count as f64;
        self.avalanche_chart.iter().map(move |&flips| flips as f64 * norm)
    }

    /// How far each in/out bit pairing's flip probability is from one half,
    /// scaled so that 0 is perfect and 1 is always or never flipping.
    pub fn bias(&self) -> Summary {
        Summary::of(self.probabilities().map(p_to_bias))
    }

    /// Per input bit, the number of output bits it effectively affects.
    pub fn input_bit_diffusion(&self) -> Summary {
        let norm = 1.0 / self.sample_count as f64;
        Summary::of((0..self.input_bit_len).map(|i| {
            self.get_row(i)
                .iter()
                .map(|&flips| 1.0 - p_to_bias(flips as f64 * norm))
                .sum()
        }))
    }

    /// Per input bit, the entropy in bits of its effect on the output.
    pub fn input_bit_entropy(&self) -> Summary {
        let norm = 1.0 / self.sample_count as f64;
        Summary::of((0..self.input_bit_len).map(|i| {
            self.get_row(i)
                .iter()
                .map(|&flips| p_to_entropy(flips as f64 * norm))
                .sum()
        }))
    }

    /// Average number of output bits that flip when one input bit flips.
    /// Ideally half of `output_bit_len`.
    pub fn mean_output_flips(&self) -> f64 {
        let total: u64 = self.avalanche_chart.iter().map(|&n| n as u64).sum();
        total as f64 / (self.sample_count * self.input_bit_len) as f64
    }

    fn row_bic(&self, in_bit: usize) -> &[[u32; 4]] {
        let stride = bic_stride(self.output_bit_len);
        let start = in_bit * stride;
        &self.bic_chart[start..(start + stride)]
    }

    /// Per input bit, the average spread between the most and least common
    /// outcome for each pair of output bits, relative to the most common.
    pub fn bic_deviation(&self) -> Summary {
        let norm = 1.0 / (bic_stride(self.output_bit_len) * self.sample_count) as f64;
        Summary::of((0..self.input_bit_len).map(|i| {
            self.row_bic(i)
                .iter()
                .map(|quadrants| {
                    let min = *quadrants.iter().min().unwrap_or(&0);
                    let max = *quadrants.iter().max().unwrap_or(&0);
                    (max - min) as f64 / max.max(1) as f64
                })
                .sum::<f64>()
                * norm
        }))
    }

    pub fn print_report(&self) {
        if !self.avalanche_chart.is_empty() {
            let bias = self.bias();
            let diffusion = self.input_bit_diffusion();
            let entropy = self.input_bit_entropy();
            println!(
                "    Bias:
        Min: {:0.2}
        Avg: {:0.2}
        Max: {:0.2}
    Input Bit Diffusion (digest size = {} bits):
        Min: {:0.1} bits
        Avg: {:0.1} bits
        Max: {:0.1} bits
    Input Bit Diffusion Entropy (digest size = {} bits):
        Min: {:0.1} bits
        Avg: {:0.1} bits
        Max: {:0.1} bits",
                bias.min,
                bias.avg,
                bias.max,
                self.digest_bit_len,
                diffusion.min,
                diffusion.avg,
                diffusion.max,
                self.digest_bit_len,
                entropy.min,
                entropy.avg,
                entropy.max,
            );
        }

        if !self.bic_chart.is_empty() {
            let bic = self.bic_deviation();
            println!(
                "    BIC deviation:
        Min: {:0.4}
        Avg: {:0.4}
        Max: {:0.4}",
                bic.min, bic.avg, bic.max,
            );
        }
    }

    /// Writes the avalanche chart as a greyscale image, one row per input bit
    /// and one column per output bit.
    pub fn write_avalanche_png<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let mut pixels = Vec::with_capacity(self.avalanche_chart.len() * 4);
        for &flips in &self.avalanche_chart {
            let v = (flips as u64 * 255 / self.sample_count.max(1) as u64).min(255) as u8;
            pixels.extend_from_slice(&[v, v, v, 255]);
        }

        png_encode_mini::write_rgba_from_u8(
            &mut File::create(path.as_ref())?,
            &pixels,
            self.output_bit_len as u32,
            self.input_bit_len as u32,
        )?;

        Ok(())
    }
}

fn bic_stride(output_bit_len: usize) -> usize {
    output_bit_len * output_bit_len.saturating_sub(1)
}

fn bit_flipped(a: &[u8], b: &[u8], bit: usize) -> bool {
    let mask = 1 << (bit % 8);
    (a[bit / 8] & mask) != (b[bit / 8] & mask)
}

/// Measures avalanche behaviour of `mix` over `rounds` generated inputs.
///
/// - `generate_input`: fills an input from a round index, deterministically.
/// - `mix`: maps an input to an output.  The output buffer's prior contents
///   must be ignored.
/// - `input_size`, `output_size`: sizes of `mix`'s input and output, in bytes.
/// - `digest_size`: size in bytes of the digest of the hash `mix` is part of.
///   Only used for reporting.
#[instrument(skip_all)]
pub fn compute_stats<F1, F2>(
    generate_input: F1,
    mix: F2,
    input_size: usize,
    output_size: usize,
    digest_size: usize,
    rounds: usize,
    do_avalanche: bool,
    do_bic: bool,
) -> Stats
where
    F1: Fn(usize, &mut [u8]),
    F2: Fn(&[u8], &mut [u8]),
{
    let input_bits = input_size * 8;
    let output_bits = output_size * 8;
    let mut stats = Stats::new(input_bits, output_bits, digest_size * 8, do_avalanche, do_bic);

    let mut input = vec![0u8; input_size];
    let mut output = vec![0u8; output_size];
    let mut input_tweaked = vec![0u8; input_size];
    let mut output_tweaked = vec![0u8; output_size];

    debug!(input_size, output_size, rounds, do_avalanche, do_bic, "starting");

    for round in 0..rounds {
        if round % 1024 == 0 {
            trace!(round, rounds, "progress");
        }

        generate_input(round, &mut input);
        mix(&input, &mut output);

        for in_bit in 0..input_bits {
            input_tweaked.copy_from_slice(&input);
            input_tweaked[in_bit / 8] ^= 1 << (in_bit % 8);
            mix(&input_tweaked, &mut output_tweaked);

            if do_avalanche {
                let row = in_bit * output_bits;
                for out_bit in 0..output_bits {
                    stats.avalanche_chart[row + out_bit] +=
                        bit_flipped(&output, &output_tweaked, out_bit) as u32;
                }
            }

            if do_bic {
                let stride = bic_stride(output_bits);
                for i in 0..output_bits {
                    let flipped_a = bit_flipped(&output, &output_tweaked, i);
                    for j in 0..(output_bits - 1) {
                        let flipped_b =
                            bit_flipped(&output, &output_tweaked, (i + j + 1) % output_bits);
                        let quadrant = match (flipped_a, flipped_b) {
                            (true, true) => 0,
                            (false, false) => 1,
                            (true, false) => 2,
                            (false, true) => 3,
                        };
                        stats.bic_chart[in_bit * stride + i * (output_bits - 1) + j][quadrant] += 1;
                    }
                }
            }
        }

        stats.sample_count += 1;
    }

    debug!(samples = stats.sample_count, "finished");

    stats
}

pub fn p_to_bias(p: f64) -> f64 {
    (p * 2.0 - 1.0).abs()
}

pub fn p_to_entropy(p: f64) -> f64 {
    if p <= 0.0 || p >= 1.0 {
        0.0
    } else {
        let q = 1.0 - p;
        -(p * p.log2()) - (q * q.log2())
    }
}

//-------------------------------------------------------------

/// Generates a random byte stream.
pub fn generate_random(seed: usize, bytes: &mut [u8]) {
    let mut rng = WyRand::new_seed(rehash64(seed as u64, 0));
    rng.fill_bytes(bytes);
}

/// Generates a byte stream with all zero bits except one.
pub fn generate_single_1_bit(index: usize, bytes: &mut [u8]) {
    let bit_idx = index % (bytes.len() * 8);
    bytes.fill(0);
    bytes[bit_idx / 8] = 1 << (bit_idx % 8);
}

/// Generates a byte stream with roughly `n` random bits set to one.
pub fn generate_n_random_bits(seed: usize, bytes: &mut [u8], n: usize) {
    let mut rng = WyRand::new_seed(rehash64(seed as u64, n as u64));

    bytes.fill(0);
    for _ in 0..n {
        let bit = rng.generate_range(0..(bytes.len() * 8));
        bytes[bit / 8] |= 1 << (bit % 8);
    }
}

/// Generates a byte stream whose low bytes count up as an integer.
pub fn generate_counting(index: usize, bytes: &mut [u8]) {
    bytes.fill(0);
    let n = bytes.len().min(8);
    bytes[..n].copy_from_slice(&(index as u64).to_le_bytes()[..n]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_has_no_avalanche() {
        let stats = compute_stats(
            generate_random,
            |input: &[u8], output: &mut [u8]| output.copy_from_slice(input),
            4,
            4,
            4,
            16,
            true,
            false,
        );
        assert_eq!(stats.mean_output_flips(), 1.0);
        assert_eq!(stats.bias().max, 1.0);
        assert_eq!(stats.input_bit_diffusion().avg, 0.0);
    }

    #[test]
    fn generators_are_deterministic() {
        let (mut a, mut b) = ([0u8; 24], [0u8; 24]);
        generate_random(5, &mut a);
        generate_random(5, &mut b);
        assert_eq!(a, b);

        generate_counting(0x0102, &mut a);
        assert_eq!(&a[..3], &[0x02, 0x01, 0x00]);

        generate_single_1_bit(9, &mut a);
        assert_eq!(a.iter().map(|b| b.count_ones()).sum::<u32>(), 1);
        assert_eq!(a[1], 0b10);
    }

    #[test]
    fn entropy_and_bias_extremes() {
        assert_eq!(p_to_bias(0.5), 0.0);
        assert_eq!(p_to_bias(0.0), 1.0);
        assert_eq!(p_to_entropy(0.5), 1.0);
        assert_eq!(p_to_entropy(1.0), 0.0);
    }
}
