//! Oversampling of a single axis read.
//!
//! Capacitive coupling to a display sharing the electrodes makes single ADC
//! results bounce. Every axis is therefore sampled `depth` times:
//!
//! - 1: whatever the ADC returns is used as is
//! - 2: both samples must agree within [`NOISE_TOLERANCE`], the result is
//!   their mean
//! - 3 and more: the samples are sorted and the median is used

use heapless::Vec;

/// Largest supported oversampling depth
pub const MAX_SAMPLES: usize = 16;

/// Allowed difference in raw ADC counts between the two samples of a pair
pub const NOISE_TOLERANCE: u16 = 4;

/// Recommended depth, precise enough without slowing acquisition down
pub const DEFAULT_SAMPLES: u8 = 2;

pub type Samples = Vec<u16, MAX_SAMPLES>;

/// Result of filtering one burst of samples
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, ufmt::derive::uDebug)]
pub struct Filtered {
    /// raw ADC value, not yet flipped into a panel position
    pub value: u16,
    /// false if the samples disagreed
    pub valid: bool,
}

/// Reduces a burst of samples to one value.
///
/// `samples` is reordered when it holds more than two values. An empty burst
/// yields an invalid zero.
pub fn filter(samples: &mut [u16]) -> Filtered {
    match samples.len() {
        0 => Filtered {
            value: 0,
            valid: false,
        },
        1 => Filtered {
            value: samples[0],
            valid: true,
        },
        2 => {
            let (a, b) = (samples[0], samples[1]);
            if a.abs_diff(b) > NOISE_TOLERANCE {
                // keep the later sample so the caller still has a position
                Filtered { value: b, valid: false }
            } else {
                Filtered {
                    value: ((a as u32 + b as u32) >> 1) as u16,
                    valid: true,
                }
            }
        }
        n => {
            insertion_sort(samples);
            Filtered {
                value: samples[n / 2],
                valid: true,
            }
        }
    }
}

/// bursts are at most MAX_SAMPLES long
fn insertion_sort(samples: &mut [u16]) {
    for i in 1..samples.len() {
        let save = samples[i];
        let mut j = i;
        while j > 0 && save < samples[j - 1] {
            samples[j] = samples[j - 1];
            j -= 1;
        }
        samples[j] = save;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_sample_passes_through() {
        assert_eq!(
            filter(&mut [700]),
            Filtered {
                value: 700,
                valid: true
            }
        );
    }

    #[test]
    fn test_pair_within_tolerance_is_averaged() {
        assert_eq!(filter(&mut [300, 302]).value, 301);
        assert_eq!(filter(&mut [512, 512]).value, 512);
        // integer mean rounds down
        assert_eq!(filter(&mut [101, 104]).value, 102);
        assert!(filter(&mut [200, 204]).valid);
        assert!(filter(&mut [204, 200]).valid);
    }

    #[test]
    fn test_pair_outside_tolerance_is_invalid() {
        let f = filter(&mut [500, 520]);
        assert!(!f.valid);
        assert_eq!(f.value, 520);
        assert!(!filter(&mut [200, 205]).valid);
        assert!(!filter(&mut [205, 200]).valid);
    }

    #[test]
    fn test_pair_does_not_overflow() {
        let f = filter(&mut [u16::MAX, u16::MAX - 1]);
        assert!(f.valid);
        assert_eq!(f.value, u16::MAX - 1);
    }

    #[test]
    fn test_median_of_odd_burst() {
        let mut samples = [510, 20, 500, 1000, 505];
        let f = filter(&mut samples);
        assert_eq!(f.value, 505);
        assert!(f.valid);
        assert_eq!(samples, [20, 500, 505, 510, 1000]);
    }

    #[test]
    fn test_median_of_even_burst_takes_upper() {
        assert_eq!(filter(&mut [4, 1, 3, 2]).value, 3);
    }

    #[test]
    fn test_empty_burst() {
        assert!(!filter(&mut []).valid);
    }

    #[test]
    fn test_insertion_sort() {
        let mut v = [9, 3, 3, 1, 8, 0, 1023];
        insertion_sort(&mut v);
        assert_eq!(v, [0, 1, 3, 3, 8, 9, 1023]);
    }
}
