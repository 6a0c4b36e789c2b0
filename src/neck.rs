//! Local-minimum search over the filtered width profile.
//!
//! The search starts in the middle of the filtered widths and walks downhill:
//! left while the left neighbour is smaller, otherwise right while the right
//! neighbour is smaller. At a point no larger than both neighbours it looks
//! ahead `len / lookahead_divisor` samples in the current direction and jumps
//! to the first strictly smaller width it finds, resuming the descent from
//! there. Without an improvement the search reverses direction, at most
//! `max_reversals` times, and then accepts the current position.
//!
//! Every move lands on a strictly smaller width, so the walk terminates. It
//! assumes a roughly unimodal profile between the two ends; on noisy or
//! multimodal profiles it settles on whichever local minimum it reaches
//! first. A width that cannot be compared with its neighbours (NaN) aborts
//! the search.
use crate::analyzer::params::NeckSearchParams;
use crate::discriminator::AngleFilterOutcome;
use crate::error::{AnalysisError, Result};
use crate::profile::{WidthProfile, WidthSample};
use log::{debug, warn};
use serde::Serialize;

/// Raw result of the minimum search over a slice of widths.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinimumSearch {
    pub index: usize,
    pub value: f32,
    pub start_index: usize,
    pub moves: usize,
    pub reversals: usize,
}

/// Neck location mapped back onto the width profile.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NeckEstimate {
    pub filtered_index: usize,
    pub profile_index: usize,
    pub sample: WidthSample,
    pub search: MinimumSearch,
}

/// Finds a local minimum of `values` by bidirectional descent.
pub fn find_local_minimum(values: &[f32], params: &NeckSearchParams) -> Result<MinimumSearch> {
    let n = values.len();
    if n == 0 {
        return Err(AnalysisError::InsufficientSamples {
            component: "neck",
            available: 0,
            required: 1,
        });
    }
    let lookahead = n / params.lookahead_divisor.max(1);
    let start_index = n / 2;
    let mut idx = start_index;
    let mut dir: isize = 1;
    let mut moves = 0usize;
    let mut reversals = 0usize;

    loop {
        let cur = values[idx];
        let left = if idx > 0 { values[idx - 1] } else { f32::INFINITY };
        let right = if idx + 1 < n { values[idx + 1] } else { f32::INFINITY };

        if cur > left {
            idx -= 1;
            dir = -1;
            moves += 1;
            continue;
        }
        if cur > right {
            idx += 1;
            dir = 1;
            moves += 1;
            continue;
        }
        if !(cur <= left && cur <= right) {
            return Err(AnalysisError::MinimumSearch {
                index: idx,
                value: cur,
            });
        }

        if let Some(j) = look_ahead(values, idx, dir, lookahead) {
            debug!("neck: candidate {} improved to {} (dir {})", idx, j, dir);
            idx = j;
            moves += 1;
            continue;
        }
        if reversals < params.max_reversals {
            dir = -dir;
            reversals += 1;
            continue;
        }
        break;
    }

    if idx == 0 || idx + 1 == n {
        warn!(
            "neck: minimum settled on the profile boundary (index {} of {})",
            idx, n
        );
    }
    Ok(MinimumSearch {
        index: idx,
        value: values[idx],
        start_index,
        moves,
        reversals,
    })
}

/// First index within `span` steps from `idx` in direction `dir` holding a
/// strictly smaller value.
fn look_ahead(values: &[f32], idx: usize, dir: isize, span: usize) -> Option<usize> {
    let cur = values[idx];
    (1..=span)
        .map_while(|step| {
            let j = idx as isize + dir * step as isize;
            (j >= 0 && (j as usize) < values.len()).then_some(j as usize)
        })
        .find(|&j| values[j] < cur)
}

/// Locates the neck on the angle-filtered profile and maps it back to the
/// originating width sample.
pub fn locate_neck(
    profile: &WidthProfile,
    filter: &AngleFilterOutcome,
    params: &NeckSearchParams,
) -> Result<NeckEstimate> {
    let widths = filter.filtered_widths();
    let search = find_local_minimum(&widths, params)?;
    let profile_index = filter.filtered[search.index].profile_index;
    let sample = *profile
        .samples
        .get(profile_index)
        .ok_or(AnalysisError::IndexOutOfRange {
            component: "neck",
            index: profile_index,
            len: profile.len(),
        })?;
    debug!(
        "neck: filtered={} profile={} width={:.4} moves={} reversals={}",
        search.index, profile_index, sample.width, search.moves, search.reversals
    );
    Ok(NeckEstimate {
        filtered_index: search.index,
        profile_index,
        sample,
        search,
    })
}
