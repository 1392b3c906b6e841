use crate::segments::Segment;
use std::collections::BTreeMap;

/// one schedulable unit of work covering a sub interval of a segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Branch {
    pub start: f64,
    pub duration: f64,
}

/// ordered assignment of 1-based, gap free indices to branches
pub type BranchMap = BTreeMap<usize, Branch>;

/// fan segments out into bounded duration branches
///
/// Each segment is cut into `step` sized chunks with a shorter trailing
/// chunk, where `step` is `max_duration` when positive and the segment's own
/// duration otherwise (one branch per segment). The chunk count is
/// `floor((duration - 1) / step) + 1`. This is NOT ceiling division: the -1
/// keeps the count at `duration / step` when the duration is an exact
/// multiple of `step`. Downstream names are derived from these numbers, so
/// the formula has to stay exactly like this.
pub fn build_branch_map(segments: &[Segment], max_duration: Option<f64>) -> BranchMap {
    let mut branch_map = BranchMap::new();
    let mut index = 1;

    for segment in segments {
        let step = match max_duration {
            Some(max) if max > 0.0 => max,
            _ => segment.duration,
        };
        let num_steps = ((segment.duration - 1.0).div_euclid(step) + 1.0) as usize;

        for j in 0..num_steps {
            let start = segment.start + j as f64 * step;
            let duration = (segment.start + segment.duration - start).min(step);

            branch_map.insert(index, Branch { start, duration });
            index += 1;
        }
    }

    branch_map
}
