use gdw_format::Fragment;

use crate::unit::Unit;

/// Marker appended when an oversized fragment is cut at a line boundary.
pub const TRUNCATION_MARKER: &str = "...(truncated)";

/// What to do with a single fragment whose own size exceeds the limit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Cut the fragment at a line boundary and append [`TRUNCATION_MARKER`].
    /// The default: delivery channels with a hard cap reject oversized bodies.
    #[default]
    Truncate,
    /// Emit the fragment verbatim as its own over-limit unit.
    Oversize,
}

/// Greedy, order-preserving fragment packer.
#[derive(Clone, Debug)]
pub struct Packer {
    limit: usize,
    policy: OverflowPolicy,
}

/// Separator placed between fragments concatenated into one unit. Counted
/// against the limit.
const SEPARATOR: char = '\n';

impl Packer {
    /// A packer with the given byte limit and the default overflow policy.
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            policy: OverflowPolicy::default(),
        }
    }

    pub fn with_policy(limit: usize, policy: OverflowPolicy) -> Self {
        Self { limit, policy }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Pack fragments into units, preserving input order.
    pub fn pack(&self, fragments: &[Fragment]) -> Vec<Unit> {
        let mut units = Vec::new();
        let mut current: Option<Unit> = None;

        for fragment in fragments {
            if fragment.size() > self.limit {
                // Oversized fragments always occupy a unit of their own.
                if let Some(unit) = current.take() {
                    units.push(unit);
                }
                units.push(self.overflow_unit(fragment));
                continue;
            }

            match current.take() {
                None => current = Some(Unit::from_fragment(fragment)),
                Some(mut unit) => {
                    if unit.size() + SEPARATOR.len_utf8() + fragment.size() <= self.limit {
                        unit.body.push(SEPARATOR);
                        unit.body.push_str(&fragment.body);
                        current = Some(unit);
                    } else {
                        units.push(unit);
                        current = Some(Unit::from_fragment(fragment));
                    }
                }
            }
        }

        if let Some(unit) = current {
            units.push(unit);
        }
        units
    }

    fn overflow_unit(&self, fragment: &Fragment) -> Unit {
        let mut unit = Unit::from_fragment(fragment);
        if self.policy == OverflowPolicy::Truncate {
            unit.body = truncate_at_line_boundary(&fragment.body, self.limit);
            unit.truncated = true;
        }
        unit
    }
}

/// Keep whole leading lines so that the kept lines plus the marker fit
/// within `limit`. If not even one line fits alongside the marker, the
/// result is the marker alone (clipped as a last resort for tiny limits).
fn truncate_at_line_boundary(body: &str, limit: usize) -> String {
    let mut kept = String::new();
    for line in body.lines() {
        let separator = usize::from(!kept.is_empty());
        if kept.len() + separator + line.len() + 1 + TRUNCATION_MARKER.len() > limit {
            break;
        }
        if !kept.is_empty() {
            kept.push('\n');
        }
        kept.push_str(line);
    }

    if kept.is_empty() {
        return TRUNCATION_MARKER
            .chars()
            .take(limit)
            .collect();
    }
    kept.push('\n');
    kept.push_str(TRUNCATION_MARKER);
    kept
}
