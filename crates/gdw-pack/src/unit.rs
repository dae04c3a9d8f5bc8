use gdw_format::{Fragment, FragmentKind};

/// A size-bounded pack of one or more fragments, ready for one delivery call.
///
/// Carries the title/kind (and therefore color) of its first fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Unit {
    pub title: String,
    pub kind: FragmentKind,
    pub body: String,
    /// `true` if the body was cut at a line boundary with an explicit marker.
    pub truncated: bool,
}

impl Unit {
    /// Start a unit from its first fragment.
    pub(crate) fn from_fragment(fragment: &Fragment) -> Self {
        Self {
            title: fragment.title.clone(),
            kind: fragment.kind,
            body: fragment.body.clone(),
            truncated: false,
        }
    }

    /// A unit wrapping a single informational fragment, bypassing packing.
    pub fn informational(fragment: &Fragment) -> Self {
        Self::from_fragment(fragment)
    }

    /// Body size in bytes.
    pub fn size(&self) -> usize {
        self.body.len()
    }
}
