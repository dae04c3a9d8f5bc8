/// The framing of a rendered fragment, mapped to an embed color on delivery.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FragmentKind {
    /// A wholly new object or added lines (green).
    Addition,
    /// A removed object or removed lines (orange).
    Deletion,
    /// Field-level changes within an existing object (yellow).
    Modification,
    /// Status messages: snapshot initialization, no changes (blue).
    Informational,
}

impl FragmentKind {
    /// The delivery-channel embed color for this kind.
    pub fn color(&self) -> u32 {
        match self {
            FragmentKind::Addition => 65_280,        // green
            FragmentKind::Deletion => 16_753_920,    // orange
            FragmentKind::Modification => 16_776_960, // yellow
            FragmentKind::Informational => 3_447_003, // blue
        }
    }
}

/// One self-contained rendered change unit.
///
/// Atomic: a fragment is never split mid-content. The packer may truncate an
/// oversized fragment, but only with an explicit marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment {
    pub title: String,
    pub kind: FragmentKind,
    pub body: String,
}

impl Fragment {
    pub fn new(title: impl Into<String>, kind: FragmentKind, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind,
            body: body.into(),
        }
    }

    /// An informational status fragment.
    pub fn informational(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(title, FragmentKind::Informational, body)
    }

    /// Rendered size in bytes, as counted against a packing limit.
    pub fn size(&self) -> usize {
        self.body.len()
    }
}
