use std::fmt;

use serde_json::Value;

/// One step into a structured document: a mapping key or a sequence index.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathStep {
    /// A string key into a mapping.
    Key(String),
    /// An integer index into a sequence.
    Index(usize),
}

impl From<&str> for PathStep {
    fn from(key: &str) -> Self {
        PathStep::Key(key.to_string())
    }
}

impl From<usize> for PathStep {
    fn from(index: usize) -> Self {
        PathStep::Index(index)
    }
}

/// Typed address of a location inside a structured document.
///
/// Paths are constructed step by step during the diff walk, never parsed
/// back out of a rendered string. An empty path addresses the document root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path(Vec<PathStep>);

impl Path {
    /// The root path (no steps).
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Build a path from steps.
    pub fn from_steps(steps: Vec<PathStep>) -> Self {
        Self(steps)
    }

    /// A new path with `step` appended.
    pub fn child(&self, step: impl Into<PathStep>) -> Self {
        let mut steps = self.0.clone();
        steps.push(step.into());
        Self(steps)
    }

    /// The path steps in order.
    pub fn steps(&self) -> &[PathStep] {
        &self.0
    }

    /// The final step, if any.
    pub fn last(&self) -> Option<&PathStep> {
        self.0.last()
    }

    /// The parent path (all but the final step), or `None` at the root.
    pub fn parent(&self) -> Option<Path> {
        if self.0.is_empty() {
            return None;
        }
        Some(Path(self.0[..self.0.len() - 1].to_vec()))
    }

    /// Returns `true` if this is the root path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no steps.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolve this path against a document by repeated member/index lookup.
    ///
    /// Returns `None` as soon as a step fails to resolve.
    pub fn resolve<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        let mut current = root;
        for step in &self.0 {
            current = match step {
                PathStep::Key(key) => current.as_object()?.get(key)?,
                PathStep::Index(index) => current.as_array()?.get(*index)?,
            };
        }
        Some(current)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "$");
        }
        for step in &self.0 {
            match step {
                PathStep::Key(key) => write!(f, "[{:?}]", key)?,
                PathStep::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}
