use crate::error::ShapeError;
use itertools::Itertools;
use std::fmt;
use std::str::FromStr;

/// A positional block address: the sibling indices from the forest root down to
/// the block, written as `"1.0.3"`. Root-level blocks have a single segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId {
    path: Vec<usize>,
}

impl ComponentId {
    pub fn root(index: usize) -> Self {
        Self { path: vec![index] }
    }

    pub fn child(&self, index: usize) -> Self {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(index);
        Self { path }
    }

    /// The enclosing block's id, or `None` for a root-level block.
    pub fn parent(&self) -> Option<Self> {
        match self.path.split_last() {
            Some((_, rest)) if !rest.is_empty() => Some(Self {
                path: rest.to_vec(),
            }),
            _ => None,
        }
    }

    /// Position of the block among its siblings.
    pub fn index(&self) -> usize {
        self.path.last().copied().unwrap_or(0)
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }

    pub fn segments(&self) -> &[usize] {
        &self.path
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.iter().join("."))
    }
}

impl FromStr for ComponentId {
    type Err = ShapeError;

    /// Accepts only the canonical form: non-empty digit runs without leading zeros.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ShapeError::MalformedId(s.to_string());
        let path = s
            .split('.')
            .map(|segment| {
                let canonical = !segment.is_empty()
                    && segment.bytes().all(|b| b.is_ascii_digit())
                    && (segment == "0" || !segment.starts_with('0'));
                if !canonical {
                    return Err(malformed());
                }
                segment.parse::<usize>().map_err(|_| malformed())
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { path })
    }
}

/// String-level parent lookup: drops the last dot-segment.
pub fn parent_id(component_id: &str) -> Option<&str> {
    component_id.rsplit_once('.').map(|(parent, _)| parent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let id: ComponentId = "1.0.12".parse().unwrap();
        assert_eq!(id.segments(), &[1, 0, 12]);
        assert_eq!(id.to_string(), "1.0.12");
        assert_eq!(id.index(), 12);
        assert_eq!(id.depth(), 3);
    }

    #[test]
    fn test_parent() {
        let id: ComponentId = "1.0".parse().unwrap();
        assert_eq!(id.parent(), Some(ComponentId::root(1)));
        assert_eq!(ComponentId::root(4).parent(), None);
        assert_eq!(parent_id("1.0.3"), Some("1.0"));
        assert_eq!(parent_id("7"), None);
    }

    #[test]
    fn test_rejects_non_canonical() {
        for bad in ["", "a", "1.", ".1", "1..2", "-1", "+1", "01", "1.x", "1 .2"] {
            assert!(
                matches!(bad.parse::<ComponentId>(), Err(ShapeError::MalformedId(_))),
                "'{}' should be rejected",
                bad
            );
        }
    }
}
