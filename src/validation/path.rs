use std::fmt;

/// Location of an instance token, rendered as a `#/a/b/0` pointer.
#[derive(Clone, Debug, Default, Eq)]
pub struct Path {
    parts: Vec<String>,
}

impl Path {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.parts.is_empty()
    }

    /// Shorthand for extending the path when recursing into a property or
    /// an array element.
    pub fn extend(&self, part: impl Into<String>) -> Self {
        let mut new = self.clone();
        new.parts.push(part.into());
        new
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("#")?;
        for part in &self.parts {
            write!(f, "/{part}")?;
        }
        Ok(())
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.parts == other.parts
    }
}
