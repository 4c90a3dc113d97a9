use std::borrow::Cow;
use std::fmt;

/// Identifies a cached query result.
///
/// An ordered sequence of segments, e.g. `["me", "profile-v1"]`. Two keys
/// refer to the same cache entry exactly when their segments are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Vec<Cow<'static, str>>);

impl QueryKey {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// True if `prefix`'s segments are a leading run of this key's segments.
    /// Every key starts with itself.
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl<const N: usize> From<[&'static str; N]> for QueryKey {
    fn from(segments: [&'static str; N]) -> Self {
        Self::new(segments)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{segment:?}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_array_literal() {
        let key = QueryKey::from(["me", "profile-v1"]);
        assert_eq!(key.to_string(), r#"["me","profile-v1"]"#);
    }

    #[test]
    fn identity_is_segment_equality() {
        let owned = QueryKey::new(vec![String::from("credits")]);
        assert_eq!(owned, QueryKey::from(["credits"]));
        assert_ne!(QueryKey::from(["me", "credits"]), QueryKey::from(["credits"]));
    }

    #[test]
    fn prefix_matching() {
        let profile = QueryKey::from(["me", "profile-v1"]);
        assert!(profile.starts_with(&QueryKey::from(["me"])));
        assert!(profile.starts_with(&profile));
        assert!(!profile.starts_with(&QueryKey::from(["credits"])));
        assert!(!QueryKey::from(["me"]).starts_with(&profile));
    }
}
