use regex::Regex;

/// Anchored release tag pattern: `v<major>.<minor>.<bugfix>`, ASCII digits only
const RELEASE_TAG_PATTERN: &str = r"^v([0-9]+)\.([0-9]+)\.([0-9]+)$";

/// Represents a git tag as seen from the current checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub is_annotated: bool,
    pub points_at_current_commit: bool,
}

impl Tag {
    /// Create an annotated tag on the current commit
    pub fn annotated(name: impl Into<String>) -> Self {
        Tag {
            name: name.into(),
            is_annotated: true,
            points_at_current_commit: true,
        }
    }

    /// Create a lightweight tag on the current commit
    pub fn lightweight(name: impl Into<String>) -> Self {
        Tag {
            name: name.into(),
            is_annotated: false,
            points_at_current_commit: true,
        }
    }

    /// Check whether the name follows the release tag convention
    pub fn has_release_name(&self) -> bool {
        release_components(&self.name).is_some()
    }
}

/// A tag found on an ancestor of some commit, with its distance in the commit graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncestorTag {
    pub name: String,
    pub distance: usize,
}

/// Split a release tag name into its three numeric components
///
/// Returns `None` unless the whole name matches `v<int>.<int>.<int>`.
/// The components are returned as matched text; range checks happen when
/// they are parsed into a [`Version`](super::Version).
pub fn release_components(name: &str) -> Option<[&str; 3]> {
    let captures = Regex::new(RELEASE_TAG_PATTERN)
        .ok()
        .and_then(|re| re.captures(name))?;

    Some([
        captures.get(1)?.as_str(),
        captures.get(2)?.as_str(),
        captures.get(3)?.as_str(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_components() {
        assert_eq!(release_components("v1.2.3"), Some(["1", "2", "3"]));
        assert_eq!(release_components("v10.0.255"), Some(["10", "0", "255"]));
    }

    #[test]
    fn test_release_components_rejects_malformed_names() {
        for name in [
            "1.2.3",
            "v1.2",
            "v1.2.3-rc1",
            "version1.2.3",
            "v1.2.3.4",
            "V1.2.3",
            " v1.2.3",
            "v1.2.3\n",
            "v-1.2.3",
            "v1..3",
            "",
        ] {
            assert_eq!(release_components(name), None, "{:?} should not match", name);
        }
    }

    #[test]
    fn test_release_components_ascii_digits_only() {
        // Arabic-Indic digits are Unicode decimal digits, but not release digits
        assert_eq!(release_components("v\u{661}.2.3"), None);
    }

    #[test]
    fn test_tag_constructors() {
        let tag = Tag::annotated("v1.0.0");
        assert!(tag.is_annotated);
        assert!(tag.points_at_current_commit);
        assert!(tag.has_release_name());

        let tag = Tag::lightweight("nightly");
        assert!(!tag.is_annotated);
        assert!(!tag.has_release_name());
    }
}
