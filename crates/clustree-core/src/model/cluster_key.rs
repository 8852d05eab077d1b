// ── Cluster path identity ──
//
// A ClusterKey addresses one cluster node as the ordered path of
// (resource type, resource key) pairs from the root group. Two keys are
// equal iff they describe the same path from the same group. The string
// encoding is bookmarkable: lossless, collision-free, and legal inside a
// URL path segment.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::type_meta::{GroupId, ResourceTypeId};

// ── KeyFragment ─────────────────────────────────────────────────────

/// One `(resource type, resource key)` hop of a cluster path, identifying
/// a node relative to its parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyFragment {
    pub resource_type_id: ResourceTypeId,
    pub resource_key: String,
}

impl KeyFragment {
    pub fn new(resource_type_id: impl Into<ResourceTypeId>, resource_key: impl Into<String>) -> Self {
        Self {
            resource_type_id: resource_type_id.into(),
            resource_key: resource_key.into(),
        }
    }
}

// ── ClusterKey ──────────────────────────────────────────────────────

/// Ordered path uniquely addressing a cluster node. Immutable once created;
/// [`child`](Self::child) returns an extended copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClusterKey {
    root_group_id: GroupId,
    fragments: Vec<KeyFragment>,
}

impl ClusterKey {
    /// The key of the group-root path (no fragments).
    pub fn root(root_group_id: impl Into<GroupId>) -> Self {
        Self {
            root_group_id: root_group_id.into(),
            fragments: Vec::new(),
        }
    }

    /// Extend this key by one fragment, addressing a child node.
    pub fn child(&self, fragment: KeyFragment) -> Self {
        let mut fragments = Vec::with_capacity(self.fragments.len() + 1);
        fragments.extend(self.fragments.iter().cloned());
        fragments.push(fragment);
        Self {
            root_group_id: self.root_group_id,
            fragments,
        }
    }

    pub fn root_group_id(&self) -> GroupId {
        self.root_group_id
    }

    pub fn fragments(&self) -> &[KeyFragment] {
        &self.fragments
    }

    /// Number of fragments; 0 for the group-root key.
    pub fn depth(&self) -> usize {
        self.fragments.len()
    }

    // ── Bookmarkable encoding ────────────────────────────────────────

    /// Encode into a URL-path-segment-safe string.
    ///
    /// Format: `g{groupId}` followed by `:{typeId}:{escapedKey}` per
    /// fragment. Resource keys are percent-escaped so `:` never appears
    /// inside a field, which keeps the encoding collision-free.
    pub fn encode(&self) -> String {
        let mut out = format!("g{}", self.root_group_id);
        for frag in &self.fragments {
            out.push(':');
            out.push_str(&frag.resource_type_id.to_string());
            out.push(':');
            out.push_str(&escape(&frag.resource_key));
        }
        out
    }

    /// Parse a string produced by [`encode`](Self::encode).
    pub fn parse(input: &str) -> Result<Self, KeyParseError> {
        let mut fields = input.split(':');
        let head = fields.next().unwrap_or_default();
        let group_id = head
            .strip_prefix('g')
            .ok_or(KeyParseError::MissingGroupPrefix)?
            .parse::<i32>()
            .map_err(|_| KeyParseError::BadGroupId)?;

        let mut key = Self::root(group_id);
        let rest: Vec<&str> = fields.collect();
        if rest.len() % 2 != 0 {
            return Err(KeyParseError::DanglingFragment);
        }
        for pair in rest.chunks_exact(2) {
            let type_id = pair[0]
                .parse::<i32>()
                .map_err(|_| KeyParseError::BadTypeId)?;
            let resource_key = unescape(pair[1])?;
            key.fragments.push(KeyFragment::new(type_id, resource_key));
        }
        Ok(key)
    }
}

impl fmt::Display for ClusterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for ClusterKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Failure to parse an encoded [`ClusterKey`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    #[error("cluster key must start with 'g<groupId>'")]
    MissingGroupPrefix,
    #[error("invalid group id")]
    BadGroupId,
    #[error("invalid resource type id")]
    BadTypeId,
    #[error("fragment list has a type id without a resource key")]
    DanglingFragment,
    #[error("invalid percent escape in resource key")]
    BadEscape,
}

// ── Escaping ────────────────────────────────────────────────────────
//
// Bytes outside a conservative unreserved set are %XX-escaped (UTF-8,
// uppercase hex). The set excludes ':' (the field delimiter), '%' (the
// escape introducer), and everything a URL path segment cannot carry.

fn is_plain(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~' | b'=' | b',' | b'+')
}

pub(crate) fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for &b in raw.as_bytes() {
        if is_plain(b) {
            out.push(char::from(b));
        } else {
            out.push('%');
            out.push_str(&format!("{b:02X}"));
        }
    }
    out
}

fn unescape(encoded: &str) -> Result<String, KeyParseError> {
    let bytes = encoded.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3).ok_or(KeyParseError::BadEscape)?;
            let hex = std::str::from_utf8(hex).map_err(|_| KeyParseError::BadEscape)?;
            let value = u8::from_str_radix(hex, 16).map_err(|_| KeyParseError::BadEscape)?;
            out.push(value);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).map_err(|_| KeyParseError::BadEscape)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn root_key_encodes_group_id_only() {
        let key = ClusterKey::root(42);
        assert_eq!(key.encode(), "g42");
        assert_eq!(key.depth(), 0);
    }

    #[test]
    fn child_extends_without_mutating_parent() {
        let root = ClusterKey::root(7);
        let child = root.child(KeyFragment::new(1001, "server-1"));
        assert_eq!(root.depth(), 0);
        assert_eq!(child.depth(), 1);
        assert_eq!(child.encode(), "g7:1001:server-1");
    }

    #[test]
    fn encode_parse_round_trip_plain() {
        let key = ClusterKey::root(5)
            .child(KeyFragment::new(10, "alpha"))
            .child(KeyFragment::new(20, "beta"));
        assert_eq!(ClusterKey::parse(&key.encode()).unwrap(), key);
    }

    #[test]
    fn encode_parse_round_trip_hostile_resource_keys() {
        for raw in [
            "deployment=app.war",
            "jboss.web:host=localhost,path=/",
            "50% off",
            "a:b:c",
            "trailing space ",
            "ünïcode/路径",
        ] {
            let key = ClusterKey::root(1).child(KeyFragment::new(2, raw));
            let parsed = ClusterKey::parse(&key.encode()).unwrap();
            assert_eq!(parsed.fragments()[0].resource_key, raw, "raw: {raw:?}");
        }
    }

    #[test]
    fn encoding_is_url_path_segment_safe() {
        let key = ClusterKey::root(1).child(KeyFragment::new(2, "a/b?c#d%e f"));
        let encoded = key.encode();
        assert!(
            !encoded.contains(['/', '?', '#', ' ']),
            "encoded key leaked a reserved char: {encoded}"
        );
    }

    #[test]
    fn distinct_paths_encode_distinctly() {
        // A key of "b:c" under type 2 must not collide with "b" then "c".
        let one_hop = ClusterKey::root(1).child(KeyFragment::new(2, "b:3:c"));
        let two_hops = ClusterKey::root(1)
            .child(KeyFragment::new(2, "b"))
            .child(KeyFragment::new(3, "c"));
        assert_ne!(one_hop.encode(), two_hops.encode());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(
            ClusterKey::parse("42").unwrap_err(),
            KeyParseError::MissingGroupPrefix
        );
        assert_eq!(
            ClusterKey::parse("gx").unwrap_err(),
            KeyParseError::BadGroupId
        );
        assert_eq!(
            ClusterKey::parse("g1:10").unwrap_err(),
            KeyParseError::DanglingFragment
        );
        assert_eq!(
            ClusterKey::parse("g1:abc:key").unwrap_err(),
            KeyParseError::BadTypeId
        );
        assert_eq!(
            ClusterKey::parse("g1:10:%G1").unwrap_err(),
            KeyParseError::BadEscape
        );
    }

    #[test]
    fn from_str_round_trip() {
        let key: ClusterKey = "g9:77:web%3A1".parse().unwrap();
        assert_eq!(key.root_group_id(), GroupId(9));
        assert_eq!(key.fragments()[0].resource_key, "web:1");
        assert_eq!(key.to_string(), "g9:77:web%3A1");
    }
}
