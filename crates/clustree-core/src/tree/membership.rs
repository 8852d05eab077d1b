// ── Partial membership annotation ──
//
// A cluster node is "partial" when one or more group members lack a
// resource at its path. The annotation carries the rounded percentage and
// a hover message in literal counts; fully-represented clusters get no
// annotation at all.

use crate::model::tree::PartialMembership;

/// Annotate a cluster node's membership.
///
/// Returns `None` when every group member is represented
/// (`members == cluster_size`); the node then renders indistinguishably
/// from any other cluster node.
pub fn annotate(members: u32, cluster_size: u32, child_name: &str) -> Option<PartialMembership> {
    if members >= cluster_size {
        return None;
    }
    Some(PartialMembership {
        percent: percent_of(members, cluster_size),
        message: format!(
            "{members} out of {cluster_size} group members have {child_name} child resources"
        ),
    })
}

/// Suffix a partial cluster's display name with the percentage marker.
pub fn partial_display_name(name: &str, percent: u8) -> String {
    format!("{name} ({percent}%)")
}

/// Round-to-nearest integer percentage. `cluster_size` is nonzero here
/// because `members < cluster_size` held at the call site.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percent_of(members: u32, cluster_size: u32) -> u8 {
    ((f64::from(members) / f64::from(cluster_size)) * 100.0).round() as u8
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn full_membership_gets_no_annotation() {
        assert!(annotate(2, 2, "Foo").is_none());
        assert!(annotate(0, 0, "Foo").is_none());
    }

    #[test]
    fn partial_iff_strictly_less() {
        assert!(annotate(1, 2, "Bar").is_some());
        assert!(annotate(0, 1, "Bar").is_some());
    }

    #[test]
    fn percent_rounds_to_nearest() {
        assert_eq!(annotate(1, 2, "x").unwrap().percent, 50);
        assert_eq!(annotate(1, 3, "x").unwrap().percent, 33);
        assert_eq!(annotate(2, 3, "x").unwrap().percent, 67);
        assert_eq!(annotate(1, 8, "x").unwrap().percent, 13);
        assert_eq!(annotate(0, 7, "x").unwrap().percent, 0);
    }

    #[test]
    fn message_states_literal_counts() {
        let a = annotate(1, 2, "Bar").unwrap();
        assert_eq!(a.message, "1 out of 2 group members have Bar child resources");
    }

    #[test]
    fn display_name_suffix() {
        assert_eq!(partial_display_name("app.war", 50), "app.war (50%)");
    }
}
