//! Related-guide resolution.

use std::collections::BTreeMap;

use tracing::warn;

use qgroups_shared::Guide;

/// Public URL of a guide.
pub fn guide_url(guide_id: &str) -> String {
    format!("/guides/{guide_id}")
}

/// Build the title → URL map of guides whose id equals `related_guides_id`.
///
/// Returns `None` when no id is declared, and an empty map when the id
/// matches nothing. When two matching guides share a title the later one
/// wins and the collision is logged.
pub fn resolve_related_guides(
    related_guides_id: Option<&str>,
    guides: &[Guide],
) -> Option<BTreeMap<String, String>> {
    let id = related_guides_id?;
    let mut related: BTreeMap<String, String> = BTreeMap::new();

    for guide in guides.iter().filter(|g| g.id == id) {
        let url = guide_url(&guide.id);
        if let Some(previous) = related.insert(guide.frontmatter.title.clone(), url) {
            warn!(
                title = %guide.frontmatter.title,
                previous = %previous,
                guide_id = %guide.id,
                "duplicate related guide title, keeping the later guide"
            );
        }
    }

    Some(related)
}
