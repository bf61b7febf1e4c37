use crate::resolve::AbstractionMap;

/// Effective utility classes for `selector`.
///
/// The selector's own classes followed by those of the selector it extends
/// (one hop only), separated by a space and trimmed. Unknown selectors and
/// missing extend targets contribute nothing.
pub fn flatten(selector: &str, map: &AbstractionMap) -> String {
    let Some(abstraction) = map.get(selector) else {
        return String::new();
    };

    let own = abstraction.utility_classes.as_deref().unwrap_or("");
    let inherited = abstraction
        .extends
        .as_deref()
        .and_then(|parent| map.get(parent))
        .and_then(|parent| parent.utility_classes.as_deref())
        .unwrap_or("");

    format!("{} {}", own, inherited).trim().to_string()
}
