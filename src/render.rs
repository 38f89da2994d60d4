//! reStructuredText rendering of the aggregate index.

use chrono::{DateTime, Local};

use crate::index::PathIndex;

/// Format of the generation timestamp embedded in the intro.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

fn intro(generated: DateTime<Local>) -> String {
    format!(
        "\
================================
Index to Elements and Attributes
================================

This is an index of the elements and attributes in use across the
resource descriptor corpus, intended primarily to help people looking
for concrete usage examples.  The index keys are xpath-like
expressions, where the basic root node is left out; since elements and
attributes are by and large equivalent in descriptors, we do not
distinguish between them.

Note that many elements can occur at many places.  Thus, you should
keep searching after the first match to find more examples.

Meta elements are omnipresent, but some names are somewhat magic, so
for those we use the ad-hoc syntax ``meta[name]``.  Some other
elements for which attribute values or similar are important for
semantics are listed in a similar way, e.g., displayHint, property,
or mixin.

This document was generated {}.

",
        generated.format(TIMESTAMP_FORMAT)
    )
}

/// Render the index as a linked reStructuredText document.
///
/// Output is deterministic for a given index: keys are emitted in
/// lexicographic order, each key's references sorted, and the trailing
/// link-target block lists every referenced identifier exactly once,
/// sorted. Only the timestamp in the intro varies between runs.
pub fn render_index(
    index: &PathIndex,
    base_url: &str,
    extension: &str,
    generated: DateTime<Local>,
) -> String {
    let mut lines = Vec::new();

    for (key, docs) in index.iter() {
        let refs: Vec<String> = docs.iter().map(|id| format!("`{id}`_")).collect();
        lines.push(format!(":{}:\n  {}", key, refs.join(", ")));
    }

    lines.push(String::new());
    for id in index.document_ids() {
        lines.push(format!(".. _{id}: {base_url}/{id}.{extension}"));
    }

    let mut out = intro(generated);
    out.push_str(&lines.join("\n"));
    out.push('\n');
    out
}
