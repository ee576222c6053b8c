//! Table of contents generated from template headings.
//!
//! `## ` lines are top-level entries and `### ` lines are nested entries.
//! Anchors are the heading text lower-cased, nothing more, so only
//! single-word headings produce working links; headings with a space are
//! skipped.

/// Build an anchor-linked outline from the headings in `source`.
///
/// # Examples
///
/// ```
/// use yaml_readme::templating::extract_toc;
///
/// let toc = extract_toc("## Alpha\n### Beta Two\n### Gamma\n");
/// assert_eq!(toc, "- [Alpha](#alpha)\n - [Gamma](#gamma)\n");
/// ```
pub fn extract_toc(source: &str) -> String {
    let mut toc = String::new();

    for line in source.split('\n') {
        let (prefix, heading) = if let Some(heading) = line.strip_prefix("## ") {
            ("- ", heading)
        } else if let Some(heading) = line.strip_prefix("### ") {
            (" - ", heading)
        } else {
            continue;
        };

        let heading = heading.trim();
        if heading.split(' ').count() > 1 {
            continue;
        }

        toc.push_str(&format!("{prefix}[{heading}](#{})\n", heading.to_lowercase()));
    }

    toc
}
