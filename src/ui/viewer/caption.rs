// SPDX-License-Identifier: MPL-2.0
//! Caption lookup for viewer images.
//!
//! Three sources are consulted in order and every later non-empty source
//! overwrites the earlier ones:
//!
//! 1. text of the nodes matched by the configured selectors, where `&`
//!    stands for the wrapper id of the image
//! 2. the `data-caption` attribute
//! 3. the text of the node named by `data-caption-id`

use super::entry::ImageEntry;
use crate::document::Document;

/// Placeholder replaced by the wrapper id in caption selectors.
pub const WRAPPER_PLACEHOLDER: char = '&';

fn from_selectors(document: &Document, entry: &ImageEntry, selectors: &[String]) -> String {
    let mut text = String::new();
    for selector in selectors {
        let selector = selector.replace(WRAPPER_PLACEHOLDER, &entry.wrapper_id);
        match document.query_all(&selector) {
            Ok(nodes) => {
                for node in nodes {
                    text.push_str(&document.text_content(node));
                }
            }
            Err(err) => tracing::warn!(selector = %selector, "invalid caption selector: {err}"),
        }
    }
    text
}

/// Resolves the caption of `entry`; `None` hides the caption region.
#[must_use]
pub fn resolve(document: &Document, entry: &ImageEntry, selectors: &[String]) -> Option<String> {
    let image = document.node(entry.node);
    let mut caption = from_selectors(document, entry, selectors);

    if let Some(inline) = image.data("caption").filter(|c| !c.trim().is_empty()) {
        caption = inline.to_string();
    }

    if let Some(referenced) = image
        .data("caption-id")
        .and_then(|id| document.find_by_id(id))
        .map(|node| document.text_content(node))
        .filter(|text| !text.trim().is_empty())
    {
        caption = referenced;
    }

    let caption = caption.trim();
    (!caption.is_empty()).then(|| caption.to_string())
}
