// SPDX-License-Identifier: MPL-2.0
//! Image entries collected from the page when a viewer is created.

use super::caption;
use crate::config::{ViewerConfig, WRAPPER_CLASS};
use crate::document::{Document, NodeId};

/// One image handled by the viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageEntry {
    pub node: NodeId,
    /// Anchor wrapping the source image; clicking it opens the viewer.
    pub wrapper: NodeId,
    pub wrapper_id: String,
    /// Thumbnail shown on the page (`src`).
    pub thumbnail: String,
    /// Full-resolution URL (`data-full`, else `src`).
    pub url: String,
    pub alt: String,
    /// `data-link`, else the `href` of an existing wrapper anchor.
    pub link: Option<String>,
    pub requires_reveal: bool,
    /// Caption resolved against the page.
    pub caption: Option<String>,
}

fn reveal_flag(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().eq_ignore_ascii_case("false"))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Wraps every `img.{target_class}` of `document` in an anchor and derives
/// its entry.
///
/// An existing parent anchor is reused as the wrapper. Wrappers without an
/// id get `{target_class}-wrap-{index}`.
pub fn collect(document: &mut Document, config: &ViewerConfig) -> Vec<ImageEntry> {
    let images = document.elements_with_class("img", &config.target_class);
    let mut entries = Vec::with_capacity(images.len());

    for (index, node) in images.into_iter().enumerate() {
        let wrapper = match document.parent(node) {
            Some(parent) if document.node(parent).tag == "a" => parent,
            _ => document.wrap(node, "a"),
        };

        let wrapper_node = document.node_mut(wrapper);
        if !wrapper_node.has_class(WRAPPER_CLASS) {
            wrapper_node.classes.push(WRAPPER_CLASS.to_string());
        }
        let wrapper_id = wrapper_node
            .id
            .get_or_insert_with(|| format!("{}-wrap-{index}", config.target_class))
            .clone();
        let wrapper_href = non_empty(wrapper_node.attr("href")).map(str::to_string);

        let image = document.node(node);
        let src = image.attr("src").unwrap_or_default();
        let full = non_empty(image.data("full")).unwrap_or(src);
        let link = non_empty(image.data("link"))
            .map(str::to_string)
            .or(wrapper_href)
            .map(|link| document.resolve_url(&link));

        let mut entry = ImageEntry {
            node,
            wrapper,
            wrapper_id,
            thumbnail: document.resolve_url(src),
            url: document.resolve_url(full),
            alt: image.attr("alt").unwrap_or_default().to_string(),
            link,
            requires_reveal: reveal_flag(image.data("reveal")),
            caption: None,
        };
        entry.caption = caption::resolve(document, &entry, &config.captions);
        tracing::debug!(
            index,
            url = %entry.url,
            reveal = entry.requires_reveal,
            "registered viewer image"
        );
        entries.push(entry);
    }

    entries
}
