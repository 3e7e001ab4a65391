//! Scheme-dependent favicon selection
//!
//! The page embeds its icon variants as a JSON array on the config
//! carrier. When the resolved scheme changes, the variant tagged for that
//! scheme is written onto a dynamically managed link node. Every failure
//! path here is a silent no-op; icons are cosmetic.

use crate::mode::ColorScheme;
use serde::Deserialize;
use vista_core::{node_ids, Document};

/// Config-carrier data attribute carrying the icon variant payload.
pub const CARRIER_FAVICONS_ATTR: &str = "data-favicons";

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct IconVariant {
    pub src: String,
    /// Scheme this variant targets; untagged variants are never selected
    /// dynamically.
    #[serde(default)]
    pub theme: Option<ColorScheme>,
    #[serde(default)]
    pub sizes: Option<String>,
}

/// Parse the carrier payload; malformed JSON yields no variants.
pub fn parse_variants(payload: &str) -> Vec<IconVariant> {
    match serde_json::from_str(payload) {
        Ok(variants) => variants,
        Err(err) => {
            tracing::debug!(%err, "ignoring malformed icon variant payload");
            Vec::new()
        }
    }
}

/// The variant tagged for `scheme`, if any.
pub fn select(variants: &[IconVariant], scheme: ColorScheme) -> Option<&IconVariant> {
    variants.iter().find(|v| v.theme == Some(scheme))
}

/// Reflect the icon for `scheme` onto the managed link node.
pub(crate) fn apply_variant(document: &Document, scheme: ColorScheme) {
    let Some(carrier) = document.node(node_ids::CONFIG_CARRIER) else {
        return;
    };
    let Some(payload) = carrier.attr(CARRIER_FAVICONS_ATTR) else {
        return;
    };

    let variants = parse_variants(&payload);
    let Some(variant) = select(&variants, scheme) else {
        return;
    };

    let link = document.ensure_node(node_ids::FAVICON);
    link.set_attr("rel", "icon");
    if let Some(sizes) = &variant.sizes {
        link.set_attr("sizes", sizes);
    }
    link.set_attr("href", &variant.src);
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"[
        {"src": "/favicon-light.png", "theme": "light", "sizes": "32x32"},
        {"src": "/favicon-dark.png", "theme": "dark"}
    ]"#;

    #[test]
    fn selects_variant_matching_scheme() {
        let variants = parse_variants(PAYLOAD);
        assert_eq!(variants.len(), 2);
        assert_eq!(
            select(&variants, ColorScheme::Dark).map(|v| v.src.as_str()),
            Some("/favicon-dark.png")
        );
        assert_eq!(
            select(&variants, ColorScheme::Light).map(|v| v.sizes.as_deref()),
            Some(Some("32x32"))
        );
    }

    #[test]
    fn untagged_variants_are_never_selected() {
        let variants = parse_variants(r#"[{"src": "/favicon.svg"}]"#);
        assert_eq!(select(&variants, ColorScheme::Light), None);
        assert_eq!(select(&variants, ColorScheme::Dark), None);
    }

    #[test]
    fn malformed_payload_yields_nothing() {
        assert!(parse_variants("not json").is_empty());
        assert!(parse_variants(r#"{"src": "object-not-array"}"#).is_empty());
    }
}
