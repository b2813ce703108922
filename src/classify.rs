// Click classification: a fixed-priority, first-match decision list over the
// clicked link's class name and ancestry. Classes are matched by substring
// containment, so rule order is load-bearing and must not be reordered.

use url::Url;

use crate::types::{AnalyticsEvent, LinkContext, LinkTarget};

/// Product category reported for product-card clicks.
const PRODUCT_CATEGORY: &str = "apparel";
/// Grid placements the page lays product and store cards in.
const PRODUCT_PLACEMENT: &str = "product_grid";
const STORE_PLACEMENT: &str = "store_grid";

/// Social platforms the page links out to. Gate and resolution order.
const SOCIAL_DOMAINS: [&str; 6] = [
    "instagram.com",
    "spotify.com",
    "youtube.com",
    "twitter.com",
    "facebook.com",
    "tiktok.com",
];

/// Classify a click into zero or more analytics events.
///
/// A click with no enclosing link classifies to nothing. Otherwise exactly one
/// rule applies; only the product rule emits two events (a view plus a
/// merchandise interaction).
pub fn classify_click(link: Option<&LinkTarget>) -> Vec<AnalyticsEvent> {
    let link = match link {
        Some(link) => link,
        None => return Vec::new(),
    };

    let class = link.class_name.as_str();
    let href = link.href.as_deref();

    if class.contains("nav__link") {
        return vec![AnalyticsEvent::Navigation {
            label: link.label(),
            href: link.href.clone(),
            source: "main_navigation".to_string(),
        }];
    }

    if class.contains("product-card__link") {
        let product = link
            .context
            .product_name
            .clone()
            .unwrap_or_else(|| "Unknown Product".to_string());
        return vec![
            AnalyticsEvent::ProductView {
                product: product.clone(),
                category: PRODUCT_CATEGORY.to_string(),
                placement: PRODUCT_PLACEMENT.to_string(),
            },
            AnalyticsEvent::Merchandise {
                item: product,
                category: PRODUCT_CATEGORY.to_string(),
                value: 0,
                location: PRODUCT_PLACEMENT.to_string(),
                action: "view_product".to_string(),
            },
        ];
    }

    if class.contains("store-card__link") {
        let store = link
            .context
            .store_title
            .clone()
            .unwrap_or_else(|| "Store".to_string());
        return vec![AnalyticsEvent::StoreRedirect {
            store,
            kind: "merchandise_store".to_string(),
            placement: STORE_PLACEMENT.to_string(),
        }];
    }

    if class.contains("cta-button") {
        return vec![AnalyticsEvent::Merchandise {
            item: link.label(),
            category: "cta_interaction".to_string(),
            value: 0,
            location: element_location(&link.context),
            action: "cta_click".to_string(),
        }];
    }

    if class.contains("footer__link") {
        return vec![AnalyticsEvent::FooterInteraction {
            kind: "footer_link".to_string(),
            href: link.href.clone(),
        }];
    }

    if class.contains("footer__legal-link") {
        return vec![AnalyticsEvent::LegalPageView {
            page: legal_page_slug(&link.label()),
        }];
    }

    if let Some(href) = href {
        if SOCIAL_DOMAINS.iter().any(|domain| href.contains(domain)) {
            return vec![AnalyticsEvent::SocialClick {
                platform: platform_from_url(href).to_string(),
                location: element_location(&link.context),
                kind: "external_link".to_string(),
            }];
        }

        if href.starts_with("http") {
            return vec![AnalyticsEvent::ContentEngagement {
                content_type: "external_link".to_string(),
                identifier: domain_from_url(href),
                action: "click".to_string(),
                value: 0,
            }];
        }
    }

    Vec::new()
}

/// Resolve where on the page an element lives: enclosing section id, else the
/// navigation or footer landmark, else a fixed fallback.
pub fn element_location(context: &LinkContext) -> String {
    if let Some(section_id) = &context.section_id {
        return section_id.clone();
    }
    if context.in_nav {
        return "navigation".to_string();
    }
    if context.in_footer {
        return "footer".to_string();
    }
    "unknown_location".to_string()
}

/// Resolve a social platform name from a URL. First match wins, in the
/// allowlist order. `x.com` resolves to twitter but does not gate the social
/// rule on its own.
pub fn platform_from_url(url: &str) -> &'static str {
    if url.contains("instagram.com") {
        return "instagram";
    }
    if url.contains("spotify.com") {
        return "spotify";
    }
    if url.contains("youtube.com") {
        return "youtube";
    }
    if url.contains("twitter.com") || url.contains("x.com") {
        return "twitter";
    }
    if url.contains("facebook.com") {
        return "facebook";
    }
    if url.contains("tiktok.com") {
        return "tiktok";
    }
    "unknown_platform"
}

/// Hostname of a URL, or a fixed fallback when it does not parse.
pub fn domain_from_url(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
        .unwrap_or_else(|| "invalid_url".to_string())
}

/// Legal page slug: lower-cased link text with whitespace runs collapsed to
/// single underscores.
fn legal_page_slug(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}
