// Click target classification
// Walks the ancestor chain of a click, innermost element first, and
// reports the nearest anchor or button

use url::Url;

use crate::ports::DomNode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickAction {
    Link {
        url: String,
        text: String,
        external: bool,
    },
    Button {
        id: String,
        text: String,
    },
}

/// Anchors without an href are not navigational and are skipped;
/// clicks on anything but an anchor or button are ignored.
pub fn classify_click(path: &[DomNode], page_url: &str) -> Option<ClickAction> {
    for node in path {
        let tag = node.tag.to_lowercase();
        if tag == "a" {
            if let Some(href) = node.href.as_deref().filter(|href| !href.is_empty()) {
                return Some(ClickAction::Link {
                    url: href.to_string(),
                    text: node_text(node),
                    external: is_external_link(href, page_url),
                });
            }
        } else if tag == "button" {
            return Some(ClickAction::Button {
                id: node.id.clone().unwrap_or_default(),
                text: node_text(node),
            });
        }
    }
    None
}

/// A link is external when its resolved origin differs from the page
/// origin. Relative hrefs resolve against the page and are internal.
pub fn is_external_link(href: &str, page_url: &str) -> bool {
    let Ok(page) = Url::parse(page_url) else {
        return false;
    };
    let Ok(target) = page.join(href) else {
        return false;
    };
    target.origin() != page.origin()
}

fn node_text(node: &DomNode) -> String {
    node.text.as_deref().unwrap_or_default().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "https://festa.example/services/catering";

    fn anchor(href: &str, text: &str) -> DomNode {
        DomNode {
            tag: "a".to_string(),
            href: Some(href.to_string()),
            id: None,
            text: Some(text.to_string()),
        }
    }

    fn node(tag: &str) -> DomNode {
        DomNode {
            tag: tag.to_string(),
            ..DomNode::default()
        }
    }

    #[test]
    fn click_inside_an_anchor_resolves_to_the_anchor() {
        let path = vec![node("span"), anchor("/profiles/12", "View profile"), node("div")];
        let action = classify_click(&path, PAGE).unwrap();
        assert_eq!(
            action,
            ClickAction::Link {
                url: "/profiles/12".to_string(),
                text: "View profile".to_string(),
                external: false,
            }
        );
    }

    #[test]
    fn nearest_ancestor_wins() {
        let inner = DomNode {
            tag: "button".to_string(),
            id: Some("add-to-cart".to_string()),
            text: Some(" Add ".to_string()),
            href: None,
        };
        let path = vec![inner, anchor("https://festa.example/x", "outer")];
        let action = classify_click(&path, PAGE).unwrap();
        assert_eq!(
            action,
            ClickAction::Button {
                id: "add-to-cart".to_string(),
                text: "Add".to_string(),
            }
        );
    }

    #[test]
    fn cross_origin_links_are_external() {
        let path = vec![anchor("https://maps.example.com/venue", "Map")];
        let Some(ClickAction::Link { external, .. }) = classify_click(&path, PAGE) else {
            panic!("expected a link action");
        };
        assert!(external);
    }

    #[test]
    fn same_origin_absolute_links_are_internal() {
        let path = vec![anchor("https://festa.example/about", "About")];
        let Some(ClickAction::Link { external, .. }) = classify_click(&path, PAGE) else {
            panic!("expected a link action");
        };
        assert!(!external);
    }

    #[test]
    fn anchors_without_href_are_skipped() {
        let bare = DomNode {
            tag: "a".to_string(),
            ..DomNode::default()
        };
        let path = vec![bare, node("div"), node("body")];
        assert_eq!(classify_click(&path, PAGE), None);
    }

    #[test]
    fn plain_container_clicks_are_ignored() {
        let path = vec![node("div"), node("section"), node("body")];
        assert_eq!(classify_click(&path, PAGE), None);
    }
}
