//! Message composition
//!
//! Pure string-template construction: the same inputs always produce the
//! same byte-for-byte text.

use serde::Deserialize;

/// Optional fields of a promotional message, assembled in a fixed order:
/// headline, body, link, urgency line, attribution tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MessageTemplate {
    pub headline: Option<String>,
    pub body: Option<String>,
    pub link: Option<String>,
    pub urgency: Option<String>,
    pub attribution: Option<String>,
}

/// Build the final message text.
///
/// Blank or missing fields are omitted; present blocks are separated by
/// one empty line. The headline renders bold and the attribution italic,
/// in the chat markup convention the messaging backend understands.
pub fn compose(template: &MessageTemplate) -> String {
    let mut blocks: Vec<String> = Vec::new();

    if let Some(headline) = present(&template.headline) {
        blocks.push(format!("*{headline}*"));
    }
    if let Some(body) = present(&template.body) {
        blocks.push(body.to_string());
    }
    if let Some(link) = present(&template.link) {
        blocks.push(link.to_string());
    }
    if let Some(urgency) = present(&template.urgency) {
        blocks.push(urgency.to_string());
    }
    if let Some(attribution) = present(&template.attribution) {
        blocks.push(format!("_{attribution}_"));
    }

    blocks.join("\n\n")
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_template() -> MessageTemplate {
        MessageTemplate {
            headline: Some("Weekend Sale".to_string()),
            body: Some("Everything 20% off until Sunday.".to_string()),
            link: Some("https://shop.example.com/sale".to_string()),
            urgency: Some("Only 48 hours left!".to_string()),
            attribution: Some("Team Example".to_string()),
        }
    }

    #[test]
    fn test_full_template_layout() {
        assert_eq!(
            compose(&full_template()),
            "*Weekend Sale*\n\n\
             Everything 20% off until Sunday.\n\n\
             https://shop.example.com/sale\n\n\
             Only 48 hours left!\n\n\
             _Team Example_"
        );
    }

    #[test]
    fn test_empty_fields_are_omitted() {
        let template = MessageTemplate {
            headline: Some("Weekend Sale".to_string()),
            body: Some("Everything 20% off.".to_string()),
            link: None,
            urgency: Some("   ".to_string()),
            attribution: None,
        };

        assert_eq!(compose(&template), "*Weekend Sale*\n\nEverything 20% off.");
    }

    #[test]
    fn test_all_empty_is_empty_string() {
        assert_eq!(compose(&MessageTemplate::default()), "");
    }

    #[test]
    fn test_deterministic() {
        let template = full_template();
        assert_eq!(compose(&template), compose(&template));
    }
}
