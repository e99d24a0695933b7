//! Outbound message model handed to the chat-delivery side

use crate::combined::build_combined_link;
use crate::extract::extract_linked_references;
use crate::tables::ReferenceTables;
use serde::{Deserialize, Serialize};

/// One rich message (title, body, fields)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub inline: bool,
}

impl Message {
    /// Linked references in the fields, then the description
    pub fn linked_references(&self, tables: &ReferenceTables) -> Vec<String> {
        let mut text: String = self
            .fields
            .iter()
            .map(|f| f.value.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        text.push(' ');
        text.push_str(&self.description);
        extract_linked_references(&text, tables.search_url())
    }

    /// Append one combined link to the description when the message links
    /// two or more references. Returns whether a link was added.
    pub fn inject_combined_link(&mut self, tables: &ReferenceTables, anchor_text: &str) -> bool {
        let references = self.linked_references(tables);
        if references.len() < 2 {
            return false;
        }

        let link = build_combined_link(&references, anchor_text, tables);
        if self.description.is_empty() {
            self.description = link;
        } else {
            self.description.push_str("\n\n");
            self.description.push_str(&link);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combined::DEFAULT_ANCHOR;

    fn tables() -> &'static ReferenceTables {
        ReferenceTables::builtin()
    }

    #[test]
    fn test_linked_references_from_fields_and_description() {
        let message = Message {
            title: "Test".to_string(),
            description: "[Wisdom 9:9-12](https://biblegateway.com/passage/?search=Ws+9:9-12&version=NRSVCE)"
                .to_string(),
            fields: vec![Field {
                name: "Reading".to_string(),
                value: "[Genesis 1:1](https://biblegateway.com/passage/?search=Ge+1:1)".to_string(),
                inline: false,
            }],
            ..Default::default()
        };
        assert_eq!(
            message.linked_references(tables()),
            vec!["Genesis 1:1", "Wisdom 9:9-12"]
        );
    }

    #[test]
    fn test_inject_combined_link() {
        let mut message = Message {
            title: "Test".to_string(),
            description: "[Isaiah 41:15-19](https://biblegateway.com/passage/?search=Is+41:15-19)\n\
                          [Wisdom 9:9-12](https://biblegateway.com/passage/?search=Ws+9:9-12&version=NRSVCE)"
                .to_string(),
            ..Default::default()
        };
        assert!(message.inject_combined_link(tables(), DEFAULT_ANCHOR));
        assert!(message.description.ends_with(
            "\n\n[Read all on Bible Gateway](https://biblegateway.com/passage/?search=Is+41:15-19,+Ws+9:9-12&version=NRSVCE)"
        ));
    }

    #[test]
    fn test_inject_keeps_alternate_chapter_reading() {
        let mut message = Message {
            title: "Test".to_string(),
            description: "[4[2] Kings 2:6-14](https://biblegateway.com/passage/?search=2+Kgs+2:6-14)\n\
                          [Genesis 1:1](https://biblegateway.com/passage/?search=Ge+1:1)"
                .to_string(),
            ..Default::default()
        };
        assert!(message.inject_combined_link(tables(), DEFAULT_ANCHOR));
        assert!(message.description.ends_with(
            "(https://biblegateway.com/passage/?search=2+Kgs+2:6-14,+Ge+1:1)"
        ));
    }

    #[test]
    fn test_no_injection_for_single_or_no_reference() {
        let mut message = Message {
            title: "Saints & Feasts".to_string(),
            description: "St. John the Baptist".to_string(),
            ..Default::default()
        };
        assert!(!message.inject_combined_link(tables(), DEFAULT_ANCHOR));
        assert_eq!(message.description, "St. John the Baptist");

        message.description =
            "[Genesis 1:1](https://biblegateway.com/passage/?search=Ge+1:1)".to_string();
        assert!(!message.inject_combined_link(tables(), DEFAULT_ANCHOR));
    }

    #[test]
    fn test_serialize_skips_empty() {
        let message = Message {
            title: "Daily Readings".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&message).unwrap();
        assert_eq!(json, r#"{"title":"Daily Readings"}"#);
    }
}
