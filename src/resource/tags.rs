//! Tag normalisation
//!
//! AWS APIs hand tags back either as `[{Key, Value}]` lists or as plain maps;
//! both become a list of [`ResourceTag`] in API order.

use super::model::ResourceTag;
use crate::aws::sagemaker::Tag;
use std::collections::BTreeMap;

/// Normalise a `[{Key, Value}]` tag list
pub fn resource_tags(tags: &[Tag]) -> Vec<ResourceTag> {
    tags.iter()
        .map(|t| ResourceTag::new(t.key.as_str(), t.value.as_str()))
        .collect()
}

/// Normalise a `{key: value}` tag map (ordered by key)
pub fn resource_tags_from_map(tags: &BTreeMap<String, String>) -> Vec<ResourceTag> {
    tags.iter()
        .map(|(k, v)| ResourceTag::new(k.as_str(), v.as_str()))
        .collect()
}

/// Value of the first tag with this key
pub fn get_tag<'a>(tags: &'a [ResourceTag], key: &str) -> Option<&'a str> {
    tags.iter()
        .find(|t| t.key == key)
        .map(|t| t.value.as_str())
}

pub fn get_name_tag(tags: &[ResourceTag]) -> Option<&str> {
    get_tag(tags, "Name")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(key: &str, value: &str) -> Tag {
        Tag {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_resource_tags_keeps_order_and_duplicates() {
        let tags = resource_tags(&[tag("env", "prod"), tag("Name", "trainer"), tag("env", "dev")]);
        assert_eq!(
            tags,
            vec![
                ResourceTag::new("env", "prod"),
                ResourceTag::new("Name", "trainer"),
                ResourceTag::new("env", "dev"),
            ]
        );
    }

    #[test]
    fn test_resource_tags_from_map() {
        let mut map = BTreeMap::new();
        map.insert("team".to_string(), "ml".to_string());
        map.insert("cost".to_string(), "42".to_string());
        let tags = resource_tags_from_map(&map);
        assert_eq!(tags[0], ResourceTag::new("cost", "42"));
        assert_eq!(tags[1], ResourceTag::new("team", "ml"));
    }

    #[test]
    fn test_get_name_tag() {
        let tags = resource_tags(&[tag("env", "prod"), tag("Name", "trainer")]);
        assert_eq!(get_name_tag(&tags), Some("trainer"));
        assert_eq!(get_tag(&tags, "owner"), None);
    }

    #[test]
    fn test_get_tag_returns_first_match() {
        let tags = resource_tags(&[tag("env", "prod"), tag("env", "dev")]);
        assert_eq!(get_tag(&tags, "env"), Some("prod"));
    }
}
