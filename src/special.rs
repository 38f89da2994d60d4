//! Special-key rules for elements whose values carry semantics.
//!
//! A handful of descriptor elements and attributes (mixins, display
//! hints, properties) are only meaningful together with their value, so
//! the index lists them as `name[value]` in addition to their plain
//! path keys. The rules form a small closed set dispatched by name; the
//! extractor works unchanged if the set is empty.

use std::collections::HashSet;

/// One synthetic-key rule, matched against an element or attribute name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialRule {
    /// Key the match by its own value: `name[value]`. For elements the
    /// value is the leading text content, for attributes the literal
    /// attribute value.
    Value { name: &'static str },
    /// Key the match by one of the element's attributes, trying `attr`
    /// first and `fallback` second: `name[attr-value]`. No key is added
    /// when neither attribute is present.
    NamedBy {
        name: &'static str,
        attr: &'static str,
        fallback: &'static str,
    },
}

impl SpecialRule {
    /// Add any synthetic keys this rule yields for one element or
    /// attribute occurrence. `attrs` are the attributes of the element
    /// the occurrence belongs to.
    pub fn apply(
        &self,
        name: &str,
        value: Option<&str>,
        attrs: &[(String, String)],
        keys: &mut HashSet<String>,
    ) {
        match self {
            SpecialRule::Value { name: rule_name } => {
                if name == *rule_name {
                    // Empty values carry no semantics worth indexing.
                    if let Some(value) = value.filter(|v| !v.is_empty()) {
                        keys.insert(format!("{rule_name}[{value}]"));
                    }
                }
            }
            SpecialRule::NamedBy {
                name: rule_name,
                attr,
                fallback,
            } => {
                if name == *rule_name {
                    let lookup = |wanted: &str| {
                        attrs
                            .iter()
                            .find(|(k, _)| k == wanted)
                            .map(|(_, v)| v.as_str())
                            .filter(|v| !v.is_empty())
                    };
                    if let Some(value) = lookup(attr).or_else(|| lookup(fallback)) {
                        keys.insert(format!("{rule_name}[{value}]"));
                    }
                }
            }
        }
    }
}

/// The rule set for resource descriptors: mixin and displayHint are
/// keyed by their value; property is keyed by its `key` attribute,
/// falling back to `name`. The fallback is deliberate and specific to
/// property; the other rules have none.
pub fn default_rules() -> Vec<SpecialRule> {
    vec![
        SpecialRule::Value { name: "mixin" },
        SpecialRule::Value { name: "displayHint" },
        SpecialRule::NamedBy {
            name: "property",
            attr: "key",
            fallback: "name",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_value_rule_matches_name() {
        let rule = SpecialRule::Value { name: "mixin" };
        let mut keys = HashSet::new();

        rule.apply("mixin", Some("//scs#q"), &[], &mut keys);
        rule.apply("column", Some("ignored"), &[], &mut keys);

        assert_eq!(keys.len(), 1);
        assert!(keys.contains("mixin[//scs#q]"));
    }

    #[test]
    fn test_value_rule_skips_missing_or_empty_value() {
        let rule = SpecialRule::Value { name: "displayHint" };
        let mut keys = HashSet::new();

        rule.apply("displayHint", None, &[], &mut keys);
        rule.apply("displayHint", Some(""), &[], &mut keys);

        assert!(keys.is_empty());
    }

    #[test]
    fn test_named_by_prefers_primary_attribute() {
        let rule = SpecialRule::NamedBy {
            name: "property",
            attr: "key",
            fallback: "name",
        };
        let mut keys = HashSet::new();

        rule.apply(
            "property",
            None,
            &attrs(&[("key", "maxrec"), ("name", "other")]),
            &mut keys,
        );

        assert_eq!(keys.len(), 1);
        assert!(keys.contains("property[maxrec]"));
    }

    #[test]
    fn test_named_by_falls_back_to_secondary() {
        let rule = SpecialRule::NamedBy {
            name: "property",
            attr: "key",
            fallback: "name",
        };
        let mut keys = HashSet::new();

        rule.apply("property", None, &attrs(&[("name", "maxrec")]), &mut keys);
        assert!(keys.contains("property[maxrec]"));

        // Empty primary behaves as absent.
        let mut keys = HashSet::new();
        rule.apply(
            "property",
            None,
            &attrs(&[("key", ""), ("name", "maxrec")]),
            &mut keys,
        );
        assert!(keys.contains("property[maxrec]"));
    }

    #[test]
    fn test_named_by_without_either_attribute_adds_nothing() {
        let rule = SpecialRule::NamedBy {
            name: "property",
            attr: "key",
            fallback: "name",
        };
        let mut keys = HashSet::new();

        rule.apply("property", None, &attrs(&[("value", "x")]), &mut keys);

        assert!(keys.is_empty());
    }

    #[test]
    fn test_default_rules_cover_the_three_names() {
        let rules = default_rules();
        let mut keys = HashSet::new();

        for rule in &rules {
            rule.apply("mixin", Some("//siap#base"), &[], &mut keys);
            rule.apply("displayHint", Some("type=url"), &[], &mut keys);
            rule.apply("property", None, &attrs(&[("key", "k")]), &mut keys);
        }

        assert_eq!(keys.len(), 3);
        assert!(keys.contains("mixin[//siap#base]"));
        assert!(keys.contains("displayHint[type=url]"));
        assert!(keys.contains("property[k]"));
    }
}
