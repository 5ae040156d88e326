use crate::model::{Achievement, RuleSection};

/// Built-in rule sections, embedded at compile time. The first section is
/// the fallback category for dangling rule references.
pub fn builtin_sections() -> Vec<RuleSection> {
    let raw = include_str!("data/rule_sections.yaml");
    serde_yaml::from_str(raw).expect("built-in rule sections YAML is well-formed")
}

/// Full badge catalog; the unlocked set persists ids out of this list.
pub fn achievement_catalog() -> Vec<Achievement> {
    let raw = include_str!("data/achievements.yaml");
    serde_yaml::from_str(raw).expect("achievement catalog YAML is well-formed")
}
