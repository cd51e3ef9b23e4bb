//! Items - anything declared while evaluating a build description.

use crate::core::label::Label;
use crate::core::target::Target;

/// A named set of compiler/linker settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub label: Label,
}

/// A toolchain definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub label: Label,
}

/// A concurrency pool for build steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool {
    pub label: Label,
    pub depth: u32,
}

/// Any other declared entity, known only by label and kind name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtherItem {
    pub label: Label,
    pub type_name: String,
}

/// A declared entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Target(Target),
    Config(Config),
    Toolchain(Toolchain),
    Pool(Pool),
    Other(OtherItem),
}

impl Item {
    pub fn label(&self) -> &Label {
        match self {
            Item::Target(t) => t.label(),
            Item::Config(c) => &c.label,
            Item::Toolchain(t) => &t.label,
            Item::Pool(p) => &p.label,
            Item::Other(o) => &o.label,
        }
    }

    /// Human-readable kind, used in diagnostics.
    pub fn item_type_name(&self) -> &str {
        match self {
            Item::Target(_) => "target",
            Item::Config(_) => "config",
            Item::Toolchain(_) => "toolchain",
            Item::Pool(_) => "pool",
            Item::Other(o) => &o.type_name,
        }
    }

    pub fn as_target(&self) -> Option<&Target> {
        match self {
            Item::Target(t) => Some(t),
            _ => None,
        }
    }
}

impl From<Target> for Item {
    fn from(target: Target) -> Self {
        Item::Target(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::target::OutputType;
    use crate::test_support::label;

    #[test]
    fn test_kind_names_and_extraction() {
        let target: Item = Target::opaque(label("//a:t"), OutputType::Group).into();
        assert_eq!(target.item_type_name(), "target");
        assert!(target.as_target().is_some());

        let config = Item::Config(Config { label: label("//a:c") });
        assert_eq!(config.item_type_name(), "config");
        assert!(config.as_target().is_none());
        assert_eq!(config.label(), &label("//a:c"));

        let other = Item::Other(OtherItem {
            label: label("//a:o"),
            type_name: "template".to_string(),
        });
        assert_eq!(other.item_type_name(), "template");
    }
}
