//! Node classification by name prefix.

use std::collections::HashMap;

use crate::config::{NameSeparator, Prefixes};
use crate::types::DesignNode;

/// Token category. Declaration order is emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Color,
    Size,
    Spacing,
    Border,
    Radius,
    Shadow,
    Font,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Color,
        Category::Size,
        Category::Spacing,
        Category::Border,
        Category::Radius,
        Category::Shadow,
        Category::Font,
    ];

    /// Rank stored in `Token::ordering`.
    pub fn ordering(self) -> u8 {
        match self {
            Category::Color => 1,
            Category::Size => 2,
            Category::Spacing => 3,
            Category::Border => 4,
            Category::Radius => 5,
            Category::Shadow => 6,
            Category::Font => 7,
        }
    }

    fn prefix(self, prefixes: &Prefixes) -> &str {
        match self {
            Category::Color => &prefixes.color,
            Category::Size => &prefixes.size,
            Category::Spacing => &prefixes.spacing,
            Category::Border => &prefixes.border,
            Category::Radius => &prefixes.border_radius,
            Category::Shadow => &prefixes.shadow,
            Category::Font => &prefixes.font,
        }
    }
}

/// Prefix → category lookup built once per run.
#[derive(Debug, Clone)]
pub struct PrefixTable {
    separator: char,
    categories: HashMap<String, Category>,
}

impl PrefixTable {
    pub fn new(prefixes: &Prefixes, separator: NameSeparator) -> Self {
        let mut categories = HashMap::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            // First category wins if a prefix is configured twice.
            categories
                .entry(category.prefix(prefixes).trim().to_string())
                .or_insert(category);
        }
        Self {
            separator: separator.as_char(),
            categories,
        }
    }

    /// Category selected by the first trimmed segment of `name`.
    pub fn lookup(&self, name: &str) -> Option<Category> {
        let first = name.split(self.separator).next().unwrap_or_default().trim();
        self.categories.get(first).copied()
    }
}

/// A node paired with the single category it belongs to.
#[derive(Debug, Clone, Copy)]
pub struct Classified<'a> {
    pub kind: Category,
    pub node: &'a DesignNode,
}

pub fn classify<'a>(node: &'a DesignNode, table: &PrefixTable) -> Option<Classified<'a>> {
    table
        .lookup(&node.name)
        .map(|kind| Classified { kind, node })
}
