//! Schema-change taxonomy and compiled category patterns.

use crate::error::{PatternError, PatternResult};
use regex::{Regex, RegexBuilder};
use std::fmt;
use std::str::FromStr;

/// Kind of schema change a file revision may belong to. A single file can
/// fall into several categories at once; the sets are not a partition.
///
/// Declaration order is the result-column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Whitespace,
    Dml,
    Index,
    Comments,
    NoDiffInfo,
    Privilege,
    Pk,
    Engine,
    Renaming,
    Other,
}

impl Category {
    /// All categories, in result-column order.
    pub const ALL: [Category; 10] = [
        Category::Whitespace,
        Category::Dml,
        Category::Index,
        Category::Comments,
        Category::NoDiffInfo,
        Category::Privilege,
        Category::Pk,
        Category::Engine,
        Category::Renaming,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Whitespace => "Whitespace",
            Category::Dml => "DML",
            Category::Index => "Index",
            Category::Comments => "Comments",
            Category::NoDiffInfo => "NoDiffInfo",
            Category::Privilege => "Privilege",
            Category::Pk => "PK",
            Category::Engine => "Engine",
            Category::Renaming => "Renaming",
            Category::Other => "Other",
        }
    }

    /// Whether the category is detected by a configured pattern pass.
    /// The other four are derived from diff structure (§Whitespace,
    /// NoDiffInfo) or from name-status output (Renaming) or from the
    /// residual after all passes (Other).
    pub fn is_pattern_capable(&self) -> bool {
        !matches!(
            self,
            Category::Whitespace | Category::NoDiffInfo | Category::Renaming | Category::Other
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| PatternError::UnknownCategory(s.to_string()))
    }
}

/// How a pattern pass removes matched content from a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Substitute every match with the empty string across the whole block
    /// text, then re-split and drop lines that became empty. The pattern may
    /// span line boundaries (block comments).
    Erase,
    /// Drop every line whose trimmed content matches the pattern
    /// (case-insensitive); keep the other lines trimmed.
    DeleteLine,
}

impl MatchMode {
    /// Erasure is reserved for comment stripping; every other pattern
    /// category removes whole lines.
    pub fn for_category(category: Category) -> MatchMode {
        match category {
            Category::Comments => MatchMode::Erase,
            _ => MatchMode::DeleteLine,
        }
    }
}

/// One entry of the ordered category-pattern list. Application order is
/// semantically load-bearing: later passes only ever see the residue left
/// by earlier ones.
#[derive(Debug, Clone)]
pub struct CategorySpec {
    category: Category,
    mode: MatchMode,
    regex: Regex,
}

impl CategorySpec {
    /// Compile a configured `(category, pattern)` pair. Erase patterns get
    /// multi-line anchors, delete-line patterns get case-insensitive
    /// matching; in neither mode does `.` match a newline. Fails on invalid
    /// regexes and on patterns supplied for derived categories, so that a
    /// bad configuration never reaches classification.
    pub fn compile(category: Category, pattern: &str) -> PatternResult<Self> {
        if !category.is_pattern_capable() {
            return Err(PatternError::Derived(category));
        }
        let mode = MatchMode::for_category(category);
        let regex = match mode {
            MatchMode::Erase => RegexBuilder::new(pattern).multi_line(true).build(),
            MatchMode::DeleteLine => RegexBuilder::new(pattern).case_insensitive(true).build(),
        }
        .map_err(|source| PatternError::Invalid { category, source })?;
        Ok(CategorySpec {
            category,
            mode,
            regex,
        })
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub(crate) fn regex(&self) -> &Regex {
        &self.regex
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert_eq!("dml".parse::<Category>().unwrap(), Category::Dml);
        assert_eq!("pk".parse::<Category>().unwrap(), Category::Pk);
        assert!("Schema".parse::<Category>().is_err());
    }

    #[test]
    fn column_order_is_declaration_order() {
        let labels: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(
            labels,
            [
                "Whitespace",
                "DML",
                "Index",
                "Comments",
                "NoDiffInfo",
                "Privilege",
                "PK",
                "Engine",
                "Renaming",
                "Other"
            ]
        );
    }

    #[test]
    fn comments_selects_erase_mode() {
        let spec = CategorySpec::compile(Category::Comments, r"--.*").unwrap();
        assert_eq!(spec.mode(), MatchMode::Erase);
        let spec = CategorySpec::compile(Category::Dml, r"insert\s+into").unwrap();
        assert_eq!(spec.mode(), MatchMode::DeleteLine);
    }

    #[test]
    fn delete_line_patterns_match_case_insensitively() {
        let spec = CategorySpec::compile(Category::Engine, r"engine\s*=\s*\w+").unwrap();
        assert!(spec.regex().is_match("ENGINE=InnoDB"));
        assert!(spec.regex().is_match("engine = myisam"));
    }

    #[test]
    fn derived_categories_reject_patterns() {
        for category in [
            Category::Whitespace,
            Category::NoDiffInfo,
            Category::Renaming,
            Category::Other,
        ] {
            assert!(matches!(
                CategorySpec::compile(category, "x"),
                Err(PatternError::Derived(c)) if c == category
            ));
        }
    }

    #[test]
    fn invalid_regex_is_a_compile_error() {
        assert!(matches!(
            CategorySpec::compile(Category::Index, "(unclosed"),
            Err(PatternError::Invalid { category: Category::Index, .. })
        ));
    }
}
