//! Ordered pattern-elimination passes over segmented diff blocks.
//!
//! Classification works by attrition: each configured category pass
//! removes the content it recognizes from the block residue, and the
//! category is recorded only when the residue measurably shrank. What
//! survives every pass is unclassified.

use crate::category::{Category, CategorySpec, MatchMode};
use crate::segment::{has_hunk_headers, segment_and_normalize};

/// Outcome of running one file diff through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The cleaned diff body was empty; only whitespace changed.
    Whitespace,
    /// The diff body had content but no hunk headers to segment.
    NoDiffInfo,
    /// Hunks were segmented and run through the configured passes.
    Patterns {
        /// Categories whose pass strictly shrank the residue, in
        /// application order.
        detected: Vec<Category>,
        /// True when blocks survived every pass.
        residual: bool,
    },
}

impl Classification {
    /// Flattens into the per-file category list. `Whitespace` and
    /// `NoDiffInfo` stand alone; a surviving residue appends
    /// [`Category::Other`].
    pub fn categories(&self) -> Vec<Category> {
        match self {
            Classification::Whitespace => vec![Category::Whitespace],
            Classification::NoDiffInfo => vec![Category::NoDiffInfo],
            Classification::Patterns { detected, residual } => {
                let mut categories = detected.clone();
                if *residual {
                    categories.push(Category::Other);
                }
                categories
            }
        }
    }
}

/// Residue size: lines summed across blocks after trimming each block.
/// Detection compares this before and after a pass, so only removals
/// that eliminate whole lines register.
pub fn total_line_count(blocks: &[String]) -> usize {
    blocks
        .iter()
        .map(|block| block.trim().split('\n').count())
        .sum()
}

/// Applies one category pass to the residue.
///
/// `Erase` substitutes every match with nothing across the whole block
/// (the pattern may span lines), then drops lines left empty.
/// `DeleteLine` drops each line whose trimmed form matches and keeps
/// the rest trimmed. Blocks reduced to nothing are omitted, so the
/// output upholds the non-empty-block invariant of the segmenter.
pub fn apply_category_pass(blocks: &[String], spec: &CategorySpec) -> Vec<String> {
    let mut remaining = Vec::with_capacity(blocks.len());
    for block in blocks {
        match spec.mode() {
            MatchMode::Erase => {
                let erased = spec.regex().replace_all(block, "");
                let kept: Vec<&str> = erased
                    .split('\n')
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .collect();
                if !kept.is_empty() {
                    remaining.push(kept.join("\n"));
                }
            }
            MatchMode::DeleteLine => {
                let kept: Vec<&str> = block
                    .split('\n')
                    .map(str::trim)
                    .filter(|line| !spec.regex().is_match(line))
                    .collect();
                if !kept.is_empty() {
                    remaining.push(kept.join("\n"));
                }
            }
        }
    }
    remaining
}

/// Runs a whole file diff through segmentation and the configured
/// passes, in order.
///
/// Empty input short-circuits to [`Classification::Whitespace`] and
/// header-less input to [`Classification::NoDiffInfo`]; neither reaches
/// the segmenter. Otherwise each spec sees the residue left by its
/// predecessors and is recorded when [`total_line_count`] strictly
/// decreases across its pass. The loop stops as soon as nothing is
/// left to classify.
pub fn classify_diff(diff_text: &str, specs: &[CategorySpec]) -> Classification {
    if diff_text.trim().is_empty() {
        return Classification::Whitespace;
    }
    if !has_hunk_headers(diff_text) {
        return Classification::NoDiffInfo;
    }

    let mut blocks = segment_and_normalize(diff_text);
    let mut detected = Vec::new();
    for spec in specs {
        if blocks.is_empty() {
            break;
        }
        let before = total_line_count(&blocks);
        let after = apply_category_pass(&blocks, spec);
        if total_line_count(&after) < before {
            detected.push(spec.category());
        }
        blocks = after;
    }
    Classification::Patterns {
        detected,
        residual: !blocks.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(category: Category, pattern: &str) -> CategorySpec {
        CategorySpec::compile(category, pattern).unwrap()
    }

    #[test]
    fn counts_lines_across_blocks() {
        let blocks = vec!["a\nb\nc".to_string(), "d\ne".to_string()];
        assert_eq!(total_line_count(&blocks), 5);
        assert_eq!(total_line_count(&[]), 0);
        // Degenerate case: an empty block still measures one line. The
        // segmenter and the passes never emit one.
        assert_eq!(total_line_count(&["".to_string()]), 1);
    }

    #[test]
    fn delete_line_drops_whole_matching_lines() {
        let pass = spec(Category::Dml, r"insert\s+into");
        let blocks = vec!["insert into t values (1);\ncreate table t (id int);".to_string()];
        assert_eq!(
            apply_category_pass(&blocks, &pass),
            vec!["create table t (id int);".to_string()]
        );
    }

    #[test]
    fn delete_line_matches_case_insensitively() {
        let pass = spec(Category::Engine, r"engine\s*=\s*\w+");
        let blocks = vec!["ENGINE=InnoDB".to_string()];
        assert!(apply_category_pass(&blocks, &pass).is_empty());
    }

    #[test]
    fn erase_removes_spans_inside_lines() {
        let pass = spec(Category::Comments, r"/\*[\s\S]*?\*/|--.*|#.*");
        let blocks = vec!["-- whole line comment\nselect 1;".to_string()];
        assert_eq!(
            apply_category_pass(&blocks, &pass),
            vec!["select 1;".to_string()]
        );
    }

    #[test]
    fn erase_spans_line_boundaries() {
        let pass = spec(Category::Comments, r"/\*[\s\S]*?\*/|--.*|#.*");
        let blocks = vec!["/* first\nsecond */\ndrop view v;".to_string()];
        assert_eq!(
            apply_category_pass(&blocks, &pass),
            vec!["drop view v;".to_string()]
        );
    }

    #[test]
    fn emptied_blocks_are_omitted() {
        let pass = spec(Category::Pk, r"primary\s+key");
        let blocks = vec![
            "primary key (id)".to_string(),
            "alter table t add column c int;".to_string(),
        ];
        let remaining = apply_category_pass(&blocks, &pass);
        assert_eq!(remaining, vec!["alter table t add column c int;".to_string()]);
    }

    #[test]
    fn empty_diff_is_whitespace() {
        assert_eq!(classify_diff("", &[]), Classification::Whitespace);
        assert_eq!(classify_diff("  \n\t\n", &[]), Classification::Whitespace);
        assert_eq!(
            classify_diff("", &[]).categories(),
            vec![Category::Whitespace]
        );
    }

    #[test]
    fn headerless_diff_is_no_diff_info() {
        let classification = classify_diff("Binary files a/s.sql and b/s.sql differ", &[]);
        assert_eq!(classification, Classification::NoDiffInfo);
        assert_eq!(classification.categories(), vec![Category::NoDiffInfo]);
    }

    #[test]
    fn detection_requires_a_strict_size_decrease() {
        // The pattern matches but the erased lines stay non-empty, so
        // the count does not drop and the category is not recorded.
        let specs = vec![spec(Category::Comments, r"--.*")];
        let diff = "@@ -1 +1 @@\n-select 1; -- old\n+select 2; -- new\n";
        let classification = classify_diff(diff, &specs);
        assert_eq!(
            classification,
            Classification::Patterns {
                detected: vec![],
                residual: true,
            }
        );
        assert_eq!(classification.categories(), vec![Category::Other]);
    }

    #[test]
    fn passes_run_in_configured_order_on_the_residue() {
        let specs = vec![
            spec(Category::Dml, r"insert\s+into"),
            spec(Category::Engine, r"engine\s*=\s*\w+"),
        ];
        let diff = "@@ -1,2 +1,2 @@\n\
                    -insert into t values (1);\n\
                    +engine=innodb\n";
        assert_eq!(
            classify_diff(diff, &specs),
            Classification::Patterns {
                detected: vec![Category::Dml, Category::Engine],
                residual: false,
            }
        );
    }

    #[test]
    fn later_passes_are_skipped_once_nothing_remains() {
        // Both patterns match the only line; the first pass empties the
        // residue, so the second is never detected.
        let specs = vec![
            spec(Category::Dml, r"truncate\s+table"),
            spec(Category::Index, r"truncate\s+table"),
        ];
        let diff = "@@ -1 +0,0 @@\n-TRUNCATE TABLE log;\n";
        assert_eq!(
            classify_diff(diff, &specs),
            Classification::Patterns {
                detected: vec![Category::Dml],
                residual: false,
            }
        );
    }

    #[test]
    fn survivors_flag_a_residual() {
        let specs = vec![spec(Category::Dml, r"insert\s+into")];
        let diff = "@@ -1,2 +1,2 @@\n\
                    -insert into t values (1);\n\
                    +alter table t add node_group_id int;\n";
        let classification = classify_diff(diff, &specs);
        assert_eq!(
            classification.categories(),
            vec![Category::Dml, Category::Other]
        );
    }

    #[test]
    fn hunks_without_changed_lines_classify_as_nothing() {
        let specs = vec![spec(Category::Dml, r"insert\s+into")];
        let diff = "@@ -1,2 +1,2 @@\n context only\n\\ No newline at end of file\n";
        let classification = classify_diff(diff, &specs);
        assert_eq!(
            classification,
            Classification::Patterns {
                detected: vec![],
                residual: false,
            }
        );
        assert!(classification.categories().is_empty());
    }
}
