// ============================================================================
// Book Study Core - TOC Parser
// File: crates/bookstudy-core/src/processing/toc_parser.rs
// Description: Free-form table of contents text -> ordered section records
// ============================================================================
//! Lenient TOC parsing.
//!
//! Each non-blank line becomes one [`Section`]. Nesting comes from a numeric
//! prefix followed by whitespace (`2.1 Background` is depth 1, `3 Results` is
//! depth 0) or, without one, from the
//! indentation (two columns per level, a tab counts as two). `1. Intro` has no
//! such prefix and keeps its title as written. A line may sit at
//! most one level below the deepest open section; deeper lines are clamped.
//! The parser never fails: malformed outlines degrade to shallower nesting.

use bookstudy_shared::constants::TOC_PATH_SEPARATOR;
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use super::{is_blank_char, trim_blank};
use crate::domain::Section;

static BULLET_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-*•]\s+").expect("bullet pattern is valid"));

static NUMBER_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+(?:\.[0-9]+)*)\s+").expect("numbering pattern is valid")
});

const TAB_WIDTH: usize = 2;
const INDENT_PER_LEVEL: usize = 2;

/// Most recent section open at one depth.
struct OpenAncestor {
    id: Uuid,
    title: String,
}

/// A TOC line reduced to its title and the depth it asks for.
#[derive(Debug, PartialEq, Eq)]
struct TocLine<'a> {
    title: &'a str,
    requested_depth: usize,
}

/// Parse `toc_text` into sections of `book_id`, in document order.
///
/// Ids are generated fresh on every call. An input with no usable line
/// yields an empty list, which callers treat as unusable TOC text.
pub fn parse_toc(toc_text: &str, book_id: Uuid) -> Vec<Section> {
    let mut stack: Vec<OpenAncestor> = Vec::new();
    let mut sections = Vec::new();
    let mut order_index: i32 = 0;

    for line in toc_text.lines().filter_map(classify_line) {
        let depth = line.requested_depth.min(stack.len());
        stack.truncate(depth);

        let id = Uuid::new_v4();
        let parent_id = stack.last().map(|ancestor| ancestor.id);
        let toc_path = stack
            .iter()
            .map(|ancestor| ancestor.title.as_str())
            .chain(std::iter::once(line.title))
            .collect::<Vec<_>>()
            .join(TOC_PATH_SEPARATOR);

        sections.push(Section {
            id,
            book_id,
            parent_id,
            title: line.title.to_string(),
            order_index,
            depth: depth as i32,
            toc_path,
        });

        stack.push(OpenAncestor {
            id,
            title: line.title.to_string(),
        });
        order_index += 1;
    }

    sections
}

/// Strip markers from one raw line. `None` for lines with nothing left.
fn classify_line(raw: &str) -> Option<TocLine<'_>> {
    let trimmed = trim_blank(raw);
    if trimmed.is_empty() {
        return None;
    }

    let indent_depth = indent_width(raw) / INDENT_PER_LEVEL;

    let mut content = match BULLET_PREFIX.find(trimmed) {
        Some(bullet) => &trimmed[bullet.end()..],
        None => trimmed,
    };

    let mut requested_depth = indent_depth;
    if let Some(numbering) = NUMBER_PREFIX.captures(content) {
        let segments = numbering.get(1).map_or(1, |m| m.as_str().split('.').count());
        let prefix_end = numbering.get(0).map_or(0, |m| m.end());
        requested_depth = segments - 1;
        content = trim_blank(&content[prefix_end..]);
    }

    if content.is_empty() {
        return None;
    }

    Some(TocLine {
        title: content,
        requested_depth,
    })
}

fn indent_width(raw: &str) -> usize {
    raw.chars()
        .take_while(|c| is_blank_char(*c))
        .map(|c| if c == '\t' { TAB_WIDTH } else { 1 })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn depths(sections: &[Section]) -> Vec<i32> {
        sections.iter().map(|s| s.depth).collect()
    }

    fn titles(sections: &[Section]) -> Vec<&str> {
        sections.iter().map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn test_numbered_outline() {
        let book_id = Uuid::new_v4();
        let sections = parse_toc("1. Intro\n1.1 Background\n2. Methods", book_id);

        assert_eq!(sections.len(), 3);
        assert_eq!(depths(&sections), vec![0, 1, 0]);
        assert_eq!(titles(&sections), vec!["1. Intro", "Background", "2. Methods"]);
        assert_eq!(sections[0].parent_id, None);
        assert_eq!(sections[1].parent_id, Some(sections[0].id));
        assert_eq!(sections[2].parent_id, None);
        assert!(sections.iter().all(|s| s.book_id == book_id));
    }

    #[test]
    fn test_dotted_list_nests_by_indentation() {
        let sections = parse_toc("Part I\n  1. Chapter\n  2. Body", Uuid::new_v4());

        assert_eq!(depths(&sections), vec![0, 1, 1]);
        assert_eq!(titles(&sections), vec!["Part I", "1. Chapter", "2. Body"]);
        assert_eq!(sections[1].parent_id, Some(sections[0].id));
        assert_eq!(sections[2].parent_id, Some(sections[0].id));
        assert_eq!(sections[2].toc_path, "Part I > 2. Body");
    }

    #[test]
    fn test_trailing_dot_numbering_is_not_a_prefix() {
        let sections = parse_toc("Intro\n1.2. Detail\n3 Results", Uuid::new_v4());

        assert_eq!(depths(&sections), vec![0, 0, 0]);
        assert_eq!(titles(&sections), vec!["Intro", "1.2. Detail", "Results"]);
        assert!(sections.iter().all(|s| s.parent_id.is_none()));
    }

    #[test]
    fn test_byte_order_mark_is_not_part_of_title() {
        let sections = parse_toc("\u{FEFF}Part\n  Chapter \u{FEFF}", Uuid::new_v4());

        assert_eq!(titles(&sections), vec!["Part", "Chapter"]);
        assert_eq!(depths(&sections), vec![0, 1]);
        assert_eq!(sections[1].toc_path, "Part > Chapter");
    }

    #[test]
    fn test_bulleted_indentation_chain() {
        let sections = parse_toc("- A\n  - B\n    - C", Uuid::new_v4());

        assert_eq!(depths(&sections), vec![0, 1, 2]);
        assert_eq!(titles(&sections), vec!["A", "B", "C"]);
        assert_eq!(sections[1].parent_id, Some(sections[0].id));
        assert_eq!(sections[2].parent_id, Some(sections[1].id));
        assert_eq!(sections[2].toc_path, "A > B > C");
    }

    #[test]
    fn test_tabs_count_as_two_columns() {
        let sections = parse_toc("Part\n\tChapter\n\t\tScene\n\t Odd", Uuid::new_v4());
        // "\t " is three columns, floor(3 / 2) = 1
        assert_eq!(depths(&sections), vec![0, 1, 2, 1]);
        assert_eq!(sections[3].parent_id, Some(sections[0].id));
    }

    #[test]
    fn test_numbering_overrides_indentation() {
        let sections = parse_toc("      1 Part One\n  1.1 First\n2.1.1 Deep", Uuid::new_v4());
        // "2.1.1" asks for depth 2 and is allowed since the stack holds two entries
        assert_eq!(depths(&sections), vec![0, 1, 2]);
        assert_eq!(titles(&sections), vec!["Part One", "First", "Deep"]);
    }

    #[test]
    fn test_depth_is_clamped_to_one_below_open_stack() {
        let sections = parse_toc("Top\n        Way too deep\n3.4.5.6 Also deep", Uuid::new_v4());

        assert_eq!(depths(&sections), vec![0, 1, 2]);
        assert_eq!(sections[1].parent_id, Some(sections[0].id));
        assert_eq!(sections[2].parent_id, Some(sections[1].id));
    }

    #[test]
    fn test_first_line_indented_becomes_root() {
        let sections = parse_toc("    Indented start\nNext", Uuid::new_v4());
        assert_eq!(depths(&sections), vec![0, 0]);
        assert!(sections.iter().all(|s| s.parent_id.is_none()));
    }

    #[test]
    fn test_blank_lines_and_crlf_are_ignored() {
        let sections = parse_toc("\r\n  \r\nOne\r\n\r\n\t\r\n  Two\r\n", Uuid::new_v4());

        assert_eq!(titles(&sections), vec!["One", "Two"]);
        assert_eq!(depths(&sections), vec![0, 1]);
        let orders: Vec<i32> = sections.iter().map(|s| s.order_index).collect();
        assert_eq!(orders, vec![0, 1]);
    }

    #[test]
    fn test_all_blank_input_yields_nothing() {
        assert!(parse_toc("", Uuid::new_v4()).is_empty());
        assert!(parse_toc(" \n\t\n\r\n", Uuid::new_v4()).is_empty());
    }

    #[test]
    fn test_only_one_bullet_is_stripped() {
        let sections = parse_toc("* - Nested marker\n• Dot\n-NoSpace", Uuid::new_v4());
        assert_eq!(titles(&sections), vec!["- Nested marker", "Dot", "-NoSpace"]);
    }

    #[test]
    fn test_bare_number_without_title_is_kept_as_title() {
        let sections = parse_toc("3\n4.2", Uuid::new_v4());
        // a prefix only counts when whitespace and a title follow it
        assert_eq!(titles(&sections), vec!["3", "4.2"]);
        assert_eq!(depths(&sections), vec![0, 0]);
    }

    #[test]
    fn test_toc_path_resets_after_shallower_line() {
        let toc = "Book\n  Part A\n    Chapter 1\n  Part B\n    Chapter 2";
        let sections = parse_toc(toc, Uuid::new_v4());
        let paths: Vec<&str> = sections.iter().map(|s| s.toc_path.as_str()).collect();

        assert_eq!(
            paths,
            vec![
                "Book",
                "Book > Part A",
                "Book > Part A > Chapter 1",
                "Book > Part B",
                "Book > Part B > Chapter 2",
            ]
        );
        assert_eq!(sections[4].parent_id, Some(sections[3].id));
    }

    #[test]
    fn test_order_index_has_no_gaps() {
        let toc = "a\n\n b\n  c\n\n\nd\n- e\n  1.1 f";
        let sections = parse_toc(toc, Uuid::new_v4());
        let orders: Vec<i32> = sections.iter().map(|s| s.order_index).collect();
        assert_eq!(orders, (0..sections.len() as i32).collect::<Vec<_>>());
    }

    #[test]
    fn test_parents_are_earlier_and_one_level_up() {
        let toc = "1 A\n1.1 B\n      deep\n1.2 C\n2 D\n  x\n    y\n      z\n3 E";
        let sections = parse_toc(toc, Uuid::new_v4());

        for (position, section) in sections.iter().enumerate() {
            match section.parent_id {
                None => assert_eq!(section.depth, 0),
                Some(parent_id) => {
                    let parent_position = sections
                        .iter()
                        .position(|s| s.id == parent_id)
                        .expect("parent is part of the parse");
                    assert!(parent_position < position);
                    assert_eq!(sections[parent_position].depth, section.depth - 1);
                    // nearest preceding section one level up
                    let nearest = sections[..position]
                        .iter()
                        .rev()
                        .find(|s| s.depth == section.depth - 1)
                        .map(|s| s.id);
                    assert_eq!(nearest, Some(parent_id));
                }
            }
        }
    }

    #[test]
    fn test_reparse_has_same_shape_with_fresh_ids() {
        let toc = "1 Intro\n  Motivation\n2 Body\n2.1 Detail";
        let first = parse_toc(toc, Uuid::nil());
        let second = parse_toc(toc, Uuid::nil());

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_ne!(a.id, b.id);
            assert_eq!(
                (&a.title, a.depth, a.order_index, &a.toc_path, a.parent_id.is_some()),
                (&b.title, b.depth, b.order_index, &b.toc_path, b.parent_id.is_some())
            );
        }
    }

    #[test]
    fn test_classify_line() {
        assert_eq!(classify_line("   "), None);
        assert_eq!(
            classify_line("    - 2.3.1 Deep Title  "),
            Some(TocLine {
                title: "Deep Title",
                requested_depth: 2
            })
        );
        assert_eq!(
            classify_line("      plain"),
            Some(TocLine {
                title: "plain",
                requested_depth: 3
            })
        );
    }
}
