//! Build target selection
//!
//! Targets are chosen by 1-based number, by shield/board criteria, or
//! interactively. This module holds the pure parts; prompting lives in the
//! CLI layer.

use super::targets::{BuildMatrix, BuildTarget};
use crate::error::SelectionError;

/// How the user asked for a target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// `--number N`
    Number(usize),
    /// `--shield` and/or `--board`
    Criteria {
        shield: Option<String>,
        board: Option<String>,
    },
    /// No flags: ask on the terminal
    Interactive,
}

impl Selector {
    /// Build a selector from CLI flags; a number takes precedence
    pub fn from_flags(number: Option<usize>, shield: Option<String>, board: Option<String>) -> Self {
        if let Some(number) = number {
            Self::Number(number)
        } else if shield.is_some() || board.is_some() {
            Self::Criteria { shield, board }
        } else {
            Self::Interactive
        }
    }
}

/// A chosen target with its 1-based number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selected<'a> {
    /// 1-based position in build.yaml
    pub number: usize,
    /// The target
    pub target: &'a BuildTarget,
}

/// Select by 1-based number
pub fn by_number(matrix: &BuildMatrix, number: usize) -> Result<Selected<'_>, SelectionError> {
    matrix
        .get(number)
        .map(|target| Selected { number, target })
        .ok_or(SelectionError::OutOfRange {
            number,
            count: matrix.len(),
        })
}

/// All targets matching the criteria, in file order
///
/// Shield matches by case-insensitive substring, board by case-insensitive
/// equality. A missing criterion matches everything.
pub fn find_matches<'a>(
    matrix: &'a BuildMatrix,
    shield: Option<&str>,
    board: Option<&str>,
) -> Vec<Selected<'a>> {
    let shield = shield.map(str::to_lowercase);
    matrix
        .include
        .iter()
        .enumerate()
        .filter(|(_, target)| {
            let shield_match = shield.as_ref().map_or(true, |wanted| {
                target
                    .shield
                    .as_deref()
                    .unwrap_or_default()
                    .to_lowercase()
                    .contains(wanted.as_str())
            });
            let board_match = board.map_or(true, |wanted| target.board.eq_ignore_ascii_case(wanted));
            shield_match && board_match
        })
        .map(|(idx, target)| Selected {
            number: idx + 1,
            target,
        })
        .collect()
}

/// Select the single target matching the criteria
pub fn by_criteria<'a>(
    matrix: &'a BuildMatrix,
    shield: Option<&str>,
    board: Option<&str>,
) -> Result<Selected<'a>, SelectionError> {
    let matches = find_matches(matrix, shield, board);
    match matches.as_slice() {
        [] => Err(SelectionError::NoMatch {
            shield: shield.map(String::from),
            board: board.map(String::from),
        }),
        [only] => Ok(*only),
        many => Err(SelectionError::Ambiguous {
            candidates: many
                .iter()
                .map(|s| format!("  {}. {}", s.number, s.target))
                .collect(),
        }),
    }
}

/// Outcome of one line of interactive input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// A valid 1-based number
    Number(usize),
    /// The user asked to quit
    Quit,
    /// Not a number; ask again
    Invalid,
    /// A number outside the range; ask again
    OutOfRange,
}

/// Interpret one line typed at the selection prompt
pub fn parse_choice(input: &str, count: usize) -> Choice {
    let input = input.trim();
    if input.eq_ignore_ascii_case("q") {
        return Choice::Quit;
    }
    match input.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Choice::Number(n),
        Ok(_) => Choice::OutOfRange,
        Err(_) => Choice::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn matrix() -> BuildMatrix {
        BuildMatrix {
            include: vec![
                BuildTarget::new("nice_nano_v2").with_shield("charybdis_left"),
                BuildTarget::new("nice_nano_v2").with_shield("charybdis_right"),
                BuildTarget::new("seeeduino_xiao_ble").with_shield("charybdis_left"),
                BuildTarget::new("nice_nano_v2").with_shield("nice_dongle dongle_display"),
                BuildTarget::new("settings_reset"),
            ],
        }
    }

    #[test]
    fn test_selector_number_takes_precedence() {
        let sel = Selector::from_flags(Some(2), Some("left".into()), None);
        assert_eq!(sel, Selector::Number(2));
        assert_eq!(Selector::from_flags(None, None, None), Selector::Interactive);
        assert_eq!(
            Selector::from_flags(None, None, Some("b".into())),
            Selector::Criteria {
                shield: None,
                board: Some("b".into())
            }
        );
    }

    #[test]
    fn test_by_number() {
        let m = matrix();
        let sel = by_number(&m, 2).unwrap();
        assert_eq!(sel.number, 2);
        assert_eq!(sel.target.shield.as_deref(), Some("charybdis_right"));
    }

    #[test]
    fn test_by_number_out_of_range() {
        let m = matrix();
        assert_eq!(
            by_number(&m, 0).unwrap_err(),
            SelectionError::OutOfRange { number: 0, count: 5 }
        );
        assert!(by_number(&m, 6).is_err());
    }

    #[test]
    fn test_shield_partial_case_insensitive() {
        let m = matrix();
        let sel = by_criteria(&m, Some("DONGLE"), None).unwrap();
        assert_eq!(sel.number, 4);
    }

    #[test]
    fn test_board_must_match_exactly() {
        let m = matrix();
        assert!(by_criteria(&m, None, Some("nice_nano")).is_err());
        let sel = by_criteria(&m, Some("left"), Some("SEEEDUINO_XIAO_BLE")).unwrap();
        assert_eq!(sel.number, 3);
    }

    #[test]
    fn test_ambiguous_match_lists_numbers() {
        let m = matrix();
        let err = by_criteria(&m, Some("left"), None).unwrap_err();
        assert_eq!(
            err,
            SelectionError::Ambiguous {
                candidates: vec![
                    "  1. charybdis_left (nice_nano_v2)".to_string(),
                    "  3. charybdis_left (seeeduino_xiao_ble)".to_string(),
                ]
            }
        );
    }

    #[test]
    fn test_no_match() {
        let m = matrix();
        let err = by_criteria(&m, Some("corne"), Some("nice_nano_v2")).unwrap_err();
        assert!(matches!(err, SelectionError::NoMatch { .. }));
    }

    #[test]
    fn test_board_only_target_by_board() {
        let m = matrix();
        let sel = by_criteria(&m, None, Some("settings_reset")).unwrap();
        assert_eq!(sel.number, 5);
        // A shield filter never matches a board-only target
        assert!(find_matches(&m, Some("settings"), None).is_empty());
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice(" 3 \n", 5), Choice::Number(3));
        assert_eq!(parse_choice("Q", 5), Choice::Quit);
        assert_eq!(parse_choice("0", 5), Choice::OutOfRange);
        assert_eq!(parse_choice("6", 5), Choice::OutOfRange);
        assert_eq!(parse_choice("abc", 5), Choice::Invalid);
        assert_eq!(parse_choice("", 5), Choice::Invalid);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Every match satisfies the filters and numbers stay in range
        #[test]
        fn prop_matches_satisfy_criteria(shield in "[a-z_]{0,8}") {
            let m = matrix();
            for sel in find_matches(&m, Some(&shield), None) {
                prop_assert!(sel.number >= 1 && sel.number <= m.len());
                prop_assert!(sel.target.shield.as_deref().unwrap_or_default().contains(&shield));
                prop_assert_eq!(m.get(sel.number), Some(sel.target));
            }
        }

        /// Choices accepted by the prompt are always valid numbers
        #[test]
        fn prop_parse_choice_in_range(input in "\\PC{0,6}", count in 1usize..20) {
            if let Choice::Number(n) = parse_choice(&input, count) {
                prop_assert!(n >= 1 && n <= count);
            }
        }
    }
}
