//! Property-based tests for 'use strict' spacing
//!
//! Uses proptest to generate directive layouts and check the reported sides
//! against the blank-line counts that produced them.

use proptest::prelude::*;
use strict_spacing::spacing::is_blank_gap;
use strict_spacing::{
    lint_source, Diagnostic, Language, LintConfig, Mode, PolicyOption, Side,
};

#[derive(Debug, Clone)]
struct Layout {
    comment: bool,
    blanks_before: usize,
    blanks_after: usize,
    following: bool,
    in_function: bool,
}

impl Layout {
    fn source(&self) -> String {
        let mut src = String::new();
        if self.in_function {
            src.push_str("function wrap() {\n");
        }
        if self.comment {
            src.push_str("// header\n");
            src.push_str(&"\n".repeat(self.blanks_before));
        }
        src.push_str("'use strict';\n");
        src.push_str(&"\n".repeat(self.blanks_after));
        if self.following {
            src.push_str("var foo = 1;\n");
        }
        if self.in_function {
            src.push_str("}\n");
        }
        src
    }

    /// Line of the directive, 1-based
    fn directive_line(&self) -> usize {
        let mut line = 1;
        if self.in_function {
            line += 1;
        }
        if self.comment {
            line += 1 + self.blanks_before;
        }
        line
    }
}

fn any_mode() -> impl Strategy<Value = Mode> {
    prop_oneof![Just(Mode::Always), Just(Mode::Never)]
}

fn any_layout() -> impl Strategy<Value = Layout> {
    (any::<bool>(), 0usize..4, 0usize..4, any::<bool>(), any::<bool>()).prop_map(
        |(comment, blanks_before, blanks_after, following, in_function)| Layout {
            comment,
            blanks_before,
            blanks_after,
            following,
            in_function,
        },
    )
}

fn run(layout: &Layout, newline: PolicyOption) -> Vec<Diagnostic> {
    let config = LintConfig {
        newline: Some(newline),
        ..LintConfig::default()
    };
    lint_source(&layout.source(), Language::JavaScript, &config).unwrap()
}

fn violates(mode: Mode, has_blank: bool) -> bool {
    match mode {
        Mode::Always => !has_blank,
        Mode::Never => has_blank,
    }
}

proptest! {
    #[test]
    fn test_reported_sides_match_layout(
        layout in any_layout(),
        before in any_mode(),
        after in any_mode(),
    ) {
        let diagnostics = run(&layout, PolicyOption::Split { before, after });

        let expect_before = layout.comment && violates(before, layout.blanks_before > 0);
        let expect_after = layout.following && violates(after, layout.blanks_after > 0);

        let sides: Vec<Side> = diagnostics.iter().map(|d| d.side).collect();
        let mut expected = Vec::new();
        if expect_before {
            expected.push(Side::Before);
        }
        if expect_after {
            expected.push(Side::After);
        }
        prop_assert_eq!(sides, expected);
    }

    #[test]
    fn test_diagnostics_point_at_directive(layout in any_layout(), mode in any_mode()) {
        let diagnostics = run(&layout, PolicyOption::Uniform(mode));
        for diag in &diagnostics {
            prop_assert_eq!(diag.span.start_line, layout.directive_line());
        }
    }

    #[test]
    fn test_uniform_equals_split(layout in any_layout(), mode in any_mode()) {
        let uniform = run(&layout, PolicyOption::Uniform(mode));
        let split = run(&layout, PolicyOption::Split { before: mode, after: mode });
        let uniform: Vec<_> = uniform.iter().map(|d| d.message.clone()).collect();
        let split: Vec<_> = split.iter().map(|d| d.message.clone()).collect();
        prop_assert_eq!(uniform, split);
    }

    #[test]
    fn test_opposite_modes_partition(layout in any_layout()) {
        // every checked side violates exactly one of the two modes
        let always = run(&layout, PolicyOption::Uniform(Mode::Always)).len();
        let never = run(&layout, PolicyOption::Uniform(Mode::Never)).len();
        let checked = usize::from(layout.comment) + usize::from(layout.following);
        prop_assert_eq!(always + never, checked);
    }

    #[test]
    fn test_lint_is_deterministic(layout in any_layout(), mode in any_mode()) {
        let first = run(&layout, PolicyOption::Uniform(mode));
        let second = run(&layout, PolicyOption::Uniform(mode));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_blank_gap_threshold(from in 0usize..10_000, delta in 0usize..10) {
        prop_assert_eq!(is_blank_gap(from, from + delta), delta >= 2);
        prop_assert!(!is_blank_gap(from + delta, from));
    }
}
