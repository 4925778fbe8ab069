//! Built-in rules

pub mod lines_around_use_strict;

pub use lines_around_use_strict::LinesAroundUseStrict;

use crate::config::LintConfig;
use crate::policy::Policy;
use crate::rule::Rule;

/// Rules enabled for a configuration
pub fn default_rules(config: &LintConfig) -> Vec<Box<dyn Rule>> {
    let policy = Policy::resolve(config.newline.as_ref());
    vec![Box::new(
        LinesAroundUseStrict::new(policy).with_severity(config.severity),
    )]
}
