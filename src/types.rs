// src/types.rs

use std::fmt;

/// One named class of Coder Review rules.
///
/// Ordering follows declaration order so category sets render the same way
/// on every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReviewCategory {
    Style,
    Comment,
    Sql,
    Security,
    I18n,
}

impl ReviewCategory {
    pub const ALL: [ReviewCategory; 5] = [
        ReviewCategory::Style,
        ReviewCategory::Comment,
        ReviewCategory::Sql,
        ReviewCategory::Security,
        ReviewCategory::I18n,
    ];

    /// Name understood by `drush coder-review --reviews=`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewCategory::Style => "style",
            ReviewCategory::Comment => "comment",
            ReviewCategory::Sql => "sql",
            ReviewCategory::Security => "security",
            ReviewCategory::I18n => "i18n",
        }
    }
}

impl fmt::Display for ReviewCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pipeline stage an external invocation belongs to.
///
/// Every process failure is attributed to one of these so the build log says
/// which step broke, not just that something did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Clone,
    Checkout,
    SiteInstall,
    Download,
    Enable,
    CoderReview,
    TestRun,
    Make,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Clone => "clone",
            Stage::Checkout => "checkout",
            Stage::SiteInstall => "site-install",
            Stage::Download => "download",
            Stage::Enable => "enable",
            Stage::CoderReview => "coder-review",
            Stage::TestRun => "test-run",
            Stage::Make => "make",
        };
        f.write_str(name)
    }
}
