use chrono::format::{Item, StrftimeItems};
use log::debug;

use crate::domain::report::{fmt_timestamp, RepoStats};
use crate::error::{Error, Result};

/// Fields a template can reference. The token is the field name
/// upper-cased inside double braces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Repo,
    RepoUrl,
    CommitUrl,
    CommitMsg,
    Date,
}

impl Placeholder {
    /// Substitution order.
    pub const ALL: [Placeholder; 5] = [
        Placeholder::Repo,
        Placeholder::RepoUrl,
        Placeholder::CommitUrl,
        Placeholder::CommitMsg,
        Placeholder::Date,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Placeholder::Repo => "{{REPO}}",
            Placeholder::RepoUrl => "{{REPOURL}}",
            Placeholder::CommitUrl => "{{COMMITURL}}",
            Placeholder::CommitMsg => "{{COMMITMSG}}",
            Placeholder::Date => "{{DATE}}",
        }
    }
}

/// Turns a list of [`RepoStats`] into text: the header, then one templated
/// line per record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRenderer {
    header: String,
    element_template: String,
    date_format: Option<String>,
}

impl TemplateRenderer {
    pub fn new(element_template: impl Into<String>, header: impl Into<String>) -> Self {
        let r = Self {
            header: header.into(),
            element_template: element_template.into(),
            date_format: None,
        };
        for p in Placeholder::ALL {
            debug!("Template placeholder {:?}: {}", p, p.token());
        }
        r
    }

    /// Formats `{{DATE}}` with a strftime string instead of RFC 3339.
    pub fn with_date_format(mut self, format: impl Into<String>) -> Result<Self> {
        let format = format.into();
        if StrftimeItems::new(&format).any(|item| matches!(item, Item::Error)) {
            return Err(Error::InvalidDateFormat { format });
        }
        self.date_format = Some(format);
        Ok(self)
    }

    fn field(&self, placeholder: Placeholder, stats: &RepoStats) -> String {
        match placeholder {
            Placeholder::Repo => stats.repo.clone(),
            Placeholder::RepoUrl => stats.repo_url.clone(),
            Placeholder::CommitUrl => stats.commit_url.clone(),
            Placeholder::CommitMsg => stats.commit_msg.clone(),
            Placeholder::Date => match (&stats.date, &self.date_format) {
                (None, _) => String::new(),
                (Some(dt), Some(f)) => dt.format(f).to_string(),
                (Some(dt), None) => fmt_timestamp(dt),
            },
        }
    }

    /// Fills the element template from `stats`. Only the first occurrence of
    /// each placeholder is substituted.
    pub fn render_one(&self, stats: &RepoStats) -> String {
        let mut out = self.element_template.clone();
        for p in Placeholder::ALL {
            let token = p.token();
            if let Some(at) = out.find(token) {
                out.replace_range(at..at + token.len(), &self.field(p, stats));
            }
        }
        out
    }

    /// Header plus one line per record, trimmed.
    pub fn render(&self, records: &[RepoStats]) -> String {
        let mut out = format!("{}\n", self.header);
        for r in records {
            out.push_str(&self.render_one(r));
            out.push('\n');
        }
        out.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn day(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn stats(repo: &str, msg: &str, date: Option<DateTime<Utc>>) -> RepoStats {
        RepoStats {
            repo: repo.into(),
            repo_url: format!("https://github.com/octocat/{repo}"),
            commit_url: format!("https://github.com/octocat/{repo}/commit/abc"),
            commit_msg: msg.into(),
            date,
        }
    }

    #[test]
    fn renders_header_and_one_record() {
        let r = TemplateRenderer::new("- {{REPO}}: {{COMMITMSG}} ({{DATE}})", "# Top Repos")
            .with_date_format("%Y-%m-%d")
            .unwrap();
        let out = r.render(&[stats("x", "init", Some(day("2024-01-01T00:00:00Z")))]);
        assert_eq!(out, "# Top Repos\n- x: init (2024-01-01)");
    }

    #[test]
    fn default_date_is_rfc3339() {
        let r = TemplateRenderer::new("{{DATE}}", "");
        let s = stats("x", "m", Some(day("2024-06-01T00:00:00Z")));
        assert_eq!(r.render_one(&s), "2024-06-01T00:00:00Z");
        assert_eq!(r.render_one(&stats("x", "m", None)), "");
    }

    #[test]
    fn urls_are_substituted() {
        let r = TemplateRenderer::new("[{{REPO}}]({{REPOURL}}) [latest]({{COMMITURL}})", "");
        assert_eq!(
            r.render_one(&stats("x", "m", None)),
            "[x](https://github.com/octocat/x) [latest](https://github.com/octocat/x/commit/abc)"
        );
    }

    #[test]
    fn only_first_occurrence_is_replaced() {
        let r = TemplateRenderer::new("{{REPO}} and {{REPO}}", "");
        assert_eq!(r.render_one(&stats("x", "m", None)), "x and {{REPO}}");
    }

    #[test]
    fn unknown_placeholders_are_left_alone() {
        let r = TemplateRenderer::new("{{REPO}} {{STARS}} {{ repo }}", "");
        assert_eq!(r.render_one(&stats("x", "m", None)), "x {{STARS}} {{ repo }}");
    }

    #[test]
    fn empty_header_and_no_records() {
        let r = TemplateRenderer::new("- {{REPO}}", "");
        assert_eq!(r.render(&[]), "");
        assert_eq!(
            r.render(&[stats("a", "m", None), stats("b", "m", None)]),
            "- a\n- b"
        );
    }

    #[test]
    fn render_is_repeatable() {
        let r = TemplateRenderer::new("* {{REPO}} {{DATE}}", "## Recent");
        let records = vec![stats("a", "m", Some(day("2023-03-03T10:00:00Z"))), stats("b", "n", None)];
        assert_eq!(r.render(&records), r.render(&records));
    }

    #[test]
    fn bad_date_format_is_rejected() {
        let err = TemplateRenderer::new("{{DATE}}", "").with_date_format("%Q").unwrap_err();
        assert_eq!(err, Error::InvalidDateFormat { format: "%Q".into() });
    }
}
