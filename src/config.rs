use crate::domain::order::OrderingPolicy;
use crate::error::{Error, Result};
use crate::presentation::template::TemplateRenderer;
use crate::utils::EntryCount;

/// Raw inputs, as they arrive from the command line or environment.
#[derive(Debug, Clone, Default)]
pub struct RawInputs {
    pub user: String,
    pub sort_order: String,
    pub entry_count: i64,
    pub md_header: String,
    pub md_template: Option<String>,
    pub date_format: Option<String>,
    pub generate_markdown: bool,
}

/// Validated, immutable settings for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub user: String,
    /// Display order of the final report.
    pub order: OrderingPolicy,
    /// Order used to sequence commits and rank repositories.
    pub initial_order: OrderingPolicy,
    pub entry_count: EntryCount,
    /// Present only when markdown generation was requested.
    pub renderer: Option<TemplateRenderer>,
}

impl RunConfig {
    pub fn from_inputs(raw: RawInputs) -> Result<Self> {
        let order = OrderingPolicy::from_name(&raw.sort_order)?;
        let entry_count = EntryCount::new(raw.entry_count);

        let renderer = if raw.generate_markdown {
            let template = raw.md_template.ok_or(Error::MissingTemplate)?;
            let r = TemplateRenderer::new(template, raw.md_header);
            Some(match raw.date_format {
                Some(f) => r.with_date_format(f)?,
                None => r,
            })
        } else {
            None
        };

        Ok(Self {
            user: raw.user,
            order,
            initial_order: OrderingPolicy::Descending,
            entry_count,
            renderer,
        })
    }
}
