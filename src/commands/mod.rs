use anyhow::Result;

#[derive(Debug, Clone, Default)]
pub struct Global {
    /// Global JSON output toggle (overrides per-command flags)
    pub json: bool,
}

pub trait Runnable {
    fn run(self, g: &Global) -> Result<()>;
}

pub mod rank;
pub mod render;

pub use rank::Rank;
pub use render::Render;
