use std::path::Path;

use super::Agent;

/// Dry run. Touches nothing; the walker's transcript is the only output.
#[derive(Clone, Copy, Debug, Default)]
pub struct Simulate;

impl Agent for Simulate {
    fn handle_dir(&mut self, _path: &Path) -> anyhow::Result<()> {
        Ok(())
    }

    fn handle_file(&mut self, _path: &Path) -> anyhow::Result<()> {
        Ok(())
    }

    fn finalize(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}
