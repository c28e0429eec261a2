//! Materializing pending categories as tasks

use tracing::debug;

use super::host::TaskHost;
use super::lifecycle::LifecycleWarning;
use super::Categorizer;

impl<H: TaskHost> Categorizer<H> {
    /// Registers every pending category as a task depending on its members
    ///
    /// Categories are registered in creation order, without a body. Call this
    /// once after the last [`Categorizer::register`]; a second call reports
    /// [`LifecycleWarning::FinalizedTwice`] and only registers categories
    /// created since the first.
    pub fn finalize(&mut self) -> Vec<H::Handle> {
        if self.finalized {
            self.report(LifecycleWarning::FinalizedTwice);
        }
        self.finalized = true;

        let pending = self.registry.drain();
        let mut handles = Vec::with_capacity(pending.len());

        for (category, members) in pending {
            if self.debug {
                debug!(category = category.as_str(), ?members, "registering category task");
            }
            self.registry.mark_registered(&category);
            handles.push(self.host.register(&category, members, None));
        }

        handles
    }
}
