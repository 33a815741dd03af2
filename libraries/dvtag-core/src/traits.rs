/// Core traits for dvtag
use crate::error::Result;
use crate::events::RunEvent;
use crate::types::{MetadataRecord, WorkId};

/// Source of canonical metadata records
///
/// Implementers own their own timeout and retry policy; any error returned
/// here aborts the run before a file is touched.
pub trait MetadataProvider {
    /// Fetch the record for a work
    ///
    /// # Errors
    /// Returns `DvtagError::WorkNotFound` when the work is unknown, or
    /// `DvtagError::Network` when the source could not be reached
    fn fetch(&self, work_id: &WorkId) -> Result<MetadataRecord>;
}

impl<P: MetadataProvider + ?Sized> MetadataProvider for &P {
    fn fetch(&self, work_id: &WorkId) -> Result<MetadataRecord> {
        (**self).fetch(work_id)
    }
}

impl<P: MetadataProvider + ?Sized> MetadataProvider for Box<P> {
    fn fetch(&self, work_id: &WorkId) -> Result<MetadataRecord> {
        (**self).fetch(work_id)
    }
}

/// Receiver of run events
///
/// Injected into the orchestrator so the engine never touches global
/// logging state.
pub trait RunObserver {
    /// Called once per event, in the order the events happen
    fn on_event(&self, event: &RunEvent<'_>);
}

impl<O: RunObserver + ?Sized> RunObserver for &O {
    fn on_event(&self, event: &RunEvent<'_>) {
        (**self).on_event(event);
    }
}

impl<O: RunObserver + ?Sized> RunObserver for Box<O> {
    fn on_event(&self, event: &RunEvent<'_>) {
        (**self).on_event(event);
    }
}

/// Observer that discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl RunObserver for NullObserver {
    fn on_event(&self, _event: &RunEvent<'_>) {}
}
