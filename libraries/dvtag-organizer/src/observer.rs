//! Run observer that reports through `tracing`

use dvtag_core::{RunEvent, RunObserver};

/// Logs every run event at `info` level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl TracingObserver {
    /// Create a tracing observer
    pub fn new() -> Self {
        Self
    }
}

fn disc_label(disc: Option<u32>) -> String {
    disc.map_or_else(|| "-".to_string(), |disc| disc.to_string())
}

impl RunObserver for TracingObserver {
    fn on_event(&self, event: &RunEvent<'_>) {
        match *event {
            RunEvent::MetadataLoaded { record } => {
                tracing::info!("[{}] Ready to tag...", record.work_id);
                tracing::info!("Circle:   {}", record.circle);
                tracing::info!("Album:    {}", record.title);
                tracing::info!("Seiyu:    {}", record.performers.join(","));
                tracing::info!("Illust:   {}", record.illustrators.join(","));
                tracing::info!("Rating:   {}", record.age_rating);
                tracing::info!("Genres:   {}", record.genres.join(","));
                tracing::info!("Date:     {}", record.release_date);
                tracing::info!("DL Count: {}", record.download_count);
            }
            RunEvent::TrackTagged {
                path,
                track,
                disc,
                title,
            } => {
                tracing::info!(
                    "Tagged <track: {}, disc: {}, name: {}> to '{}'",
                    track,
                    disc_label(disc),
                    title,
                    path.file_name().unwrap_or_default().to_string_lossy()
                );
            }
            RunEvent::TrackUnchanged { path, track, disc } => {
                tracing::debug!(
                    "Unchanged <track: {}, disc: {}> '{}'",
                    track,
                    disc_label(disc),
                    path.display()
                );
            }
            RunEvent::FileMoved { from, to } => {
                tracing::info!("Moved {} to {}", from.display(), to.display());
            }
            RunEvent::CoverCreated { path } => {
                tracing::info!("Cover created: {}", path.display());
            }
            RunEvent::DirectoryPruned { path } => {
                tracing::info!("Removed empty directory {}", path.display());
            }
            RunEvent::FolderRenamed { from, to } => {
                tracing::info!("Folder renamed: {} -> {}", from.display(), to.display());
            }
            RunEvent::Finished { work_id } => {
                tracing::info!("[{}] Done.", work_id);
            }
        }
    }
}
