mod format;
mod record;
mod work_id;

pub use format::AudioFormat;
pub use record::{AgeRating, MetadataRecord};
pub use work_id::WorkId;
