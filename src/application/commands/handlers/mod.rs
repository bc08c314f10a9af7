//! Command Handlers

mod cover_handlers;
mod like_handlers;
mod novel_handlers;
mod share_handlers;
mod transfer_handlers;

pub use cover_handlers::{UploadCoverHandler, UploadCoverResponse};
pub use like_handlers::{ToggleLikeHandler, ToggleLikeResponse};
pub use novel_handlers::{DeleteNovelHandler, PublishNovelHandler, PublishNovelResponse};
pub use share_handlers::{ShareNovelHandler, ShareNovelResponse};
pub use transfer_handlers::{
    ExportCollectionHandler, ExportDocument, ImportCollectionHandler, ImportCollectionResponse,
    EXPORT_FORMAT_VERSION,
};
