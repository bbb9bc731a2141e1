//! Generation Module
//!
//! Handlers for the generation endpoints. Each one runs behind the session
//! guard, validates its body, makes one provider call and answers with the
//! uniform [`envelope::Envelope`].
//!
//! - **`image`** - POST /api/generate/image
//! - **`video`** - POST /api/generate/video, GET /api/generate/video/{prediction_id}
//! - **`audio`** - POST /api/generate/audio
//! - **`model3d`** - POST /api/generate/3d

pub mod audio;
pub mod envelope;
pub mod image;
pub mod model3d;
pub mod video;

pub use audio::generate_audio;
pub use image::generate_image;
pub use model3d::generate_model3d;
pub use video::{generate_video, get_video_prediction};
