//! regolo - command-line tools for the golo codec suite.
//!
//! The codecs in `libgolo` work on in-memory samples and bitmaps; this
//! crate owns the conversation with the filesystem formats around them:
//! WAV in and out for the audio codecs, PPM for the image codec.

pub mod audio;
pub mod ppm;
