/// Collage request construction
///
/// This module handles everything between the form and the wire:
/// - Resolving UI selections into request parameters (params.rs)
/// - Extracting capture timestamps for chronological ordering (metadata.rs)
/// - Downsampling selected images into preview proxies (compress.rs)

pub mod compress;
pub mod metadata;
pub mod params;
