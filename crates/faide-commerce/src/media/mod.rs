//! Product image discovery.
//!
//! Galleries are discovered by probing numbered variants of a base image
//! (`tshirt.png`, `tshirt1.png`, ...) rather than listed up front.

mod probe;

pub use probe::{
    probe_all, resolve_gallery, spawn_probe, variant_candidates, FsImageProbe, Gallery,
    ImageProbe, ProbeHandle, ProbeOptions, DEFAULT_MAX_VARIANTS, DEFAULT_PROBE_TIMEOUT,
};
