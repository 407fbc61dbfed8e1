pub(crate) mod merge;
pub(crate) mod shading;
pub(crate) mod silhouette;
pub(crate) mod warp;
