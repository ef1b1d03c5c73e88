//! Thin wrappers over the four tile codecs VSF can select, matching the
//! collaborator interface spec §6 describes (`codec.<fmt>.decode(...)`,
//! each producing RGBA8 pixels).

pub mod bmp;
pub mod jp2k;
pub mod jpeg;
pub mod png;
