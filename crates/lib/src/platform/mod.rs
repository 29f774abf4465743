//! Host-specific lookups: the JavaScript launcher and compiler packages.

pub mod paths;
