use serde::Serialize;
use crate::enums::ecosystem::Ecosystem;

/// One detected dependency version bump. Versions are the strings
/// captured from the diff, compared only for inequality, never as semver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyChange {
    pub name: String,
    pub from_version: String,
    pub to_version: String,
    pub ecosystem: Ecosystem,
}
