//! Sequential format upgrades.
//!
//! `UPGRADES[n]` turns version-`n` content into version-`n + 1` content. A
//! file at version `v` runs every step from `v` up to [`FORMAT_VERSION`].

use std::borrow::Cow;

use crate::FORMAT_VERSION;

type Upgrade = fn(&str) -> String;

const UPGRADES: [Upgrade; FORMAT_VERSION as usize] = [upgrade_0_to_1];

/// Brings `content` from `from_version` to [`FORMAT_VERSION`].
///
/// `from_version` must already be validated as `<= FORMAT_VERSION`.
pub fn upgrade_to_current(content: &str, from_version: u32) -> Cow<'_, str> {
    let mut content = Cow::Borrowed(content);
    for version in from_version..FORMAT_VERSION {
        tracing::info!("Upgrading voxel data from version {} to {}", version, version + 1);
        content = Cow::Owned(UPGRADES[version as usize](&content));
    }
    content
}

/// Version 0 and 1 share a body layout; only the header changes.
fn upgrade_0_to_1(content: &str) -> String {
    replace_header(content, 1)
}

/// Replaces the first line with `version`, keeping the rest verbatim.
fn replace_header(content: &str, version: u32) -> String {
    match content.split_once('\n') {
        Some((_, body)) => format!("{version}\n{body}"),
        None => version.to_string(),
    }
}
