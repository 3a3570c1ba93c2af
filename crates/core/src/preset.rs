//! Per-page background presets.
//!
//! Each page of the site mounts its own independent field on its own canvas
//! element, plus a handful of parallax shapes. A [`PagePreset`] names the
//! page and carries what a host needs to set that background up.

use crate::error::FieldError;
use crate::field::FieldParams;

/// All preset names, in navigation order.
const PRESET_NAMES: &[&str] = &["home", "skills", "project", "contact"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagePreset {
    Home,
    Skills,
    Project,
    Contact,
}

impl PagePreset {
    /// Looks a preset up by name.
    ///
    /// Returns `FieldError::UnknownPreset` if the name is not recognized.
    pub fn from_name(name: &str) -> Result<Self, FieldError> {
        match name {
            "home" => Ok(PagePreset::Home),
            "skills" => Ok(PagePreset::Skills),
            "project" => Ok(PagePreset::Project),
            "contact" => Ok(PagePreset::Contact),
            _ => Err(FieldError::UnknownPreset(name.to_string())),
        }
    }

    /// Returns a slice of all recognized preset names.
    pub fn list_names() -> &'static [&'static str] {
        PRESET_NAMES
    }

    pub fn name(self) -> &'static str {
        match self {
            PagePreset::Home => "home",
            PagePreset::Skills => "skills",
            PagePreset::Project => "project",
            PagePreset::Contact => "contact",
        }
    }

    /// Element id of the page's background canvas.
    pub fn canvas_id(self) -> &'static str {
        match self {
            PagePreset::Home => "constellation-canvas",
            PagePreset::Skills => "skills-constellation-canvas",
            PagePreset::Project => "project-constellation-canvas",
            PagePreset::Contact => "contact-constellation-canvas",
        }
    }

    /// Number of parallax shapes behind the page content.
    pub fn parallax_layers(self) -> usize {
        match self {
            PagePreset::Project => 2,
            PagePreset::Home | PagePreset::Skills | PagePreset::Contact => 3,
        }
    }

    /// Field parameters for the page. Every page shares the same look.
    pub fn params(self) -> FieldParams {
        FieldParams::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_name_resolves_and_round_trips() {
        for &name in PagePreset::list_names() {
            let preset = PagePreset::from_name(name).unwrap();
            assert_eq!(preset.name(), name);
        }
    }

    #[test]
    fn unknown_name_returns_error() {
        assert!(matches!(
            PagePreset::from_name("about"),
            Err(FieldError::UnknownPreset(_))
        ));
    }

    #[test]
    fn canvas_ids_are_distinct() {
        let mut ids: Vec<_> = PagePreset::list_names()
            .iter()
            .map(|n| PagePreset::from_name(n).unwrap().canvas_id())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn home_uses_default_field() {
        let home = PagePreset::Home;
        assert_eq!(home.canvas_id(), "constellation-canvas");
        assert_eq!(home.params().particle_count, 50);
        assert_eq!(home.parallax_layers(), 3);
    }

    #[test]
    fn project_has_two_parallax_layers() {
        assert_eq!(PagePreset::Project.parallax_layers(), 2);
    }
}
