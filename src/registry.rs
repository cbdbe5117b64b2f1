// src/registry.rs

use std::{collections::HashSet, path::Path};
use url::Url;

use crate::{error::SyncError, pipeline::MANIFEST_FILENAME};

/// The spreadsheets we mirror: (name, gviz JSON endpoint, output file).
static BUILTIN_SOURCES: &[(&str, &str, &str)] = &[
    (
        "companies",
        "https://docs.google.com/spreadsheets/d/1ArkMsWfTgzdSJrZlkXsXSpmVI4GPIhurEvHzCwHVgD0/gviz/tq?tqx=out:json&gid=0",
        "companies.json",
    ),
    (
        "mafia",
        "https://docs.google.com/spreadsheets/d/17VXE9EDB4Zp0S2vqcbYCfvLXBopiCd8timD7Cc0Vjxk/gviz/tq?tqx=out:json&gid=1308157446",
        "mafia.json",
    ),
    (
        "founders",
        "https://docs.google.com/spreadsheets/d/1ewW9Kul0CgknzcwzJ3SvEfS5hjVH0LQuCwdR-zBmbOY/gviz/tq?tqx=out:json&gid=1896821889",
        "founders.json",
    ),
];

/// One independently fetchable spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub name: String,
    pub locator: String,
    pub output_filename: String,
}

impl SourceConfig {
    pub fn new(
        name: impl Into<String>,
        locator: impl Into<String>,
        output_filename: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            locator: locator.into(),
            output_filename: output_filename.into(),
        }
    }

    fn validate(&self) -> Result<(), SyncError> {
        Url::parse(&self.locator).map_err(|e| SyncError::InvalidSource {
            name: self.name.clone(),
            reason: format!("locator {:?}: {}", self.locator, e),
        })?;

        // must name a file directly inside the cache dir
        let plain = Path::new(&self.output_filename)
            .file_name()
            .is_some_and(|f| f == self.output_filename.as_str());
        if !plain {
            return Err(SyncError::InvalidSource {
                name: self.name.clone(),
                reason: format!("output filename {:?} is not a plain file name", self.output_filename),
            });
        }
        if self.output_filename == MANIFEST_FILENAME {
            return Err(SyncError::InvalidSource {
                name: self.name.clone(),
                reason: format!("output filename {:?} is reserved for the manifest", MANIFEST_FILENAME),
            });
        }
        Ok(())
    }
}

/// Ordered, immutable set of sources. Order is fetch order and manifest order.
#[derive(Debug, Clone)]
pub struct Registry {
    sources: Vec<SourceConfig>,
}

impl Registry {
    /// Build a registry, rejecting duplicate names, shared output files and
    /// unusable entries.
    pub fn new(sources: Vec<SourceConfig>) -> Result<Self, SyncError> {
        let mut names = HashSet::new();
        let mut files = HashSet::new();
        for source in &sources {
            source.validate()?;
            if !names.insert(source.name.as_str()) {
                return Err(SyncError::DuplicateSource(source.name.clone()));
            }
            if !files.insert(source.output_filename.as_str()) {
                return Err(SyncError::InvalidSource {
                    name: source.name.clone(),
                    reason: format!("output filename {:?} is already taken", source.output_filename),
                });
            }
        }
        Ok(Self { sources })
    }

    /// The unicorn spreadsheets published by the project.
    pub fn builtin() -> Result<Self, SyncError> {
        Self::new(
            BUILTIN_SOURCES
                .iter()
                .map(|&(name, locator, file)| SourceConfig::new(name, locator, file))
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceConfig> {
        self.sources.iter()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_keeps_declared_order() {
        let reg = Registry::builtin().unwrap();
        assert_eq!(reg.names(), vec!["companies", "mafia", "founders"]);
        assert_eq!(reg.len(), 3);
        let files: Vec<_> = reg.iter().map(|s| s.output_filename.as_str()).collect();
        assert_eq!(files, vec!["companies.json", "mafia.json", "founders.json"]);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = Registry::new(vec![
            SourceConfig::new("a", "http://localhost/a", "a.json"),
            SourceConfig::new("a", "http://localhost/b", "b.json"),
        ])
        .unwrap_err();
        assert!(matches!(err, SyncError::DuplicateSource(name) if name == "a"));
    }

    #[test]
    fn bad_locator_is_rejected() {
        let err = Registry::new(vec![SourceConfig::new("a", "not a url", "a.json")]).unwrap_err();
        assert!(matches!(err, SyncError::InvalidSource { .. }));
    }

    #[test]
    fn nested_output_filename_is_rejected() {
        for file in ["../escape.json", "sub/a.json", ""] {
            let err = Registry::new(vec![SourceConfig::new("a", "http://localhost/a", file)])
                .unwrap_err();
            assert!(matches!(err, SyncError::InvalidSource { .. }), "{file}");
        }
    }

    #[test]
    fn shared_output_filename_is_rejected() {
        let err = Registry::new(vec![
            SourceConfig::new("a", "http://localhost/a", "same.json"),
            SourceConfig::new("b", "http://localhost/b", "same.json"),
        ])
        .unwrap_err();
        assert!(matches!(err, SyncError::InvalidSource { name, .. } if name == "b"));
    }

    #[test]
    fn manifest_filename_is_reserved() {
        let err = Registry::new(vec![SourceConfig::new(
            "meta",
            "http://localhost/meta",
            MANIFEST_FILENAME,
        )])
        .unwrap_err();
        assert!(matches!(err, SyncError::InvalidSource { name, .. } if name == "meta"));
    }

    #[test]
    fn empty_registry_is_allowed() {
        let reg = Registry::new(Vec::new()).unwrap();
        assert!(reg.is_empty());
        assert!(reg.names().is_empty());
    }
}
