//! Manifest parsing for zia.toml files

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use zia_content::DesiredResource;
use zia_schema::SchemaRegistry;

use crate::reconcile::LifecycleState;
use crate::{Error, Result};

/// File name looked up when no manifest path is given
pub const DEFAULT_MANIFEST: &str = "zia.toml";

fn default_store_path() -> PathBuf {
    PathBuf::from("remote.json")
}

/// Where the CLI keeps its local copy of the remote collections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSection {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultsSection {
    #[serde(default)]
    pub check_mode: bool,
}

/// One desired resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceEntry {
    pub kind: String,
    #[serde(default)]
    pub state: LifecycleState,
    /// Field values, validated against the kind's schema
    #[serde(default)]
    pub spec: Value,
}

impl ResourceEntry {
    /// Validate the entry and build its desired resource.
    ///
    /// # Errors
    ///
    /// - [`Error::Schema`] for an unknown kind or invalid spec
    /// - [`Error::Config`] against `manifest` for a read-only kind
    pub fn to_desired(
        &self,
        registry: &SchemaRegistry,
        manifest: &Path,
    ) -> Result<DesiredResource> {
        let schema = registry.require(&self.kind)?;
        if !schema.managed {
            return Err(Error::config(
                manifest,
                format!("{} is read-only and cannot be reconciled", self.kind),
            ));
        }
        Ok(DesiredResource::from_input(schema, &self.spec)?)
    }
}

/// Parsed manifest
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub store: StoreSection,

    #[serde(default)]
    pub defaults: DefaultsSection,

    /// Resources in reconciliation order
    #[serde(default)]
    pub resources: Vec<ResourceEntry>,

    /// File this manifest was loaded from
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Manifest {
    /// Parse a manifest from TOML content
    ///
    /// # Example
    ///
    /// ```
    /// use zia_core::config::Manifest;
    ///
    /// let manifest = Manifest::parse(r#"
    /// [[resources]]
    /// kind = "zpa_gateway"
    /// state = "absent"
    /// spec = { name = "GW01" }
    /// "#).unwrap();
    ///
    /// assert_eq!(manifest.resources[0].kind, "zpa_gateway");
    /// assert_eq!(manifest.store.path.to_str(), Some("remote.json"));
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: Manifest = toml::from_str(content)?;
        Ok(manifest)
    }

    /// Parse a manifest from YAML content
    pub fn parse_yaml(content: &str) -> Result<Self> {
        let manifest: Manifest = serde_yaml::from_str(content)?;
        Ok(manifest)
    }

    /// Load a manifest from disk.
    ///
    /// `.yaml` and `.yml` files are read as YAML, everything else as TOML. A
    /// relative store path is resolved against the manifest's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::config(path, e))?;
        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml" | "yml")
        );

        let parsed = if is_yaml {
            Self::parse_yaml(&content)
        } else {
            Self::parse(&content)
        };
        let mut manifest = parsed.map_err(|e| Error::config(path, e))?;
        manifest.source = Some(path.to_path_buf());

        if manifest.store.path.is_relative()
            && let Some(dir) = path.parent()
        {
            manifest.store.path = dir.join(&manifest.store.path);
        }
        tracing::debug!(
            path = %path.display(),
            resources = manifest.resources.len(),
            "Loaded manifest"
        );
        Ok(manifest)
    }

    /// Path reported in configuration errors: the loaded file, or
    /// [`DEFAULT_MANIFEST`] for parsed content.
    pub fn source_path(&self) -> &Path {
        self.source
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_MANIFEST))
    }
}
