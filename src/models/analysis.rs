//! Analysis specification structures
//!
//! The analysis specification tells the extraction engine which models,
//! views, routes, assets, reports and website templates matter for the task
//! at hand. It is usually produced by an upstream planning step and handed in
//! as JSON; the engine treats it as read-only.

use crate::error::{ContextError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// A model of interest, identified by its technical name
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelCriterion {
    pub name: Option<String>,
}

/// A view of interest, identified by the model it renders
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewCriterion {
    pub model: Option<String>,
}

/// A controller route of interest
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerCriterion {
    pub action_name: Option<String>,
}

/// An asset of interest, identified by its bundle-relative file path
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetCriterion {
    pub file_path: Option<String>,
}

/// A report of interest, identified by the model it prints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportCriterion {
    pub model: Option<String>,
}

/// A website template of interest, identified by its view id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebsiteViewCriterion {
    pub view: Option<String>,
}

/// The full analysis specification, one criterion list per category
///
/// Unknown categories in the input are ignored; missing categories default to
/// empty lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSpec {
    pub models: Vec<ModelCriterion>,
    pub views: Vec<ViewCriterion>,
    pub controller: Vec<ControllerCriterion>,
    pub assets: Vec<AssetCriterion>,
    pub reports: Vec<ReportCriterion>,
    pub website_views: Vec<WebsiteViewCriterion>,
}

impl AnalysisSpec {
    /// Parse a specification from a JSON string
    pub fn from_json_str(content: &str, origin: impl AsRef<Path>) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| ContextError::json_parse_error(origin.as_ref(), e))
    }

    /// Load a specification from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ContextError::Io { source: e })?;
        Self::from_json_str(&content, path)
    }

    /// Technical names of requested models
    pub fn model_names(&self) -> HashSet<&str> {
        self.models
            .iter()
            .filter_map(|m| m.name.as_deref())
            .collect()
    }

    /// Models whose views are requested
    pub fn view_models(&self) -> HashSet<&str> {
        self.views
            .iter()
            .filter_map(|v| v.model.as_deref())
            .collect()
    }

    /// Requested controller routes
    pub fn routes(&self) -> HashSet<&str> {
        self.controller
            .iter()
            .filter_map(|c| c.action_name.as_deref())
            .collect()
    }

    /// Requested asset file paths, in declaration order
    pub fn asset_paths(&self) -> Vec<&str> {
        self.assets
            .iter()
            .filter_map(|a| a.file_path.as_deref())
            .collect()
    }

    /// Models whose report definitions are requested
    pub fn report_models(&self) -> HashSet<&str> {
        self.reports
            .iter()
            .filter_map(|r| r.model.as_deref())
            .collect()
    }

    /// Requested website template ids
    pub fn template_ids(&self) -> HashSet<&str> {
        self.website_views
            .iter()
            .filter_map(|w| w.view.as_deref())
            .collect()
    }

    /// True when no category carries any criterion
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
            && self.views.is_empty()
            && self.controller.is_empty()
            && self.assets.is_empty()
            && self.reports.is_empty()
            && self.website_views.is_empty()
    }
}
