use anyhow::{Context, Result};
use esgroi_core::{settings::validate_settings, RoiError};
use esgroi_schemas::{
    action::Action,
    file_formats::{ActionFile, SettingsFile, VariableFile},
    settings::RoiSettings,
    variable::Variable,
    SCHEMA_VERSION,
};
use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::Path,
};

/// Everything a projection run needs, loaded from a catalog directory:
///
/// ```text
/// <catalog>/settings.yaml
/// <catalog>/variables/*.yaml
/// <catalog>/actions/*.yaml
/// ```
pub struct Catalog {
    pub settings: RoiSettings,
    pub variables: HashMap<String, Variable>,
    /// Ordered by action id so reports are stable between runs.
    pub actions: BTreeMap<String, Action>,
}

impl Catalog {
    /// Loads all data from the specified base directory and links each action to
    /// its monetization variable.
    pub fn load(base_path: &str) -> Result<Self> {
        tracing::info!("loading catalog from '{}'", base_path);
        let base = Path::new(base_path);

        let settings = load_or_create_settings(&base.join("settings.yaml"))?;
        validate_settings(&settings).context("Invalid ROI settings")?;

        let variables: HashMap<String, Variable> = load_yaml_files_into_map(
            base.join("variables"),
            |file: VariableFile| file.variables,
            |item: &Variable| item.variable_id.clone(),
        )?;
        let mut actions: BTreeMap<String, Action> = load_yaml_files_into_map(
            base.join("actions"),
            |file: ActionFile| file.actions,
            |item: &Action| item.action_id.clone(),
        )?;

        for action in actions.values_mut() {
            link_monetization_variable(action, &variables)?;
        }

        tracing::info!(
            actions = actions.len(),
            variables = variables.len(),
            "catalog loaded"
        );
        Ok(Self {
            settings,
            variables,
            actions,
        })
    }

    pub fn action(&self, action_id: &str) -> Result<&Action, RoiError> {
        self.actions
            .get(action_id)
            .ok_or_else(|| RoiError::ActionNotFound(action_id.to_string()))
    }

    pub fn variable(&self, variable_id: &str) -> Result<&Variable, RoiError> {
        self.variables
            .get(variable_id)
            .ok_or_else(|| RoiError::VariableNotFound(variable_id.to_string()))
    }
}

fn link_monetization_variable(
    action: &mut Action,
    variables: &HashMap<String, Variable>,
) -> Result<(), RoiError> {
    if let Some(variable_id) = &action.monetization_variable_id {
        let variable = variables
            .get(variable_id)
            .ok_or_else(|| RoiError::VariableNotFound(variable_id.clone()))?;
        action.monetization_variable = Some(variable.clone());
    }
    Ok(())
}

/// Reads the settings file, writing one with default values if none exists yet.
fn load_or_create_settings(path: &Path) -> Result<RoiSettings> {
    if !path.exists() {
        tracing::info!("no settings at {:?}, creating defaults", path);
        let file = SettingsFile {
            schema_version: SCHEMA_VERSION.to_string(),
            settings: RoiSettings::default(),
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create catalog directory: {:?}", parent))?;
        }
        let content = serde_yaml::to_string(&file)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write default settings to {:?}", path))?;
        return Ok(file.settings);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {:?}", path))?;
    let file: SettingsFile = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse YAML from {:?}", path))?;
    Ok(file.settings)
}

/// Generic helper to load all YAML files in a directory into a map.
///
/// A missing directory yields an empty map.
fn load_yaml_files_into_map<P, F, E, T, K, M>(dir_path: P, extract_vec: E, get_key: K) -> Result<M>
where
    P: AsRef<Path>,
    F: for<'de> serde::Deserialize<'de>, // The file wrapper struct (e.g., ActionFile)
    E: Fn(F) -> Vec<T>,                  // A closure to extract the Vec<T> from the wrapper
    K: Fn(&T) -> String,                 // A closure to get the key for the map from an item T
    M: Default + Extend<(String, T)>,
{
    let mut map = M::default();
    let dir_path = dir_path.as_ref();
    if !dir_path.is_dir() {
        tracing::warn!("catalog directory {:?} does not exist", dir_path);
        return Ok(map);
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir_path)
        .with_context(|| format!("Failed to read directory: {:?}", dir_path))?
    {
        let path = entry?.path();
        if path.is_file() && path.extension().map_or(false, |s| s == "yaml" || s == "yml") {
            paths.push(path);
        }
    }
    paths.sort();

    for path in paths {
        let content = fs::read_to_string(&path)?;
        let file_wrapper: F = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML from {:?}", path))?;

        map.extend(extract_vec(file_wrapper).into_iter().map(|item| (get_key(&item), item)));
    }
    Ok(map)
}
