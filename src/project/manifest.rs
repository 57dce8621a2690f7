//! Reading and writing the version field of each manifest format.
//!
//! TOML manifests are edited with `toml_edit` so comments and layout survive.
//! `package.json` keeps its key order and indentation width.

use super::{ProjectFile, ProjectKind};
use crate::error::{ProjectError, Result};
use serde::Serialize;
use toml_edit::{DocumentMut, Item, TableLike};

pub(super) async fn read_version(file: &ProjectFile) -> Result<Option<String>> {
    let content = tokio::fs::read_to_string(&file.path)
        .await
        .map_err(|e| read_error(file, e.to_string()))?;

    let version = match file.kind {
        ProjectKind::Cargo => cargo_version(&parse_toml(file, &content)?),
        ProjectKind::Python => python_version(&parse_toml(file, &content)?),
        ProjectKind::Npm => {
            let json: serde_json::Value =
                serde_json::from_str(&content).map_err(|e| read_error(file, e.to_string()))?;
            json.get("version")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        }
    };

    log::debug!(
        "{} version: {}",
        file.relative_path.display(),
        version.as_deref().unwrap_or("<none>")
    );
    Ok(version)
}

pub(super) async fn write_version(file: &ProjectFile, version: &semver::Version) -> Result<bool> {
    let content = tokio::fs::read_to_string(&file.path)
        .await
        .map_err(|e| write_error(file, format!("Failed to read file: {e}")))?;

    let version = version.to_string();
    let updated = match file.kind {
        ProjectKind::Cargo => {
            let mut doc = parse_toml_for_write(file, &content)?;
            set_cargo_version(&mut doc, &version)
                .map_err(|reason| write_error(file, reason))?
                .then(|| doc.to_string())
        }
        ProjectKind::Python => {
            let mut doc = parse_toml_for_write(file, &content)?;
            set_python_version(&mut doc, &version)
                .map_err(|reason| write_error(file, reason))?;
            Some(doc.to_string())
        }
        ProjectKind::Npm => Some(
            set_npm_version(&content, &version).map_err(|reason| write_error(file, reason))?,
        ),
    };

    let Some(updated) = updated else {
        log::debug!(
            "{} inherits its version, leaving it untouched",
            file.relative_path.display()
        );
        return Ok(false);
    };

    tokio::fs::write(&file.path, updated)
        .await
        .map_err(|e| write_error(file, format!("Failed to write file: {e}")))?;
    Ok(true)
}

fn parse_toml(file: &ProjectFile, content: &str) -> Result<DocumentMut> {
    content
        .parse::<DocumentMut>()
        .map_err(|e| read_error(file, format!("Failed to parse TOML: {e}")))
}

fn parse_toml_for_write(file: &ProjectFile, content: &str) -> Result<DocumentMut> {
    content
        .parse::<DocumentMut>()
        .map_err(|e| write_error(file, format!("Failed to parse TOML: {e}")))
}

fn read_error(file: &ProjectFile, reason: String) -> crate::error::ReleaseError {
    ProjectError::ManifestRead {
        path: file.path.clone(),
        reason,
    }
    .into()
}

fn write_error(file: &ProjectFile, reason: String) -> crate::error::ReleaseError {
    ProjectError::ManifestWrite {
        path: file.path.clone(),
        reason,
    }
    .into()
}

fn table<'a>(doc: &'a DocumentMut, path: &[&str]) -> Option<&'a dyn TableLike> {
    let mut item: &Item = doc.as_item();
    for key in path {
        item = item.get(*key)?;
    }
    item.as_table_like()
}

fn table_mut<'a>(doc: &'a mut DocumentMut, path: &[&str]) -> Option<&'a mut dyn TableLike> {
    let mut item: &mut Item = doc.as_item_mut();
    for key in path {
        item = item.get_mut(*key)?;
    }
    item.as_table_like_mut()
}

fn string_field(table: &dyn TableLike, key: &str) -> Option<String> {
    table.get(key).and_then(Item::as_str).map(str::to_string)
}

/// Replace or insert `version`, keeping the existing value's comments and spacing
fn set_version_item(table: &mut dyn TableLike, version: &str) {
    match table.get_mut("version").and_then(Item::as_value_mut) {
        Some(existing) => {
            let decor = existing.decor().clone();
            *existing = version.into();
            *existing.decor_mut() = decor;
        }
        None => {
            table.insert("version", toml_edit::value(version));
        }
    }
}

/// `version.workspace = true`
fn inherits_version(package: &dyn TableLike) -> bool {
    package
        .get("version")
        .and_then(Item::as_table_like)
        .and_then(|t| t.get("workspace"))
        .and_then(Item::as_bool)
        .unwrap_or(false)
}

fn cargo_version(doc: &DocumentMut) -> Option<String> {
    let workspace = table(doc, &["workspace", "package"]).and_then(|t| string_field(t, "version"));
    match table(doc, &["package"]) {
        Some(package) if !inherits_version(package) => string_field(package, "version"),
        _ => workspace,
    }
}

/// `Ok(false)` for a virtual workspace root, which has no version of its own
fn set_cargo_version(doc: &mut DocumentMut, version: &str) -> std::result::Result<bool, String> {
    let virtual_root = table(doc, &["workspace"]).is_some();
    let mut modified = false;

    if let Some(workspace) = table_mut(doc, &["workspace", "package"])
        && workspace.contains_key("version")
    {
        set_version_item(workspace, version);
        modified = true;
    }

    if let Some(package) = table_mut(doc, &["package"]) {
        if !inherits_version(package) {
            set_version_item(package, version);
            modified = true;
        }
    } else if !modified && !virtual_root {
        return Err("No [package] or [workspace] table to update".to_string());
    }

    Ok(modified)
}

fn python_dynamic_version(project: &dyn TableLike) -> bool {
    project
        .get("dynamic")
        .and_then(Item::as_array)
        .is_some_and(|a| a.iter().any(|v| v.as_str() == Some("version")))
}

fn python_version(doc: &DocumentMut) -> Option<String> {
    table(doc, &["project"])
        .filter(|p| !python_dynamic_version(*p))
        .and_then(|p| string_field(p, "version"))
        .or_else(|| table(doc, &["tool", "poetry"]).and_then(|t| string_field(t, "version")))
}

fn set_python_version(doc: &mut DocumentMut, version: &str) -> std::result::Result<(), String> {
    let project_has_version = table(doc, &["project"])
        .is_some_and(|p| p.contains_key("version") && !python_dynamic_version(p));
    let has_poetry = table(doc, &["tool", "poetry"]).is_some();
    let has_static_project = table(doc, &["project"]).is_some_and(|p| !python_dynamic_version(p));

    let path: &[&str] = if project_has_version {
        &["project"]
    } else if has_poetry {
        &["tool", "poetry"]
    } else if has_static_project {
        &["project"]
    } else {
        return Err("No [project] or [tool.poetry] table to update".to_string());
    };

    let target = table_mut(doc, path).ok_or_else(|| "Version table disappeared".to_string())?;
    set_version_item(target, version);
    Ok(())
}

fn set_npm_version(content: &str, version: &str) -> std::result::Result<String, String> {
    let mut json: serde_json::Value =
        serde_json::from_str(content).map_err(|e| format!("Failed to parse JSON: {e}"))?;
    let object = json
        .as_object_mut()
        .ok_or_else(|| "package.json is not a JSON object".to_string())?;
    object.insert(
        "version".to_string(),
        serde_json::Value::String(version.to_string()),
    );

    let indent = detect_indent(content);
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    json.serialize(&mut serializer)
        .map_err(|e| format!("Failed to serialize JSON: {e}"))?;

    let mut updated = String::from_utf8(out).map_err(|e| e.to_string())?;
    if content.ends_with('\n') {
        updated.push('\n');
    }
    Ok(updated)
}

/// Leading whitespace of the first indented line, two spaces if none
fn detect_indent(content: &str) -> String {
    content
        .lines()
        .map(|line| &line[..line.len() - line.trim_start().len()])
        .find(|ws| !ws.is_empty())
        .unwrap_or("  ")
        .to_string()
}
