//! Pull request description templates.
//!
//! Templates are markdown files in the `templates/` subdirectory of the
//! config dir. A built-in default is written on first use, so `bb pr create
//! -i` works out of the box. Placeholders use `{{ name }}` syntax with
//! optional inner whitespace; unknown placeholders are left untouched.

use crate::config::Config;
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_TEMPLATE_NAME: &str = "default";

const DEFAULT_TEMPLATE: &str = "## Summary\n\
<!-- Brief description of what this PR does -->\n\
\n\
## Changes\n\
<!-- List of changes made -->\n\
-\n\
\n\
## Testing\n\
<!-- How to test these changes -->\n\
-\n\
\n\
## Notes\n\
<!-- Any additional notes or context -->\n";

fn ensure_templates_dir() -> Result<PathBuf> {
    let dir = Config::templates_dir()?;
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Loads a template by name (without the `.md` extension). A missing file,
/// including a missing default, materializes the built-in default template
/// on disk and returns its content.
pub fn get_template(name: Option<&str>) -> Result<String> {
    let dir = ensure_templates_dir()?;
    get_template_in(&dir, name)
}

pub fn get_template_in(dir: &Path, name: Option<&str>) -> Result<String> {
    let file_name = format!("{}.md", name.unwrap_or(DEFAULT_TEMPLATE_NAME));
    let path = dir.join(file_name);

    if !path.exists() {
        let default_path = dir.join(format!("{}.md", DEFAULT_TEMPLATE_NAME));
        if !default_path.exists() {
            fs::write(&default_path, DEFAULT_TEMPLATE)?;
        }
        return Ok(DEFAULT_TEMPLATE.to_string());
    }

    Ok(fs::read_to_string(&path)?)
}

/// Names of all `.md` templates in the templates directory.
pub fn list_templates() -> Result<Vec<String>> {
    let dir = Config::templates_dir()?;
    list_templates_in(&dir)
}

pub fn list_templates_in(dir: &Path) -> Result<Vec<String>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut names: Vec<String> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            name.strip_suffix(".md").map(str::to_string)
        })
        .collect();
    names.sort();
    Ok(names)
}

/// Substitutes `{{ key }}` placeholders. Placeholders with no matching key
/// pass through unchanged, as does any stray `{{` without a closing brace.
pub fn apply_variables(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        if let Some(end) = after.find("}}") {
            let key = after[..end].trim();
            if let Some((_, value)) = vars.iter().find(|(k, _)| *k == key) {
                out.push_str(&rest[..start]);
                out.push_str(value);
                rest = &after[end + 2..];
                continue;
            }
        }
        out.push_str(&rest[..start + 2]);
        rest = &rest[start + 2..];
    }

    out.push_str(rest);
    out
}
