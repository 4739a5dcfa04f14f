//! PyInstaller spec file rendering
//!
//! Turns the manifest into the `.spec` build input the packaging tool
//! consumes. Source paths are rendered absolute so the spec works from
//! the build directory; destinations stay relative to the bundle root.
//!
//! The icon is the one conditional part: it is embedded only if the file
//! exists at render time, and a missing icon downgrades to a warning.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::config::defaults::DIST_DIR;
use crate::core::manifest::{FileEntry, Manifest};

/// A rendered spec file plus any non-fatal findings
#[derive(Debug)]
pub struct RenderedSpec {
    /// Python source of the spec file
    pub content: String,
    /// Warnings to surface to the user (e.g. missing icon)
    pub warnings: Vec<String>,
}

/// File name of the rendered spec for an app
pub fn spec_filename(manifest: &Manifest) -> String {
    format!("{}.spec", manifest.app.name)
}

/// Fixed output path the packaging tool writes the executable to
pub fn output_executable(project_dir: &Path, name: &str) -> PathBuf {
    let file_name = if cfg!(windows) {
        format!("{name}.exe")
    } else {
        name.to_string()
    };
    project_dir.join(DIST_DIR).join(file_name)
}

/// Render the spec file for a manifest
pub fn render(manifest: &Manifest, project_dir: &Path) -> RenderedSpec {
    let mut warnings = Vec::new();

    let entry = py_path(&project_dir.join(&manifest.app.entry));
    let binaries = render_entries(&manifest.bundle.binaries, project_dir);
    let datas = render_entries(&manifest.bundle.datas, project_dir);
    let hidden = py_str_list(&manifest.bundle.hidden_imports);
    let excludes = py_str_list(&manifest.bundle.excludes);
    let hooks = py_str_list_of(
        manifest
            .bundle
            .runtime_hooks
            .iter()
            .map(|h| project_dir.join(h).display().to_string()),
    );

    let icon = match &manifest.app.icon {
        Some(icon) if project_dir.join(icon).exists() => {
            Some(py_path(&project_dir.join(icon)))
        }
        Some(icon) => {
            warnings.push(format!(
                "icon '{icon}' not found; building without an icon"
            ));
            None
        }
        None => None,
    };

    let console = if manifest.app.windowed {
        "False"
    } else {
        "True"
    };

    let mut content = String::new();
    content.push_str("# -*- mode: python ; coding: utf-8 -*-\n");
    content.push_str("# Rendered by pybundle from pybundle.toml; do not edit.\n\n");

    let _ = write!(
        content,
        "a = Analysis(\n    \
         [{entry}],\n    \
         pathex=[{pathex}],\n    \
         binaries={binaries},\n    \
         datas={datas},\n    \
         hiddenimports={hidden},\n    \
         hookspath=[],\n    \
         runtime_hooks={hooks},\n    \
         excludes={excludes},\n    \
         noarchive=False,\n)\n\n\
         pyz = PYZ(a.pure)\n\n",
        pathex = py_path(project_dir),
    );

    let name = py_str(&manifest.app.name);
    let icon_line = icon
        .map(|i| format!("    icon={i},\n"))
        .unwrap_or_default();

    if manifest.app.onefile {
        let _ = write!(
            content,
            "exe = EXE(\n    \
             pyz,\n    \
             a.scripts,\n    \
             a.binaries,\n    \
             a.datas,\n    \
             [],\n    \
             name={name},\n    \
             debug=False,\n    \
             strip=False,\n    \
             upx=True,\n    \
             console={console},\n{icon_line})\n",
        );
    } else {
        let _ = write!(
            content,
            "exe = EXE(\n    \
             pyz,\n    \
             a.scripts,\n    \
             [],\n    \
             exclude_binaries=True,\n    \
             name={name},\n    \
             debug=False,\n    \
             strip=False,\n    \
             upx=True,\n    \
             console={console},\n{icon_line})\n\n\
             coll = COLLECT(\n    \
             exe,\n    \
             a.binaries,\n    \
             a.datas,\n    \
             strip=False,\n    \
             upx=True,\n    \
             name={name},\n)\n",
        );
    }

    RenderedSpec { content, warnings }
}

/// Render (source, destination) tuples for binaries or datas
fn render_entries(entries: &[FileEntry], project_dir: &Path) -> String {
    let mut out = String::from("[");
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(
            out,
            "({}, {})",
            py_path(&project_dir.join(&entry.src)),
            py_str(&entry.dest)
        );
    }
    out.push(']');
    out
}

/// Quote a string as a Python single-quoted literal
fn py_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

fn py_path(path: &Path) -> String {
    py_str(&path.display().to_string())
}

fn py_str_list(items: &[String]) -> String {
    py_str_list_of(items.iter().cloned())
}

fn py_str_list_of(items: impl Iterator<Item = String>) -> String {
    let quoted: Vec<String> = items.map(|i| py_str(&i)).collect();
    format!("[{}]", quoted.join(", "))
}
