// src/loader.rs
use path_absolutize::Absolutize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{NavError, NavResult};
use crate::model::NavigationNode;
use crate::parser::parse_sidebar_file;

/// サイドバー定義として読めるソースの拡張子
const SCRIPT_EXTENSIONS: [&str; 4] = ["ts", "tsx", "js", "jsx"];

fn absolute(path: &Path) -> NavResult<PathBuf> {
    path.absolutize()
        .map(|p| p.to_path_buf())
        .map_err(|source| NavError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// 拡張子に応じて JSON もしくは TS/JS のサイドバー定義を読み込み、検証する
pub fn load_tree(path: &Path, export_name: &str) -> NavResult<Vec<NavigationNode>> {
    let path = absolute(path)?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let tree = if ext == "json" {
        let text = fs::read_to_string(&path).map_err(|source| NavError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str::<Vec<NavigationNode>>(&text).map_err(|source| NavError::Json {
            path: path.clone(),
            source,
        })?
    } else if SCRIPT_EXTENSIONS.contains(&ext.as_str()) {
        parse_sidebar_file(&path, export_name)?
    } else {
        return Err(NavError::UnsupportedSource(path));
    };

    validate_tree(&tree)?;
    tracing::info!(path = ?path, top_level = tree.len(), "navigation tree loaded");
    Ok(tree)
}

/// `project_root` 以下から、ファイル名に "sidebar" を含むスクリプトを集める
pub fn discover_sources(project_root: &Path) -> NavResult<Vec<PathBuf>> {
    let root = absolute(project_root)?;
    let mut found: Vec<PathBuf> = WalkDir::new(&root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| SCRIPT_EXTENSIONS.contains(&ext))
        })
        .filter(|e| {
            e.file_name()
                .to_str()
                .is_some_and(|name| name.to_ascii_lowercase().contains("sidebar"))
        })
        // node_modules 配下は対象外
        .filter(|e| !e.path().components().any(|c| c.as_os_str() == "node_modules"))
        .map(|e| e.into_path())
        .collect();

    if found.is_empty() {
        return Err(NavError::NoSourceFound(root));
    }

    // 重複を除去
    found.sort();
    found.dedup();
    tracing::debug!(count = found.len(), "sidebar source candidates");
    Ok(found)
}

/// 候補を順に試し、`export_name` を宣言している最初のファイルを読む
pub fn load_from_project(project_root: &Path, export_name: &str) -> NavResult<Vec<NavigationNode>> {
    let candidates = discover_sources(project_root)?;
    for candidate in &candidates {
        match load_tree(candidate, export_name) {
            Ok(tree) => return Ok(tree),
            Err(NavError::MissingExport { .. }) => {
                tracing::debug!(path = ?candidate, "no sidebar export, trying next candidate");
            }
            // Sidebar コンポーネント本体など、定義以外のファイルも候補に入る
            Err(e @ NavError::Parse { .. }) => {
                tracing::warn!(path = ?candidate, error = %e, "unparsable candidate skipped");
            }
            Err(e) => return Err(e),
        }
    }
    Err(NavError::NoSourceFound(absolute(project_root)?))
}

/// 設定の妥当性検査。読み込み時に一度だけ行う
///
/// サブメニューは子をまとめるだけなので、自身のリンクを持ってはならない。
pub fn validate_tree(tree: &[NavigationNode]) -> NavResult<()> {
    for node in tree {
        if node.is_submenu_container && (node.link.is_some() || node.home) {
            return Err(NavError::InvalidConfig(format!(
                "submenu `{}` must not carry its own link",
                node.label
            )));
        }
        if let Some(children) = &node.children {
            validate_tree(children)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_with_link_is_rejected() {
        let mut classes = NavigationNode::container(
            "Classes",
            vec![NavigationNode::link("Sessions", "session")],
        );
        classes.link = Some("classes".to_string());
        let tree = vec![NavigationNode::section("Academic", vec![classes])];
        let err = validate_tree(&tree).unwrap_err();
        assert!(err.to_string().contains("Classes"));
    }

    #[test]
    fn well_formed_tree_passes_validation() {
        let tree = vec![NavigationNode::container(
            "Fees",
            vec![NavigationNode::link("Collect Fees", "collectFees")],
        )];
        assert!(validate_tree(&tree).is_ok());
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load_tree(Path::new("sidebar.yaml"), "SidebarData").unwrap_err();
        assert!(matches!(err, NavError::UnsupportedSource(_)));
    }
}
