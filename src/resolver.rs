use path_absolutize::Absolutize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{NavError, NavResult};
use crate::model::NavigationNode;

/// ルートのシンボル名 → 実際のパス (例: "addBranch" → "/branch/add")
///
/// フィルタ本体はシンボル名を不透明な識別子として運ぶだけで、
/// パスへの変換は描画側がこの表を使って行う。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    routes: HashMap<String, String>,
}

impl RouteTable {
    pub fn new(routes: HashMap<String, String>) -> Self {
        RouteTable { routes }
    }

    /// `{ "addBranch": "/branch/add", ... }` 形式の JSON を読む
    pub fn load(path: &Path) -> NavResult<Self> {
        let abs = path
            .absolutize()
            .map_err(|source| NavError::Io {
                path: path.to_path_buf(),
                source,
            })?
            .to_path_buf();
        let text = fs::read_to_string(&abs).map_err(|source| NavError::Io {
            path: abs.clone(),
            source,
        })?;
        let routes: HashMap<String, String> =
            serde_json::from_str(&text).map_err(|source| NavError::Json { path: abs, source })?;
        tracing::info!(count = routes.len(), "route table loaded");
        Ok(RouteTable { routes })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.routes.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// フィルタ済みの木のリンクを表に従って書き換える。
    /// 表に無いリンクはそのまま残す (既にパスで書かれているものも含む)。
    pub fn resolve_links(&self, nodes: &mut [NavigationNode]) {
        for node in nodes {
            if let Some(link) = node.link.as_mut() {
                match self.routes.get(link.as_str()) {
                    Some(path) => *link = path.clone(),
                    None if !link.starts_with('/') => {
                        tracing::warn!(label = %node.label, link = %link, "unknown route name")
                    }
                    None => {}
                }
            }
            if let Some(children) = node.children.as_mut() {
                self.resolve_links(children);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        RouteTable::new(HashMap::from([
            ("addBranch".to_string(), "/branch/add".to_string()),
            ("adminDashboard".to_string(), "/admin/dashboard".to_string()),
        ]))
    }

    #[test]
    fn rewrites_known_names_recursively() {
        let mut nodes = vec![
            NavigationNode::link("Dashboard", "adminDashboard"),
            NavigationNode::section(
                "Management",
                vec![
                    NavigationNode::link("Add Branch", "addBranch"),
                    NavigationNode::link("Sessions", "/session"),
                    NavigationNode::link("Albums", "albums"),
                ],
            ),
        ];
        table().resolve_links(&mut nodes);

        assert_eq!(nodes[0].link.as_deref(), Some("/admin/dashboard"));
        let children = nodes[1].children.as_ref().unwrap();
        assert_eq!(children[0].link.as_deref(), Some("/branch/add"));
        assert_eq!(children[1].link.as_deref(), Some("/session"));
        assert_eq!(children[2].link.as_deref(), Some("albums"));
        assert_eq!(nodes[1].link, None);
    }

    #[test]
    fn lookup_by_name() {
        let table = table();
        assert_eq!(table.get("addBranch"), Some("/branch/add"));
        assert_eq!(table.get("missing"), None);
        assert_eq!(table.len(), 2);
        assert!(!table.is_empty());
    }
}
