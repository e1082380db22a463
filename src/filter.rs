// src/filter.rs
use serde::Serialize;

use crate::model::NavigationNode;
use crate::role::{RoleDashboardMap, normalize_role};

/// `tree` のうち `role` に見えるノードだけを残した新しい木を返す。
///
/// - `allowed_roles` が無い/空のノードは常に見える
/// - 見えないノードの子孫は評価しない
/// - サブメニュー (`is_submenu_container`) は子が残らなければ消える
/// - 兄弟の順序は保持され、入力の木は変更されない
pub fn filter_tree(tree: &[NavigationNode], role: &str) -> Vec<NavigationNode> {
    let role = normalize_role(role);
    filter_nodes(tree, &role)
}

fn filter_nodes(nodes: &[NavigationNode], role: &str) -> Vec<NavigationNode> {
    nodes
        .iter()
        .filter_map(|node| filter_node(node, role))
        .collect()
}

fn filter_node(node: &NavigationNode, role: &str) -> Option<NavigationNode> {
    if !node.is_visible_to(role) {
        return None;
    }

    let children = node
        .children
        .as_deref()
        .map(|children| filter_nodes(children, role));

    // 子を持たないサブメニューも空として扱う
    if node.is_submenu_container && children.as_ref().is_none_or(Vec::is_empty) {
        return None;
    }

    Some(NavigationNode {
        label: node.label.clone(),
        link: node.link.clone(),
        icon: node.icon.clone(),
        is_submenu_container: node.is_submenu_container,
        allowed_roles: node.allowed_roles.clone(),
        children,
        home: node.home,
    })
}

/// `home` ノードのリンクをダッシュボードで埋める
fn fill_home_links(nodes: &mut [NavigationNode], dashboard: &str) {
    for node in nodes {
        if node.home {
            node.link = Some(dashboard.to_string());
        }
        if let Some(children) = node.children.as_mut() {
            fill_home_links(children, dashboard);
        }
    }
}

/// あるロールに対して描画するサイドバー
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sidebar {
    pub role: String,
    pub dashboard: String,
    pub items: Vec<NavigationNode>,
}

/// 静的なナビゲーション定義とダッシュボード表の組
///
/// どちらも生成後は読み取り専用なので、複数スレッドから同時に呼んでよい。
#[derive(Debug, Clone, Default)]
pub struct NavigationTreeFilter {
    tree: Vec<NavigationNode>,
    dashboards: RoleDashboardMap,
}

impl NavigationTreeFilter {
    pub fn new(tree: Vec<NavigationNode>, dashboards: RoleDashboardMap) -> Self {
        NavigationTreeFilter { tree, dashboards }
    }

    pub fn tree(&self) -> &[NavigationNode] {
        &self.tree
    }

    pub fn dashboard_link(&self, role: &str) -> &str {
        self.dashboards.get(role)
    }

    pub fn filter(&self, role: &str) -> Vec<NavigationNode> {
        filter_tree(&self.tree, role)
    }

    pub fn sidebar(&self, role: &str) -> Sidebar {
        let dashboard = self.dashboard_link(role).to_string();
        let mut items = self.filter(role);
        fill_home_links(&mut items, &dashboard);
        Sidebar {
            role: normalize_role(role),
            dashboard,
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(nodes: &[NavigationNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.label.as_str()).collect()
    }

    fn management() -> Vec<NavigationNode> {
        vec![
            NavigationNode::section(
                "Management",
                vec![NavigationNode::link("Add Branch", "/branch/add")],
            )
            .with_roles(["superadmin"]),
        ]
    }

    fn portal() -> Vec<NavigationNode> {
        vec![
            NavigationNode::home("Dashboard"),
            NavigationNode::section(
                "Academic",
                vec![
                    NavigationNode::link("Timetable", "timetable"),
                    NavigationNode::container(
                        "Classes",
                        vec![
                            NavigationNode::link("Class List", "classList"),
                            NavigationNode::link("Sessions", "session")
                                .with_roles(["superadmin"]),
                        ],
                    )
                    .with_roles(["admin", "superadmin", "teacher"]),
                    NavigationNode::link("Attendance", "attendance")
                        .with_roles(["Admin", "Teacher"]),
                ],
            ),
            NavigationNode::container(
                "Fees",
                vec![
                    NavigationNode::link("Collect Fees", "collectFees").with_roles(["admin"]),
                    NavigationNode::link("Fee Types", "feeTypes").with_roles(["ADMIN"]),
                ],
            ),
            NavigationNode::link("Messages", "messages"),
        ]
    }

    #[test]
    fn section_gated_to_superadmin_is_removed_for_admin() {
        assert!(filter_tree(&management(), "admin").is_empty());
    }

    #[test]
    fn section_gated_to_superadmin_is_kept_for_superadmin() {
        let tree = management();
        assert_eq!(filter_tree(&tree, "superadmin"), tree);
    }

    #[test]
    fn container_emptied_by_tighter_child_gate_is_pruned() {
        let tree = vec![
            NavigationNode::container(
                "Classes",
                vec![NavigationNode::link("Sessions", "/session").with_roles(["superadmin"])],
            )
            .with_roles(["admin"]),
        ];
        assert!(filter_tree(&tree, "admin").is_empty());
    }

    #[test]
    fn container_without_children_is_pruned() {
        let mut node = NavigationNode::container("Empty", vec![]);
        node.children = None;
        assert!(filter_tree(&[node], "admin").is_empty());
    }

    #[test]
    fn leaf_and_section_survive_with_no_children() {
        let tree = vec![
            NavigationNode::link("Messages", "messages"),
            NavigationNode::section("Reports", vec![NavigationNode::link("Fees", "fees").with_roles(["admin"])]),
        ];
        let filtered = filter_tree(&tree, "student");
        assert_eq!(labels(&filtered), ["Messages", "Reports"]);
        assert_eq!(filtered[1].children, Some(vec![]));
    }

    #[test]
    fn preserves_sibling_order() {
        let filtered = filter_tree(&portal(), "teacher");
        assert_eq!(labels(&filtered), ["Dashboard", "Academic", "Messages"]);
        let academic = filtered[1].children.as_ref().unwrap();
        assert_eq!(labels(academic), ["Timetable", "Classes", "Attendance"]);
        let classes = academic[1].children.as_ref().unwrap();
        assert_eq!(labels(classes), ["Class List"]);
    }

    #[test]
    fn role_matching_is_case_insensitive() {
        let tree = portal();
        let lower = filter_tree(&tree, "admin");
        assert_eq!(filter_tree(&tree, "Admin"), lower);
        assert_eq!(filter_tree(&tree, "ADMIN"), lower);
        assert_eq!(labels(&lower), ["Dashboard", "Academic", "Fees", "Messages"]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let tree = portal();
        for role in ["admin", "teacher", "student", "parent", "superadmin", "guest"] {
            let once = filter_tree(&tree, role);
            assert_eq!(filter_tree(&once, role), once, "role {role}");
        }
    }

    #[test]
    fn input_tree_is_reusable_for_another_role() {
        let tree = portal();
        let snapshot = tree.clone();
        let student = filter_tree(&tree, "student");
        let admin = filter_tree(&tree, "admin");
        assert_eq!(tree, snapshot);
        assert_eq!(labels(&student), ["Dashboard", "Academic", "Messages"]);
        assert_eq!(labels(&admin), ["Dashboard", "Academic", "Fees", "Messages"]);
    }

    #[test]
    fn unknown_role_sees_only_ungated_nodes() {
        let filtered = filter_tree(&portal(), "guest");
        assert_eq!(labels(&filtered), ["Dashboard", "Academic", "Messages"]);
        let academic = filtered[1].children.as_ref().unwrap();
        assert_eq!(labels(academic), ["Timetable"]);
    }

    #[test]
    fn sidebar_resolves_home_link_per_role() {
        let filter = NavigationTreeFilter::new(portal(), RoleDashboardMap::default());
        let sidebar = filter.sidebar("Teacher");
        assert_eq!(sidebar.role, "teacher");
        assert_eq!(sidebar.dashboard, "teacherDashboard");
        assert_eq!(sidebar.items[0].link.as_deref(), Some("teacherDashboard"));

        let guest = filter.sidebar("guest");
        assert_eq!(guest.items[0].link.as_deref(), Some("studentDashboard"));
        assert_eq!(filter.tree()[0].link, None);
    }

    #[test]
    fn filter_is_shareable_across_threads() {
        let filter = std::sync::Arc::new(NavigationTreeFilter::new(portal(), RoleDashboardMap::default()));
        let handles: Vec<_> = ["admin", "parent"]
            .into_iter()
            .map(|role| {
                let filter = filter.clone();
                std::thread::spawn(move || filter.filter(role).len())
            })
            .collect();
        let counts: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(counts, [4, 3]);
    }
}
