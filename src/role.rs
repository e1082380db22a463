// src/role.rs
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// ポータルが知っているロール
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Teacher,
    Student,
    Parent,
    Superadmin,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::Teacher,
        Role::Student,
        Role::Parent,
        Role::Superadmin,
    ];

    /// 大文字小文字を区別せずに解釈する。未知のロールは None
    pub fn parse(role: &str) -> Option<Role> {
        let normalized = normalize_role(role);
        Role::ALL.into_iter().find(|r| r.as_str() == normalized)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
            Role::Parent => "parent",
            Role::Superadmin => "superadmin",
        }
    }

    /// 各ロールのトップ画面
    pub fn dashboard_route(self) -> &'static str {
        match self {
            Role::Admin => "adminDashboard",
            Role::Teacher => "teacherDashboard",
            Role::Student => "studentDashboard",
            Role::Parent => "parentDashboard",
            Role::Superadmin => "superAdminDashboard",
        }
    }
}

/// ロール文字列の正規化 (前後の空白除去 + 小文字化)
pub fn normalize_role(role: &str) -> String {
    role.trim().to_lowercase()
}

/// 正規化済みロール → ダッシュボードのルート識別子
///
/// 見つからないロールには `fallback` (student のダッシュボード) を返す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleDashboardMap {
    routes: HashMap<String, String>,
    fallback: String,
}

impl RoleDashboardMap {
    pub fn new(routes: HashMap<String, String>, fallback: impl Into<String>) -> Self {
        RoleDashboardMap {
            routes: routes
                .into_iter()
                .map(|(role, route)| (normalize_role(&role), route))
                .collect(),
            fallback: fallback.into(),
        }
    }

    pub fn get(&self, role: &str) -> &str {
        self.routes
            .get(&normalize_role(role))
            .map(String::as_str)
            .unwrap_or(&self.fallback)
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }
}

impl Default for RoleDashboardMap {
    fn default() -> Self {
        let routes = Role::ALL
            .into_iter()
            .map(|r| (r.as_str().to_string(), r.dashboard_route().to_string()))
            .collect();
        RoleDashboardMap::new(routes, Role::Student.dashboard_route())
    }
}

static DEFAULT_DASHBOARDS: Lazy<RoleDashboardMap> = Lazy::new(RoleDashboardMap::default);

/// 組み込みのダッシュボード表からロールのトップ画面を引く
pub fn compute_dashboard_link(role: &str) -> &'static str {
    DEFAULT_DASHBOARDS.get(role)
}
