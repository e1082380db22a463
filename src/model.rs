// src/model.rs
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

use crate::role::normalize_role;

/// 閲覧を許可するロールの集合
///
/// 要素は生成時・デシリアライズ時に小文字へ正規化される。
/// 空集合は「全ロールに表示」と同じ扱い。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RoleSet(BTreeSet<String>);

impl RoleSet {
    pub fn new<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        RoleSet(
            roles
                .into_iter()
                .map(|r| normalize_role(r.as_ref()))
                .filter(|r| !r.is_empty())
                .collect(),
        )
    }

    /// `role` は正規化済みであること
    pub fn contains(&self, role: &str) -> bool {
        self.0.contains(role)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<'de> Deserialize<'de> for RoleSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<String>::deserialize(deserializer)?;
        Ok(RoleSet::new(raw))
    }
}

/// サイドバーの 1 項目 (セクション見出し・サブメニュー・リンク)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationNode {
    /// 表示名
    pub label: String,

    /// ルート識別子 (例: "timetable", "/branch/add")。
    /// 見出しやサブメニューのまとめ役には無い。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// アイコン名。フィルタ処理では参照しない
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// 子をまとめるだけのノードなら true。
    /// フィルタ後に子が残らなければノードごと消える。
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_submenu_container: bool,

    /// None もしくは空なら全ロールに表示
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_roles: Option<RoleSet>,

    /// 子ノード (順序はそのまま保持される)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NavigationNode>>,

    /// ロールごとのダッシュボードへ差し替えるトップ項目
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub home: bool,
}

impl NavigationNode {
    fn bare(label: impl Into<String>) -> Self {
        NavigationNode {
            label: label.into(),
            link: None,
            icon: None,
            is_submenu_container: false,
            allowed_roles: None,
            children: None,
            home: false,
        }
    }

    /// リンク先を持つ末端項目
    pub fn link(label: impl Into<String>, link: impl Into<String>) -> Self {
        NavigationNode {
            link: Some(link.into()),
            ..Self::bare(label)
        }
    }

    /// 見出し付きのセクション。子が空になっても残る
    pub fn section(label: impl Into<String>, children: Vec<NavigationNode>) -> Self {
        NavigationNode {
            children: Some(children),
            ..Self::bare(label)
        }
    }

    /// サブメニュー。子が空になれば刈り取られる
    pub fn container(label: impl Into<String>, children: Vec<NavigationNode>) -> Self {
        NavigationNode {
            is_submenu_container: true,
            children: Some(children),
            ..Self::bare(label)
        }
    }

    /// ダッシュボード項目。リンクは表示時にロールから決まる
    pub fn home(label: impl Into<String>) -> Self {
        NavigationNode {
            home: true,
            ..Self::bare(label)
        }
    }

    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed_roles = Some(RoleSet::new(roles));
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// `role` (正規化済み) にこのノード自身が見えるか。子孫は見ない
    pub fn is_visible_to(&self, role: &str) -> bool {
        match &self.allowed_roles {
            None => true,
            Some(roles) => roles.is_empty() || roles.contains(role),
        }
    }
}
