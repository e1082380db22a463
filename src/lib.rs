//! ロールに応じてサイドバーのナビゲーション木を絞り込むライブラリ。
//!
//! 中心は [`filter_tree`] と [`compute_dashboard_link`]。どちらも純粋関数で、
//! 入力の木を変更せずに新しい木を返す。

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod parser;
pub mod resolver;
pub mod role;
pub mod sidebar_data;

pub use error::{NavError, NavResult};
pub use filter::{NavigationTreeFilter, Sidebar, filter_tree};
pub use model::{NavigationNode, RoleSet};
pub use resolver::RouteTable;
pub use role::{Role, RoleDashboardMap, compute_dashboard_link, normalize_role};
pub use sidebar_data::sidebar_data;
