// src/main.rs

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use sidebar_nav::loader::{load_from_project, load_tree};
use sidebar_nav::{NavigationTreeFilter, Role, RoleDashboardMap, RouteTable, sidebar_data};

/// CLI 引数定義
#[derive(Parser, Debug)]
#[command(
    name = "sidebar-nav",
    version,
    about = "ロールごとに表示されるサイドバー項目を絞り込み JSON 出力する CLI ツール"
)]
struct Cli {
    /// 対象ロール (大文字小文字は区別しない)
    #[arg(short = 'r', long = "role", value_name = "ROLE")]
    role: String,

    /// サイドバー定義ファイル (.json / .ts / .tsx / .js / .jsx)
    #[arg(short = 's', long = "source", value_name = "FILE", conflicts_with = "project_root")]
    source: Option<PathBuf>,

    /// ファイル名に "sidebar" を含む定義を探すプロジェクトルート
    #[arg(short = 'p', long = "project-root", value_name = "DIR")]
    project_root: Option<PathBuf>,

    /// TS/JS ソース内の配列変数名
    #[arg(long = "export-name", default_value = "SidebarData")]
    export_name: String,

    /// ルート名 → パスの JSON 表。指定するとリンクをパスに変換する
    #[arg(long = "routes", value_name = "FILE")]
    routes: Option<PathBuf>,

    /// 整形せず 1 行で出力する
    #[arg(long)]
    compact: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // stdout は JSON 出力専用なのでログは stderr へ
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // 1) ナビゲーション定義を用意する (指定がなければ組み込み定義)
    let tree = match (&cli.source, &cli.project_root) {
        (Some(source), _) => load_tree(source, &cli.export_name)
            .with_context(|| format!("failed to load {}", source.display()))?,
        (None, Some(root)) => load_from_project(root, &cli.export_name)
            .with_context(|| format!("failed to find sidebar under {}", root.display()))?,
        (None, None) => sidebar_data().to_vec(),
    };

    if Role::parse(&cli.role).is_none() {
        tracing::warn!(role = %cli.role, "unknown role, only ungated items are shown");
    }

    // 2) ロールで絞り込み、ダッシュボードのリンクを埋める
    let filter = NavigationTreeFilter::new(tree, RoleDashboardMap::default());
    let mut sidebar = filter.sidebar(&cli.role);

    // 3) ルート表があればシンボル名をパスに変換
    if let Some(routes) = &cli.routes {
        let table = RouteTable::load(routes)
            .with_context(|| format!("failed to load route table {}", routes.display()))?;
        table.resolve_links(&mut sidebar.items);
        if let Some(path) = table.get(&sidebar.dashboard) {
            sidebar.dashboard = path.to_string();
        }
    }

    // 4) JSON 化して標準出力
    let json = if cli.compact {
        serde_json::to_string(&sidebar)?
    } else {
        serde_json::to_string_pretty(&sidebar)?
    };
    println!("{}", json);

    Ok(())
}
