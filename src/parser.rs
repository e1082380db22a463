use swc_common::{sync::Lrc, FileName, SourceMap};
use swc_ecma_ast::*;
use swc_ecma_parser::{lexer::Lexer, Parser as SwcParser, StringInput, Syntax, TsConfig};
use swc_ecma_visit::{Visit, VisitWith};

use std::fs;
use std::path::Path;

use crate::error::{NavError, NavResult};
use crate::model::{NavigationNode, RoleSet};

/// `link: dashboardLink` のように書かれたトップ項目を示す識別子
pub const DASHBOARD_LINK_IDENT: &str = "dashboardLink";

/// AST をトラバースして SidebarData の配列定義を抽出するための Visitor
struct SidebarVisitor {
    /// 解析対象ファイル名 (ログ用)
    file: String,
    /// 探す変数名 (例: "SidebarData")
    export_name: String,
    /// 見つかったナビゲーション定義
    nodes: Option<Vec<NavigationNode>>,
    /// 読み飛ばした要素の数
    skipped: usize,
    /// 配列の解釈中に見つかった設定エラー
    error: Option<NavError>,
}

impl SidebarVisitor {
    fn new(file: &str, export_name: &str) -> Self {
        SidebarVisitor {
            file: file.to_string(),
            export_name: export_name.to_string(),
            nodes: None,
            skipped: 0,
            error: None,
        }
    }

    /// 配列リテラルの各要素を NavigationNode に変換する
    fn parse_items(&mut self, arr_lit: &ArrayLit) -> NavResult<Vec<NavigationNode>> {
        let mut items = Vec::new();
        for (i, elem) in arr_lit.elems.iter().enumerate() {
            let Some(expr_and_span) = elem else {
                continue;
            };
            if expr_and_span.spread.is_some() {
                tracing::warn!(file = %self.file, index = i, "spread element in sidebar array skipped");
                self.skipped += 1;
                continue;
            }
            match unwrap_expr(&expr_and_span.expr) {
                Expr::Object(obj_lit) => items.push(self.parse_item(obj_lit)?),
                _ => {
                    tracing::warn!(file = %self.file, index = i, "non-object sidebar entry skipped");
                    self.skipped += 1;
                }
            }
        }
        Ok(items)
    }

    /// ObjectLit (例: `{ label: "Fees", submenu: true, submenuItems: [...] }`) を
    /// NavigationNode に変換する
    fn parse_item(&mut self, obj_lit: &ObjectLit) -> NavResult<NavigationNode> {
        let mut node = NavigationNode {
            label: String::new(),
            link: None,
            icon: None,
            is_submenu_container: false,
            allowed_roles: None,
            children: None,
            home: false,
        };
        // 読めないロール指定は「全員に表示」に化けるのでエラーにする
        let mut unreadable_roles = false;

        for prop in &obj_lit.props {
            let PropOrSpread::Prop(boxed_prop) = prop else {
                self.skipped += 1;
                continue;
            };
            let Prop::KeyValue(KeyValueProp { key, value }) = &**boxed_prop else {
                continue;
            };
            let Some(key_name) = prop_key(key) else {
                continue;
            };
            let value = unwrap_expr(value);

            match key_name.as_str() {
                "label" | "title" => {
                    if let Some(s) = string_value(value) {
                        node.label = s;
                    }
                }
                "link" | "route" => match value {
                    Expr::Ident(ident) if &*ident.sym == DASHBOARD_LINK_IDENT => node.home = true,
                    Expr::Ident(ident) => node.link = Some(ident.sym.to_string()),
                    // all_routes.adminDashboard → "adminDashboard"
                    Expr::Member(MemberExpr {
                        prop: MemberProp::Ident(prop_ident),
                        ..
                    }) => node.link = Some(prop_ident.sym.to_string()),
                    other => node.link = string_value(other),
                },
                "icon" => node.icon = string_value(value),
                "submenu" | "isSubmenuContainer" => {
                    if let Expr::Lit(Lit::Bool(Bool { value: b, .. })) = value {
                        node.is_submenu_container = *b;
                    }
                }
                "home" => {
                    if let Expr::Lit(Lit::Bool(Bool { value: b, .. })) = value {
                        node.home = *b;
                    }
                }
                "roles" | "allowedRoles" => match role_values(value) {
                    Some(roles) => node.allowed_roles = Some(roles),
                    None => unreadable_roles = true,
                },
                "submenuItems" | "children" => {
                    if let Expr::Array(arr_lit) = value {
                        node.children = Some(self.parse_items(arr_lit)?);
                    }
                }
                _ => {}
            }
        }

        if unreadable_roles {
            return Err(NavError::InvalidConfig(format!(
                "roles of `{}` in {} must be string literals",
                node.label, self.file
            )));
        }
        if node.label.is_empty() {
            tracing::warn!(file = %self.file, "sidebar entry without a label");
        }
        tracing::debug!(label = %node.label, link = ?node.link, "sidebar entry parsed");
        Ok(node)
    }
}

impl Visit for SidebarVisitor {
    /// `const SidebarData = [...]` を探す (export の有無は問わない)
    fn visit_var_decl(&mut self, var_decl: &VarDecl) {
        for declarator in &var_decl.decls {
            let Pat::Ident(BindingIdent { id, .. }) = &declarator.name else {
                continue;
            };
            if *id.sym != *self.export_name || self.nodes.is_some() || self.error.is_some() {
                continue;
            }
            if let Some(init_expr) = &declarator.init {
                if let Expr::Array(arr_lit) = unwrap_expr(init_expr) {
                    tracing::debug!(name = %self.export_name, len = arr_lit.elems.len(), "sidebar array found");
                    match self.parse_items(arr_lit) {
                        Ok(items) => self.nodes = Some(items),
                        Err(e) => self.error = Some(e),
                    }
                }
            }
        }

        var_decl.visit_children_with(self);
    }
}

/// `(...)`, `as T`, `as const` を剥がす
fn unwrap_expr(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(ParenExpr { expr, .. })
        | Expr::TsAs(TsAsExpr { expr, .. })
        | Expr::TsConstAssertion(TsConstAssertion { expr, .. }) => unwrap_expr(expr),
        other => other,
    }
}

fn prop_key(key: &PropName) -> Option<String> {
    match key {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Str(Str { value, .. }) => Some(value.to_string()),
        _ => None,
    }
}

/// 文字列リテラルと、式を含まないテンプレートリテラル
fn string_value(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Lit(Lit::Str(Str { value, .. })) => Some(value.to_string()),
        Expr::Tpl(Tpl { exprs, quasis, .. }) if exprs.is_empty() && quasis.len() == 1 => {
            Some(quasis[0].raw.to_string())
        }
        _ => None,
    }
}

/// `roles: ["admin", "teacher"]` もしくは `roles: "admin"`。
/// 文字列リテラル以外 (識別子・`ROLES.ADMIN`・スプレッド) が混じれば None
fn role_values(expr: &Expr) -> Option<RoleSet> {
    match expr {
        Expr::Array(arr_lit) => {
            let mut roles = Vec::new();
            for elem in arr_lit.elems.iter().flatten() {
                if elem.spread.is_some() {
                    return None;
                }
                roles.push(string_value(unwrap_expr(&elem.expr))?);
            }
            Some(RoleSet::new(roles))
        }
        other => string_value(other).map(|r| RoleSet::new([r])),
    }
}

/// ソース文字列から `export_name` の配列定義を読み取る
pub fn parse_sidebar_source(
    src: String,
    file_name: &str,
    export_name: &str,
    jsx: bool,
) -> NavResult<Vec<NavigationNode>> {
    let cm: Lrc<SourceMap> = Default::default();
    let fm = cm.new_source_file(FileName::Custom(file_name.to_string()), src);

    // TypeScript 構文でパースする (JS もそのまま通る)
    let syntax = Syntax::Typescript(TsConfig {
        tsx: jsx,
        decorators: true,
        dts: false,
        no_early_errors: true,
        disallow_ambiguous_jsx_like: false,
    });

    let lexer = Lexer::new(
        syntax,
        Default::default(), // es version
        StringInput::from(&*fm),
        None,
    );

    let mut parser = SwcParser::new_from(lexer);

    let module = parser.parse_module().map_err(|e| NavError::Parse {
        file: file_name.to_string(),
        message: format!("{:?}", e),
    })?;

    let mut visitor = SidebarVisitor::new(file_name, export_name);
    visitor.visit_module(&module);

    if let Some(err) = visitor.error {
        return Err(err);
    }
    if visitor.skipped > 0 {
        tracing::info!(file = file_name, skipped = visitor.skipped, "some sidebar entries were skipped");
    }

    visitor.nodes.ok_or_else(|| NavError::MissingExport {
        name: export_name.to_string(),
        file: file_name.to_string(),
    })
}

/// ファイルから読み取る。`.tsx` / `.jsx` / `.js` は JSX を有効にする
pub fn parse_sidebar_file(file_path: &Path, export_name: &str) -> NavResult<Vec<NavigationNode>> {
    tracing::debug!(path = ?file_path, "parsing sidebar source");

    let src = fs::read_to_string(file_path).map_err(|source| NavError::Io {
        path: file_path.to_path_buf(),
        source,
    })?;
    let jsx = file_path
        .extension()
        .is_some_and(|ext| ext == "tsx" || ext == "jsx" || ext == "js");

    parse_sidebar_source(src, &file_path.display().to_string(), export_name, jsx)
}
