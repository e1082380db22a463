// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

/// ナビゲーション定義の読み込み・解析で発生するエラー
///
/// フィルタ処理そのもの (`filter_tree`) は失敗しないため、ここに並ぶのは
/// 設定ファイルの入出力と構文に関するものだけ。
#[derive(Debug, Error)]
pub enum NavError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("parse error in {file}: {message}")]
    Parse { file: String, message: String },

    #[error("`{name}` is not declared as an array literal in {file}")]
    MissingExport { name: String, file: String },

    #[error("no sidebar definition found under {0}")]
    NoSourceFound(PathBuf),

    #[error("unsupported source file: {0}")]
    UnsupportedSource(PathBuf),

    #[error("invalid navigation config: {0}")]
    InvalidConfig(String),
}

pub type NavResult<T> = Result<T, NavError>;
