//! 数据模型模块
//! 凭证、兴趣方向、学生、科目、分班测试、测验与学习资料

pub mod credential;
pub mod interest;
pub mod material;
pub mod patch;
pub mod placement;
pub mod question;
pub mod quiz;
pub mod student;
pub mod subject;

use once_cell::sync::Lazy;
use regex::Regex;
use sqlx::types::Json;

/// 读取时联表附带的关联记录（`to_jsonb` 列），写入返回的记录中不存在
pub type Related<T> = Option<Json<T>>;

/// 仅数字
pub(crate) static DIGITS_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+$").expect("valid digits regex"));

/// 字母、空格及 `.,!?`
pub(crate) static PLAIN_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z .,!?]+$").expect("valid plain text regex"));

/// http:// 或 https:// 开头的链接
pub(crate) static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://\S+$").expect("valid link regex"));
