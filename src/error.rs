//! 统一错误处理模块
//!
//! 提供Localize CLI项目的统一错误类型定义和处理机制

// 标准库导入
use std::fmt;

// 第三方crate导入
use anyhow::Error as AnyhowError;

/// Localize CLI 统一错误类型
///
/// 定义了资源本地化过程中可能出现的错误类型，提供统一的错误处理接口
#[derive(Debug)]
pub enum LocalizeError {
    /// 网络请求相关错误
    Network {
        /// 错误消息
        message: String,
        /// HTTP状态码（如果适用）
        status_code: Option<u16>,
    },

    /// HTML解析相关错误
    HtmlParse {
        /// 具体错误信息
        details: String,
    },

    /// 文件操作相关错误
    FileOperation {
        /// 文件路径
        path: String,
        /// 操作类型（读取、写入、创建等）
        operation: String,
        /// 底层错误信息
        source: String,
    },

    /// 输入验证错误
    InputValidation {
        /// 输入值
        input: String,
        /// 验证失败原因
        reason: String,
    },

    /// 内部处理错误（包装anyhow::Error）
    Internal {
        /// 包装的错误
        source: AnyhowError,
    },
}

impl fmt::Display for LocalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalizeError::Network { message, status_code } => {
                if let Some(code) = status_code {
                    write!(f, "网络请求失败 [{}]: {}", code, message)
                } else {
                    write!(f, "网络请求失败: {}", message)
                }
            }
            LocalizeError::HtmlParse { details } => {
                write!(f, "HTML解析失败: {}", details)
            }
            LocalizeError::FileOperation { path, operation, source } => {
                write!(f, "文件{}操作失败 [{}]: {}", operation, path, source)
            }
            LocalizeError::InputValidation { input, reason } => {
                write!(f, "输入验证失败 [{}]: {}", input, reason)
            }
            LocalizeError::Internal { source } => {
                write!(f, "内部处理错误: {}", source)
            }
        }
    }
}

impl std::error::Error for LocalizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LocalizeError::Internal { source } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Localize CLI 结果类型别名
pub type Result<T> = std::result::Result<T, LocalizeError>;

/// 便捷的错误创建宏
#[macro_export]
macro_rules! localize_error {
    (network, $msg:expr) => {
        $crate::error::LocalizeError::Network {
            message: $msg.to_string(),
            status_code: None,
        }
    };
    (network, $msg:expr, $code:expr) => {
        $crate::error::LocalizeError::Network {
            message: $msg.to_string(),
            status_code: Some($code),
        }
    };
    (html_parse, $details:expr) => {
        $crate::error::LocalizeError::HtmlParse {
            details: $details.to_string(),
        }
    };
    (file_op, $path:expr, $op:expr, $source:expr) => {
        $crate::error::LocalizeError::FileOperation {
            path: $path.to_string(),
            operation: $op.to_string(),
            source: $source.to_string(),
        }
    };
    (input_validation, $input:expr, $reason:expr) => {
        $crate::error::LocalizeError::InputValidation {
            input: $input.to_string(),
            reason: $reason.to_string(),
        }
    };
}

/// 从anyhow::Error转换为LocalizeError
impl From<AnyhowError> for LocalizeError {
    fn from(error: AnyhowError) -> Self {
        LocalizeError::Internal { source: error }
    }
}

/// 从reqwest::Error转换为LocalizeError
impl From<reqwest::Error> for LocalizeError {
    fn from(error: reqwest::Error) -> Self {
        let status_code = error.status().map(|s| s.as_u16());
        LocalizeError::Network {
            message: error.to_string(),
            status_code,
        }
    }
}

/// 从std::io::Error转换为LocalizeError
impl From<std::io::Error> for LocalizeError {
    fn from(error: std::io::Error) -> Self {
        LocalizeError::FileOperation {
            path: "unknown".to_string(),
            operation: "io".to_string(),
            source: error.to_string(),
        }
    }
}
