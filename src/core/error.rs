//! 错误处理模块
//!
//! 定义了加载器中使用的统一错误类型。
//!
//! 注意：解析阶段本身从不产生错误（非法数字按 0 处理，缺失的面索引按默认值处理），
//! 只有 IO 失败、配置问题和越界的面索引会作为错误返回。

use std::fmt;
use std::path::PathBuf;

/// 统一的 Result 类型
pub type Result<T> = std::result::Result<T, ObjTangentError>;

/// ObjTangent 的错误类型
#[derive(Debug)]
pub enum ObjTangentError {
    /// 配置错误
    Config(ConfigError),

    /// 网格加载错误
    MeshLoading(MeshLoadError),

    /// IO 错误
    Io(std::io::Error),

    /// 日志系统错误
    Log(String),
}

/// 配置相关的错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),

    /// 配置文件解析失败
    ParseError(String),

    /// 配置值无效
    InvalidValue { field: String, reason: String },
}

/// 网格加载相关的错误
#[derive(Debug)]
pub enum MeshLoadError {
    /// 文件不存在
    FileNotFound(PathBuf),

    /// 不支持的文件格式
    UnsupportedFormat(String),

    /// 几何数据无效（例如面索引超出顶点数组范围）
    InvalidGeometry(String),
}

impl fmt::Display for ObjTangentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjTangentError::Config(e) => write!(f, "Configuration error: {}", e),
            ObjTangentError::MeshLoading(e) => write!(f, "Mesh loading error: {}", e),
            ObjTangentError::Io(e) => write!(f, "IO error: {}", e),
            ObjTangentError::Log(msg) => write!(f, "Log error: {}", msg),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for MeshLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshLoadError::FileNotFound(path) => write!(f, "Mesh file not found: {}", path.display()),
            MeshLoadError::UnsupportedFormat(msg) => write!(f, "Unsupported mesh format: {}", msg),
            MeshLoadError::InvalidGeometry(msg) => write!(f, "Invalid geometry data: {}", msg),
        }
    }
}

impl std::error::Error for ObjTangentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ObjTangentError::Io(e) => Some(e),
            ObjTangentError::Config(e) => Some(e),
            ObjTangentError::MeshLoading(e) => Some(e),
            ObjTangentError::Log(_) => None,
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for MeshLoadError {}

// 实现 From trait 以便于错误转换
impl From<std::io::Error> for ObjTangentError {
    fn from(err: std::io::Error) -> Self {
        ObjTangentError::Io(err)
    }
}

impl From<ConfigError> for ObjTangentError {
    fn from(err: ConfigError) -> Self {
        ObjTangentError::Config(err)
    }
}

impl From<MeshLoadError> for ObjTangentError {
    fn from(err: MeshLoadError) -> Self {
        ObjTangentError::MeshLoading(err)
    }
}
