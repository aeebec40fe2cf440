//! 核心功能模块
//!
//! 与网格格式无关的基础设施：数学类型、日志、配置和错误处理。
//!
//! # 模块组织
//!
//! - `math`：基于 nalgebra 的向量类型和工具函数
//! - `log`：日志系统，提供结构化的日志记录功能
//! - `config`：配置管理，支持从 TOML 文件加载
//! - `error`：错误处理，定义统一的错误类型

pub mod math;
pub mod log;
pub mod config;
pub mod error;

// 重新导出常用类型，方便使用
pub use math::{Vector2, Vector3};
pub use error::{Result, ObjTangentError};
pub use config::Config;
