//! ObjTangent 命令行工具
//!
//! 加载一个或多个 OBJ 文件，输出去重后的网格统计信息。
//!
//! # 使用方法
//!
//! ```bash
//! # 使用配置文件
//! cargo run -- assets/models/cube.obj
//!
//! # 跳过切线空间生成，并输出调试日志
//! cargo run -- --no-tangents --log-level debug assets/models/quad.obj
//! ```

use anyhow::{bail, Context};
use objtangent::core::{log, Config};
use objtangent::geometry::loaders::ObjLoader;
use tracing::{error, info};

/// 带值的命令行选项，其后一个参数不是模型路径
const VALUE_FLAGS: [&str; 2] = ["--log-level", "--log-file"];

/// 从命令行参数中挑出模型路径（跳过选项及其值）
fn model_paths(args: &[String]) -> Vec<&str> {
    let mut paths = Vec::new();
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            iter.next();
        } else if !arg.starts_with("--") {
            paths.push(arg.as_str());
        }
    }
    paths
}

/// 应用程序入口点
///
/// # 初始化流程
///
/// 1. 加载配置文件（config.toml）
/// 2. 应用命令行参数覆盖
/// 3. 初始化日志系统
/// 4. 依次加载每个模型并输出统计信息
fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    // 1. 加载配置（在初始化日志之前）
    let mut config = Config::from_file_or_default("config.toml");

    // 2. 应用命令行参数
    config.apply_args(&args);

    // 3. 验证配置
    config.validate().context("Invalid configuration")?;

    // 4. 初始化日志系统
    let log_file = if config.logging.file_output {
        Some(config.logging.log_file.as_str())
    } else {
        None
    };
    log::init_logger(config.logging.level, config.logging.file_output, log_file)
        .context("Failed to initialize logger")?;
    info!(version = env!("CARGO_PKG_VERSION"), "ObjTangent starting...");

    let paths = model_paths(&args);
    if paths.is_empty() {
        bail!("Usage: objtangent [--no-tangents] [--log-level <level>] [--log-file <path>] <model.obj>...");
    }

    let mut loader = ObjLoader::new();
    let mut failures = 0usize;

    for path in paths {
        match loader.load(path, config.loader.compute_tangent_space) {
            Ok(()) => {
                let mesh = loader.mesh();
                println!(
                    "{}: {} vertices, {} triangles, {} indices",
                    path,
                    mesh.vertex_count(),
                    mesh.triangle_count(),
                    mesh.index_count()
                );
            }
            Err(e) => {
                error!(path, error = %e, "Failed to load model");
                eprintln!("{}: {}", path, e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{} model(s) failed to load", failures);
    }

    info!("Done");
    Ok(())
}
