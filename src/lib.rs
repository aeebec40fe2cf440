//! ObjTangent - OBJ 网格加载与切线空间生成
//!
//! 读取 Wavefront OBJ 文件（三角形面），输出适合直接上传到 GPU 的索引网格：
//! 位置、切线空间（法线/切线/副切线）、纹理坐标三条顶点流，以及三角形索引。
//!
//! # 模块结构
//!
//! - `core`: 核心功能模块（数学、日志、配置、错误处理）
//! - `geometry`: 几何体模块（顶点布局、网格、切线空间、OBJ 加载器）
//!
//! # 使用示例
//!
//! ```no_run
//! use objtangent::geometry::loaders::ObjLoader;
//!
//! let mut loader = ObjLoader::new();
//! loader.load("assets/models/cube.obj", true)?;
//!
//! for space in loader.tangent_spaces() {
//!     println!("n={:?} t={:?} b={:?}", space.normal, space.tangent, space.bitangent);
//! }
//! # Ok::<(), objtangent::core::ObjTangentError>(())
//! ```

pub mod core;
pub mod geometry;
