/// 几何体加载和处理模块
///
/// 读取 OBJ 文件，生成去重后的索引网格和逐顶点切线空间。
///
/// # 模块结构
///
/// - `vertex`: 切线空间结构和顶点流布局
/// - `mesh`: CPU 侧网格数据
/// - `math_utils`: 切线空间生成
/// - `loaders`: 模型加载器
///
/// # 数据流
///
/// ```text
/// OBJ 文件
///     ↓
/// ObjLoader（逐行扫描 → 记录收集 → 顶点去重）
///     ↓
/// compute_tangent_space
///     ↓
/// MeshData（三条顶点流 + 索引）
/// ```
///
/// # 使用示例
///
/// ```rust,no_run
/// use objtangent::geometry::loaders::{MeshLoader, ObjLoader};
/// use std::path::Path;
///
/// let mesh_data = ObjLoader::load_from_file(Path::new("model.obj"))?;
///
/// println!("顶点数: {}", mesh_data.vertex_count());
/// println!("三角形数: {}", mesh_data.triangle_count());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```

pub mod vertex;
pub mod mesh;
pub mod math_utils;
pub mod loaders;

// 重新导出常用类型
pub use vertex::TangentSpace;
pub use mesh::MeshData;
