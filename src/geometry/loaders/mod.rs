/// 模型加载器模块
///
/// 提供统一的模型加载接口和具体格式的实现。
///
/// # 支持的格式
///
/// - **OBJ**: Wavefront OBJ 格式（仅三角形面）
///
/// # 使用示例
///
/// ```rust,no_run
/// use objtangent::geometry::loaders::{MeshLoader, ObjLoader};
/// use std::path::Path;
///
/// let mesh = ObjLoader::load_from_file(Path::new("model.obj"))?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
use crate::core::error::{MeshLoadError, Result};
use crate::geometry::mesh::MeshData;
use std::path::Path;

pub mod obj_loader;
pub mod scanner;

// 重新导出加载器
pub use obj_loader::ObjLoader;
pub use scanner::{FaceIndices, LineCursor};

/// 网格加载器 trait
///
/// 定义统一的加载接口，每种格式的加载器都实现此 trait。
///
/// # 实现要求
///
/// - 使用关联函数，不持有状态
/// - 返回 CPU 侧的 `MeshData`，切线空间已经生成
pub trait MeshLoader {
    /// 从文件路径加载网格
    ///
    /// # 错误
    ///
    /// - 文件不存在或无法读取
    /// - 面索引超出已声明的顶点数据范围
    fn load_from_file(path: &Path) -> Result<MeshData>;

    /// 从内存数据加载网格
    fn load_from_memory(data: &[u8]) -> Result<MeshData>;

    /// 支持的文件扩展名列表（小写，不含点号）
    fn supported_extensions() -> &'static [&'static str];
}

/// 根据文件扩展名选择合适的加载器
///
/// ```rust,no_run
/// use objtangent::geometry::loaders::load_mesh;
/// use std::path::Path;
///
/// let mesh = load_mesh(Path::new("model.obj"))?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn load_mesh(path: &Path) -> Result<MeshData> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| MeshLoadError::UnsupportedFormat("无法确定文件扩展名".to_string()))?;

    if ObjLoader::supported_extensions().contains(&extension.as_str()) {
        ObjLoader::load_from_file(path)
    } else {
        Err(MeshLoadError::UnsupportedFormat(format!("不支持的文件格式: .{}", extension)).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ObjTangentError;

    #[test]
    fn test_supported_extensions() {
        let obj_exts = ObjLoader::supported_extensions();
        assert!(obj_exts.contains(&"obj"));
    }

    #[test]
    fn test_load_mesh_unsupported_format() {
        let result = load_mesh(Path::new("model.fbx"));
        assert!(matches!(
            result,
            Err(ObjTangentError::MeshLoading(MeshLoadError::UnsupportedFormat(_)))
        ));
    }

    #[test]
    fn test_load_mesh_without_extension() {
        let result = load_mesh(Path::new("model"));
        assert!(matches!(
            result,
            Err(ObjTangentError::MeshLoading(MeshLoadError::UnsupportedFormat(_)))
        ));
    }

    #[test]
    fn test_load_mesh_dispatches_by_extension() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/models/bare_triangle.obj");
        let mesh = load_mesh(&path).unwrap();

        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.name.as_deref(), Some("bare_triangle"));
    }

    #[test]
    fn test_load_mesh_uppercase_extension_missing_file() {
        let result = load_mesh(Path::new("does/not/exist.OBJ"));
        assert!(matches!(
            result,
            Err(ObjTangentError::MeshLoading(MeshLoadError::FileNotFound(_)))
        ));
    }
}
