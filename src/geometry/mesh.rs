/// 网格数据结构模块
///
/// 定义加载完成后交给 GPU 上传方的 CPU 侧网格：三条等长的顶点流加一个三角形索引列表。

use super::math_utils;
use super::vertex::{TangentSpace, VertexAttribute, VERTEX_ATTRIBUTES};

/// CPU侧网格数据
///
/// `positions`、`tangent_spaces`、`texcoords` 按下标一一对应，
/// `indices` 每3个定义一个三角形，所有值都小于顶点数。
///
/// # 示例
///
/// ```rust
/// use objtangent::geometry::mesh::MeshData;
/// use objtangent::geometry::vertex::TangentSpace;
///
/// let mesh = MeshData {
///     positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
///     tangent_spaces: vec![TangentSpace::with_normal([0.0, 0.0, 1.0]); 3],
///     texcoords: vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
///     indices: vec![0, 1, 2],
///     name: Some("Triangle".to_string()),
/// };
/// assert!(mesh.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// 顶点位置
    pub positions: Vec<[f32; 3]>,

    /// 顶点切线空间（法线、切线、副切线）
    pub tangent_spaces: Vec<TangentSpace>,

    /// 顶点纹理坐标
    pub texcoords: Vec<[f32; 2]>,

    /// 三角形顶点索引
    pub indices: Vec<u32>,

    /// 网格名称（取自文件名）
    pub name: Option<String>,
}

impl MeshData {
    /// 创建一个空的网格数据
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建一个指定名称的空网格数据
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// 创建一个带容量预分配的网格数据
    pub fn with_capacity(vertex_capacity: usize, index_capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_capacity),
            tangent_spaces: Vec::with_capacity(vertex_capacity),
            texcoords: Vec::with_capacity(vertex_capacity),
            indices: Vec::with_capacity(index_capacity),
            name: None,
        }
    }

    /// 获取顶点数量
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// 获取索引数量
    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// 获取三角形数量
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() && self.indices.is_empty()
    }

    /// 追加一个顶点，返回它的索引
    pub fn push_vertex(&mut self, position: [f32; 3], normal: [f32; 3], texcoord: [f32; 2]) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        self.tangent_spaces.push(TangentSpace::with_normal(normal));
        self.texcoords.push(texcoord);
        index
    }

    /// 根据位置、纹理坐标和法线重新生成切线与副切线
    ///
    /// 先将已有的切线和副切线清零，法线保持不变。
    pub fn compute_tangent_space(&mut self) {
        for space in self.tangent_spaces.iter_mut() {
            space.tangent = [0.0; 3];
            space.bitangent = [0.0; 3];
        }
        math_utils::compute_tangent_space(
            &self.positions,
            &self.texcoords,
            &mut self.tangent_spaces,
            &self.indices,
        );
    }

    /// 验证网格数据的有效性
    ///
    /// 检查：
    /// - 三条顶点流长度一致
    /// - 索引数量是3的倍数
    /// - 所有索引都在有效范围内
    pub fn validate(&self) -> Result<(), String> {
        let vertex_count = self.positions.len();
        if self.tangent_spaces.len() != vertex_count || self.texcoords.len() != vertex_count {
            return Err(format!(
                "顶点流长度不一致: positions={}, tangent_spaces={}, texcoords={}",
                vertex_count,
                self.tangent_spaces.len(),
                self.texcoords.len()
            ));
        }

        if self.indices.len() % 3 != 0 {
            return Err(format!(
                "索引数量必须是3的倍数，当前为: {}",
                self.indices.len()
            ));
        }

        if let Some((i, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|(_, index)| **index as usize >= vertex_count)
        {
            return Err(format!(
                "索引 {} 处的值 {} 超出顶点范围 (顶点数 {})",
                i, index, vertex_count
            ));
        }

        Ok(())
    }

    /// 清空所有数据
    pub fn clear(&mut self) {
        self.positions.clear();
        self.tangent_spaces.clear();
        self.texcoords.clear();
        self.indices.clear();
        self.name = None;
    }

    /// 顶点属性布局，描述下面四个字节视图如何绑定
    pub fn vertex_layout() -> &'static [VertexAttribute] {
        &VERTEX_ATTRIBUTES
    }

    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn tangent_space_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.tangent_spaces)
    }

    pub fn texcoord_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.texcoords)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
