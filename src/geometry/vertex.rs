/// 顶点属性定义模块
///
/// 输出网格以三条独立的顶点流交给 GPU 上传方：
///
/// - 流 0：位置 `[f32; 3]`
/// - 流 1：切线空间 `TangentSpace`（法线、切线、副切线交错存放）
/// - 流 2：纹理坐标 `[f32; 2]`

use bytemuck::{Pod, Zeroable};
use crate::core::math::Vector3;

/// 单个顶点的切线空间
///
/// 内存布局与GPU兼容，使用 `#[repr(C)]` 保证顺序和对齐。
///
/// # 内存布局
///
/// - normal: 偏移 0，12 bytes
/// - tangent: 偏移 12，12 bytes
/// - bitangent: 偏移 24，12 bytes
/// - **总计**: 36 bytes
#[repr(C)]
#[derive(Default, Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct TangentSpace {
    /// 法线，来自 OBJ 的 `vn` 记录（或默认的 (0, 1, 0)）
    pub normal: [f32; 3],

    /// 切线，指向 U 增加的方向
    pub tangent: [f32; 3],

    /// 副切线，指向 V 增加的方向
    pub bitangent: [f32; 3],
}

impl TangentSpace {
    /// 只设置法线，切线和副切线置零，等待切线空间生成填充
    #[inline]
    pub fn with_normal(normal: [f32; 3]) -> Self {
        Self {
            normal,
            tangent: [0.0; 3],
            bitangent: [0.0; 3],
        }
    }

    #[inline]
    pub fn normal(&self) -> Vector3 {
        Vector3::from(self.normal)
    }

    #[inline]
    pub fn tangent(&self) -> Vector3 {
        Vector3::from(self.tangent)
    }

    #[inline]
    pub fn bitangent(&self) -> Vector3 {
        Vector3::from(self.bitangent)
    }
}

/// 顶点属性的数据格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeFormat {
    /// 两个 f32
    Float32x2,
    /// 三个 f32
    Float32x3,
}

impl AttributeFormat {
    /// 字节大小
    pub const fn size(&self) -> u32 {
        match self {
            AttributeFormat::Float32x2 => 8,
            AttributeFormat::Float32x3 => 12,
        }
    }
}

/// 一个着色器输入属性在顶点流中的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// 着色器中的 location
    pub location: u32,
    /// 所属顶点流
    pub stream: u32,
    /// 数据格式
    pub format: AttributeFormat,
    /// 在该流单个元素内的字节偏移
    pub offset: u32,
}

pub const POSITION_STREAM: u32 = 0;
pub const TANGENT_SPACE_STREAM: u32 = 1;
pub const TEXCOORD_STREAM: u32 = 2;

/// 输出网格的全部顶点属性（位置、法线、切线、副切线、纹理坐标）
pub const VERTEX_ATTRIBUTES: [VertexAttribute; 5] = [
    VertexAttribute { location: 0, stream: POSITION_STREAM, format: AttributeFormat::Float32x3, offset: 0 },
    VertexAttribute { location: 1, stream: TANGENT_SPACE_STREAM, format: AttributeFormat::Float32x3, offset: 0 },
    VertexAttribute { location: 2, stream: TANGENT_SPACE_STREAM, format: AttributeFormat::Float32x3, offset: 12 },
    VertexAttribute { location: 3, stream: TANGENT_SPACE_STREAM, format: AttributeFormat::Float32x3, offset: 24 },
    VertexAttribute { location: 4, stream: TEXCOORD_STREAM, format: AttributeFormat::Float32x2, offset: 0 },
];

/// 各顶点流的步长（字节）
pub fn stream_stride(stream: u32) -> Option<u32> {
    match stream {
        POSITION_STREAM => Some(std::mem::size_of::<[f32; 3]>() as u32),
        TANGENT_SPACE_STREAM => Some(std::mem::size_of::<TangentSpace>() as u32),
        TEXCOORD_STREAM => Some(std::mem::size_of::<[f32; 2]>() as u32),
        _ => None,
    }
}
