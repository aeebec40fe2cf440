//! 数学库模块
//!
//! 基于 `nalgebra` 的向量类型别名和几个几何处理常用的工具函数。
//! 顶点数据以原始数组（`[f32; 3]`）存储以便直接上传到 GPU，
//! 计算时通过 `Vector3::from` 转换为 nalgebra 类型。

pub use nalgebra::{Vector2 as Vec2, Vector3 as Vec3};

// 类型别名，使用更简洁的名称
pub type Vector2 = Vec2<f32>;
pub type Vector3 = Vec3<f32>;

/// 数学常量
pub mod constants {
    /// π
    pub const PI: f32 = std::f32::consts::PI;

    /// π/2
    pub const HALF_PI: f32 = std::f32::consts::FRAC_PI_2;

    /// 浮点数比较的 epsilon
    pub const EPSILON: f32 = 1e-6;
}

/// 数学工具函数
pub mod utils {
    /// 限制值在范围内
    pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
        if value < min {
            min
        } else if value > max {
            max
        } else {
            value
        }
    }

    /// 检查两个浮点数是否近似相等
    pub fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
        (a - b).abs() < epsilon
    }
}

/// 向量扩展 trait
pub trait Vector3Ext {
    /// 所有分量都是有限值（非 NaN、非无穷）
    fn all_finite(&self) -> bool;

    /// Gram-Schmidt 正交化：去掉沿 `normal` 的分量后归一化
    ///
    /// `normal` 需为单位向量。结果为零向量时返回 NaN 分量，不做掩盖。
    fn orthonormalized(&self, normal: &Vector3) -> Vector3;
}

impl Vector3Ext for Vector3 {
    fn all_finite(&self) -> bool {
        self.iter().all(|c| c.is_finite())
    }

    fn orthonormalized(&self, normal: &Vector3) -> Vector3 {
        (self - normal * normal.dot(self)).normalize()
    }
}
