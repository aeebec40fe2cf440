//! 切线空间生成
//!
//! 对每个三角形由边向量和 UV 差计算切线与副切线，按顶点处的内角加权累加到三个顶点，
//! 全部三角形处理完之后再对每个顶点做一次 Gram-Schmidt 正交化。
//!
//! 归一化只在最后一步进行：每个三角形贡献的是未归一化的向量，
//! 因此 UV 密度不同的三角形对共享顶点的影响也不同。

use crate::core::math::{utils, Vector2, Vector3, Vector3Ext};
use crate::geometry::vertex::TangentSpace;

/// 长度低于该值的切线/副切线视为退化
const DEGENERATE_LENGTH: f32 = 1e-3;

/// 计算顶点的切线和副切线
///
/// # 参数
///
/// - `positions`、`texcoords`: 顶点位置和纹理坐标
/// - `tangent_spaces`: 法线已设置；切线和副切线在此基础上累加，调用前应为零
/// - `indices`: 索引数组（每3个索引定义一个三角形）
///
/// # 退化情况
///
/// - UV 行列式为 0 时按 1 处理，避免除零
/// - 切线和副切线都接近零时使用由面法线构造的占位基
/// - 面积为零的三角形在 debug 构建中触发断言；release 构建中非有限值会照常传播
///
/// # Panics
///
/// 索引超出顶点数组范围时 panic。
pub fn compute_tangent_space(
    positions: &[[f32; 3]],
    texcoords: &[[f32; 2]],
    tangent_spaces: &mut [TangentSpace],
    indices: &[u32],
) {
    for triangle in indices.chunks_exact(3) {
        let corners = [triangle[0] as usize, triangle[1] as usize, triangle[2] as usize];

        let p0 = Vector3::from(positions[corners[0]]);
        let p1 = Vector3::from(positions[corners[1]]);
        let p2 = Vector3::from(positions[corners[2]]);

        let e0 = p1 - p0;
        let e1 = p2 - p0;
        let e2 = p2 - p1;

        let normal = e0.cross(&e1).normalize();
        debug_assert!(
            normal.all_finite(),
            "NaN in face normal of degenerate triangle {:?}",
            triangle
        );

        let uv0 = Vector2::from(texcoords[corners[0]]);
        let duv0 = Vector2::from(texcoords[corners[1]]) - uv0;
        let duv1 = Vector2::from(texcoords[corners[2]]) - uv0;

        let (tangent, bitangent) = triangle_basis(&e0, &e1, &normal, &duv0, &duv1);
        let weights = corner_angles(&e0, &e1, &e2);

        for (&corner, weight) in corners.iter().zip(weights) {
            let space = &mut tangent_spaces[corner];
            space.tangent = (space.tangent() + tangent * weight).into();
            space.bitangent = (space.bitangent() + bitangent * weight).into();
        }
    }

    // Gram-Schmidt 正交化，法线保持不变
    for space in tangent_spaces.iter_mut() {
        let normal = space.normal();
        space.tangent = space.tangent().orthonormalized(&normal).into();
        space.bitangent = space.bitangent().orthonormalized(&normal).into();
    }
}

/// 单个三角形的（未归一化）切线和副切线
///
/// `e0`、`e1` 为从第一个角出发的两条边，`duv0`、`duv1` 为对应的 UV 差，
/// `normal` 为面法线，只在退化时用于构造替代向量。
pub fn triangle_basis(
    e0: &Vector3,
    e1: &Vector3,
    normal: &Vector3,
    duv0: &Vector2,
    duv1: &Vector2,
) -> (Vector3, Vector3) {
    let mut det = duv0.x * duv1.y - duv0.y * duv1.x;
    if det == 0.0 {
        det = 1.0;
    }

    let mut tangent = (e0 * duv1.y - e1 * duv0.y) / det;
    let mut bitangent = (e1 * duv0.x - e0 * duv1.x) / det;

    let tangent_degenerate = !tangent.all_finite() || tangent.norm() < DEGENERATE_LENGTH;
    let bitangent_degenerate = !bitangent.all_finite() || bitangent.norm() < DEGENERATE_LENGTH;

    if tangent.norm() < DEGENERATE_LENGTH && bitangent.norm() < DEGENERATE_LENGTH {
        // 没有可用的 UV，占位基（不保证与法线正交）
        tangent = Vector3::new(1.0, normal.x, 0.0);
        bitangent = Vector3::new(0.0, normal.z, 1.0);
    } else if tangent_degenerate {
        tangent = bitangent.cross(normal) * det;
    } else if bitangent_degenerate {
        bitangent = normal.cross(&tangent) * det;
    }

    (tangent, bitangent)
}

/// 三角形三个角的内角（弧度）
///
/// 角 0 由 `e0`、`e1` 夹成，角 1 由 `-e0`、`e2` 夹成，角 2 由 `-e1`、`-e2` 夹成。
pub fn corner_angles(e0: &Vector3, e1: &Vector3, e2: &Vector3) -> [f32; 3] {
    [
        angle_between(e0, e1),
        angle_between(&-e0, e2),
        angle_between(&-e1, &-e2),
    ]
}

#[inline]
fn angle_between(a: &Vector3, b: &Vector3) -> f32 {
    utils::clamp(a.dot(b) / (a.norm() * b.norm()), -1.0, 1.0).acos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::constants::{HALF_PI, PI};

    const TOLERANCE: f32 = 1e-4;

    fn assert_vec_eq(actual: [f32; 3], expected: [f32; 3]) {
        for k in 0..3 {
            assert!(
                (actual[k] - expected[k]).abs() < TOLERANCE,
                "expected {:?}, got {:?}",
                expected,
                actual
            );
        }
    }

    fn assert_orthonormal(space: &TangentSpace) {
        let n = space.normal();
        let t = space.tangent();
        let b = space.bitangent();

        assert!((t.norm() - 1.0).abs() < TOLERANCE, "tangent length {}", t.norm());
        assert!((b.norm() - 1.0).abs() < TOLERANCE, "bitangent length {}", b.norm());
        assert!(t.dot(&n).abs() < TOLERANCE, "tangent not orthogonal: {:?}", space);
        assert!(b.dot(&n).abs() < TOLERANCE, "bitangent not orthogonal: {:?}", space);
    }

    #[test]
    fn test_corner_angles_right_triangle() {
        let p0 = Vector3::new(0.0, 0.0, 0.0);
        let p1 = Vector3::new(1.0, 0.0, 0.0);
        let p2 = Vector3::new(0.0, 1.0, 0.0);
        let angles = corner_angles(&(p1 - p0), &(p2 - p0), &(p2 - p1));

        assert!((angles[0] - HALF_PI).abs() < 1e-5);
        assert!((angles[1] - PI / 4.0).abs() < 1e-5);
        assert!((angles[2] - PI / 4.0).abs() < 1e-5);
        assert!((angles.iter().sum::<f32>() - PI).abs() < 1e-5);
    }

    #[test]
    fn test_triangle_basis_axis_aligned_uv() {
        let normal = Vector3::new(0.0, 0.0, 1.0);
        let (t, b) = triangle_basis(
            &Vector3::new(2.0, 0.0, 0.0),
            &Vector3::new(0.0, 2.0, 0.0),
            &normal,
            &Vector2::new(1.0, 0.0),
            &Vector2::new(0.0, 1.0),
        );

        // 未归一化：UV 每单位对应 2 个长度单位
        assert_vec_eq(t.into(), [2.0, 0.0, 0.0]);
        assert_vec_eq(b.into(), [0.0, 2.0, 0.0]);
    }

    #[test]
    fn test_triangle_basis_zero_uv_uses_placeholder() {
        let normal = Vector3::new(0.0, 0.0, 1.0);
        let (t, b) = triangle_basis(
            &Vector3::new(1.0, 0.0, 0.0),
            &Vector3::new(0.0, 1.0, 0.0),
            &normal,
            &Vector2::zeros(),
            &Vector2::zeros(),
        );

        assert_vec_eq(t.into(), [1.0, 0.0, 0.0]);
        assert_vec_eq(b.into(), [0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_triangle_basis_recovers_tangent_from_bitangent() {
        // V 在三角形上恒定：切线为零，副切线可用
        let normal = Vector3::new(0.0, 0.0, 1.0);
        let (t, b) = triangle_basis(
            &Vector3::new(1.0, 0.0, 0.0),
            &Vector3::new(0.0, 1.0, 0.0),
            &normal,
            &Vector2::new(1.0, 0.0),
            &Vector2::new(0.0, 0.0),
        );

        // det == 0 -> 1; b = e1, t = cross(b, n)
        assert_vec_eq(b.into(), [0.0, 1.0, 0.0]);
        assert_vec_eq(t.into(), [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_triangle_basis_recovers_bitangent_from_tangent() {
        // U 在三角形上恒定：副切线为零，切线可用
        let normal = Vector3::new(0.0, 0.0, 1.0);
        let (t, b) = triangle_basis(
            &Vector3::new(1.0, 0.0, 0.0),
            &Vector3::new(0.0, 1.0, 0.0),
            &normal,
            &Vector2::new(0.0, 0.0),
            &Vector2::new(0.0, 1.0),
        );

        // det == 0 -> 1; t = e0, b = cross(n, t)
        assert_vec_eq(t.into(), [1.0, 0.0, 0.0]);
        assert_vec_eq(b.into(), [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_planar_quad() {
        let positions = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]];
        let texcoords = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        let mut spaces = [TangentSpace::with_normal([0.0, 0.0, 1.0]); 4];
        let indices = [0, 1, 2, 0, 2, 3];

        compute_tangent_space(&positions, &texcoords, &mut spaces, &indices);

        for space in &spaces {
            assert_vec_eq(space.tangent, [1.0, 0.0, 0.0]);
            assert_vec_eq(space.bitangent, [0.0, 1.0, 0.0]);
            assert_vec_eq(space.normal, [0.0, 0.0, 1.0]);
            assert_orthonormal(space);
        }
    }

    #[test]
    fn test_shared_uv_stays_finite() {
        let positions = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let texcoords = [[0.5, 0.5]; 3];
        let mut spaces = [TangentSpace::with_normal([0.0, 0.0, 1.0]); 3];

        compute_tangent_space(&positions, &texcoords, &mut spaces, &[0, 1, 2]);

        for space in &spaces {
            assert!(space.tangent().all_finite());
            assert!(space.bitangent().all_finite());
            assert_orthonormal(space);
            assert_vec_eq(space.tangent, [1.0, 0.0, 0.0]);
            assert_vec_eq(space.bitangent, [0.0, 1.0, 0.0]);
        }
    }

    #[test]
    fn test_normalization_happens_after_accumulation() {
        // 顶点 0 被两个三角形共享，两个三角形在顶点 0 处的内角都是 90°。
        // 第一个三角形贡献 t = (1, 0, 0)，第二个贡献未归一化的 t = (1, 1, 0)，
        // 累加后再归一化得到 (2, 1, 0) / sqrt(5)。
        let positions = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [-1.0, 0.0, 0.0]];
        let texcoords = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [-1.0, 1.0]];
        let mut spaces = [TangentSpace::with_normal([0.0, 0.0, 1.0]); 4];
        let indices = [0, 1, 2, 0, 2, 3];

        compute_tangent_space(&positions, &texcoords, &mut spaces, &indices);

        let inv = 1.0 / 5.0f32.sqrt();
        assert_vec_eq(spaces[0].tangent, [2.0 * inv, inv, 0.0]);
        assert_vec_eq(spaces[0].bitangent, [0.0, 1.0, 0.0]);
        for space in &spaces {
            assert_orthonormal(space);
        }
    }

    #[test]
    fn test_normal_is_not_modified() {
        // 顶点法线与面法线不同时，切线空间对顶点法线正交化，法线本身保持不变
        let normal = [0.0, 0.6, 0.8];
        let positions = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let texcoords = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
        let mut spaces = [TangentSpace::with_normal(normal); 3];

        compute_tangent_space(&positions, &texcoords, &mut spaces, &[0, 1, 2]);

        for space in &spaces {
            assert_eq!(space.normal, normal);
            assert_orthonormal(space);
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "degenerate triangle")]
    fn test_zero_area_triangle_asserts_in_debug() {
        let positions = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]];
        let texcoords = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
        let mut spaces = [TangentSpace::with_normal([0.0, 0.0, 1.0]); 3];

        compute_tangent_space(&positions, &texcoords, &mut spaces, &[0, 1, 2]);
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn test_zero_area_triangle_propagates_non_finite_in_release() {
        let positions = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]];
        let texcoords = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
        let mut spaces = [TangentSpace::with_normal([0.0, 0.0, 1.0]); 3];

        compute_tangent_space(&positions, &texcoords, &mut spaces, &[0, 1, 2]);

        // 两端的内角为 0，累加结果为零向量，正交化后不是有限值
        assert!(!spaces[0].tangent().all_finite());
        assert!(!spaces[2].tangent().all_finite());
    }
}
