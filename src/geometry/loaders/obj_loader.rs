/// OBJ 文件加载器
///
/// 逐行读取 Wavefront OBJ 文本（只支持三角形面），把位置、纹理坐标、法线三套独立的索引
/// 合并为单一索引空间，并可选地生成切线空间。
use super::scanner::{FaceIndices, LineCursor};
use super::MeshLoader;
use crate::core::error::{MeshLoadError, ObjTangentError, Result};
use crate::geometry::mesh::MeshData;
use crate::geometry::vertex::TangentSpace;
use std::collections::hash_map::{Entry, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// 单行最多扫描的字节数
///
/// 更长的行只解析前 `MAX_LINE_LENGTH` 个字节，其余部分被丢弃。
pub const MAX_LINE_LENGTH: usize = 128;

/// 面记录中缺失分量的默认索引（OBJ 索引从 1 开始）
const DEFAULT_INDEX: u32 = 1;

/// 纹理坐标和法线是可选的，解析结束后各追加一个占位值
const DUMMY_TEXCOORD: [f32; 2] = [0.0, 0.0];
const DUMMY_NORMAL: [f32; 3] = [0.0, 1.0, 0.0];

/// 解析阶段收集的原始数据，索引仍是 OBJ 中的三套独立索引
#[derive(Debug, Default)]
struct RawVertexArrays {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    texcoords: Vec<[f32; 2]>,
    faces: Vec<FaceIndices>,
}

/// 去重键：位置、法线、纹理坐标索引完全相同的角对应同一个输出顶点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct IndexKey {
    position: u32,
    normal: u32,
    texcoord: u32,
}

impl RawVertexArrays {
    /// 逐行读取并分类记录
    fn collect<R: BufRead>(mut reader: R) -> Result<Self> {
        let mut raw = Self::default();
        let mut line = Vec::with_capacity(MAX_LINE_LENGTH);
        let mut line_number = 0usize;
        let mut truncated_lines = 0usize;

        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            line_number += 1;

            let mut bytes = line.as_slice();
            if bytes.len() > MAX_LINE_LENGTH {
                if truncated_lines == 0 {
                    crate::engine_warn!(
                        line = line_number,
                        length = bytes.len(),
                        limit = MAX_LINE_LENGTH,
                        "行长度超出上限，超出部分被忽略"
                    );
                }
                truncated_lines += 1;
                bytes = &bytes[..MAX_LINE_LENGTH];
            }

            raw.collect_line(bytes);
        }

        if truncated_lines > 1 {
            crate::engine_warn!(count = truncated_lines, "共有多行被截断");
        }

        raw.texcoords.push(DUMMY_TEXCOORD);
        raw.normals.push(DUMMY_NORMAL);

        Ok(raw)
    }

    fn collect_line(&mut self, line: &[u8]) {
        let mut cursor = LineCursor::new(line);
        match cursor.next_token() {
            b"v" => self.positions.push(cursor.parse_vector3()),
            b"vn" => self.normals.push(cursor.parse_vector3()),
            b"vt" => {
                // 第三个分量（w）被读取但丢弃
                let [u, v, _] = cursor.parse_vector3();
                self.texcoords.push([u, v]);
            }
            b"f" => self.faces.push(cursor.parse_face_indices(DEFAULT_INDEX)),
            // 注释、材质、分组等记录
            _ => {}
        }
    }

    /// 把三套索引合并为单一索引空间
    ///
    /// 按照角在文件中出现的顺序处理，保持三角形绕序。
    fn build_mesh(&self) -> Result<MeshData> {
        let corner_count = self.faces.len() * 3;
        let mut mesh = MeshData::with_capacity(self.positions.len(), corner_count);
        let mut index_map: HashMap<IndexKey, u32> = HashMap::with_capacity(corner_count);

        for face in &self.faces {
            for corner in 0..3 {
                let key = IndexKey {
                    position: face.position[corner],
                    normal: face.normal[corner],
                    texcoord: face.texcoord[corner],
                };

                let index = match index_map.entry(key) {
                    Entry::Occupied(entry) => *entry.get(),
                    Entry::Vacant(entry) => {
                        let position = fetch(&self.positions, key.position, "position")?;
                        let normal = fetch(&self.normals, key.normal, "normal")?;
                        let texcoord = fetch(&self.texcoords, key.texcoord, "texcoord")?;
                        *entry.insert(mesh.push_vertex(position, normal, texcoord))
                    }
                };
                mesh.indices.push(index);
            }
        }

        Ok(mesh)
    }
}

/// 按 OBJ 的 1 起始索引取值，越界时返回错误而不是读越界
fn fetch<T: Copy>(items: &[T], index: u32, kind: &str) -> Result<T> {
    index
        .checked_sub(1)
        .and_then(|i| items.get(i as usize))
        .copied()
        .ok_or_else(|| {
            MeshLoadError::InvalidGeometry(format!(
                "{} index {} out of range (1-{})",
                kind,
                index,
                items.len()
            ))
            .into()
        })
}

/// OBJ 格式加载器
///
/// 持有最近一次加载的网格。每次加载都会先清空旧网格，加载失败时网格保持为空。
///
/// # 使用示例
///
/// ```rust,no_run
/// use objtangent::geometry::loaders::ObjLoader;
///
/// let mut loader = ObjLoader::new();
/// loader.load("model/teapot.obj", true)?;
/// println!("加载了 {} 个顶点", loader.mesh().vertex_count());
/// # Ok::<(), objtangent::core::ObjTangentError>(())
/// ```
#[derive(Debug, Default)]
pub struct ObjLoader {
    mesh: MeshData,
}

impl ObjLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从文件加载
    ///
    /// 文件无法打开或读取时记录错误日志并返回错误，网格被清空。
    pub fn load<P: AsRef<Path>>(&mut self, path: P, compute_tangent_space: bool) -> Result<()> {
        let path = path.as_ref();
        self.mesh.clear();

        let file = File::open(path).map_err(|e| {
            crate::engine_error!(path = %path.display(), error = %e, "无法打开 OBJ 文件");
            if e.kind() == std::io::ErrorKind::NotFound {
                ObjTangentError::from(MeshLoadError::FileNotFound(path.to_path_buf()))
            } else {
                ObjTangentError::from(e)
            }
        })?;

        self.load_from_reader(BufReader::new(file), compute_tangent_space)
            .inspect_err(|e| {
                crate::engine_error!(path = %path.display(), error = %e, "OBJ 文件加载失败");
            })?;

        self.mesh.name = path.file_stem().and_then(|s| s.to_str()).map(str::to_string);
        Ok(())
    }

    /// 从任意 `BufRead` 加载（例如内存中的字节）
    pub fn load_from_reader<R: BufRead>(&mut self, reader: R, compute_tangent_space: bool) -> Result<()> {
        let _span = crate::span_trace!("obj_load").entered();
        self.mesh.clear();

        let raw = RawVertexArrays::collect(reader)?;
        tracing::debug!(
            positions = raw.positions.len(),
            normals = raw.normals.len() - 1,
            texcoords = raw.texcoords.len() - 1,
            faces = raw.faces.len(),
            "OBJ 记录读取完成"
        );

        let mut mesh = raw.build_mesh()?;
        if compute_tangent_space {
            mesh.compute_tangent_space();
        }

        tracing::info!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            tangent_space = compute_tangent_space,
            "成功加载 OBJ 网格"
        );

        self.mesh = mesh;
        Ok(())
    }

    /// 最近一次加载的网格
    pub fn mesh(&self) -> &MeshData {
        &self.mesh
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.mesh.positions
    }

    pub fn tangent_spaces(&self) -> &[TangentSpace] {
        &self.mesh.tangent_spaces
    }

    pub fn texcoords(&self) -> &[[f32; 2]] {
        &self.mesh.texcoords
    }

    pub fn indices(&self) -> &[u32] {
        &self.mesh.indices
    }

    /// 取走网格，加载器回到空状态
    pub fn take_mesh(&mut self) -> MeshData {
        std::mem::take(&mut self.mesh)
    }
}

impl MeshLoader for ObjLoader {
    fn load_from_file(path: &Path) -> Result<MeshData> {
        let mut loader = ObjLoader::new();
        loader.load(path, true)?;
        Ok(loader.take_mesh())
    }

    fn load_from_memory(data: &[u8]) -> Result<MeshData> {
        let mut loader = ObjLoader::new();
        loader.load_from_reader(data, true)?;
        Ok(loader.take_mesh())
    }

    fn supported_extensions() -> &'static [&'static str] {
        &["obj"]
    }
}
