/// OBJ 行扫描器
///
/// 在单行字节缓冲上移动游标，解析浮点数和面索引。整个扫描过程不分配内存，
/// 也从不报错：无法解析的数字返回 0，缺失的面索引保留调用方给出的默认值。

/// 单行字节缓冲上的游标
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

/// 一个三角形面的三组索引（每组对应三个角）
///
/// 索引保持 OBJ 中的写法，从 1 开始。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceIndices {
    pub position: [u32; 3],
    pub texcoord: [u32; 3],
    pub normal: [u32; 3],
}

impl FaceIndices {
    /// 所有槽位都填充为 `default`
    pub fn splat(default: u32) -> Self {
        Self {
            position: [default; 3],
            texcoord: [default; 3],
            normal: [default; 3],
        }
    }
}

impl<'a> LineCursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// 当前游标位置（字节偏移）
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    /// 当前字节为 `byte` 时前进一步
    #[inline]
    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// 当前字节为数字时消费它并返回数值
    #[inline]
    fn digit(&mut self) -> Option<u8> {
        match self.peek() {
            Some(b @ b'0'..=b'9') => {
                self.pos += 1;
                Some(b - b'0')
            }
            _ => None,
        }
    }

    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// 跳过前导空白后读取一个以空白分隔的记录关键字（`v`、`vn`、`f` ...）
    pub fn next_token(&mut self) -> &'a [u8] {
        self.skip_whitespace();
        let start = self.pos;
        while self.peek().is_some_and(|b| !b.is_ascii_whitespace()) {
            self.pos += 1;
        }
        &self.bytes[start..self.pos]
    }

    /// 解析一个十进制浮点数
    ///
    /// 语法：`sign? digit* ('.' digit*)? ([eE] sign? digit+)? [fF]?`，允许前导空白。
    /// 没有数字时返回 0，但游标仍越过已消费的空白和符号。
    /// 超出 `f32` 范围的值截断为 `f32::MAX`（保留符号）。
    pub fn parse_float(&mut self) -> f32 {
        self.skip_whitespace();

        let sign = if self.eat(b'-') {
            -1.0
        } else {
            self.eat(b'+');
            1.0
        };

        let mut value = 0.0f64;
        while let Some(d) = self.digit() {
            value = value * 10.0 + f64::from(d);
        }

        if self.eat(b'.') {
            let mut scale = 1.0f64;
            while let Some(d) = self.digit() {
                scale /= 10.0;
                value += scale * f64::from(d);
            }
        }

        if matches!(self.peek(), Some(b'e' | b'E')) {
            let mark = self.pos;
            self.pos += 1;
            let exponent_sign = if self.eat(b'-') {
                -1
            } else {
                self.eat(b'+');
                1
            };

            let mut exponent: Option<i32> = None;
            while let Some(d) = self.digit() {
                let e = exponent.unwrap_or(0);
                exponent = Some(e.saturating_mul(10).saturating_add(i32::from(d)));
            }

            match exponent {
                Some(e) if value != 0.0 => value *= 10f64.powi(exponent_sign * e),
                Some(_) => {}
                // 指数部分至少需要一位数字，否则 'e' 不属于这个数
                None => self.pos = mark,
            }
        }

        if matches!(self.peek(), Some(b'f' | b'F')) {
            self.pos += 1;
        }

        (sign * value.min(f64::from(f32::MAX))) as f32
    }

    /// 连续解析三个浮点数
    pub fn parse_vector3(&mut self) -> [f32; 3] {
        let x = self.parse_float();
        let y = self.parse_float();
        let z = self.parse_float();
        [x, y, z]
    }

    /// 解析一个无符号十进制整数，没有数字时返回 `None`
    fn parse_index(&mut self) -> Option<u32> {
        let mut value: Option<u32> = None;
        while let Some(d) = self.digit() {
            let v = value.unwrap_or(0);
            value = Some(v.saturating_mul(10).saturating_add(u32::from(d)));
        }
        value
    }

    /// 解析一个面的三个角 `v[/t][/n]`
    ///
    /// 每个角的语法为 `int ('/' int? ('/' int?)?)?`。空槽位（如 `1//3` 中的纹理坐标）
    /// 和值为 0 的索引保留 `default`。最多读取三个角，其余内容被忽略；
    /// 遇到不以数字开头的角时停止，剩余的角保持默认值。
    pub fn parse_face_indices(&mut self, default: u32) -> FaceIndices {
        let mut face = FaceIndices::splat(default);

        for corner in 0..3 {
            self.skip_whitespace();
            let Some(position) = self.parse_index() else {
                break;
            };
            assign(&mut face.position[corner], Some(position));

            if self.eat(b'/') {
                assign(&mut face.texcoord[corner], self.parse_index());
                if self.eat(b'/') {
                    assign(&mut face.normal[corner], self.parse_index());
                }
            }
        }

        face
    }
}

/// OBJ 索引从 1 开始，0 视为缺失
#[inline]
fn assign(slot: &mut u32, value: Option<u32>) {
    if let Some(v) = value.filter(|&v| v != 0) {
        *slot = v;
    }
}
