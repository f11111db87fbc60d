pub mod clock;

pub use clock::{Clock, ManualClock, SystemClock};

/// 短码字符集（64 个字符）
pub const CODE_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_-";

/// 随机生成的短码长度
pub const GENERATED_CODE_LENGTH: usize = 6;

/// 短码允许的最大长度（与数据库列宽一致）
pub const MAX_CODE_LENGTH: usize = 10;

/// 字符是否属于短码字符集 `[A-Za-z0-9_-]`
#[inline]
pub fn is_code_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// 校验短码：1..=10 个字符，且全部来自字符集
pub fn is_valid_code(code: &str) -> bool {
    !code.is_empty() && code.len() <= MAX_CODE_LENGTH && code.chars().all(is_code_char)
}

/// 短码不存在时的回退地址，重定向回输入表单
pub fn fallback_path(code: &str) -> String {
    format!("/?shortUrl={}", code)
}
