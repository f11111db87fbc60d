use std::fmt;

#[derive(Debug, Clone)]
pub enum ChoteError {
    CodeTaken(String),
    UniquenessViolation(String),
    InvalidCode(String),
    Config(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    Serialization(String),
}

impl ChoteError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            ChoteError::CodeTaken(_) => "E101",
            ChoteError::UniquenessViolation(_) => "E102",
            ChoteError::InvalidCode(_) => "E103",
            ChoteError::Config(_) => "E201",
            ChoteError::DatabaseConfig(_) => "E301",
            ChoteError::DatabaseConnection(_) => "E302",
            ChoteError::DatabaseOperation(_) => "E303",
            ChoteError::FileOperation(_) => "E401",
            ChoteError::Serialization(_) => "E402",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            ChoteError::CodeTaken(_) => "Code Already Taken",
            ChoteError::UniquenessViolation(_) => "Uniqueness Violation",
            ChoteError::InvalidCode(_) => "Invalid Short Code",
            ChoteError::Config(_) => "Configuration Error",
            ChoteError::DatabaseConfig(_) => "Database Configuration Error",
            ChoteError::DatabaseConnection(_) => "Database Connection Error",
            ChoteError::DatabaseOperation(_) => "Database Operation Error",
            ChoteError::FileOperation(_) => "File Operation Error",
            ChoteError::Serialization(_) => "Serialization Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            ChoteError::CodeTaken(msg)
            | ChoteError::UniquenessViolation(msg)
            | ChoteError::InvalidCode(msg)
            | ChoteError::Config(msg)
            | ChoteError::DatabaseConfig(msg)
            | ChoteError::DatabaseConnection(msg)
            | ChoteError::DatabaseOperation(msg)
            | ChoteError::FileOperation(msg)
            | ChoteError::Serialization(msg) => msg,
        }
    }

    /// 调用方可见的拒绝（请求本身有问题），区别于存储层故障
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            ChoteError::CodeTaken(_)
                | ChoteError::UniquenessViolation(_)
                | ChoteError::InvalidCode(_)
        )
    }

    /// 格式化为彩色输出（用于 CLI 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ChoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ChoteError {}

// 便捷的构造函数
impl ChoteError {
    pub fn code_taken<T: Into<String>>(msg: T) -> Self {
        ChoteError::CodeTaken(msg.into())
    }

    pub fn uniqueness_violation<T: Into<String>>(msg: T) -> Self {
        ChoteError::UniquenessViolation(msg.into())
    }

    pub fn invalid_code<T: Into<String>>(msg: T) -> Self {
        ChoteError::InvalidCode(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        ChoteError::Config(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        ChoteError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        ChoteError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        ChoteError::DatabaseOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        ChoteError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        ChoteError::Serialization(msg.into())
    }
}

impl From<sea_orm::DbErr> for ChoteError {
    fn from(err: sea_orm::DbErr) -> Self {
        ChoteError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for ChoteError {
    fn from(err: std::io::Error) -> Self {
        ChoteError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for ChoteError {
    fn from(err: serde_json::Error) -> Self {
        ChoteError::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for ChoteError {
    fn from(err: toml::ser::Error) -> Self {
        ChoteError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for ChoteError {
    fn from(err: config::ConfigError) -> Self {
        ChoteError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ChoteError>;
