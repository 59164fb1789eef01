use std::fmt;

/// 请求头名称：调用方通过该头传递身份证号
pub const FODSELSNUMMER_HEADER: &str = "fodselsnummer";

const FODSELSNUMMER_LENGTH: usize = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("Missing header 'fodselsnummer'")]
    MissingHeader,
    #[error("Header 'fodselsnummer' is not an 11-digit identity number")]
    InvalidFormat,
}

/// 已校验的身份证号（11 位数字）
///
/// 仅做格式校验，不校验控制位。
#[derive(Clone, PartialEq, Eq)]
pub struct Fodselsnummer(String);

impl Fodselsnummer {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// 身份证号属于个人信息，Debug 输出时打码
impl fmt::Debug for Fodselsnummer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fodselsnummer({}*****)", &self.0[..6])
    }
}

/// 校验请求头中的身份证号
pub fn validate(header_value: Option<&str>) -> Result<Fodselsnummer, IdentityError> {
    let value = header_value.ok_or(IdentityError::MissingHeader)?;
    if value.len() == FODSELSNUMMER_LENGTH && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(Fodselsnummer(value.to_string()))
    } else {
        Err(IdentityError::InvalidFormat)
    }
}
