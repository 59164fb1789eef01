use crate::varsel::VarselReader;

/// Web 应用全局状态
///
/// 只包含跨请求共享的只读对象，通过 Arc 注入到 Axum 的 Handler 中。
#[derive(Clone)]
pub struct AppState {
    pub varsel_reader: VarselReader,
}
