/// 存活检查
pub async fn is_alive() -> &'static str {
    "ALIVE"
}

/// 就绪检查：服务无启动后才建立的依赖，进程存活即就绪
pub async fn is_ready() -> &'static str {
    "READY"
}
