//! 通知类型 × 生命周期 到上游路径模板的映射表
//!
//! 新旧两种 URL 形态共用这张表，路由层只负责注册。

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Beskjed,
    Oppgave,
    Innboks,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Beskjed, Category::Oppgave, Category::Innboks];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Beskjed => "beskjed",
            Category::Oppgave => "oppgave",
            Category::Innboks => "innboks",
        }
    }

    /// 解析旧版路由中的 `{varseltype}` 参数
    pub fn from_path_param(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    Aktive,
    Inaktive,
    All,
}

impl Lifecycle {
    pub const ALL: [Lifecycle; 3] = [Lifecycle::Aktive, Lifecycle::Inaktive, Lifecycle::All];

    /// 对外路由中的路径段
    pub fn route_segment(self) -> &'static str {
        match self {
            Lifecycle::Aktive => "aktive",
            Lifecycle::Inaktive => "inaktive",
            Lifecycle::All => "all",
        }
    }

    /// 上游事件处理服务中的路径段（"all" 在上游叫 "alle"）
    pub fn upstream_segment(self) -> &'static str {
        match self {
            Lifecycle::Aktive => "aktive",
            Lifecycle::Inaktive => "inaktive",
            Lifecycle::All => "alle",
        }
    }
}

/// 上游相对路径：`<category>/detaljert/<lifecycle>`
pub fn varsel_path(category: Category, lifecycle: Lifecycle) -> String {
    format!("{}/detaljert/{}", category.as_str(), lifecycle.upstream_segment())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_table_covers_every_combination() {
        let mut paths = Vec::new();
        for category in Category::ALL {
            for lifecycle in Lifecycle::ALL {
                paths.push(varsel_path(category, lifecycle));
            }
        }
        assert_eq!(paths.len(), 9);
        assert!(paths.contains(&"beskjed/detaljert/aktive".to_string()));
        assert!(paths.contains(&"oppgave/detaljert/inaktive".to_string()));
        assert!(paths.contains(&"innboks/detaljert/alle".to_string()));
    }

    #[test]
    fn parses_known_categories_only() {
        assert_eq!(Category::from_path_param("oppgave"), Some(Category::Oppgave));
        assert_eq!(Category::from_path_param("ukjent"), None);
        assert_eq!(Category::from_path_param("Beskjed"), None);
    }
}
