use tabled::settings::{Panel, Style};
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Default)]
pub struct FormatConfig {
    /// A line spanning the table below the last row.
    pub footer: Option<String>,
}

pub fn render<T: Tabled>(rows: impl IntoIterator<Item = T>, config: FormatConfig) -> String {
    let mut table = Table::new(rows);
    if let Some(footer) = config.footer {
        table.with(Panel::footer(footer));
    }
    table.with(Style::blank());
    table.to_string()
}

#[derive(Debug, Clone, Tabled)]
pub struct InstalledRow {
    #[tabled(rename = "")]
    pub marker:       &'static str,
    #[tabled(rename = "VERSION")]
    pub version:      String,
    #[tabled(rename = "INSTALLED")]
    pub installed_at: String,
    #[tabled(rename = "PATH")]
    pub path:         String,
}

#[derive(Debug, Clone, Tabled)]
pub struct ReleaseRow {
    #[tabled(rename = "VERSION")]
    pub version:   String,
    #[tabled(rename = "PUBLISHED")]
    pub published: String,
    #[tabled(rename = "")]
    pub status:    &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(marker: &'static str, version: &str) -> InstalledRow {
        InstalledRow {
            marker,
            version: version.to_string(),
            installed_at: "2024-02-01".to_string(),
            path: format!("/root/versions/{version}/helm"),
        }
    }

    #[test]
    fn renders_rows_and_header() {
        let out = render([row("*", "3.14.0"), row("", "3.13.3")], FormatConfig::default());
        assert!(out.contains("VERSION"));
        assert!(out.contains("* "));
        assert!(out.contains("3.13.3"));
    }

    #[test]
    fn footer_follows_rows() {
        let out = render([row("", "3.12.0")], FormatConfig {
            footer: Some("1 more".to_string()),
        });
        let footer = out.find("1 more").unwrap();
        assert!(out.find("3.12.0").unwrap() < footer);
    }
}
