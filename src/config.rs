use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Blank space around the scene bounds.
    pub padding: f64,
    pub path_stroke_width: f64,
    pub rect_stroke_width: f64,
    pub node_radius: f64,
    /// Draw the candidate visibility nodes.
    pub show_nodes: bool,
    /// Draw the node-margin outline around each rectangle.
    pub show_margins: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            padding: 40.0,
            path_stroke_width: 2.0,
            rect_stroke_width: 1.0,
            node_radius: 3.0,
            show_nodes: false,
            show_margins: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub theme: Theme,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    background: Option<String>,
    rect_fill: Option<String>,
    rect_border: Option<String>,
    margin_color: Option<String>,
    path_color: Option<String>,
    node_color: Option<String>,
    connection_color: Option<String>,
    error_color: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    padding: Option<f64>,
    path_stroke_width: Option<f64>,
    rect_stroke_width: Option<f64>,
    node_radius: Option<f64>,
    show_nodes: Option<bool>,
    show_margins: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    render: Option<RenderConfigFile>,
}

/// Loads preview settings from a JSON file. Keys that are absent keep their
/// defaults; no path means all defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;
    apply_config_file(&mut config, parsed)?;
    Ok(config)
}

fn apply_config_file(config: &mut Config, parsed: ConfigFile) -> anyhow::Result<()> {
    match parsed.theme.as_deref() {
        None => {}
        Some("modern") => config.theme = Theme::modern(),
        Some("classic" | "default") => config.theme = Theme::classic(),
        Some(other) => return Err(anyhow::anyhow!("Unknown theme '{other}'")),
    }

    if let Some(vars) = parsed.theme_variables {
        let theme = &mut config.theme;
        if let Some(v) = vars.font_family {
            theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            theme.font_size = v;
        }
        if let Some(v) = vars.background {
            theme.background = v;
        }
        if let Some(v) = vars.rect_fill {
            theme.rect_fill = v;
        }
        if let Some(v) = vars.rect_border {
            theme.rect_border = v;
        }
        if let Some(v) = vars.margin_color {
            theme.margin_color = v;
        }
        if let Some(v) = vars.path_color {
            theme.path_color = v;
        }
        if let Some(v) = vars.node_color {
            theme.node_color = v;
        }
        if let Some(v) = vars.connection_color {
            theme.connection_color = v;
        }
        if let Some(v) = vars.error_color {
            theme.error_color = v;
        }
    }

    if let Some(render) = parsed.render {
        let target = &mut config.render;
        if let Some(v) = render.padding {
            target.padding = v;
        }
        if let Some(v) = render.path_stroke_width {
            target.path_stroke_width = v;
        }
        if let Some(v) = render.rect_stroke_width {
            target.rect_stroke_width = v;
        }
        if let Some(v) = render.node_radius {
            target.node_radius = v;
        }
        if let Some(v) = render.show_nodes {
            target.show_nodes = v;
        }
        if let Some(v) = render.show_margins {
            target.show_margins = v;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> anyhow::Result<Config> {
        let mut config = Config::default();
        apply_config_file(&mut config, serde_json::from_str(input)?)?;
        Ok(config)
    }

    #[test]
    fn no_path_gives_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.theme, Theme::classic());
    }

    #[test]
    fn partial_file_overrides_only_named_keys() {
        let config = parse(
            r##"{
                "themeVariables": { "pathColor": "#00AA00" },
                "render": { "showNodes": true, "padding": 12 }
            }"##,
        )
        .unwrap();
        assert_eq!(config.theme.path_color, "#00AA00");
        assert_eq!(config.theme.rect_border, Theme::classic().rect_border);
        assert!(config.render.show_nodes);
        assert!(!config.render.show_margins);
        assert_eq!(config.render.padding, 12.0);
        assert_eq!(config.render.node_radius, RenderConfig::default().node_radius);
    }

    #[test]
    fn named_theme_is_applied_before_variables() {
        let config = parse(r##"{ "theme": "modern", "themeVariables": { "fontSize": 20 } }"##).unwrap();
        assert_eq!(config.theme.rect_fill, Theme::modern().rect_fill);
        assert_eq!(config.theme.font_size, 20.0);
    }

    #[test]
    fn unknown_theme_is_rejected() {
        let err = parse(r#"{ "theme": "neon" }"#).unwrap_err();
        assert!(err.to_string().contains("neon"));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_config(Some(Path::new("/nonexistent/orthoc-config.json"))).is_err());
    }
}
