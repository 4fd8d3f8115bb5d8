use serde::{Deserialize, Serialize};

/// Colours and fonts of the SVG preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub background: String,
    pub rect_fill: String,
    pub rect_border: String,
    pub margin_color: String,
    pub path_color: String,
    pub node_color: String,
    pub connection_color: String,
    pub error_color: String,
}

impl Theme {
    /// Black outlines, red connector and blue visibility nodes.
    pub fn classic() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            font_size: 14.0,
            background: "#FFFFFF".to_string(),
            rect_fill: "none".to_string(),
            rect_border: "#000000".to_string(),
            margin_color: "#BBBBBB".to_string(),
            path_color: "#FF0000".to_string(),
            node_color: "#0000FF".to_string(),
            connection_color: "#000000".to_string(),
            error_color: "#CC0000".to_string(),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            background: "#FFFFFF".to_string(),
            rect_fill: "#F8FAFF".to_string(),
            rect_border: "#C7D2E5".to_string(),
            margin_color: "#D7E0F0".to_string(),
            path_color: "#7A8AA6".to_string(),
            node_color: "#9AA9C4".to_string(),
            connection_color: "#1C2430".to_string(),
            error_color: "#C0392B".to_string(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}
