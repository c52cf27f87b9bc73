//! Visual style of the highlight surface.

use serde::{Deserialize, Serialize};

/// Highlight surface style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightStyle {
    #[serde(default = "default_border")]
    pub border: String,

    #[serde(default = "default_background")]
    pub background: String,

    #[serde(default = "default_border_radius")]
    pub border_radius: String,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            border: default_border(),
            background: default_background(),
            border_radius: default_border_radius(),
        }
    }
}

fn default_border() -> String {
    "2px solid rgba(59, 130, 246, 0.9)".to_string()
}

fn default_background() -> String {
    "rgba(59, 130, 246, 0.15)".to_string()
}

fn default_border_radius() -> String {
    "3px".to_string()
}

impl HighlightStyle {
    /// Apply field-wise overrides.
    pub fn merge(&mut self, overrides: HighlightStyleOverrides) {
        if let Some(border) = overrides.border {
            self.border = border;
        }
        if let Some(background) = overrides.background {
            self.background = background;
        }
        if let Some(border_radius) = overrides.border_radius {
            self.border_radius = border_radius;
        }
    }
}

/// Partial highlight style; unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightStyleOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
}

impl HighlightStyleOverrides {
    pub fn is_empty(&self) -> bool {
        self.border.is_none() && self.background.is_none() && self.border_radius.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overrides_only_given_fields() {
        let mut style = HighlightStyle::default();
        style.merge(HighlightStyleOverrides {
            border: Some("1px dashed red".to_string()),
            ..Default::default()
        });
        assert_eq!(style.border, "1px dashed red");
        assert_eq!(style.background, default_background());
        assert_eq!(style.border_radius, "3px");
    }

    #[test]
    fn test_overrides_is_empty() {
        assert!(HighlightStyleOverrides::default().is_empty());
        let overrides = HighlightStyleOverrides {
            border_radius: Some("0".to_string()),
            ..Default::default()
        };
        assert!(!overrides.is_empty());
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let style: HighlightStyle = serde_json::from_str(r#"{"background":"yellow"}"#).unwrap();
        assert_eq!(style.background, "yellow");
        assert_eq!(style.border, default_border());
    }
}
