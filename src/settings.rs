//! Mapping from the configuration file to inspector options.

use domlens_config::InspectorConfig;
use domlens_core::InspectorOptions;
use domlens_protocols::{HighlightStyle, ModifierKey};

pub(crate) fn inspector_options(config: &InspectorConfig) -> InspectorOptions {
    let mut highlight_style = HighlightStyle::default();
    highlight_style.merge(config.highlight_style.clone());

    InspectorOptions {
        highlight_style,
        show_tooltip: config.show_tooltip,
        single_selection: config.single_selection,
        multi_select_key: ModifierKey::parse_lenient(&config.multi_select_key),
        z_index: config.z_index,
        hover_throttle_ms: config.hover_throttle_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domlens_config::ConfigLoader;

    #[test]
    fn test_default_config_matches_default_options() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(inspector_options(&config.inspector), InspectorOptions::default());
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = ConfigLoader::load_str(
            r#"
            [inspector]
            multi_select_key = "cmd"
            hover_throttle_ms = 0

            [inspector.highlight_style]
            border_radius = "0"
            "#,
        )
        .unwrap();
        let options = inspector_options(&config.inspector);
        assert_eq!(options.multi_select_key, ModifierKey::Meta);
        assert_eq!(options.hover_throttle_ms, 0);
        assert_eq!(options.highlight_style.border_radius, "0");
        assert_eq!(
            options.highlight_style.border,
            HighlightStyle::default().border
        );
    }

    #[test]
    fn test_unknown_modifier_falls_back_to_shift() {
        let config = ConfigLoader::load_str("[inspector]\nmulti_select_key = \"Hyper\"").unwrap();
        assert_eq!(
            inspector_options(&config.inspector).multi_select_key,
            ModifierKey::Shift
        );
    }
}
