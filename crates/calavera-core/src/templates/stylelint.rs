//! Stylelint renderer

use super::{ConfigArtifact, Rendered, Script};
use serde::Serialize;
use serde_json::{json, Value};

pub const STYLELINT_FILE: &str = ".stylelintrc.json";

#[derive(Debug, Serialize)]
struct StylelintConfig {
    extends: &'static str,
    plugins: Vec<&'static str>,
    rules: Value,
}

/// Standard config with property ordering and Baseline checks.
///
/// `plugin/use-baseline` defaults to "Baseline widely available".
pub fn render_stylelint() -> serde_json::Result<Rendered> {
    let config = StylelintConfig {
        extends: "stylelint-config-standard",
        plugins: vec!["stylelint-order", "stylelint-plugin-use-baseline"],
        rules: json!({
            "order/properties-alphabetical-order": true,
            "custom-property-empty-line-before": null,
            "plugin/use-baseline": true,
        }),
    };

    Ok(Rendered {
        label: "Stylelint",
        config: "Stylelint",
        artifacts: vec![ConfigArtifact::json(STYLELINT_FILE, &config)?],
        scripts: vec![Script::new("lint:css", "stylelint **/*.css")],
        dependencies: vec![
            "stylelint",
            "stylelint-config-standard",
            "stylelint-order",
            "stylelint-plugin-use-baseline",
        ],
    })
}
