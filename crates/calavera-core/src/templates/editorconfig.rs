//! EditorConfig renderer

use super::{ConfigArtifact, Rendered};

pub const EDITORCONFIG_FILE: &str = ".editorconfig";

const EDITORCONFIG: &str = "root = true

[*]
charset = utf-8
end_of_line = lf
insert_final_newline = true
indent_style = space
indent_size = 2
trim_trailing_whitespace = true
";

/// Fixed `.editorconfig`; no scripts, no packages
pub fn render_editorconfig() -> Rendered {
    Rendered {
        label: "EditorConfig",
        config: "EditorConfig",
        artifacts: vec![ConfigArtifact::new(EDITORCONFIG_FILE, EDITORCONFIG)],
        scripts: Vec::new(),
        dependencies: Vec::new(),
    }
}
