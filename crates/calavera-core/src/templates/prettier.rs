//! Prettier renderer

use super::{ConfigArtifact, Rendered, Script};

pub const PRETTIER_IGNORE_FILE: &str = ".prettierignore";
pub const PRETTIER_RC_FILE: &str = ".prettierrc.json";

const PRETTIER_IGNORE: &str = "# Package Managers
package-lock.json
pnpm-lock.yaml
yarn.lock
";

/// Ignore list plus an empty rc file, so Prettier defaults apply
pub fn render_prettier() -> Rendered {
    Rendered {
        label: "Prettier",
        config: "Prettier",
        artifacts: vec![
            ConfigArtifact::new(PRETTIER_IGNORE_FILE, PRETTIER_IGNORE),
            ConfigArtifact::new(PRETTIER_RC_FILE, "{}\n"),
        ],
        scripts: vec![
            Script::new("prettier:lint", "prettier ."),
            Script::new("prettier:format", "prettier --write ."),
        ],
        dependencies: vec!["prettier"],
    }
}
