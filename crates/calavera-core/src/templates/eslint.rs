//! ESLint flat config renderer
//!
//! `eslint.config.js` is assembled from a skeleton plus optional fragments.
//! Each fragment is guarded by one feature flag and contributes an import and
//! a config entry. Fragments are spliced in a fixed order (prettier interop,
//! HTML, CSS) and never interact beyond that ordering.
//!
//! The module is laid out by [`ConfigModule::print`], which follows Prettier's
//! defaults (double quotes, two-space indent, trailing commas), so the file
//! comes out already formatted and identical for identical flags.

use super::{ConfigArtifact, Rendered, Script};
use crate::tools::FeatureFlags;

pub const ESLINT_CONFIG_FILE: &str = "eslint.config.js";

/// `import <binding> from "<source>";`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Import {
    pub binding: &'static str,
    pub source: &'static str,
}

const fn import(binding: &'static str, source: &'static str) -> Import {
    Import { binding, source }
}

/// An optional piece of the config, switched on by one flag
struct Fragment {
    enabled: fn(&FeatureFlags) -> bool,
    import: Import,
    entry: &'static str,
    dependencies: &'static [&'static str],
}

fn prettier_enabled(flags: &FeatureFlags) -> bool {
    flags.with_prettier
}

fn html_enabled(flags: &FeatureFlags) -> bool {
    flags.with_html
}

fn css_enabled(flags: &FeatureFlags) -> bool {
    flags.with_css
}

const PRETTIER_INTEROP: Fragment = Fragment {
    enabled: prettier_enabled,
    import: import("eslintConfigPrettier", "eslint-config-prettier"),
    entry: "eslintConfigPrettier",
    dependencies: &["eslint-config-prettier"],
};

const HTML: Fragment = Fragment {
    enabled: html_enabled,
    import: import("html", "@html-eslint/eslint-plugin"),
    entry: r#"{
  ...html.configs["flat/recommended"],
  files: ["**/*.html"],
  rules: {
    "@html-eslint/indent": "off",
    "@html-eslint/use-baseline": "warn",
  },
}"#,
    dependencies: &["@html-eslint/parser", "@html-eslint/eslint-plugin"],
};

const CSS: Fragment = Fragment {
    enabled: css_enabled,
    import: import("css", "@eslint/css"),
    entry: r#"{
  files: ["**/*.css"],
  language: "css/css",
  plugins: { css },
  extends: ["css/recommended"],
  rules: {
    "css/prefer-logical-properties": "error",
    "css/relative-font-units": "error",
  },
}"#,
    dependencies: &["@eslint/css"],
};

/// Splice order is part of the output contract
const FRAGMENTS: [Fragment; 3] = [PRETTIER_INTEROP, HTML, CSS];

const BASE_DEPENDENCIES: [&str; 3] = ["eslint", "@eslint/js", "globals"];

const GLOBALS: &str = r#"globals: {
  ...globals.browser,
  ...globals.nodeBuiltin,
},"#;

const PARSER_OPTIONS: &str = r#"// https://typescript-eslint.io/getting-started/typed-linting
parserOptions: {
  projectService: true,
  tsconfigRootDir: import.meta.dirname,
},"#;

const RULES: &str = r#"rules: {
  "no-console": ["error", { allow: ["clear", "info"] }],
},"#;

/// How the config array is exported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Export {
    /// `export default [ ... ];`
    Array,
    /// `export default <callee>( ... );`
    Call(&'static str),
}

/// A flat config module: imports, then a default export of config entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigModule {
    pub imports: Vec<Import>,
    pub export: Export,
    /// Entries at zero indentation, without their trailing comma
    pub entries: Vec<String>,
}

impl ConfigModule {
    pub fn print(&self) -> String {
        let mut out = String::new();

        for import in &self.imports {
            out.push_str(&format!(
                "import {} from \"{}\";\n",
                import.binding, import.source
            ));
        }
        out.push('\n');

        let (open, close) = match self.export {
            Export::Array => ("[".to_string(), "];"),
            Export::Call(callee) => (format!("{callee}("), ");"),
        };
        out.push_str(&format!("export default {open}\n"));
        for entry in &self.entries {
            out.push_str(&indent(entry, 1));
            out.push_str(",\n");
        }
        out.push_str(close);
        out.push('\n');

        out
    }
}

/// Indent every non-empty line by `level` two-space steps
fn indent(text: &str, level: usize) -> String {
    let pad = "  ".repeat(level);
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The trailing entry with globals, optional typed-linting options and rules
fn settings_entry(with_typescript: bool) -> String {
    let mut language_options = vec![GLOBALS.to_string()];
    if with_typescript {
        // blank line separates the typed-linting block
        language_options.push(String::new());
        language_options.push(PARSER_OPTIONS.to_string());
    }

    format!(
        "{{\n  languageOptions: {{\n{}\n  }},\n{}\n}}",
        indent(&language_options.join("\n"), 2),
        indent(RULES, 1)
    )
}

/// Compose the config module for the given flags
pub fn compose(flags: &FeatureFlags) -> ConfigModule {
    let mut imports = vec![import("js", "@eslint/js"), import("globals", "globals")];
    let mut entries = vec!["js.configs.recommended".to_string()];

    let export = if flags.with_typescript {
        imports.push(import("tseslint", "typescript-eslint"));
        entries.push("tseslint.configs.strictTypeChecked".to_string());
        entries.push("tseslint.configs.stylisticTypeChecked".to_string());
        Export::Call("tseslint.config")
    } else {
        Export::Array
    };

    for fragment in FRAGMENTS.iter().filter(|f| (f.enabled)(flags)) {
        imports.push(fragment.import);
        entries.push(fragment.entry.to_string());
    }

    entries.push(settings_entry(flags.with_typescript));

    ConfigModule {
        imports,
        export,
        entries,
    }
}

/// Packages the config needs, in install order
pub fn dependencies(flags: &FeatureFlags) -> Vec<&'static str> {
    let mut deps = BASE_DEPENDENCIES.to_vec();
    if flags.with_typescript {
        deps.push("typescript-eslint");
    }
    for fragment in FRAGMENTS.iter().filter(|f| (f.enabled)(flags)) {
        deps.extend_from_slice(fragment.dependencies);
    }
    deps
}

pub fn render_eslint(flags: &FeatureFlags) -> Rendered {
    Rendered {
        label: if flags.with_typescript {
            "typescript-eslint"
        } else {
            "ESLint"
        },
        config: "ESLint",
        artifacts: vec![ConfigArtifact::new(ESLINT_CONFIG_FILE, compose(flags).print())],
        scripts: vec![Script::new("lint:eslint", "eslint .")],
        dependencies: dependencies(flags),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_flags() -> Vec<FeatureFlags> {
        (0..16u8)
            .map(|bits| FeatureFlags {
                with_prettier: bits & 1 != 0,
                with_html: bits & 2 != 0,
                with_css: bits & 4 != 0,
                with_typescript: bits & 8 != 0,
            })
            .collect()
    }

    fn config(flags: FeatureFlags) -> String {
        render_eslint(&flags).artifacts[0].content.clone()
    }

    fn balanced(source: &str) -> bool {
        let mut stack = Vec::new();
        let mut in_string = false;
        for c in source.chars() {
            match c {
                '"' => in_string = !in_string,
                _ if in_string => {}
                '(' | '[' | '{' => stack.push(c),
                ')' => {
                    if stack.pop() != Some('(') {
                        return false;
                    }
                }
                ']' => {
                    if stack.pop() != Some('[') {
                        return false;
                    }
                }
                '}' => {
                    if stack.pop() != Some('{') {
                        return false;
                    }
                }
                _ => {}
            }
        }
        stack.is_empty() && !in_string
    }

    #[test]
    fn test_plain_config_matches_expected_layout() {
        let expected = r#"import js from "@eslint/js";
import globals from "globals";

export default [
  js.configs.recommended,
  {
    languageOptions: {
      globals: {
        ...globals.browser,
        ...globals.nodeBuiltin,
      },
    },
    rules: {
      "no-console": ["error", { allow: ["clear", "info"] }],
    },
  },
];
"#;
        assert_eq!(config(FeatureFlags::default()), expected);
    }

    #[test]
    fn test_typescript_config_matches_expected_layout() {
        let flags = FeatureFlags {
            with_prettier: true,
            with_typescript: true,
            ..FeatureFlags::default()
        };
        let expected = r#"import js from "@eslint/js";
import globals from "globals";
import tseslint from "typescript-eslint";
import eslintConfigPrettier from "eslint-config-prettier";

export default tseslint.config(
  js.configs.recommended,
  tseslint.configs.strictTypeChecked,
  tseslint.configs.stylisticTypeChecked,
  eslintConfigPrettier,
  {
    languageOptions: {
      globals: {
        ...globals.browser,
        ...globals.nodeBuiltin,
      },

      // https://typescript-eslint.io/getting-started/typed-linting
      parserOptions: {
        projectService: true,
        tsconfigRootDir: import.meta.dirname,
      },
    },
    rules: {
      "no-console": ["error", { allow: ["clear", "info"] }],
    },
  },
);
"#;
        assert_eq!(config(flags), expected);
    }

    #[test]
    fn test_splices_follow_flags_for_every_combination() {
        for flags in all_flags() {
            let out = config(flags);

            assert_eq!(
                out.contains("import eslintConfigPrettier from \"eslint-config-prettier\";"),
                flags.with_prettier,
                "{flags:?}"
            );
            assert_eq!(out.contains("  eslintConfigPrettier,\n"), flags.with_prettier);
            assert_eq!(out.contains("@html-eslint/eslint-plugin"), flags.with_html);
            assert_eq!(out.contains("flat/recommended"), flags.with_html);
            assert_eq!(out.contains("import css from \"@eslint/css\";"), flags.with_css);
            assert_eq!(out.contains("css/recommended"), flags.with_css);
            assert_eq!(out.contains("typescript-eslint"), flags.with_typescript);
            assert_eq!(out.contains("parserOptions"), flags.with_typescript);
            assert!(out.contains("\"no-console\""));
            assert!(balanced(&out), "unbalanced output for {flags:?}:\n{out}");
            assert!(out.ends_with(";\n"));
            assert!(!out.contains("\n\n\n"));
            assert!(out.lines().all(|l| l == l.trim_end()));
        }
    }

    #[test]
    fn test_splice_order_is_fixed() {
        let flags = FeatureFlags {
            with_prettier: true,
            with_html: true,
            with_css: true,
            with_typescript: false,
        };
        let out = config(flags);
        let prettier = out.find("  eslintConfigPrettier,").unwrap();
        let html = out.find("...html.configs").unwrap();
        let css = out.find("files: [\"**/*.css\"]").unwrap();
        let settings = out.find("languageOptions").unwrap();
        assert!(prettier < html && html < css && css < settings);
    }

    #[test]
    fn test_output_is_deterministic() {
        for flags in all_flags() {
            assert_eq!(render_eslint(&flags), render_eslint(&flags));
        }
    }

    #[test]
    fn test_dependencies() {
        assert_eq!(
            dependencies(&FeatureFlags {
                with_prettier: true,
                ..FeatureFlags::default()
            }),
            ["eslint", "@eslint/js", "globals", "eslint-config-prettier"]
        );
        assert_eq!(
            dependencies(&FeatureFlags {
                with_prettier: true,
                with_html: true,
                with_css: true,
                with_typescript: true,
            }),
            [
                "eslint",
                "@eslint/js",
                "globals",
                "typescript-eslint",
                "eslint-config-prettier",
                "@html-eslint/parser",
                "@html-eslint/eslint-plugin",
                "@eslint/css",
            ]
        );
    }

    #[test]
    fn test_lint_script() {
        let rendered = render_eslint(&FeatureFlags::default());
        assert_eq!(rendered.scripts, [Script::new("lint:eslint", "eslint .")]);
        assert_eq!(rendered.label, "ESLint");
    }
}
